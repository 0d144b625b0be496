// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tower_sessions::session::{Id, Record};
use tower_sessions::{SessionStore, session_store};

/// Session storage kept in process memory. Sessions don't survive a restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
	sessions: Arc<Mutex<HashMap<Id, Record>>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of sessions currently held, expired or not
	pub async fn len(&self) -> usize {
		self.sessions.lock().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.sessions.lock().await.is_empty()
	}
}

fn is_expired(record: &Record, now: OffsetDateTime) -> bool {
	record.expiry_date <= now
}

#[async_trait]
impl SessionStore for MemoryStore {
	async fn create(&self, record: &mut Record) -> session_store::Result<()> {
		let mut sessions = self.sessions.lock().await;
		while sessions.contains_key(&record.id) {
			record.id = Id::default();
		}
		sessions.insert(record.id, record.clone());
		Ok(())
	}

	async fn save(&self, record: &Record) -> session_store::Result<()> {
		self.sessions.lock().await.insert(record.id, record.clone());
		Ok(())
	}

	async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
		let mut sessions = self.sessions.lock().await;

		let now = OffsetDateTime::now_utc();
		sessions.retain(|_, record| !is_expired(record, now));

		Ok(sessions.get(session_id).cloned())
	}

	async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
		self.sessions.lock().await.remove(session_id);
		Ok(())
	}
}
