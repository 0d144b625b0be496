// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decides which side of a ticket conversation a message is rendered on.

use serde::{Deserialize, Serialize};

/// Which side of the conversation a message belongs to
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
	User,
	Admin,
}

/// Which surface the thread is being rendered on
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ViewerContext {
	/// The customer's account area
	Customer,
	/// The back-office
	Admin,
}

impl ViewerContext {
	/// Role used when the upstream data is missing the identifiers needed to decide.
	pub fn fallback_role(self) -> SenderRole {
		match self {
			Self::Customer => SenderRole::User,
			Self::Admin => SenderRole::Admin,
		}
	}
}

/// Anything in a ticket thread that has a sender
pub trait Authored {
	fn sender_id(&self) -> Option<&str>;
}

/// Classifies a single message.
pub fn classify(
	message_sender: Option<&str>,
	ticket_creator: Option<&str>,
	viewer: Option<&str>,
	context: ViewerContext,
) -> SenderRole {
	let Some(sender) = message_sender else {
		return context.fallback_role();
	};

	if viewer == Some(sender) {
		return match context {
			ViewerContext::Admin => SenderRole::Admin,
			ViewerContext::Customer => match ticket_creator {
				Some(creator) if creator == sender => SenderRole::User,
				Some(_) => SenderRole::Admin,
				None => context.fallback_role(),
			},
		};
	}

	match ticket_creator {
		Some(creator) if creator == sender => SenderRole::User,
		Some(_) => SenderRole::Admin,
		None => context.fallback_role(),
	}
}

/// Classifies every message of a thread, in order.
pub fn classify_thread<T: Authored>(
	messages: &[T],
	ticket_creator: Option<&str>,
	viewer: Option<&str>,
	context: ViewerContext,
) -> Vec<SenderRole> {
	messages
		.iter()
		.map(|message| classify(message.sender_id(), ticket_creator, viewer, context))
		.collect()
}
