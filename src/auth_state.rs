// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Signed-in user state and the toast notification queue.
//!
//! Both are plain values; the UI keeps them in signals provided as context and applies the transitions here.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_TOAST_DURATION_MS: u32 = 3000;

/// The user as known to the storefront after signing in
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SessionUser {
	pub id: String,
	pub name: String,
	pub email: String,
	pub phone: Option<String>,
	pub role: String,
}

impl SessionUser {
	pub fn is_admin(&self) -> bool {
		self.role == "admin"
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ToastKind {
	Success,
	Error,
	Info,
	Warning,
}

impl ToastKind {
	pub fn css_class(self) -> &'static str {
		match self {
			Self::Success => "toast_success",
			Self::Error => "toast_error",
			Self::Info => "toast_info",
			Self::Warning => "toast_warning",
		}
	}
}

/// A toast that hasn't been queued yet
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ToastRequest {
	pub message: String,
	pub kind: ToastKind,
	pub duration_ms: u32,
}

impl ToastRequest {
	pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
		Self {
			message: message.into(),
			kind,
			duration_ms: DEFAULT_TOAST_DURATION_MS,
		}
	}

	pub fn with_duration(mut self, duration_ms: u32) -> Self {
		self.duration_ms = duration_ms;
		self
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Toast {
	pub id: u64,
	pub message: String,
	pub kind: ToastKind,
	pub duration_ms: u32,
}

/// FIFO of toasts waiting to be shown
#[derive(Clone, Debug, Default)]
pub struct ToastQueue {
	next_id: u64,
	pending: VecDeque<Toast>,
}

impl ToastQueue {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues a toast and returns its ID.
	pub fn push(&mut self, request: ToastRequest) -> u64 {
		self.next_id += 1;
		let id = self.next_id;
		self.pending.push_back(Toast {
			id,
			message: request.message,
			kind: request.kind,
			duration_ms: request.duration_ms,
		});
		id
	}

	/// Removes a toast before it's shown. Returns whether it was still queued.
	pub fn dismiss(&mut self, id: u64) -> bool {
		let before = self.pending.len();
		self.pending.retain(|toast| toast.id != id);
		self.pending.len() != before
	}

	/// Takes every queued toast, oldest first.
	pub fn drain(&mut self) -> Vec<Toast> {
		self.pending.drain(..).collect()
	}

	pub fn is_empty(&self) -> bool {
		self.pending.is_empty()
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthState {
	user: Option<SessionUser>,
	loading: bool,
}

impl Default for AuthState {
	fn default() -> Self {
		Self::loading()
	}
}

impl AuthState {
	/// State before the current user has been looked up
	pub fn loading() -> Self {
		Self {
			user: None,
			loading: true,
		}
	}

	/// State once the lookup finished
	pub fn resolved(user: Option<SessionUser>) -> Self {
		Self { user, loading: false }
	}

	pub fn login(self, user: SessionUser) -> (Self, ToastRequest) {
		let toast = ToastRequest::new(format!("خوش آمدید {}! 🎉", user.name), ToastKind::Success).with_duration(4000);
		(Self::resolved(Some(user)), toast)
	}

	pub fn logout(self) -> (Self, ToastRequest) {
		let toast = ToastRequest::new("شما با موفقیت خارج شدید", ToastKind::Info);
		(Self::resolved(None), toast)
	}

	pub fn update_user(self, user: SessionUser) -> Self {
		Self {
			user: Some(user),
			loading: self.loading,
		}
	}

	pub fn user(&self) -> Option<&SessionUser> {
		self.user.as_ref()
	}

	pub fn is_authenticated(&self) -> bool {
		self.user.is_some()
	}

	pub fn is_admin(&self) -> bool {
		self.user.as_ref().is_some_and(SessionUser::is_admin)
	}

	pub fn is_loading(&self) -> bool {
		self.loading
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn user(role: &str) -> SessionUser {
		SessionUser {
			id: String::from("U1"),
			name: String::from("سارا"),
			email: String::from("sara@example.com"),
			phone: None,
			role: role.to_string(),
		}
	}

	#[test]
	fn login_then_logout() {
		let state = AuthState::loading();
		assert!(state.is_loading());
		assert!(!state.is_authenticated());

		let (state, welcome) = state.login(user("user"));
		assert!(state.is_authenticated());
		assert!(!state.is_loading());
		assert!(!state.is_admin());
		assert_eq!(welcome.kind, ToastKind::Success);
		assert_eq!(welcome.duration_ms, 4000);
		assert!(welcome.message.contains("سارا"));

		let (state, goodbye) = state.logout();
		assert!(!state.is_authenticated());
		assert_eq!(goodbye.kind, ToastKind::Info);
		assert_eq!(goodbye.duration_ms, DEFAULT_TOAST_DURATION_MS);
	}

	#[test]
	fn update_user_keeps_loading_flag() {
		let state = AuthState::loading().update_user(user("admin"));
		assert!(state.is_loading());
		assert!(state.is_admin());
	}

	#[test]
	fn toast_queue_is_fifo_with_unique_ids() {
		let mut queue = ToastQueue::new();
		let first = queue.push(ToastRequest::new("one", ToastKind::Info));
		let second = queue.push(ToastRequest::new("two", ToastKind::Error));
		assert_ne!(first, second);

		let drained = queue.drain();
		let messages: Vec<&str> = drained.iter().map(|toast| toast.message.as_str()).collect();
		assert_eq!(messages, vec!["one", "two"]);
		assert!(queue.is_empty());

		let third = queue.push(ToastRequest::new("three", ToastKind::Warning));
		assert!(third > second);
	}

	#[test]
	fn dismiss_removes_only_that_toast() {
		let mut queue = ToastQueue::new();
		let first = queue.push(ToastRequest::new("one", ToastKind::Info));
		queue.push(ToastRequest::new("two", ToastKind::Info));
		assert!(queue.dismiss(first));
		assert!(!queue.dismiss(first));
		let remaining: Vec<String> = queue.drain().into_iter().map(|toast| toast.message).collect();
		assert_eq!(remaining, vec![String::from("two")]);
	}
}
