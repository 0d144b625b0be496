// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::attribution::{SenderRole, ViewerContext, classify_thread};
use crate::auth_state::{AuthState, SessionUser, ToastQueue, ToastRequest};
use crate::model::{GENERIC_ERROR_MESSAGE, Ticket, TicketDetail};
use chrono::DateTime;
use leptos::prelude::*;
use leptos_router::params::Params;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Params, PartialEq)]
pub struct TicketParams {
	pub ticket: Option<String>,
}

/// Signed-in user and pending toasts, provided to every page
#[derive(Clone, Copy)]
pub struct AuthContext {
	pub state: RwSignal<AuthState>,
	pub toasts: RwSignal<ToastQueue>,
}

impl AuthContext {
	pub fn new() -> Self {
		Self {
			state: RwSignal::new(AuthState::loading()),
			toasts: RwSignal::new(ToastQueue::new()),
		}
	}

	pub fn notify(&self, toast: ToastRequest) {
		self.toasts.update(|queue| {
			queue.push(toast);
		});
	}

	pub fn resolve(&self, user: Option<SessionUser>) {
		self.state.set(AuthState::resolved(user));
	}

	pub fn signed_in(&self, user: SessionUser) {
		let (state, toast) = self.state.get_untracked().login(user);
		self.state.set(state);
		self.notify(toast);
	}

	pub fn signed_out(&self) {
		let (state, toast) = self.state.get_untracked().logout();
		self.state.set(state);
		self.notify(toast);
	}
}

pub fn use_auth() -> AuthContext {
	expect_context::<AuthContext>()
}

/// The message to show for a failed server function call
pub fn error_text(error: &ServerFnError) -> String {
	match error {
		ServerFnError::ServerError(message) => message.clone(),
		_ => String::from(GENERIC_ERROR_MESSAGE),
	}
}

/// Formats an upstream timestamp as `YYYY/MM/DD HH:MM`, or shows it unchanged if it doesn't parse.
pub fn display_time(timestamp: &str) -> String {
	match DateTime::parse_from_rfc3339(timestamp) {
		Ok(time) => time.format("%Y/%m/%d %H:%M").to_string(),
		Err(_) => timestamp.to_string(),
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ThreadMessage {
	pub id: String,
	pub message: String,
	pub created_at: String,
	pub sender_name: Option<String>,
	pub role: SenderRole,
}

/// A ticket and its messages, each already placed on its side of the conversation
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TicketThread {
	pub ticket: Option<Ticket>,
	pub messages: Vec<ThreadMessage>,
}

impl TicketThread {
	pub fn new(detail: TicketDetail, viewer: Option<&str>, context: ViewerContext) -> Self {
		let creator = detail.ticket.as_ref().and_then(Ticket::creator_id);
		let roles = classify_thread(&detail.messages, creator, viewer, context);
		let messages = detail
			.messages
			.into_iter()
			.zip(roles)
			.map(|(message, role)| ThreadMessage {
				id: message.id,
				message: message.message,
				created_at: message.created_at,
				sender_name: message.sender.and_then(|sender| sender.name),
				role,
			})
			.collect();
		Self {
			ticket: detail.ticket,
			messages,
		}
	}
}

#[server]
pub async fn get_current_user() -> Result<Option<SessionUser>, ServerFnError> {
	use super::server_utils::{get_backend, get_credentials_from_request, user_facing_error};

	let credentials = get_credentials_from_request().await?;
	credentials
		.refresh_user(get_backend().as_ref())
		.await
		.map_err(user_facing_error)
}

#[server]
pub async fn log_in(identifier: String, password: String, remember: bool) -> Result<SessionUser, ServerFnError> {
	use super::server_utils::{get_backend, get_credentials_from_request, user_facing_error};
	use crate::backend::BackendError;
	use crate::validation::LoginForm;
	use crate::web::auth::sign_in;
	use crate::web::error::ApiError;

	let form = LoginForm {
		identifier,
		password,
		remember,
	};
	ApiError::check(form.validate()).map_err(user_facing_error)?;

	let credentials = get_credentials_from_request().await?;
	let auth = get_backend()
		.login(form.identifier.trim(), &form.password)
		.await
		.map_err(user_facing_error)?;
	let Some(user) = auth.user else {
		let message = auth.message.unwrap_or_else(|| String::from(GENERIC_ERROR_MESSAGE));
		return Err(user_facing_error(BackendError::Upstream { status: 401, message }));
	};

	sign_in(&credentials.session, auth.token.as_deref(), Some(&user), remember)
		.await
		.map_err(user_facing_error)?;
	Ok(user)
}

#[server]
pub async fn log_out() -> Result<(), ServerFnError> {
	use super::server_utils::{get_backend, get_credentials_from_request};
	use crate::web::auth::sign_out;

	let credentials = get_credentials_from_request().await?;
	if let Err(error) = get_backend().logout(credentials.token()).await {
		tracing::warn!(source = ?error, "upstream logout failed");
	}
	if let Err(error) = sign_out(&credentials.session).await {
		tracing::error!(source = ?error, "failed to clear session");
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{TicketMessage, TicketParty};

	fn party(id: &str, name: &str) -> Option<TicketParty> {
		Some(TicketParty {
			id: Some(id.to_string()),
			name: Some(name.to_string()),
			..Default::default()
		})
	}

	fn detail() -> TicketDetail {
		TicketDetail {
			ticket: Some(Ticket {
				id: String::from("t1"),
				title: String::from("مشکل ورود"),
				status: String::from("open"),
				priority: String::from("medium"),
				department: String::from("Technical Support"),
				created_at: String::from("2025-03-04T10:00:00Z"),
				created_by: party("U1", "سارا"),
			}),
			messages: vec![
				TicketMessage {
					id: String::from("m1"),
					message: String::from("سلام"),
					created_at: String::from("2025-03-04T10:00:00Z"),
					sender: party("U1", "سارا"),
				},
				TicketMessage {
					id: String::from("m2"),
					message: String::from("در حال بررسی است"),
					created_at: String::from("2025-03-04T11:00:00Z"),
					sender: party("A9", "پشتیبانی"),
				},
				TicketMessage {
					id: String::from("m3"),
					message: String::from("?"),
					created_at: String::from("2025-03-04T12:00:00Z"),
					sender: None,
				},
			],
		}
	}

	#[test]
	fn thread_places_messages_by_sender() {
		let thread = TicketThread::new(detail(), Some("U1"), ViewerContext::Customer);
		let roles: Vec<SenderRole> = thread.messages.iter().map(|message| message.role).collect();
		assert_eq!(roles, vec![SenderRole::User, SenderRole::Admin, SenderRole::User]);
		assert_eq!(thread.messages[1].sender_name.as_deref(), Some("پشتیبانی"));
	}

	#[test]
	fn admin_view_falls_back_to_admin() {
		let thread = TicketThread::new(detail(), Some("A9"), ViewerContext::Admin);
		let roles: Vec<SenderRole> = thread.messages.iter().map(|message| message.role).collect();
		assert_eq!(roles, vec![SenderRole::User, SenderRole::Admin, SenderRole::Admin]);
	}

	#[test]
	fn unparseable_times_are_shown_as_is() {
		assert_eq!(display_time("2025-03-04T10:05:00Z"), "2025/03/04 10:05");
		assert_eq!(display_time("دیروز"), "دیروز");
	}

	#[test]
	fn only_server_errors_carry_their_text() {
		assert_eq!(error_text(&ServerFnError::ServerError(String::from("خطا"))), "خطا");
		assert_eq!(
			error_text(&ServerFnError::Request(String::from("offline"))),
			GENERIC_ERROR_MESSAGE
		);
	}
}
