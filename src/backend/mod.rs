// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The external API that owns accounts, tickets, and contact requests.

mod error;
mod http;
pub mod normalize;

pub use error::{BackendError, GENERIC_ERROR_MESSAGE};
pub use http::HttpBackend;

use crate::auth_state::SessionUser;
use crate::model::{
	ContactItem, ContactPage, ContactQuery, ContactStats, ContactStatus, NewTicket, Ticket, TicketDetail,
};
use crate::validation::{ContactForm, RegisterForm};
use async_trait::async_trait;

/// Result of a successful sign-in
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AuthSession {
	pub token: Option<String>,
	pub user: Option<SessionUser>,
	pub message: Option<String>,
}

/// Every call the storefront makes to the external API.
///
/// Calls taking a token attach it as a bearer token when one is given.
#[async_trait]
pub trait StorefrontBackend: Send + Sync {
	async fn login(&self, identifier: &str, password: &str) -> Result<AuthSession, BackendError>;

	/// Creates an account. Returns the created user if the API echoes it back.
	async fn register(&self, form: &RegisterForm) -> Result<Option<SessionUser>, BackendError>;

	/// Starts the password reset flow. Returns the API's message.
	async fn forgot_password(&self, email: &str) -> Result<Option<String>, BackendError>;

	async fn current_user(&self, token: Option<&str>) -> Result<Option<SessionUser>, BackendError>;

	async fn logout(&self, token: Option<&str>) -> Result<(), BackendError>;

	async fn change_password(
		&self,
		token: Option<&str>,
		current_password: &str,
		new_password: &str,
	) -> Result<Option<String>, BackendError>;

	async fn tickets(&self, token: Option<&str>) -> Result<Vec<Ticket>, BackendError>;

	async fn ticket_detail(&self, token: Option<&str>, ticket_id: &str) -> Result<TicketDetail, BackendError>;

	async fn create_ticket(&self, token: Option<&str>, ticket: &NewTicket) -> Result<(), BackendError>;

	async fn reply_to_ticket(&self, token: Option<&str>, ticket_id: &str, message: &str) -> Result<(), BackendError>;

	async fn admin_tickets(&self, token: Option<&str>) -> Result<Vec<Ticket>, BackendError>;

	async fn admin_ticket_detail(&self, token: Option<&str>, ticket_id: &str) -> Result<TicketDetail, BackendError>;

	/// Sends a contact form. Returns the API's message.
	async fn submit_contact(&self, form: &ContactForm) -> Result<Option<String>, BackendError>;

	async fn contacts(&self, token: Option<&str>, query: ContactQuery) -> Result<ContactPage, BackendError>;

	async fn contact(&self, token: Option<&str>, contact_id: &str) -> Result<Option<ContactItem>, BackendError>;

	async fn set_contact_status(
		&self,
		token: Option<&str>,
		contact_id: &str,
		status: ContactStatus,
	) -> Result<Option<ContactItem>, BackendError>;

	async fn delete_contact(&self, token: Option<&str>, contact_id: &str) -> Result<(), BackendError>;

	async fn contact_stats(&self, token: Option<&str>) -> Result<ContactStats, BackendError>;
}
