// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Where the external API's bearer token lives between requests.

use super::error::ApiError;
use super::session_key::{AUTH_TOKEN, SESSION_USER};
use crate::auth_state::SessionUser;
use crate::backend::{BackendError, StorefrontBackend};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use tower_sessions::{Expiry, Session};

/// How long a remembered sign-in lasts without activity
pub const REMEMBER_ME_DAYS: i64 = 30;

/// The caller's session and the token to use for them.
///
/// An `Authorization: Bearer` header takes precedence over the token stored in the session.
pub struct Credentials {
	pub session: Session,
	pub token: Option<String>,
}

impl Credentials {
	pub fn token(&self) -> Option<&str> {
		self.token.as_deref()
	}

	pub fn require_token(&self) -> Result<&str, ApiError> {
		self.token().ok_or(ApiError::Unauthorized)
	}

	pub async fn user(&self) -> Result<Option<SessionUser>, ApiError> {
		Ok(session_user(&self.session).await?)
	}

	/// Asks the external API who the token belongs to and stores the answer in the session.
	///
	/// A token the API rejects signs the session out. When the API can't be reached, the stored user is kept.
	pub async fn refresh_user(&self, backend: &dyn StorefrontBackend) -> Result<Option<SessionUser>, ApiError> {
		let Some(token) = self.token() else {
			return self.user().await;
		};
		match backend.current_user(Some(token)).await {
			Ok(Some(user)) => {
				self.session.insert(SESSION_USER, &user).await?;
				Ok(Some(user))
			}
			Ok(None) | Err(BackendError::Upstream { status: 401, .. }) => {
				sign_out(&self.session).await?;
				Ok(None)
			}
			Err(error) => {
				tracing::warn!(source = ?error, "couldn't refresh the signed-in user");
				self.user().await
			}
		}
	}

	/// Requires a signed-in administrator.
	pub async fn require_admin(&self) -> Result<&str, ApiError> {
		let token = self.require_token()?;
		match self.user().await? {
			Some(user) if !user.is_admin() => Err(ApiError::Forbidden),
			// A bare header token has no stored user to check; the external API enforces the role.
			_ => Ok(token),
		}
	}
}

impl<S: Send + Sync> FromRequestParts<S> for Credentials {
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
		let header = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
			.await
			.ok()
			.map(|TypedHeader(Authorization(bearer))| bearer.token().to_string());

		let session = match Session::from_request_parts(parts, state).await {
			Ok(session) => session,
			Err((status, message)) => {
				tracing::error!(%status, rejection = message, "session layer is missing");
				return Err(ApiError::Unauthorized);
			}
		};

		let token = match header {
			Some(token) => Some(token),
			None => session.get::<String>(AUTH_TOKEN).await?,
		};

		Ok(Self { session, token })
	}
}

pub async fn session_user(session: &Session) -> Result<Option<SessionUser>, tower_sessions::session::Error> {
	session.get(SESSION_USER).await
}

/// Stores a fresh sign-in in the session.
///
/// Remembered sign-ins expire after [`REMEMBER_ME_DAYS`] of inactivity; others end with the browser session.
pub async fn sign_in(
	session: &Session,
	token: Option<&str>,
	user: Option<&SessionUser>,
	remember: bool,
) -> Result<(), tower_sessions::session::Error> {
	session.cycle_id().await?;
	if let Some(token) = token {
		session.insert(AUTH_TOKEN, token).await?;
	}
	if let Some(user) = user {
		session.insert(SESSION_USER, user).await?;
	}
	let expiry = if remember {
		Expiry::OnInactivity(time::Duration::days(REMEMBER_ME_DAYS))
	} else {
		Expiry::OnSessionEnd
	};
	session.set_expiry(Some(expiry));
	Ok(())
}

pub async fn sign_out(session: &Session) -> Result<(), tower_sessions::session::Error> {
	session.flush().await
}
