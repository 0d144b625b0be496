// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::backend::StorefrontBackend;
use crate::web::auth::Credentials;
use crate::web::error::ApiError;
use crate::web::state::AppState;
use leptos::prelude::*;
use leptos_axum::extract_with_state;
use std::sync::Arc;

const SIGN_IN_REQUIRED: &str = "لطفا ابتدا وارد حساب کاربری خود شوید";
const ADMIN_REQUIRED: &str = "دسترسی به این بخش فقط برای مدیران امکان‌پذیر است";

/// Gets the caller's session and token.
/// Must be used from a server function; relies on extracting request data.
pub async fn get_credentials_from_request() -> Result<Credentials, ServerFnError> {
	let state: AppState = expect_context();
	let credentials: Credentials = extract_with_state(&state).await?;
	Ok(credentials)
}

pub fn get_backend() -> Arc<dyn StorefrontBackend> {
	let state: AppState = expect_context();
	Arc::clone(&state.backend)
}

/// Converts a failure into the message the page shows, logging what the user doesn't see.
pub fn user_facing_error(error: impl Into<ApiError>) -> ServerFnError {
	let error = error.into();
	let message = match &error {
		ApiError::Unauthorized => SIGN_IN_REQUIRED,
		ApiError::Forbidden => ADMIN_REQUIRED,
		ApiError::Backend(source) => {
			tracing::error!(source = ?source, "external API call failed");
			error.message()
		}
		ApiError::Session(source) => {
			tracing::error!(source = ?source, "session storage failed");
			error.message()
		}
		_ => error.message(),
	};
	ServerFnError::ServerError(message.to_string())
}
