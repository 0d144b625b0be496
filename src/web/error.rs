// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::backend::{BackendError, GENERIC_ERROR_MESSAGE};
use crate::validation::ValidationError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Failure of a REST handler, rendered as `{ "error": ... }`
#[derive(Debug, Error)]
pub enum ApiError {
	/// A required parameter is missing or malformed; the code is sent as the error
	#[error("bad request: {0}")]
	BadRequest(&'static str),
	#[error("form failed validation")]
	Invalid(Vec<ValidationError>),
	#[error("not signed in")]
	Unauthorized,
	#[error("signed-in user isn't an administrator")]
	Forbidden,
	#[error("resource not found")]
	NotFound,
	/// The body wasn't JSON of the expected shape
	#[error("unusable request body: {0}")]
	Body(#[from] JsonRejection),
	#[error("unusable query string: {0}")]
	Query(#[from] QueryRejection),
	#[error(transparent)]
	Backend(#[from] BackendError),
	#[error("session storage failed: {0}")]
	Session(#[from] tower_sessions::session::Error),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
	error: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	fields: Option<&'a [ValidationError]>,
}

impl ApiError {
	pub fn status(&self) -> StatusCode {
		match self {
			Self::BadRequest(_) | Self::Invalid(_) | Self::Body(_) | Self::Query(_) => StatusCode::BAD_REQUEST,
			Self::Unauthorized => StatusCode::UNAUTHORIZED,
			Self::Forbidden => StatusCode::FORBIDDEN,
			Self::NotFound => StatusCode::NOT_FOUND,
			Self::Backend(error) => StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::BAD_GATEWAY),
			Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// What the caller is shown
	pub fn message(&self) -> &str {
		match self {
			Self::BadRequest(code) => *code,
			Self::Invalid(errors) => errors.first().map(|error| error.message.as_str()).unwrap_or("invalid"),
			Self::Body(_) | Self::Query(_) => "invalid",
			Self::Unauthorized => "unauthorized",
			Self::Forbidden => "forbidden",
			Self::NotFound => "NOT_FOUND",
			Self::Backend(error) => error.user_message(),
			Self::Session(_) => GENERIC_ERROR_MESSAGE,
		}
	}

	/// Turns a validation result into an error if anything failed.
	pub fn check(errors: Vec<ValidationError>) -> Result<(), Self> {
		if errors.is_empty() {
			Ok(())
		} else {
			Err(Self::Invalid(errors))
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let status = self.status();
		match &self {
			Self::Backend(error) => tracing::error!(source = ?error, "external API call failed"),
			Self::Session(error) => tracing::error!(source = ?error, "session storage failed"),
			Self::Body(error) => tracing::debug!(%error, "rejected request body"),
			Self::Query(error) => tracing::debug!(%error, "rejected query string"),
			_ => (),
		}

		let message = self.message();
		let fields = match &self {
			Self::Invalid(errors) => Some(errors.as_slice()),
			_ => None,
		};

		(status, Json(ErrorBody { error: message, fields })).into_response()
	}
}
