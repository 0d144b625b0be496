// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub use crate::model::GENERIC_ERROR_MESSAGE;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
	/// The API answered with a non-success status
	#[error("upstream API returned {status}: {message}")]
	Upstream { status: u16, message: String },
	#[error("couldn't reach the upstream API")]
	Transport(#[from] reqwest::Error),
	#[error("upstream API response was malformed: {0}")]
	MalformedResponse(String),
	/// An id that can't stand as a single path segment; nothing was sent
	#[error("{0:?} isn't a usable record id")]
	InvalidId(String),
}

impl BackendError {
	/// Message suitable for showing to the user
	pub fn user_message(&self) -> &str {
		match self {
			Self::Upstream { message, .. } => message,
			Self::InvalidId(_) => "NOT_FOUND",
			Self::Transport(_) | Self::MalformedResponse(_) => GENERIC_ERROR_MESSAGE,
		}
	}

	/// HTTP status to relay to the browser
	pub fn status_code(&self) -> u16 {
		match self {
			Self::Upstream { status, .. } if (400..500).contains(status) => *status,
			Self::InvalidId(_) => 404,
			_ => 502,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn upstream_client_errors_are_relayed() {
		let error = BackendError::Upstream {
			status: 401,
			message: String::from("رمز عبور اشتباه است"),
		};
		assert_eq!(error.status_code(), 401);
		assert_eq!(error.user_message(), "رمز عبور اشتباه است");
	}

	#[test]
	fn server_side_failures_become_bad_gateway() {
		let error = BackendError::Upstream {
			status: 500,
			message: String::from(GENERIC_ERROR_MESSAGE),
		};
		assert_eq!(error.status_code(), 502);
		let malformed = BackendError::MalformedResponse(String::from("missing ticket id"));
		assert_eq!(malformed.status_code(), 502);
		assert_eq!(malformed.user_message(), GENERIC_ERROR_MESSAGE);
	}
}
