// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use kdl::{KdlDocument, KdlError};
use miette::{Diagnostic, IntoDiagnostic};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use tokio::fs::read_to_string;

pub const API_URL_ENV: &str = "WEBCODINO_API_URL";
pub const SITE_URL_ENV: &str = "WEBCODINO_SITE_URL";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_SITE_URL: &str = "http://localhost:3000";
const DEFAULT_API_URL: &str = "https://server.webcodino.ir/api";
const DEFAULT_TIMEOUT_SECS: u64 = 20;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Diagnostic, Error)]
pub enum ConfigError {
	#[error(transparent)]
	#[diagnostic(transparent)]
	Parse(#[from] KdlError),
	#[error("config value `{0}` must be a string")]
	#[diagnostic(code(webcodino::config::not_a_string))]
	NotAString(&'static str),
	#[error("config value `{0}` must be a positive integer")]
	#[diagnostic(code(webcodino::config::not_a_positive_integer))]
	NotAPositiveInteger(&'static str),
	#[error("`{value}` is not a valid bind address")]
	#[diagnostic(code(webcodino::config::bind_addr), help("use an address like 127.0.0.1:3000"))]
	InvalidBindAddr { value: String },
	#[error("unknown log level `{0}`")]
	#[diagnostic(help("use one of trace, debug, info, warn, error"))]
	InvalidLogLevel(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WebConfig {
	pub bind_addr: SocketAddr,
	/// Public base URL used for the sitemap and robots file
	pub site_url: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApiConfig {
	pub base_url: String,
	pub timeout: Duration,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigDocument {
	pub web: WebConfig,
	pub api: ApiConfig,
	pub log_level: tracing::Level,
}

pub async fn parse_config(config_path: &str) -> miette::Result<ConfigDocument> {
	let config_file_contents = read_to_string(config_path).await.into_diagnostic()?;
	let mut config = ConfigDocument::from_kdl(&config_file_contents)?;
	config.apply_env_overrides(|name| std::env::var(name).ok());
	Ok(config)
}

fn string_value(document: Option<&KdlDocument>, key: &'static str) -> Result<Option<String>, ConfigError> {
	let Some(value) = document.and_then(|document| document.get_arg(key)) else {
		return Ok(None);
	};
	match value.as_string() {
		Some(value) => Ok(Some(value.to_string())),
		None => Err(ConfigError::NotAString(key)),
	}
}

fn positive_integer_value(document: Option<&KdlDocument>, key: &'static str) -> Result<Option<u64>, ConfigError> {
	let Some(value) = document.and_then(|document| document.get_arg(key)) else {
		return Ok(None);
	};
	match value.as_integer().and_then(|value| u64::try_from(value).ok()) {
		Some(value) if value > 0 => Ok(Some(value)),
		_ => Err(ConfigError::NotAPositiveInteger(key)),
	}
}

impl ConfigDocument {
	/// Parses the KDL config document. Anything left out takes its default.
	pub fn from_kdl(contents: &str) -> Result<Self, ConfigError> {
		let document: KdlDocument = contents.parse()?;
		let web = document.get("web").and_then(|node| node.children());
		let api = document.get("api").and_then(|node| node.children());

		let bind_addr = string_value(web, "bind_addr")?.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
		let bind_addr = bind_addr
			.parse()
			.map_err(|_| ConfigError::InvalidBindAddr { value: bind_addr.clone() })?;
		let site_url = string_value(web, "site_url")?.unwrap_or_else(|| DEFAULT_SITE_URL.to_string());

		let base_url = string_value(api, "base_url")?.unwrap_or_else(|| DEFAULT_API_URL.to_string());
		let timeout_secs = positive_integer_value(api, "timeout_secs")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

		let log_level = string_value(Some(&document), "log_level")?.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
		let log_level = log_level
			.parse()
			.map_err(|_| ConfigError::InvalidLogLevel(log_level.clone()))?;

		Ok(Self {
			web: WebConfig { bind_addr, site_url },
			api: ApiConfig {
				base_url,
				timeout: Duration::from_secs(timeout_secs),
			},
			log_level,
		})
	}

	/// Lets the environment replace the API and site URLs.
	pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
		if let Some(api_url) = lookup(API_URL_ENV).filter(|value| !value.is_empty()) {
			self.api.base_url = api_url;
		}
		if let Some(site_url) = lookup(SITE_URL_ENV).filter(|value| !value.is_empty()) {
			self.web.site_url = site_url;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn full_document() {
		let config = ConfigDocument::from_kdl(
			r#"
			web {
				bind_addr "0.0.0.0:8080"
				site_url "https://webcodino.ir"
			}
			api {
				base_url "https://server.webcodino.ir/api"
				timeout_secs 5
			}
			log_level "debug"
			"#,
		)
		.unwrap();
		assert_eq!(config.web.bind_addr, "0.0.0.0:8080".parse().unwrap());
		assert_eq!(config.web.site_url, "https://webcodino.ir");
		assert_eq!(config.api.timeout, Duration::from_secs(5));
		assert_eq!(config.log_level, tracing::Level::DEBUG);
	}

	#[test]
	fn empty_document_uses_defaults() {
		let config = ConfigDocument::from_kdl("").unwrap();
		assert_eq!(config.web.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
		assert_eq!(config.api.base_url, DEFAULT_API_URL);
		assert_eq!(config.api.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
		assert_eq!(config.log_level, tracing::Level::INFO);
	}

	#[test]
	fn wrong_value_types_are_rejected() {
		assert!(matches!(
			ConfigDocument::from_kdl("web { bind_addr 3000 }"),
			Err(ConfigError::NotAString("bind_addr"))
		));
		assert!(matches!(
			ConfigDocument::from_kdl("api { timeout_secs 0 }"),
			Err(ConfigError::NotAPositiveInteger("timeout_secs"))
		));
		assert!(matches!(
			ConfigDocument::from_kdl(r#"web { bind_addr "nowhere" }"#),
			Err(ConfigError::InvalidBindAddr { .. })
		));
		assert!(matches!(
			ConfigDocument::from_kdl(r#"log_level "loud""#),
			Err(ConfigError::InvalidLogLevel(_))
		));
		assert!(matches!(ConfigDocument::from_kdl("web {"), Err(ConfigError::Parse(_))));
	}

	#[test]
	fn environment_overrides_urls() {
		let mut config = ConfigDocument::from_kdl("").unwrap();
		config.apply_env_overrides(|name| match name {
			API_URL_ENV => Some(String::from("http://127.0.0.1:9000/api")),
			SITE_URL_ENV => Some(String::new()),
			_ => None,
		});
		assert_eq!(config.api.base_url, "http://127.0.0.1:9000/api");
		assert_eq!(config.web.site_url, DEFAULT_SITE_URL);
	}
}
