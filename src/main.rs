// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::IntoDiagnostic;
use std::sync::Arc;
use webcodino::backend::HttpBackend;
use webcodino::config::parse_config;
use webcodino::web::server::run_server_task;

const DEFAULT_CONFIG_PATH: &str = "config.kdl";

#[tokio::main]
async fn main() -> miette::Result<()> {
	let config_path = std::env::args().nth(1).unwrap_or_else(|| String::from(DEFAULT_CONFIG_PATH));
	let config = parse_config(&config_path).await?;

	tracing_subscriber::fmt().with_max_level(config.log_level).init();
	tracing::info!(api = %config.api.base_url, "loaded configuration from {}", config_path);

	let backend = HttpBackend::new(&config.api.base_url, config.api.timeout).into_diagnostic()?;

	run_server_task(Arc::new(config), Arc::new(backend)).await;

	Ok(())
}
