// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::api::{api_router, robots, sitemap};
use super::pages::app::App;
use super::pages::shell::shell;
use super::session::MemoryStore;
use super::state::AppState;
use crate::backend::StorefrontBackend;
use crate::config::ConfigDocument;
use axum::Router;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use leptos::logging::log;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list, render_app_to_stream};
use miette::IntoDiagnostic;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::util::ServiceExt;
use tower_http::services::ServeDir;
use tower_sessions::cookie::SameSite;
use tower_sessions::service::SessionManagerLayer;

pub async fn run_server_task(config: Arc<ConfigDocument>, backend: Arc<dyn StorefrontBackend>) {
	let task_result = run_server(config, backend).await;
	if let Err(error) = task_result {
		tracing::error!(source = ?error, "Web server failed to run");
	}
}

async fn run_server(config: Arc<ConfigDocument>, backend: Arc<dyn StorefrontBackend>) -> miette::Result<()> {
	let web_config = get_configuration(None).into_diagnostic()?;
	let site_addr = config.web.bind_addr;

	let app_state = AppState {
		leptos_options: web_config.leptos_options,
		config,
		backend,
	};
	let app = build_router(app_state);

	log!("Listening on http://{}", &site_addr);
	let listener = TcpListener::bind(&site_addr).await.into_diagnostic()?;
	axum::serve(listener, app.into_make_service()).await.into_diagnostic()?;

	Ok(())
}

/// The whole site: pages, the JSON API, crawler files, and static assets.
pub fn build_router(app_state: AppState) -> Router {
	let routes = generate_route_list(App);

	let session_layer = SessionManagerLayer::new(MemoryStore::new()).with_same_site(SameSite::Lax);

	Router::new()
		.leptos_routes_with_context(
			&app_state,
			routes,
			{
				let app_state = app_state.clone();
				move || provide_context(app_state.clone())
			},
			{
				let leptos_options = app_state.leptos_options.clone();
				move || shell(leptos_options.clone())
			},
		)
		.nest("/api", api_router())
		.route("/sitemap.xml", get(sitemap))
		.route("/robots.txt", get(robots))
		.fallback(file_and_error_handler)
		.layer(session_layer)
		.with_state(app_state)
}

async fn file_and_error_handler(uri: Uri, State(state): State<AppState>, request: Request) -> Response {
	let site_root_dir = state.leptos_options.site_root.clone();
	let response = get_static_file(uri.clone(), &site_root_dir).await;
	let response = match response {
		Ok(response) => response,
		Err(error) => return error.into_response(),
	};

	if response.status() == StatusCode::OK {
		response.into_response()
	} else {
		let handler = render_app_to_stream(App);
		handler(request).await.into_response()
	}
}

async fn get_static_file(uri: Uri, root: &str) -> Result<Response, StatusCode> {
	let Ok(request) = Request::builder().uri(uri.clone()).body(Body::empty()) else {
		return Err(StatusCode::INTERNAL_SERVER_ERROR);
	};

	match ServeDir::new(root).oneshot(request).await {
		Ok(response) => Ok(response.into_response()),
		Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::web::api::test_support::{FakeBackend, app_state, get};

	#[tokio::test]
	async fn crawler_files_use_the_configured_site() {
		let app = build_router(app_state(Arc::new(FakeBackend::default())));

		let response = app.clone().oneshot(get("/robots.txt")).await.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let body = String::from_utf8(body.to_vec()).unwrap();
		assert!(body.contains("Disallow: /api/*"));
		assert!(body.contains("Sitemap: http://localhost:3000/sitemap.xml"));

		let response = app.oneshot(get("/sitemap.xml")).await.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let body = String::from_utf8(body.to_vec()).unwrap();
		assert!(body.contains("<loc>http://localhost:3000/</loc>"));
		assert!(body.contains("<loc>http://localhost:3000/products</loc>"));
	}
}
