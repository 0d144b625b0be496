// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Done, Items, JsonBody, QueryParams};
use crate::catalog::content::{BlogPost, Project, all_posts, all_projects};
use crate::catalog::filter_by_subcategories;
use crate::catalog::products::{Product, all_products};
use crate::seo::{render_sitemap, robots_txt, sitemap_entries};
use crate::validation::ContactForm;
use crate::web::error::ApiError;
use crate::web::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SubcategoryQuery {
	subcategories: Option<String>,
}

pub async fn products(WithRejection(Query(query), _): QueryParams<SubcategoryQuery>) -> Json<Items<Vec<Product>>> {
	Json(Items {
		items: filter_by_subcategories(all_products(), query.subcategories.as_deref()),
	})
}

pub async fn projects(WithRejection(Query(query), _): QueryParams<SubcategoryQuery>) -> Json<Items<Vec<Project>>> {
	Json(Items {
		items: filter_by_subcategories(&all_projects(), query.subcategories.as_deref()),
	})
}

pub async fn blog(WithRejection(Query(query), _): QueryParams<SubcategoryQuery>) -> Json<Items<Vec<BlogPost>>> {
	Json(Items {
		items: filter_by_subcategories(&all_posts(), query.subcategories.as_deref()),
	})
}

pub async fn contact(
	State(state): State<AppState>,
	WithRejection(Json(form), _): JsonBody<ContactForm>,
) -> Result<Json<Done>, ApiError> {
	ApiError::check(form.validate())?;
	let message = state.backend.submit_contact(&form).await?;
	Ok(Json(Done::with_message(message)))
}

pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
	let entries = sitemap_entries(&state.config.web.site_url, chrono::Utc::now());
	(
		[(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
		render_sitemap(&entries),
	)
}

pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
	(
		[(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
		robots_txt(&state.config.web.site_url),
	)
}

#[cfg(test)]
mod tests {
	use crate::web::api::test_support::*;
	use axum::http::StatusCode;
	use serde_json::json;
	use std::sync::Arc;
	use tower::ServiceExt;

	#[tokio::test]
	async fn products_filter_by_query() {
		let app = router(Arc::new(FakeBackend::default()));

		let all = json_body(app.clone().oneshot(get("/api/products")).await.unwrap()).await;
		let all = all["items"].as_array().unwrap().len();

		let uri = "/api/products?subcategories=%D8%B1%D8%A8%D8%A7%D8%AA%20%D8%AA%D9%84%DA%AF%D8%B1%D8%A7%D9%85,%20,";
		let bots = json_body(app.clone().oneshot(get(uri)).await.unwrap()).await;
		let bots = bots["items"].as_array().unwrap();
		assert!(!bots.is_empty());
		assert!(bots.len() < all);
		assert!(bots.iter().all(|product| product["subcategory"] == "ربات تلگرام"));

		let blank = json_body(app.oneshot(get("/api/products?subcategories=,")).await.unwrap()).await;
		assert_eq!(blank["items"].as_array().unwrap().len(), all);
	}

	#[tokio::test]
	async fn contact_checks_the_phone_number() {
		let backend = Arc::new(FakeBackend::default());
		let app = router(backend.clone());
		let form = |phone: &str| {
			json!({
				"name": "سارا",
				"email": "sara@example.com",
				"phone": phone,
				"subject": "همکاری",
				"description": "سلام",
			})
		};

		let response = app.clone().oneshot(post_json("/api/contact", form("123"))).await.unwrap();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
		assert!(backend.calls_to("submit_contact").is_empty());

		let response = app.oneshot(post_json("/api/contact", form("09121234567"))).await.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(json_body(response).await["message"], "پیام شما ثبت شد");
	}

	#[tokio::test]
	async fn contact_rejects_a_body_that_isnt_json() {
		let backend = Arc::new(FakeBackend::default());
		let request = axum::http::Request::builder()
			.method("POST")
			.uri("/api/contact")
			.header(axum::http::header::CONTENT_TYPE, "application/json")
			.body(axum::body::Body::from("name=sara"))
			.unwrap();
		let response = router(backend.clone()).oneshot(request).await.unwrap();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
		assert_eq!(json_body(response).await, json!({ "error": "invalid" }));
		assert!(backend.calls_to("submit_contact").is_empty());
	}
}
