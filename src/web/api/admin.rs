// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Done, Item, Items, JsonBody, QueryParams};
use crate::catalog::admin::{
	AdminOrderRow, AdminProject, AdminTicketRow, AdminUserRow, FinanceTransaction, NewAdminUser, admin_orders,
	admin_projects, admin_tickets, finance_transactions, users as seeded_users,
};
use crate::model::{ContactItem, ContactPage, ContactQuery, ContactStats, ContactStatus};
use crate::web::auth::Credentials;
use crate::web::error::ApiError;
use crate::web::state::AppState;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct StatusChange {
	status: ContactStatus,
}

pub async fn users() -> Json<Items<Vec<AdminUserRow>>> {
	Json(Items { items: seeded_users() })
}

/// Echoes the new user back. A body that isn't valid JSON counts as an empty one.
pub async fn create_user(body: Bytes) -> (StatusCode, Json<Item<AdminUserRow>>) {
	let new_user: NewAdminUser = serde_json::from_slice(&body).unwrap_or_default();
	let item = new_user.into_row(format!("U-{}", cuid2::create_id()));
	(StatusCode::CREATED, Json(Item { item }))
}

pub async fn orders() -> Json<Items<Vec<AdminOrderRow>>> {
	Json(Items { items: admin_orders() })
}

pub async fn finance() -> Json<Items<Vec<FinanceTransaction>>> {
	Json(Items {
		items: finance_transactions(),
	})
}

pub async fn projects() -> Json<Items<Vec<AdminProject>>> {
	Json(Items {
		items: admin_projects(),
	})
}

pub async fn tickets() -> Json<Items<Vec<AdminTicketRow>>> {
	Json(Items { items: admin_tickets() })
}

pub async fn contacts(
	State(state): State<AppState>,
	credentials: Credentials,
	WithRejection(Query(query), _): QueryParams<ContactQuery>,
) -> Result<Json<ContactPage>, ApiError> {
	let token = credentials.require_admin().await?;
	Ok(Json(state.backend.contacts(Some(token), query).await?))
}

pub async fn contact_stats(
	State(state): State<AppState>,
	credentials: Credentials,
) -> Result<Json<Item<ContactStats>>, ApiError> {
	let token = credentials.require_admin().await?;
	let item = state.backend.contact_stats(Some(token)).await?;
	Ok(Json(Item { item }))
}

pub async fn contact(
	State(state): State<AppState>,
	credentials: Credentials,
	Path(id): Path<String>,
) -> Result<Json<Item<ContactItem>>, ApiError> {
	let token = credentials.require_admin().await?;
	let item = state.backend.contact(Some(token), &id).await?.ok_or(ApiError::NotFound)?;
	Ok(Json(Item { item }))
}

/// Marks a contact request as new or answered. The API may not echo the contact back.
pub async fn set_contact_status(
	State(state): State<AppState>,
	credentials: Credentials,
	Path(id): Path<String>,
	WithRejection(Json(change), _): JsonBody<StatusChange>,
) -> Result<Json<Item<Option<ContactItem>>>, ApiError> {
	let token = credentials.require_admin().await?;
	let item = state.backend.set_contact_status(Some(token), &id, change.status).await?;
	tracing::info!(contact = %id, status = change.status.as_str(), "contact status changed");
	Ok(Json(Item { item }))
}

pub async fn delete_contact(
	State(state): State<AppState>,
	credentials: Credentials,
	Path(id): Path<String>,
) -> Result<Json<Done>, ApiError> {
	let token = credentials.require_admin().await?;
	state.backend.delete_contact(Some(token), &id).await?;
	tracing::info!(contact = %id, "contact deleted");
	Ok(Json(Done::ok()))
}

#[cfg(test)]
mod tests {
	use crate::model::{ContactQuery, ContactStatus};
	use crate::web::api::test_support::*;
	use axum::body::Body;
	use axum::http::{Request, StatusCode, header};
	use serde_json::json;
	use std::sync::Arc;
	use tower::ServiceExt;

	#[tokio::test]
	async fn created_user_gets_defaults() {
		let app = router(Arc::new(FakeBackend::default()));
		let response = app
			.oneshot(post_json("/api/admin/users", json!({ "name": "نگار", "email": "negar@example.com" })))
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::CREATED);

		let item = &json_body(response).await["item"];
		assert!(item["id"].as_str().unwrap().starts_with("U-"));
		assert_eq!(item["name"], "نگار");
		assert_eq!(item["role"], "کاربر");
		assert_eq!(item["status"], "فعال");
		assert_eq!(item["createdAt"], "1403/01/01");
	}

	#[tokio::test]
	async fn garbage_body_still_creates_a_user() {
		let app = router(Arc::new(FakeBackend::default()));
		let request = Request::builder()
			.method("POST")
			.uri("/api/admin/users")
			.body(Body::from("not json"))
			.unwrap();
		let response = app.oneshot(request).await.unwrap();
		assert_eq!(response.status(), StatusCode::CREATED);
		assert_eq!(json_body(response).await["item"]["name"], "");
	}

	#[tokio::test]
	async fn orders_carry_user_details() {
		let app = router(Arc::new(FakeBackend::default()));
		let response = app.oneshot(get("/api/admin/orders")).await.unwrap();
		let body = json_body(response).await;
		let first = &body["items"][0];
		assert!(first["id"].is_string());
		assert!(first["userName"].is_string());
		assert!(first["userNationalId"].is_string());
	}

	async fn signed_in(app: &axum::Router, identifier: &str) -> String {
		let response = app
			.clone()
			.oneshot(post_json(
				"/api/account/login",
				json!({ "identifier": identifier, "password": GOOD_PASSWORD }),
			))
			.await
			.unwrap();
		session_cookie(&response)
	}

	fn request(method: &str, uri: &str, cookie: &str, body: Body) -> Request<Body> {
		Request::builder()
			.method(method)
			.uri(uri)
			.header(header::COOKIE, cookie)
			.header(header::CONTENT_TYPE, "application/json")
			.body(body)
			.unwrap()
	}

	#[tokio::test]
	async fn contacts_need_an_administrator() {
		let backend = Arc::new(FakeBackend::default());
		let app = router(backend.clone());

		let response = app.clone().oneshot(get("/api/admin/contacts")).await.unwrap();
		assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

		let cookie = signed_in(&app, "sara@example.com").await;
		let response = app
			.oneshot(with_cookie(get("/api/admin/contacts/stats"), &cookie))
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::FORBIDDEN);
		assert!(backend.calls_to("contact_stats").is_empty());
	}

	#[tokio::test]
	async fn admin_manages_contacts() {
		let backend = Arc::new(FakeBackend::default());
		let app = router(backend.clone());
		let cookie = signed_in(&app, "admin@example.com").await;

		let response = app
			.clone()
			.oneshot(with_cookie(get("/api/admin/contacts?page=2&status=answered"), &cookie))
			.await
			.unwrap();
		assert_eq!(json_body(response).await["items"][0]["id"], "c1");
		assert_eq!(
			backend.contact_queries.lock().unwrap()[0],
			ContactQuery {
				page: Some(2),
				limit: None,
				status: Some(ContactStatus::Answered),
			}
		);

		let response = app
			.clone()
			.oneshot(with_cookie(get("/api/admin/contacts/missing"), &cookie))
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::NOT_FOUND);

		let change = Body::from(json!({ "status": "answered" }).to_string());
		let response = app
			.clone()
			.oneshot(request("PATCH", "/api/admin/contacts/c1/status", &cookie, change))
			.await
			.unwrap();
		assert_eq!(json_body(response).await["item"]["status"], "answered");

		let response = app
			.oneshot(request("DELETE", "/api/admin/contacts/c1", &cookie, Body::empty()))
			.await
			.unwrap();
		assert_eq!(json_body(response).await, json!({ "ok": true }));
		assert_eq!(
			backend.calls_to("delete_contact"),
			vec![Some(String::from("tok-admin@example.com"))]
		);
	}

	#[tokio::test]
	async fn seeded_tables_are_listed() {
		let app = router(Arc::new(FakeBackend::default()));
		for uri in ["/api/admin/users", "/api/admin/finance", "/api/admin/projects", "/api/admin/tickets"] {
			let response = app.clone().oneshot(get(uri)).await.unwrap();
			assert_eq!(response.status(), StatusCode::OK, "{uri}");
			assert!(!json_body(response).await["items"].as_array().unwrap().is_empty(), "{uri}");
		}
	}

	#[tokio::test]
	async fn unusable_filters_and_statuses_are_rejected() {
		let backend = Arc::new(FakeBackend::default());
		let app = router(backend.clone());
		let cookie = signed_in(&app, "admin@example.com").await;

		for uri in ["/api/admin/contacts?status=bogus", "/api/admin/contacts?page=first"] {
			let response = app.clone().oneshot(with_cookie(get(uri), &cookie)).await.unwrap();
			assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
			assert_eq!(json_body(response).await, json!({ "error": "invalid" }), "{uri}");
		}
		assert!(backend.contact_queries.lock().unwrap().is_empty());

		let change = Body::from(json!({ "status": "bogus" }).to_string());
		let response = app
			.oneshot(request("PATCH", "/api/admin/contacts/c1/status", &cookie, change))
			.await
			.unwrap();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
		assert_eq!(json_body(response).await, json!({ "error": "invalid" }));
		assert!(backend.calls_to("set_contact_status").is_empty());
	}
}
