// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::error::{BackendError, GENERIC_ERROR_MESSAGE};
use super::{AuthSession, StorefrontBackend, normalize};
use crate::auth_state::SessionUser;
use crate::model::{
	ContactItem, ContactPage, ContactQuery, ContactStats, ContactStatus, NewTicket, Ticket, TicketDetail,
};
use crate::validation::{ContactForm, RegisterForm};
use async_trait::async_trait;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, Method};
use serde_json::{Value, json};
use std::time::Duration;

const CONTACT_ERROR_MESSAGE: &str = "خطا در ارسال پیام تماس";

/// [`StorefrontBackend`] talking JSON over HTTP
#[derive(Clone, Debug)]
pub struct HttpBackend {
	client: Client,
	base_url: String,
}

struct ApiRequest<'a> {
	method: Method,
	endpoint: String,
	token: Option<&'a str>,
	body: Option<Value>,
	query: Vec<(&'static str, String)>,
	fallback_error: &'static str,
}

impl<'a> ApiRequest<'a> {
	fn new(method: Method, endpoint: impl Into<String>, token: Option<&'a str>) -> Self {
		Self {
			method,
			endpoint: endpoint.into(),
			token,
			body: None,
			query: Vec::new(),
			fallback_error: GENERIC_ERROR_MESSAGE,
		}
	}

	fn get(endpoint: impl Into<String>, token: Option<&'a str>) -> Self {
		Self::new(Method::GET, endpoint, token)
	}

	fn json(mut self, body: Value) -> Self {
		self.body = Some(body);
		self
	}
}

/// Encodes a caller-supplied id as exactly one path segment.
///
/// Dot segments are refused outright since URL parsing resolves them even when percent-encoded.
fn path_segment(id: &str) -> Result<String, BackendError> {
	if id.is_empty() || id == "." || id == ".." {
		return Err(BackendError::InvalidId(id.to_string()));
	}
	Ok(utf8_percent_encode(id, NON_ALPHANUMERIC).to_string())
}

impl HttpBackend {
	pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
		let client = Client::builder().timeout(timeout).build()?;
		Ok(Self {
			client,
			base_url: base_url.into(),
		})
	}

	fn endpoint(&self, path: &str) -> String {
		let base = self.base_url.trim_end_matches('/');
		let suffix = path.trim_start_matches('/');
		format!("{}/{}", base, suffix)
	}

	async fn send(&self, request: ApiRequest<'_>) -> Result<Value, BackendError> {
		let mut builder = self.client.request(request.method.clone(), self.endpoint(&request.endpoint));
		if let Some(token) = request.token {
			builder = builder.bearer_auth(token);
		}
		if !request.query.is_empty() {
			builder = builder.query(&request.query);
		}
		if let Some(body) = &request.body {
			builder = builder.json(body);
		}

		let response = builder.send().await?;
		let status = response.status();
		let text = response.text().await?;
		let body = if text.trim().is_empty() {
			Ok(Value::Null)
		} else {
			serde_json::from_str::<Value>(&text)
		};

		if !status.is_success() {
			let message = body
				.as_ref()
				.ok()
				.and_then(normalize::error_message)
				.unwrap_or_else(|| request.fallback_error.to_string());
			tracing::warn!(
				method = %request.method,
				endpoint = %request.endpoint,
				%status,
				upstream_message = %message,
				"upstream API request failed"
			);
			return Err(BackendError::Upstream {
				status: status.as_u16(),
				message,
			});
		}

		body.map_err(|error| BackendError::MalformedResponse(error.to_string()))
	}
}

#[async_trait]
impl StorefrontBackend for HttpBackend {
	async fn login(&self, identifier: &str, password: &str) -> Result<AuthSession, BackendError> {
		let request = ApiRequest::new(Method::POST, "/auth/login", None)
			.json(json!({ "identifier": identifier, "password": password }));
		let body = self.send(request).await?;
		Ok(AuthSession {
			token: normalize::token(&body),
			user: normalize::login_user(&body),
			message: normalize::message(&body),
		})
	}

	async fn register(&self, form: &RegisterForm) -> Result<Option<SessionUser>, BackendError> {
		let request = ApiRequest::new(Method::POST, "/auth/register", None).json(json!({
			"name": form.name,
			"email": form.email,
			"phone": form.phone,
			"password": form.password,
		}));
		let body = self.send(request).await?;
		Ok(normalize::registered_user(&body))
	}

	async fn forgot_password(&self, email: &str) -> Result<Option<String>, BackendError> {
		let request = ApiRequest::new(Method::POST, "/auth/forgot-password", None).json(json!({ "email": email }));
		let body = self.send(request).await?;
		Ok(normalize::message(&body))
	}

	async fn current_user(&self, token: Option<&str>) -> Result<Option<SessionUser>, BackendError> {
		let body = self.send(ApiRequest::get("/auth/me", token)).await?;
		Ok(normalize::current_user(&body))
	}

	async fn logout(&self, token: Option<&str>) -> Result<(), BackendError> {
		self.send(ApiRequest::new(Method::POST, "/auth/logout", token)).await?;
		Ok(())
	}

	async fn change_password(
		&self,
		token: Option<&str>,
		current_password: &str,
		new_password: &str,
	) -> Result<Option<String>, BackendError> {
		let request = ApiRequest::new(Method::PUT, "/auth/change-password", token).json(json!({
			"currentPassword": current_password,
			"newPassword": new_password,
		}));
		let body = self.send(request).await?;
		Ok(normalize::message(&body))
	}

	async fn tickets(&self, token: Option<&str>) -> Result<Vec<Ticket>, BackendError> {
		let body = self.send(ApiRequest::get("/tickets", token)).await?;
		Ok(normalize::ticket_list(&body))
	}

	async fn ticket_detail(&self, token: Option<&str>, ticket_id: &str) -> Result<TicketDetail, BackendError> {
		let endpoint = format!("/tickets/{}", path_segment(ticket_id)?);
		let body = self.send(ApiRequest::get(endpoint, token)).await?;
		Ok(normalize::ticket_detail(&body))
	}

	async fn create_ticket(&self, token: Option<&str>, ticket: &NewTicket) -> Result<(), BackendError> {
		let request = ApiRequest::new(Method::POST, "/tickets/add", token).json(json!({
			"title": ticket.title,
			"description": "",
			"department": ticket.department,
			"priority": "medium",
			"message": ticket.message,
			"attachment": null,
		}));
		self.send(request).await?;
		Ok(())
	}

	async fn reply_to_ticket(&self, token: Option<&str>, ticket_id: &str, message: &str) -> Result<(), BackendError> {
		let request = ApiRequest::new(Method::POST, "/messages/add", token).json(json!({
			"ticketId": ticket_id,
			"message": message,
			"attachment": null,
		}));
		self.send(request).await?;
		Ok(())
	}

	async fn admin_tickets(&self, token: Option<&str>) -> Result<Vec<Ticket>, BackendError> {
		let body = self.send(ApiRequest::get("/tickets/admin", token)).await?;
		Ok(normalize::ticket_list(&body))
	}

	async fn admin_ticket_detail(&self, token: Option<&str>, ticket_id: &str) -> Result<TicketDetail, BackendError> {
		let endpoint = format!("/tickets/admin/{}", path_segment(ticket_id)?);
		let body = self.send(ApiRequest::get(endpoint, token)).await?;
		Ok(normalize::ticket_detail(&body))
	}

	async fn submit_contact(&self, form: &ContactForm) -> Result<Option<String>, BackendError> {
		let mut request = ApiRequest::new(Method::POST, "/contacts", None).json(json!({
			"name": form.name,
			"email": form.email,
			"phone": form.phone,
			"subject": form.subject,
			"description": form.description,
		}));
		request.fallback_error = CONTACT_ERROR_MESSAGE;
		let body = self.send(request).await?;
		Ok(normalize::message(&body))
	}

	async fn contacts(&self, token: Option<&str>, query: ContactQuery) -> Result<ContactPage, BackendError> {
		let mut request = ApiRequest::get("/contacts", token);
		if let Some(page) = query.page {
			request.query.push(("page", page.to_string()));
		}
		if let Some(limit) = query.limit {
			request.query.push(("limit", limit.to_string()));
		}
		if let Some(status) = query.status {
			request.query.push(("status", status.as_str().to_string()));
		}
		let body = self.send(request).await?;
		Ok(normalize::contact_page(&body))
	}

	async fn contact(&self, token: Option<&str>, contact_id: &str) -> Result<Option<ContactItem>, BackendError> {
		let endpoint = format!("/contacts/{}", path_segment(contact_id)?);
		let body = self.send(ApiRequest::get(endpoint, token)).await?;
		Ok(body.get("data").and_then(normalize::contact))
	}

	async fn set_contact_status(
		&self,
		token: Option<&str>,
		contact_id: &str,
		status: ContactStatus,
	) -> Result<Option<ContactItem>, BackendError> {
		let endpoint = format!("/contacts/{}/status", path_segment(contact_id)?);
		let request = ApiRequest::new(Method::PATCH, endpoint, token)
			.json(json!({ "status": status.as_str() }));
		let body = self.send(request).await?;
		Ok(body.get("data").and_then(normalize::contact))
	}

	async fn delete_contact(&self, token: Option<&str>, contact_id: &str) -> Result<(), BackendError> {
		let endpoint = format!("/contacts/{}", path_segment(contact_id)?);
		self.send(ApiRequest::new(Method::DELETE, endpoint, token)).await?;
		Ok(())
	}

	async fn contact_stats(&self, token: Option<&str>) -> Result<ContactStats, BackendError> {
		let body = self.send(ApiRequest::get("/contacts/stats", token)).await?;
		Ok(normalize::contact_stats(&body))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::extract::{Path, Query, State};
	use axum::http::{HeaderMap, StatusCode};
	use axum::routing::{get, patch, post, put};
	use axum::{Json, Router};
	use std::collections::HashMap;
	use std::sync::{Arc, Mutex};
	use tokio::net::TcpListener;
	use tokio::sync::oneshot;

	#[derive(Clone, Default)]
	struct MockState {
		authorization: Arc<Mutex<Vec<Option<String>>>>,
		bodies: Arc<Mutex<Vec<Value>>>,
		queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
	}

	impl MockState {
		fn record_auth(&self, headers: &HeaderMap) {
			let value = headers
				.get("authorization")
				.and_then(|value| value.to_str().ok())
				.map(String::from);
			self.authorization.lock().unwrap().push(value);
		}
	}

	async fn login(State(state): State<MockState>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
		state.bodies.lock().unwrap().push(body.clone());
		if body["password"] == "secret1" {
			(
				StatusCode::OK,
				Json(json!({
					"accessToken": "tok-1",
					"user": { "_id": "U1", "name": "Sara", "email": "sara@example.com", "role": "user" }
				})),
			)
		} else {
			(StatusCode::UNAUTHORIZED, Json(json!({ "message": "رمز عبور اشتباه است" })))
		}
	}

	async fn tickets(State(state): State<MockState>, headers: HeaderMap) -> Json<Value> {
		state.record_auth(&headers);
		Json(json!({ "tickets": [{ "_id": "t1", "title": "Help", "status": "open", "createdBy": "U1" }] }))
	}

	async fn ticket_detail(Path(id): Path<String>) -> Json<Value> {
		Json(json!({
			"ticket": { "_id": id, "createdBy": { "_id": "U1" } },
			"messages": [{ "_id": "m1", "message": "hi", "sender": "U1" }]
		}))
	}

	async fn reply(State(state): State<MockState>, headers: HeaderMap, Json(body): Json<Value>) -> StatusCode {
		state.record_auth(&headers);
		state.bodies.lock().unwrap().push(body);
		StatusCode::CREATED
	}

	async fn change_password(Json(body): Json<Value>) -> Json<Value> {
		let message = format!("changed from {}", body["currentPassword"].as_str().unwrap_or_default());
		Json(json!({ "success": true, "message": message }))
	}

	async fn contacts(State(state): State<MockState>, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
		state.queries.lock().unwrap().push(query);
		Json(json!({ "success": true, "data": [] }))
	}

	async fn submit_contact() -> (StatusCode, Json<Value>) {
		(StatusCode::BAD_REQUEST, Json(json!({ "errors": ["ایمیل نامعتبر است"] })))
	}

	async fn contact_status(Path(id): Path<String>, Json(body): Json<Value>) -> Json<Value> {
		Json(json!({ "success": true, "data": { "_id": id, "status": body["status"] } }))
	}

	async fn broken() -> (StatusCode, &'static str) {
		(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>")
	}

	async fn spawn_mock_server() -> (String, MockState, oneshot::Sender<()>) {
		let state = MockState::default();
		let app = Router::new()
			.route("/api/auth/login", post(login))
			.route("/api/auth/change-password", put(change_password))
			.route("/api/auth/me", get(broken))
			.route("/api/tickets", get(tickets))
			.route("/api/tickets/{id}", get(ticket_detail))
			.route("/api/messages/add", post(reply))
			.route("/api/contacts", get(contacts).post(submit_contact))
			.route("/api/contacts/{id}/status", patch(contact_status))
			.with_state(state.clone());
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let address = listener.local_addr().unwrap();
		let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
		tokio::spawn(async move {
			axum::serve(listener, app)
				.with_graceful_shutdown(async {
					let _ = shutdown_rx.await;
				})
				.await
				.unwrap();
		});
		(format!("http://{}/api/", address), state, shutdown_tx)
	}

	fn backend(base_url: String) -> HttpBackend {
		HttpBackend::new(base_url, Duration::from_secs(3)).unwrap()
	}

	#[tokio::test]
	async fn login_normalizes_token_and_user() {
		let (base_url, state, shutdown) = spawn_mock_server().await;
		let backend = backend(base_url);

		let session = backend.login("sara@example.com", "secret1").await.unwrap();
		assert_eq!(session.token.as_deref(), Some("tok-1"));
		assert_eq!(session.user.unwrap().id, "U1");
		assert_eq!(state.bodies.lock().unwrap()[0]["identifier"], "sara@example.com");

		let error = backend.login("sara@example.com", "wrong").await.unwrap_err();
		assert_eq!(error.status_code(), 401);
		assert_eq!(error.user_message(), "رمز عبور اشتباه است");

		let _ = shutdown.send(());
	}

	#[tokio::test]
	async fn bearer_token_is_attached_when_present() {
		let (base_url, state, shutdown) = spawn_mock_server().await;
		let backend = backend(base_url);

		let tickets = backend.tickets(Some("tok-1")).await.unwrap();
		assert_eq!(tickets.len(), 1);
		assert_eq!(tickets[0].creator_id(), Some("U1"));
		backend.tickets(None).await.unwrap();

		let seen = state.authorization.lock().unwrap().clone();
		assert_eq!(seen, vec![Some(String::from("Bearer tok-1")), None]);

		let _ = shutdown.send(());
	}

	#[tokio::test]
	async fn ticket_detail_and_reply() {
		let (base_url, state, shutdown) = spawn_mock_server().await;
		let backend = backend(base_url);

		let detail = backend.ticket_detail(Some("tok-1"), "t9").await.unwrap();
		assert_eq!(detail.ticket.unwrap().id, "t9");
		assert_eq!(detail.messages.len(), 1);

		backend.reply_to_ticket(Some("tok-1"), "t9", "thanks").await.unwrap();
		let bodies = state.bodies.lock().unwrap().clone();
		assert_eq!(bodies[0]["ticketId"], "t9");
		assert_eq!(bodies[0]["message"], "thanks");

		let _ = shutdown.send(());
	}

	#[tokio::test]
	async fn change_password_uses_put() {
		let (base_url, _state, shutdown) = spawn_mock_server().await;
		let message = backend(base_url)
			.change_password(Some("tok-1"), "old-pass1", "new-pass1")
			.await
			.unwrap();
		assert_eq!(message.as_deref(), Some("changed from old-pass1"));
		let _ = shutdown.send(());
	}

	#[tokio::test]
	async fn contact_query_and_errors() {
		let (base_url, state, shutdown) = spawn_mock_server().await;
		let backend = backend(base_url);

		let query = ContactQuery {
			page: Some(2),
			limit: None,
			status: Some(ContactStatus::Answered),
		};
		backend.contacts(Some("tok-1"), query).await.unwrap();
		let seen = state.queries.lock().unwrap()[0].clone();
		assert_eq!(seen.get("page").map(String::as_str), Some("2"));
		assert_eq!(seen.get("status").map(String::as_str), Some("answered"));
		assert!(!seen.contains_key("limit"));

		let error = backend.submit_contact(&ContactForm::default()).await.unwrap_err();
		assert_eq!(error.user_message(), "ایمیل نامعتبر است");

		let updated = backend
			.set_contact_status(Some("tok-1"), "c1", ContactStatus::Answered)
			.await
			.unwrap()
			.unwrap();
		assert_eq!(updated.status, ContactStatus::Answered);

		let _ = shutdown.send(());
	}

	#[tokio::test]
	async fn ids_stay_inside_their_path_segment() {
		let (base_url, state, shutdown) = spawn_mock_server().await;
		let backend = backend(base_url);

		let detail = backend.ticket_detail(Some("tok-1"), "../tickets").await.unwrap();
		assert_eq!(detail.ticket.unwrap().id, "../tickets");
		assert!(state.authorization.lock().unwrap().is_empty());

		for id in ["..", ".", ""] {
			let error = backend.delete_contact(Some("tok-1"), id).await.unwrap_err();
			assert!(matches!(error, BackendError::InvalidId(_)), "{id:?}");
			assert_eq!(error.status_code(), 404);
		}

		let _ = shutdown.send(());
	}

	#[tokio::test]
	async fn non_json_failure_uses_generic_message() {
		let (base_url, _state, shutdown) = spawn_mock_server().await;
		let error = backend(base_url).current_user(Some("tok-1")).await.unwrap_err();
		assert_eq!(error.status_code(), 502);
		assert_eq!(error.user_message(), GENERIC_ERROR_MESSAGE);
		let _ = shutdown.send(());
	}

	#[tokio::test]
	async fn unreachable_api_is_a_transport_error() {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let address = listener.local_addr().unwrap();
		drop(listener);
		let error = backend(format!("http://{}", address)).tickets(None).await.unwrap_err();
		assert!(matches!(error, BackendError::Transport(_)));
		assert_eq!(error.user_message(), GENERIC_ERROR_MESSAGE);
	}
}
