// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON endpoints under `/api`.

mod account;
mod admin;
mod public;

pub use public::{robots, sitemap};

use super::error::ApiError;
use super::state::AppState;
use axum::extract::{Json, Query};
use axum::Router;
use axum::routing::{get, patch, post};
use axum_extra::extract::WithRejection;
use serde::Serialize;

/// JSON body whose parse failures answer with the usual error envelope
pub type JsonBody<T> = WithRejection<Json<T>, ApiError>;
/// Query string whose parse failures answer with the usual error envelope
pub type QueryParams<T> = WithRejection<Query<T>, ApiError>;

#[derive(Serialize)]
pub struct Items<T> {
	pub items: T,
}

#[derive(Serialize)]
pub struct Item<T> {
	pub item: T,
}

/// Body of endpoints that only report success
#[derive(Serialize)]
pub struct Done {
	pub ok: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}

impl Done {
	pub fn ok() -> Self {
		Self { ok: true, message: None }
	}

	pub fn with_message(message: Option<String>) -> Self {
		Self { ok: true, message }
	}
}

pub fn api_router() -> Router<AppState> {
	let account = Router::new()
		.route("/me", get(account::me))
		.route("/cart", get(account::cart).delete(account::remove_from_cart))
		.route("/orders", get(account::orders))
		.route("/orders/{id}", get(account::order))
		.route("/subscriptions", get(account::subscriptions))
		.route("/subscriptions/{id}", get(account::subscription))
		.route("/coupons", get(account::coupons))
		.route("/tickets", get(account::tickets).post(account::create_ticket))
		.route("/tickets/{id}", get(account::ticket))
		.route("/tickets/{id}/messages", post(account::reply_to_ticket))
		.route("/login", post(account::login))
		.route("/register", post(account::register))
		.route("/logout", post(account::logout))
		.route("/change-password", post(account::change_password))
		.route("/forgot", post(account::forgot_password));

	let admin = Router::new()
		.route("/users", get(admin::users).post(admin::create_user))
		.route("/orders", get(admin::orders))
		.route("/finance", get(admin::finance))
		.route("/projects", get(admin::projects))
		.route("/tickets", get(admin::tickets))
		.route("/contacts", get(admin::contacts))
		.route("/contacts/stats", get(admin::contact_stats))
		.route("/contacts/{id}", get(admin::contact).delete(admin::delete_contact))
		.route("/contacts/{id}/status", patch(admin::set_contact_status));

	Router::new()
		.nest("/account", account)
		.nest("/admin", admin)
		.route("/contact", post(public::contact))
		.route("/products", get(public::products))
		.route("/projects", get(public::projects))
		.route("/blog", get(public::blog))
}

#[cfg(test)]
pub(crate) mod test_support {
	use super::api_router;
	use crate::auth_state::SessionUser;
	use crate::backend::{AuthSession, BackendError, StorefrontBackend};
	use crate::config::ConfigDocument;
	use crate::model::{
		ContactItem, ContactPage, ContactQuery, ContactStats, ContactStatus, NewTicket, Ticket, TicketDetail,
	};
	use crate::validation::{ContactForm, RegisterForm};
	use crate::web::session::MemoryStore;
	use crate::web::state::AppState;
	use async_trait::async_trait;
	use axum::Router;
	use axum::body::Body;
	use axum::http::{Request, Response, header};
	use leptos::config::LeptosOptions;
	use std::sync::{Arc, Mutex};
	use tower_sessions::SessionManagerLayer;

	pub const GOOD_PASSWORD: &str = "secret123";
	/// A token the fake API answers with 401
	pub const REVOKED_TOKEN: &str = "revoked";

	/// In-memory stand-in for the external API that records the tokens it receives
	#[derive(Default)]
	pub struct FakeBackend {
		pub calls: Mutex<Vec<(String, Option<String>)>>,
		pub fail_logout: bool,
		pub contact_queries: Mutex<Vec<ContactQuery>>,
	}

	impl FakeBackend {
		fn record(&self, call: &str, token: Option<&str>) {
			self.calls
				.lock()
				.unwrap()
				.push((call.to_string(), token.map(str::to_string)));
		}

		pub fn calls_to(&self, call: &str) -> Vec<Option<String>> {
			self.calls
				.lock()
				.unwrap()
				.iter()
				.filter(|(name, _)| name == call)
				.map(|(_, token)| token.clone())
				.collect()
		}
	}

	pub fn user(role: &str) -> SessionUser {
		SessionUser {
			id: String::from("U1"),
			name: String::from("سارا"),
			email: String::from("sara@example.com"),
			phone: None,
			role: role.to_string(),
		}
	}

	pub fn ticket(id: &str) -> Ticket {
		Ticket {
			id: id.to_string(),
			title: String::from("مشکل ورود"),
			status: String::from("open"),
			priority: String::from("medium"),
			department: String::from("Technical Support"),
			created_at: String::from("2025-03-04T10:00:00Z"),
			created_by: None,
		}
	}

	pub fn contact(id: &str) -> ContactItem {
		ContactItem {
			id: id.to_string(),
			name: String::from("علی"),
			email: String::from("ali@example.com"),
			phone: String::from("09123456789"),
			subject: String::from("همکاری"),
			description: String::from("سلام"),
			status: ContactStatus::New,
			created_at: String::from("2025-03-04T10:00:00Z"),
		}
	}

	#[async_trait]
	impl StorefrontBackend for FakeBackend {
		async fn login(&self, identifier: &str, password: &str) -> Result<AuthSession, BackendError> {
			self.record("login", None);
			if password != GOOD_PASSWORD {
				return Err(BackendError::Upstream {
					status: 401,
					message: String::from("رمز عبور اشتباه است"),
				});
			}
			let role = if identifier.starts_with("admin") { "admin" } else { "user" };
			Ok(AuthSession {
				token: Some(format!("tok-{identifier}")),
				user: Some(user(role)),
				message: None,
			})
		}

		async fn register(&self, _form: &RegisterForm) -> Result<Option<SessionUser>, BackendError> {
			self.record("register", None);
			Ok(Some(user("user")))
		}

		async fn forgot_password(&self, _email: &str) -> Result<Option<String>, BackendError> {
			self.record("forgot_password", None);
			Ok(Some(String::from("ایمیل بازیابی ارسال شد")))
		}

		async fn current_user(&self, token: Option<&str>) -> Result<Option<SessionUser>, BackendError> {
			self.record("current_user", token);
			if token == Some(REVOKED_TOKEN) {
				return Err(BackendError::Upstream {
					status: 401,
					message: String::from("توکن نامعتبر است"),
				});
			}
			Ok(token.map(|_| user("user")))
		}

		async fn logout(&self, token: Option<&str>) -> Result<(), BackendError> {
			self.record("logout", token);
			if self.fail_logout {
				return Err(BackendError::MalformedResponse(String::from("down")));
			}
			Ok(())
		}

		async fn change_password(
			&self,
			token: Option<&str>,
			_current_password: &str,
			_new_password: &str,
		) -> Result<Option<String>, BackendError> {
			self.record("change_password", token);
			Ok(Some(String::from("رمز عبور تغییر کرد")))
		}

		async fn tickets(&self, token: Option<&str>) -> Result<Vec<Ticket>, BackendError> {
			self.record("tickets", token);
			Ok(vec![ticket("t1")])
		}

		async fn ticket_detail(&self, token: Option<&str>, ticket_id: &str) -> Result<TicketDetail, BackendError> {
			self.record("ticket_detail", token);
			Ok(TicketDetail {
				ticket: Some(ticket(ticket_id)),
				messages: Vec::new(),
			})
		}

		async fn create_ticket(&self, token: Option<&str>, _ticket: &NewTicket) -> Result<(), BackendError> {
			self.record("create_ticket", token);
			Ok(())
		}

		async fn reply_to_ticket(&self, token: Option<&str>, _ticket_id: &str, _message: &str) -> Result<(), BackendError> {
			self.record("reply_to_ticket", token);
			Ok(())
		}

		async fn admin_tickets(&self, token: Option<&str>) -> Result<Vec<Ticket>, BackendError> {
			self.record("admin_tickets", token);
			Ok(vec![ticket("t1"), ticket("t2")])
		}

		async fn admin_ticket_detail(&self, token: Option<&str>, ticket_id: &str) -> Result<TicketDetail, BackendError> {
			self.record("admin_ticket_detail", token);
			self.ticket_detail(token, ticket_id).await
		}

		async fn submit_contact(&self, _form: &ContactForm) -> Result<Option<String>, BackendError> {
			self.record("submit_contact", None);
			Ok(Some(String::from("پیام شما ثبت شد")))
		}

		async fn contacts(&self, token: Option<&str>, query: ContactQuery) -> Result<ContactPage, BackendError> {
			self.record("contacts", token);
			self.contact_queries.lock().unwrap().push(query);
			Ok(ContactPage {
				items: vec![contact("c1")],
				pagination: None,
			})
		}

		async fn contact(&self, token: Option<&str>, contact_id: &str) -> Result<Option<ContactItem>, BackendError> {
			self.record("contact", token);
			Ok((contact_id == "c1").then(|| contact(contact_id)))
		}

		async fn set_contact_status(
			&self,
			token: Option<&str>,
			contact_id: &str,
			status: ContactStatus,
		) -> Result<Option<ContactItem>, BackendError> {
			self.record("set_contact_status", token);
			Ok(Some(ContactItem {
				status,
				..contact(contact_id)
			}))
		}

		async fn delete_contact(&self, token: Option<&str>, _contact_id: &str) -> Result<(), BackendError> {
			self.record("delete_contact", token);
			Ok(())
		}

		async fn contact_stats(&self, token: Option<&str>) -> Result<ContactStats, BackendError> {
			self.record("contact_stats", token);
			Ok(ContactStats::default())
		}
	}

	pub fn app_state(backend: Arc<FakeBackend>) -> AppState {
		let config = ConfigDocument::from_kdl("").unwrap();
		AppState {
			leptos_options: LeptosOptions::builder().output_name("webcodino").build(),
			config: Arc::new(config),
			backend,
		}
	}

	/// The API routes behind a session layer, as the server mounts them
	pub fn router(backend: Arc<FakeBackend>) -> Router {
		let session_layer = SessionManagerLayer::new(MemoryStore::new()).with_secure(false);
		Router::new()
			.nest("/api", api_router())
			.layer(session_layer)
			.with_state(app_state(backend))
	}

	pub fn get(uri: &str) -> Request<Body> {
		Request::builder().uri(uri).body(Body::empty()).unwrap()
	}

	pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
		Request::builder()
			.method("POST")
			.uri(uri)
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(body.to_string()))
			.unwrap()
	}

	pub fn with_cookie(mut request: Request<Body>, cookie: &str) -> Request<Body> {
		request
			.headers_mut()
			.insert(header::COOKIE, cookie.parse().unwrap());
		request
	}

	/// The `name=value` part of the response's session cookie
	pub fn session_cookie(response: &Response<Body>) -> String {
		let set_cookie = response
			.headers()
			.get(header::SET_COOKIE)
			.expect("response sets a session cookie")
			.to_str()
			.unwrap();
		set_cookie.split(';').next().unwrap().to_string()
	}

	pub async fn json_body(response: Response<Body>) -> serde_json::Value {
		let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
		serde_json::from_slice(&bytes).unwrap()
	}
}
