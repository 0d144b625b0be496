// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Done, Item, Items, JsonBody, QueryParams};
use crate::auth_state::SessionUser;
use crate::backend::{BackendError, GENERIC_ERROR_MESSAGE};
use crate::catalog::account::{
	CartItem, Coupon, Order, Subscription, cart_items, cart_total, coupons as seeded_coupons, find_cart_item, find_order,
	find_subscription, orders as seeded_orders, subscriptions as seeded_subscriptions,
};
use crate::model::{NewTicket, Ticket, TicketDetail};
use crate::validation::{ChangePasswordForm, LoginForm, NewTicketForm, RegisterForm, validate_forgot_password_form};
use crate::web::auth::{Credentials, sign_in, sign_out};
use crate::web::error::ApiError;
use crate::web::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CartQuery {
	id: Option<String>,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
	current: Option<String>,
	next: Option<String>,
	confirm: Option<String>,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
	#[serde(default)]
	email: String,
}

#[derive(Deserialize)]
pub struct ReplyRequest {
	#[serde(default)]
	message: String,
}

#[derive(Serialize)]
pub struct Cart {
	items: Vec<CartItem>,
	/// Toman
	total: u64,
}

#[derive(Serialize)]
pub struct SignedIn {
	user: Option<SessionUser>,
	#[serde(skip_serializing_if = "Option::is_none")]
	message: Option<String>,
}

#[derive(Serialize)]
pub struct Registered {
	ok: bool,
	user: Option<SessionUser>,
	message: &'static str,
}

pub async fn me(
	State(state): State<AppState>,
	credentials: Credentials,
) -> Result<Json<Item<Option<SessionUser>>>, ApiError> {
	let item = credentials.refresh_user(state.backend.as_ref()).await?;
	Ok(Json(Item { item }))
}

pub async fn cart() -> Json<Cart> {
	let items = cart_items();
	let total = cart_total(&items);
	Json(Cart { items, total })
}

pub async fn remove_from_cart(WithRejection(Query(query), _): QueryParams<CartQuery>) -> Result<Json<Done>, ApiError> {
	let id = query
		.id
		.filter(|id| !id.trim().is_empty())
		.ok_or(ApiError::BadRequest("id_required"))?;
	find_cart_item(&id).ok_or(ApiError::NotFound)?;
	Ok(Json(Done::ok()))
}

pub async fn orders() -> Json<Items<Vec<Order>>> {
	Json(Items { items: seeded_orders() })
}

pub async fn order(Path(id): Path<String>) -> Result<Json<Item<Order>>, ApiError> {
	let item = find_order(&id).ok_or(ApiError::NotFound)?;
	Ok(Json(Item { item }))
}

pub async fn subscriptions() -> Json<Items<Vec<Subscription>>> {
	Json(Items {
		items: seeded_subscriptions(),
	})
}

pub async fn subscription(Path(id): Path<String>) -> Result<Json<Item<Subscription>>, ApiError> {
	let item = find_subscription(&id).ok_or(ApiError::NotFound)?;
	Ok(Json(Item { item }))
}

pub async fn coupons() -> Json<Items<Vec<Coupon>>> {
	Json(Items {
		items: seeded_coupons(),
	})
}

pub async fn tickets(
	State(state): State<AppState>,
	credentials: Credentials,
) -> Result<Json<Items<Vec<Ticket>>>, ApiError> {
	let token = credentials.require_token()?;
	let items = state.backend.tickets(Some(token)).await?;
	Ok(Json(Items { items }))
}

pub async fn ticket(
	State(state): State<AppState>,
	credentials: Credentials,
	Path(id): Path<String>,
) -> Result<Json<Item<TicketDetail>>, ApiError> {
	let token = credentials.require_token()?;
	let item = state.backend.ticket_detail(Some(token), &id).await?;
	Ok(Json(Item { item }))
}

pub async fn create_ticket(
	State(state): State<AppState>,
	credentials: Credentials,
	WithRejection(Json(form), _): JsonBody<NewTicketForm>,
) -> Result<(StatusCode, Json<Done>), ApiError> {
	ApiError::check(form.validate())?;
	let token = credentials.require_token()?;

	let ticket = NewTicket {
		title: form.title.trim().to_string(),
		department: form.department_or_default().to_string(),
		message: form.message.trim().to_string(),
	};
	state.backend.create_ticket(Some(token), &ticket).await?;
	Ok((StatusCode::CREATED, Json(Done::ok())))
}

pub async fn reply_to_ticket(
	State(state): State<AppState>,
	credentials: Credentials,
	Path(id): Path<String>,
	WithRejection(Json(reply), _): JsonBody<ReplyRequest>,
) -> Result<Json<Done>, ApiError> {
	let message = reply.message.trim();
	if message.is_empty() {
		return Err(ApiError::BadRequest("message_required"));
	}
	let token = credentials.require_token()?;
	state.backend.reply_to_ticket(Some(token), &id, message).await?;
	Ok(Json(Done::ok()))
}

pub async fn login(
	State(state): State<AppState>,
	credentials: Credentials,
	WithRejection(Json(form), _): JsonBody<LoginForm>,
) -> Result<Json<SignedIn>, ApiError> {
	ApiError::check(form.validate())?;

	let auth = state.backend.login(form.identifier.trim(), &form.password).await?;
	if auth.user.is_none() {
		let message = auth.message.unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
		return Err(BackendError::Upstream { status: 401, message }.into());
	}

	sign_in(&credentials.session, auth.token.as_deref(), auth.user.as_ref(), form.remember).await?;
	tracing::info!(user = ?auth.user.as_ref().map(|user| &user.id), remember = form.remember, "user signed in");
	Ok(Json(SignedIn {
		user: auth.user,
		message: auth.message,
	}))
}

pub async fn register(
	State(state): State<AppState>,
	WithRejection(Json(form), _): JsonBody<RegisterForm>,
) -> Result<(StatusCode, Json<Registered>), ApiError> {
	ApiError::check(form.validate())?;
	let user = state.backend.register(&form).await?;
	Ok((
		StatusCode::CREATED,
		Json(Registered {
			ok: true,
			user,
			message: "ثبت‌نام با موفقیت انجام شد",
		}),
	))
}

/// Always succeeds. The upstream call and the session flush are both best effort.
pub async fn logout(State(state): State<AppState>, credentials: Credentials) -> Json<Done> {
	if let Err(error) = state.backend.logout(credentials.token()).await {
		tracing::warn!(source = ?error, "upstream logout failed");
	}
	if let Err(error) = sign_out(&credentials.session).await {
		tracing::error!(source = ?error, "failed to clear session");
	}
	Json(Done::ok())
}

pub async fn change_password(
	State(state): State<AppState>,
	credentials: Credentials,
	WithRejection(Json(request), _): JsonBody<ChangePasswordRequest>,
) -> Result<Json<Done>, ApiError> {
	let (Some(current), Some(next)) = (request.current, request.next) else {
		return Err(ApiError::BadRequest("invalid"));
	};
	let form = ChangePasswordForm {
		current,
		next,
		confirm: request.confirm,
	};
	if !form.validate().is_empty() {
		return Err(ApiError::BadRequest("invalid"));
	}
	let token = credentials.require_token()?;
	let message = state.backend.change_password(Some(token), &form.current, &form.next).await?;
	Ok(Json(Done::with_message(message)))
}

pub async fn forgot_password(
	State(state): State<AppState>,
	WithRejection(Json(request), _): JsonBody<ForgotPasswordRequest>,
) -> Result<Json<Done>, ApiError> {
	let email = request.email.trim();
	ApiError::check(validate_forgot_password_form(email))?;
	let message = state.backend.forgot_password(email).await?;
	Ok(Json(Done::with_message(message)))
}
