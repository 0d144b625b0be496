// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::utils::{error_text, use_auth};
use crate::auth_state::{ToastKind, ToastRequest};
use crate::validation::{ChangePasswordForm, ValidationError, field_error, validate_forgot_password_form};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn;

const RESET_SENT_MESSAGE: &str = "اگر ایمیل معتبری وارد کرده باشید، لینک بازنشانی ارسال شد.";
const PASSWORD_CHANGED_MESSAGE: &str = "رمز عبور با موفقیت تغییر کرد.";

fn field_message(errors: ReadSignal<Vec<ValidationError>>, field: &'static str) -> impl Fn() -> Option<AnyView> {
	move || {
		errors.with(|errors| {
			field_error(errors, field)
				.map(|message| view! { <span class="field_error">{message.to_string()}</span> }.into_any())
		})
	}
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
	let (email, set_email) = signal(String::new());
	let (errors, set_errors) = signal(Vec::<ValidationError>::new());
	let (outcome, set_outcome) = signal(None::<(ToastKind, String)>);
	let (sending, set_sending) = signal(false);

	let form_submit = move |event: SubmitEvent| {
		event.prevent_default();
		set_outcome.set(None);
		let address = email.get_untracked().trim().to_string();
		let validation_errors = validate_forgot_password_form(&address);
		let is_valid = validation_errors.is_empty();
		set_errors.set(validation_errors);
		if !is_valid {
			return;
		}

		set_sending.set(true);
		spawn(async move {
			let outcome = match request_password_reset(address).await {
				Ok(()) => (ToastKind::Success, String::from(RESET_SENT_MESSAGE)),
				Err(error) => (ToastKind::Error, error_text(&error)),
			};
			set_outcome.set(Some(outcome));
			set_sending.set(false);
		});
	};

	view! {
		<div id="forgot_password_page">
			<h1>"فراموشی رمز عبور"</h1>
			<p>"ایمیل خود را وارد کنید تا لینک بازنشانی ارسال شود"</p>
			<form on:submit=form_submit novalidate>
				<label>
					<span class="form_label">"ایمیل"</span>
					<input type="email" name="email" bind:value=(email, set_email) />
					{field_message(errors, "email")}
				</label>
				{
					move || outcome.get().map(|(kind, message)| {
						view! { <p class=format!("form_notice {}", kind.css_class())>{message}</p> }
					})
				}
				<button type="submit" disabled=move || sending.get()>
					{move || if sending.get() { "در حال ارسال..." } else { "ارسال لینک بازنشانی" }}
				</button>
			</form>
			<p class="form_footer">
				<a href="/login">"بازگشت به صفحه ورود"</a>
			</p>
		</div>
	}
}

#[component]
pub fn ChangePasswordPage() -> impl IntoView {
	let auth = use_auth();

	let (current, set_current) = signal(String::new());
	let (next, set_next) = signal(String::new());
	let (confirm, set_confirm) = signal(String::new());
	let (errors, set_errors) = signal(Vec::<ValidationError>::new());
	let (saving, set_saving) = signal(false);

	let form_submit = move |event: SubmitEvent| {
		event.prevent_default();
		if saving.get_untracked() {
			return;
		}

		let form = ChangePasswordForm {
			current: current.get_untracked(),
			next: next.get_untracked(),
			confirm: Some(confirm.get_untracked()),
		};
		let validation_errors = form.validate();
		let is_valid = validation_errors.is_empty();
		set_errors.set(validation_errors);
		if !is_valid {
			return;
		}

		set_saving.set(true);
		spawn(async move {
			match change_password(form.current, form.next).await {
				Ok(message) => {
					for set_field in [set_current, set_next, set_confirm] {
						set_field.set(String::new());
					}
					let message = message.unwrap_or_else(|| String::from(PASSWORD_CHANGED_MESSAGE));
					auth.notify(ToastRequest::new(message, ToastKind::Success));
				}
				Err(error) => auth.notify(ToastRequest::new(error_text(&error), ToastKind::Error)),
			}
			set_saving.set(false);
		});
	};

	view! {
		<div id="change_password_page">
			<h1>"تغییر رمز عبور"</h1>
			<form on:submit=form_submit novalidate>
				<label>
					<span class="form_label">"رمز فعلی"</span>
					<input type="password" name="current" bind:value=(current, set_current) />
					{field_message(errors, "current")}
				</label>
				<label>
					<span class="form_label">"رمز جدید"</span>
					<input type="password" name="next" bind:value=(next, set_next) />
					{field_message(errors, "next")}
				</label>
				<label>
					<span class="form_label">"تکرار رمز جدید"</span>
					<input type="password" name="confirm" bind:value=(confirm, set_confirm) />
					{field_message(errors, "confirm")}
				</label>
				<button type="submit" disabled=move || saving.get()>
					{move || if saving.get() { "در حال ارسال..." } else { "ثبت تغییر" }}
				</button>
			</form>
		</div>
	}
}

#[server]
async fn request_password_reset(email: String) -> Result<(), ServerFnError> {
	use super::server_utils::{get_backend, user_facing_error};
	use crate::web::error::ApiError;

	let email = email.trim();
	ApiError::check(validate_forgot_password_form(email)).map_err(user_facing_error)?;
	get_backend().forgot_password(email).await.map_err(user_facing_error)?;
	Ok(())
}

#[server]
async fn change_password(current: String, next: String) -> Result<Option<String>, ServerFnError> {
	use super::server_utils::{get_backend, get_credentials_from_request, user_facing_error};
	use crate::web::error::ApiError;

	let form = ChangePasswordForm {
		current,
		next,
		confirm: None,
	};
	ApiError::check(form.validate()).map_err(user_facing_error)?;

	let credentials = get_credentials_from_request().await?;
	let token = credentials.require_token().map_err(user_facing_error)?;
	get_backend()
		.change_password(Some(token), &form.current, &form.next)
		.await
		.map_err(user_facing_error)
}
