// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::utils::{error_text, use_auth};
use crate::auth_state::{ToastKind, ToastRequest};
use crate::validation::{RegisterForm, ValidationError, field_error};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn;
use leptos_router::hooks::use_navigate;

const REGISTERED_MESSAGE: &str = "ثبت‌نام با موفقیت انجام شد. لطفاً وارد شوید.";
const ERROR_TOAST_DURATION_MS: u32 = 5000;

#[component]
pub fn RegisterPage() -> impl IntoView {
	let auth = use_auth();

	Effect::new(move |_| {
		if auth.state.get().is_authenticated() {
			use_navigate()("/account/tickets", Default::default());
		}
	});

	let (name, set_name) = signal(String::new());
	let (email, set_email) = signal(String::new());
	let (phone, set_phone) = signal(String::new());
	let (password, set_password) = signal(String::new());
	let (confirm_password, set_confirm_password) = signal(String::new());
	let (errors, set_errors) = signal(Vec::<ValidationError>::new());
	let (submitting, set_submitting) = signal(false);

	let error_for = move |field: &'static str| {
		move || {
			errors.with(|errors| {
				field_error(errors, field).map(|message| view! { <span class="field_error">{message.to_string()}</span> })
			})
		}
	};

	let form_submit = move |event: SubmitEvent| {
		event.prevent_default();
		if submitting.get_untracked() {
			return;
		}

		let form = RegisterForm {
			name: name.get_untracked(),
			email: email.get_untracked(),
			phone: phone.get_untracked(),
			password: password.get_untracked(),
			confirm_password: confirm_password.get_untracked(),
		};
		let validation_errors = form.validate();
		let is_valid = validation_errors.is_empty();
		set_errors.set(validation_errors);
		if !is_valid {
			return;
		}

		set_submitting.set(true);
		spawn(async move {
			let result = register_account(form).await;
			set_submitting.set(false);
			match result {
				Ok(()) => {
					auth.notify(ToastRequest::new(REGISTERED_MESSAGE, ToastKind::Success));
					use_navigate()("/login", Default::default());
				}
				Err(error) => auth.notify(
					ToastRequest::new(error_text(&error), ToastKind::Error).with_duration(ERROR_TOAST_DURATION_MS),
				),
			}
		});
	};

	view! {
		<div id="register_page">
			<h1>"ثبت‌نام"</h1>
			<p>"حساب کاربری جدید ایجاد کنید"</p>
			<form on:submit=form_submit novalidate>
				<label>
					<span class="form_label">"نام و نام خانوادگی"</span>
					<input type="text" name="name" bind:value=(name, set_name) />
					{error_for("name")}
				</label>
				<label>
					<span class="form_label">"ایمیل"</span>
					<input type="email" name="email" bind:value=(email, set_email) />
					{error_for("email")}
				</label>
				<label>
					<span class="form_label">"شماره موبایل"</span>
					<input type="tel" name="phone" bind:value=(phone, set_phone) />
					{error_for("phone")}
				</label>
				<label>
					<span class="form_label">"رمز عبور"</span>
					<input type="password" name="password" bind:value=(password, set_password) />
					{error_for("password")}
				</label>
				<label>
					<span class="form_label">"تکرار رمز عبور"</span>
					<input type="password" name="confirmPassword" bind:value=(confirm_password, set_confirm_password) />
					{error_for("confirmPassword")}
				</label>
				<button type="submit" disabled=move || submitting.get()>
					{move || if submitting.get() { "در حال ثبت‌نام..." } else { "ثبت‌نام" }}
				</button>
			</form>
			<p class="form_footer">
				"حساب کاربری دارید؟ "
				<a href="/login">"وارد شوید"</a>
			</p>
		</div>
	}
}

#[server]
async fn register_account(form: RegisterForm) -> Result<(), ServerFnError> {
	use super::server_utils::{get_backend, user_facing_error};
	use crate::web::error::ApiError;

	ApiError::check(form.validate()).map_err(user_facing_error)?;
	let user = get_backend().register(&form).await.map_err(user_facing_error)?;
	tracing::info!(user = ?user.as_ref().map(|user| &user.id), "account registered");
	Ok(())
}
