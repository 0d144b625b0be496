// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::utils::{error_text, log_in, use_auth};
use crate::auth_state::{ToastKind, ToastRequest};
use crate::validation::{LoginForm, ValidationError, field_error};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn;
use leptos_router::hooks::use_navigate;

const ERROR_TOAST_DURATION_MS: u32 = 5000;

#[component]
pub fn LoginPage() -> impl IntoView {
	let auth = use_auth();
	let navigate = use_navigate();

	// Signed-in users are sent on to their tickets.
	Effect::new(move |_| {
		let state = auth.state.get();
		if state.is_authenticated() {
			let destination = if state.is_admin() { "/admin/tickets" } else { "/account/tickets" };
			navigate(destination, Default::default());
		}
	});

	let (identifier, set_identifier) = signal(String::new());
	let (password, set_password) = signal(String::new());
	let (remember, set_remember) = signal(false);
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

		let form = LoginForm {
			identifier: identifier.get_untracked(),
			password: password.get_untracked(),
			remember: remember.get_untracked(),
		};
		let validation_errors = form.validate();
		let is_valid = validation_errors.is_empty();
		set_errors.set(validation_errors);
		if !is_valid {
			return;
		}

		set_submitting.set(true);
		spawn(async move {
			let result = log_in(form.identifier, form.password, form.remember).await;
			set_submitting.set(false);
			match result {
				Ok(user) => auth.signed_in(user),
				Err(error) => {
					leptos::logging::error!("Sign-in failed: {}", error);
					auth.notify(
						ToastRequest::new(error_text(&error), ToastKind::Error).with_duration(ERROR_TOAST_DURATION_MS),
					);
				}
			}
		});
	};

	view! {
		<div id="login_page">
			<h1>"ورود به حساب کاربری"</h1>
			<form on:submit=form_submit novalidate>
				<label>
					<span class="form_label">"ایمیل یا شماره تلفن"</span>
					<input type="text" name="identifier" bind:value=(identifier, set_identifier) />
					{error_for("identifier")}
				</label>
				<label>
					<span class="form_label">"رمز عبور"</span>
					<input type="password" name="password" bind:value=(password, set_password) />
					{error_for("password")}
				</label>
				<label class="form_checkbox">
					<input type="checkbox" name="remember" bind:checked=(remember, set_remember) />
					"مرا به خاطر بسپار"
				</label>
				<button type="submit" disabled=move || submitting.get()>
					{move || if submitting.get() { "در حال ورود..." } else { "ورود" }}
				</button>
			</form>
			<p class="form_footer">
				<a href="/auth/forgot">"رمز عبور را فراموش کرده‌اید؟"</a>
			</p>
			<p class="form_footer">
				"حساب کاربری ندارید؟ "
				<a href="/register">"ثبت‌نام کنید"</a>
			</p>
		</div>
	}
}
