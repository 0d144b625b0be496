// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::utils::{error_text, use_auth};
use crate::auth_state::{ToastKind, ToastRequest};
use crate::validation::{ContactForm, ValidationError, field_error};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn;

const SENT_MESSAGE: &str = "پیام شما با موفقیت ارسال شد";

#[component]
pub fn ContactPage() -> impl IntoView {
	let auth = use_auth();

	let (name, set_name) = signal(String::new());
	let (email, set_email) = signal(String::new());
	let (phone, set_phone) = signal(String::new());
	let (subject, set_subject) = signal(String::new());
	let (description, set_description) = signal(String::new());
	let (errors, set_errors) = signal(Vec::<ValidationError>::new());
	let (sending, set_sending) = signal(false);

	let form_submit = move |event: SubmitEvent| {
		event.prevent_default();
		let form = ContactForm {
			name: name.get_untracked(),
			email: email.get_untracked(),
			phone: phone.get_untracked(),
			subject: subject.get_untracked(),
			description: description.get_untracked(),
		};
		let validation_errors = form.validate();
		let is_valid = validation_errors.is_empty();
		set_errors.set(validation_errors);
		if !is_valid {
			return;
		}

		set_sending.set(true);
		spawn(async move {
			match send_contact(form).await {
				Ok(message) => {
					for set_field in [set_name, set_email, set_phone, set_subject, set_description] {
						set_field.set(String::new());
					}
					let message = message.unwrap_or_else(|| String::from(SENT_MESSAGE));
					auth.notify(ToastRequest::new(message, ToastKind::Success));
				}
				Err(error) => auth.notify(ToastRequest::new(error_text(&error), ToastKind::Error)),
			}
			set_sending.set(false);
		});
	};

	view! {
		<div id="contact_page">
			<h1>"تماس با ما"</h1>
			<form on:submit=form_submit novalidate>
				<label>
					<span class="form_label">"نام"</span>
					<input type="text" bind:value=(name, set_name) />
				</label>
				<label>
					<span class="form_label">"ایمیل"</span>
					<input type="email" bind:value=(email, set_email) />
				</label>
				<label>
					<span class="form_label">"شماره موبایل"</span>
					<input type="tel" bind:value=(phone, set_phone) />
					{
						move || errors.with(|errors| {
							field_error(errors, "phone")
								.map(|message| view! { <span class="field_error">{message.to_string()}</span> })
						})
					}
				</label>
				<label>
					<span class="form_label">"موضوع"</span>
					<input type="text" bind:value=(subject, set_subject) />
				</label>
				<label>
					<span class="form_label">"توضیحات"</span>
					<textarea bind:value=(description, set_description) />
				</label>
				<button type="submit" disabled=move || sending.get()>"ارسال پیام"</button>
			</form>
		</div>
	}
}

#[server]
async fn send_contact(form: ContactForm) -> Result<Option<String>, ServerFnError> {
	use super::server_utils::{get_backend, user_facing_error};
	use crate::web::error::ApiError;

	ApiError::check(form.validate()).map_err(user_facing_error)?;
	get_backend().submit_contact(&form).await.map_err(user_facing_error)
}
