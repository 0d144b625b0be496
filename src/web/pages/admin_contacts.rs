// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::utils::{display_time, error_text, use_auth};
use crate::auth_state::{ToastKind, ToastRequest};
use crate::model::{ContactItem, ContactPage, ContactStats, ContactStatus, contact_subject_label};
use leptos::prelude::*;
use leptos::task::spawn;

#[component]
fn ContactDetails(contact: ContactItem, on_answer: Callback<String>, on_delete: Callback<String>) -> impl IntoView {
	let answer_id = contact.id.clone();
	let delete_id = contact.id.clone();
	let answer_button = (contact.status != ContactStatus::Answered).then(|| {
		view! {
			<button type="button" on:click=move |_| on_answer.run(answer_id.clone())>
				"علامت‌گذاری به عنوان پاسخ داده شده"
			</button>
		}
	});

	view! {
		<div id="contact_details">
			<h2>"جزئیات فرم"</h2>
			<dl>
				<dt>"نام و نام خانوادگی"</dt>
				<dd>{contact.name}</dd>
				<dt>"ایمیل"</dt>
				<dd>{contact.email}</dd>
				<dt>"شماره تماس"</dt>
				<dd>{contact.phone}</dd>
				<dt>"موضوع"</dt>
				<dd>{contact_subject_label(&contact.subject).to_string()}</dd>
				<dt>"متن پیام"</dt>
				<dd class="contact_description">{contact.description}</dd>
				<dt>"تاریخ ارسال"</dt>
				<dd>{display_time(&contact.created_at)}</dd>
				<dt>"وضعیت"</dt>
				<dd>{contact.status.label()}</dd>
			</dl>
			<div class="contact_actions">
				{answer_button}
				<button type="button" class="danger" on:click=move |_| on_delete.run(delete_id.clone())>"حذف"</button>
			</div>
		</div>
	}
}

#[component]
pub fn AdminContacts() -> impl IntoView {
	let auth = use_auth();

	let (status, set_status) = signal(String::new());
	let (page, set_page) = signal(1_u32);
	let selected = RwSignal::new(None::<String>);
	// Bumped after every change so both lists are fetched again.
	let version = RwSignal::new(0_u32);

	let contacts = Resource::new(
		move || (status.get(), page.get(), version.get()),
		|(status, page, _)| get_admin_contacts(status, page),
	);
	let stats = Resource::new(move || version.get(), |_| get_contact_stats());

	let changed = move |result: Result<(), ServerFnError>| match result {
		Ok(()) => version.update(|version| *version += 1),
		Err(error) => auth.notify(ToastRequest::new(error_text(&error), ToastKind::Error)),
	};
	let on_answer = Callback::new(move |contact_id: String| {
		spawn(async move {
			changed(mark_contact_answered(contact_id).await);
		});
	});
	let on_delete = Callback::new(move |contact_id: String| {
		selected.set(None);
		spawn(async move {
			changed(remove_contact(contact_id).await);
		});
	});

	view! {
		<div id="admin_contacts">
			<h1>"فرم‌های تماس"</h1>
			<Transition fallback=|| ()>
				{
					move || stats.get().and_then(Result::ok).map(|stats: ContactStats| view! {
						<div id="contact_stats">
							<span>{format!("جدید: {}", stats.new)}</span>
							<span>{format!("پاسخ داده شده: {}", stats.answered)}</span>
							<span>{format!("کل: {}", stats.total)}</span>
						</div>
					})
				}
			</Transition>
			<select on:change=move |event| {
				set_status.set(event_target_value(&event));
				set_page.set(1);
				selected.set(None);
			}>
				<option value="">"همه"</option>
				{
					ContactStatus::ALL
						.iter()
						.map(|status| view! { <option value=status.as_str()>{status.label()}</option> })
						.collect_view()
				}
			</select>
			<Transition fallback=|| view! { <div class="loading">"در حال بارگذاری..."</div> }>
				{
					move || match contacts.get() {
						None => ().into_any(),
						Some(Err(error)) => view! { <p class="page_error">{error_text(&error)}</p> }.into_any(),
						Some(Ok(ContactPage { items, pagination })) => {
							let total_pages = pagination.map(|pagination| pagination.total_pages).unwrap_or(1);
							let details = selected
								.get()
								.and_then(|id| items.iter().find(|contact| contact.id == id).cloned());
							view! {
								<div id="contact_list">
									<h2>{format!("لیست فرم‌ها ({})", items.len())}</h2>
									{
										items
											.into_iter()
											.map(|contact| {
												let id = contact.id.clone();
												view! {
													<div class="contact_row" on:click=move |_| selected.set(Some(id.clone()))>
														<span class="contact_name">{contact.name}</span>
														<span class="contact_status">{contact.status.label()}</span>
														<span class="contact_subject">{contact_subject_label(&contact.subject).to_string()}</span>
														<span class="contact_time">{display_time(&contact.created_at)}</span>
													</div>
												}
											})
											.collect_view()
									}
									<div class="pagination">
										<button
											type="button"
											disabled={move || page.get() <= 1}
											on:click=move |_| set_page.update(|page| *page = page.saturating_sub(1).max(1))
										>
											"قبلی"
										</button>
										<span>{move || format!("صفحه {} از {}", page.get(), total_pages.max(1))}</span>
										<button
											type="button"
											disabled={move || page.get() >= total_pages}
											on:click=move |_| set_page.update(|page| *page += 1)
										>
											"بعدی"
										</button>
									</div>
								</div>
								{
									match details {
										Some(contact) => view! { <ContactDetails contact on_answer on_delete /> }.into_any(),
										None => view! {
											<p class="empty_state">"برای مشاهده جزئیات، یک فرم را انتخاب کنید"</p>
										}.into_any(),
									}
								}
							}.into_any()
						}
					}
				}
			</Transition>
		</div>
	}
}

#[server]
async fn get_admin_contacts(status: String, page: u32) -> Result<ContactPage, ServerFnError> {
	use super::server_utils::{get_backend, get_credentials_from_request, user_facing_error};
	use crate::model::ContactQuery;

	const PAGE_SIZE: u32 = 20;

	let credentials = get_credentials_from_request().await?;
	let token = credentials.require_admin().await.map_err(user_facing_error)?;
	let query = ContactQuery {
		page: Some(page.max(1)),
		limit: Some(PAGE_SIZE),
		status: ContactStatus::parse(&status),
	};
	get_backend().contacts(Some(token), query).await.map_err(user_facing_error)
}

#[server]
async fn get_contact_stats() -> Result<ContactStats, ServerFnError> {
	use super::server_utils::{get_backend, get_credentials_from_request, user_facing_error};

	let credentials = get_credentials_from_request().await?;
	let token = credentials.require_admin().await.map_err(user_facing_error)?;
	get_backend().contact_stats(Some(token)).await.map_err(user_facing_error)
}

#[server]
async fn mark_contact_answered(contact_id: String) -> Result<(), ServerFnError> {
	use super::server_utils::{get_backend, get_credentials_from_request, user_facing_error};

	let credentials = get_credentials_from_request().await?;
	let token = credentials.require_admin().await.map_err(user_facing_error)?;
	get_backend()
		.set_contact_status(Some(token), &contact_id, ContactStatus::Answered)
		.await
		.map_err(user_facing_error)?;
	tracing::info!(contact = %contact_id, "contact marked answered");
	Ok(())
}

#[server]
async fn remove_contact(contact_id: String) -> Result<(), ServerFnError> {
	use super::server_utils::{get_backend, get_credentials_from_request, user_facing_error};

	let credentials = get_credentials_from_request().await?;
	let token = credentials.require_admin().await.map_err(user_facing_error)?;
	get_backend()
		.delete_contact(Some(token), &contact_id)
		.await
		.map_err(user_facing_error)?;
	tracing::info!(contact = %contact_id, "contact deleted");
	Ok(())
}
