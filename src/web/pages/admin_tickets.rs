// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::errors::not_found::NotFound;
use super::tickets::{TicketConversation, TicketTable};
use super::utils::{TicketParams, TicketThread, error_text};
use crate::attribution::ViewerContext;
use crate::model::{TICKET_DEPARTMENTS, TICKET_STATUSES, Ticket, TicketFilter, department_label, ticket_status_label};
use leptos::prelude::*;
use leptos_router::hooks::use_params;

/// Turns a select box value into a filter value; the empty option means "all".
fn selected(value: String) -> Option<String> {
	if value.is_empty() { None } else { Some(value) }
}

#[component]
pub fn AdminTickets() -> impl IntoView {
	let tickets = OnceResource::new(get_admin_tickets());

	let (search, set_search) = signal(String::new());
	let (status, set_status) = signal(String::new());
	let (department, set_department) = signal(String::new());
	let (date, set_date) = signal(String::new());

	let filter = Memo::new(move |_| TicketFilter {
		search: search.get(),
		status: selected(status.get()),
		department: selected(department.get()),
		date: selected(date.get().trim().to_string()),
	});

	view! {
		<div id="admin_tickets">
			<h1>"مدیریت تیکت‌ها"</h1>
			<div id="ticket_filters">
				<input type="search" placeholder="جستجو در شناسه، عنوان یا کاربر" bind:value=(search, set_search) />
				<select on:change=move |event| set_status.set(event_target_value(&event))>
					<option value="">"همه وضعیت‌ها"</option>
					{
						TICKET_STATUSES
							.iter()
							.map(|value| view! { <option value=*value>{ticket_status_label(value)}</option> })
							.collect_view()
					}
				</select>
				<select on:change=move |event| set_department.set(event_target_value(&event))>
					<option value="">"همه دپارتمان‌ها"</option>
					{
						TICKET_DEPARTMENTS
							.iter()
							.map(|value| view! { <option value=*value>{department_label(value)}</option> })
							.collect_view()
					}
				</select>
				<input type="text" placeholder="YYYY یا YYYY/MM" bind:value=(date, set_date) />
			</div>
			<Transition fallback=|| view! { <div class="loading">"در حال بارگذاری تیکت‌ها..."</div> }>
				{
					move || match tickets.get() {
						None => ().into_any(),
						Some(Err(error)) => view! { <p class="page_error">{error_text(&error)}</p> }.into_any(),
						Some(Ok(tickets)) => {
							let shown: Vec<Ticket> = filter.with(|filter| filter.apply(&tickets).into_iter().cloned().collect());
							view! {
								<p class="result_count">{format!("{} از {} تیکت", shown.len(), tickets.len())}</p>
								<TicketTable tickets=shown base_path="/admin/tickets" show_creator=true />
							}.into_any()
						}
					}
				}
			</Transition>
		</div>
	}
}

#[component]
pub fn AdminTicketPage() -> impl IntoView {
	let params = use_params::<TicketParams>();
	let ticket_id = Memo::new(move |_| params.read().as_ref().ok().and_then(|params| params.ticket.clone()));

	view! {
		<a class="back_link" href="/admin/tickets">"بازگشت به فهرست تیکت‌ها"</a>
		{
			move || match ticket_id.get() {
				Some(ticket_id) => view! {
					<TicketConversation ticket_id context=ViewerContext::Admin />
				}.into_any(),
				None => view! { <NotFound /> }.into_any(),
			}
		}
	}
}

#[server]
async fn get_admin_tickets() -> Result<Vec<Ticket>, ServerFnError> {
	use super::server_utils::{get_backend, get_credentials_from_request, user_facing_error};

	let credentials = get_credentials_from_request().await?;
	let token = credentials.require_admin().await.map_err(user_facing_error)?;
	get_backend().admin_tickets(Some(token)).await.map_err(user_facing_error)
}

#[server]
pub(super) async fn get_admin_ticket(ticket_id: String) -> Result<TicketThread, ServerFnError> {
	use super::server_utils::{get_backend, get_credentials_from_request, user_facing_error};

	let credentials = get_credentials_from_request().await?;
	let token = credentials.require_admin().await.map_err(user_facing_error)?;
	let viewer = credentials.user().await.map_err(user_facing_error)?;

	let detail = get_backend()
		.admin_ticket_detail(Some(token), &ticket_id)
		.await
		.map_err(user_facing_error)?;
	Ok(TicketThread::new(
		detail,
		viewer.as_ref().map(|user| user.id.as_str()),
		ViewerContext::Admin,
	))
}

#[server]
pub(super) async fn reply_as_admin(ticket_id: String, message: String) -> Result<(), ServerFnError> {
	use super::server_utils::{get_backend, get_credentials_from_request, user_facing_error};

	let credentials = get_credentials_from_request().await?;
	let token = credentials.require_admin().await.map_err(user_facing_error)?;
	get_backend()
		.reply_to_ticket(Some(token), &ticket_id, &message)
		.await
		.map_err(user_facing_error)
}
