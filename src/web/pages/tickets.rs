// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::admin_tickets::{get_admin_ticket, reply_as_admin};
use super::errors::not_found::NotFound;
use super::utils::{TicketParams, TicketThread, display_time, error_text, use_auth};
use crate::attribution::{SenderRole, ViewerContext};
use crate::auth_state::{ToastKind, ToastRequest};
use crate::model::{TICKET_DEPARTMENTS, Ticket, TicketStats, department_label, ticket_status_label};
use crate::validation::{NewTicketForm, ValidationError, field_error};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn;
use leptos_router::hooks::use_params;

/// Heading shown above a message in the thread
pub fn sender_label(role: SenderRole, context: ViewerContext, sender_name: Option<&str>) -> String {
	match (role, context) {
		(SenderRole::Admin, _) => String::from("پشتیبانی"),
		(SenderRole::User, ViewerContext::Customer) => String::from("شما"),
		(SenderRole::User, ViewerContext::Admin) => sender_name.unwrap_or("کاربر").to_string(),
	}
}

fn status_class(status: &str) -> String {
	format!("ticket_status ticket_status_{}", status)
}

#[component]
pub fn CustomerTickets() -> impl IntoView {
	let auth = use_auth();
	let (refresh, set_refresh) = signal(0_u32);
	let tickets = Resource::new(move || refresh.get(), |_| get_my_tickets());

	let (title, set_title) = signal(String::new());
	let (department, set_department) = signal(String::from(NewTicketForm::DEFAULT_DEPARTMENT));
	let (message, set_message) = signal(String::new());
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
		let form = NewTicketForm {
			title: title.get_untracked(),
			department: department.get_untracked(),
			message: message.get_untracked(),
		};
		let validation_errors = form.validate();
		let is_valid = validation_errors.is_empty();
		set_errors.set(validation_errors);
		if !is_valid {
			return;
		}

		set_submitting.set(true);
		spawn(async move {
			match open_ticket(form).await {
				Ok(()) => {
					set_title.set(String::new());
					set_message.set(String::new());
					set_refresh.update(|count| *count += 1);
					auth.notify(ToastRequest::new("تیکت با موفقیت ایجاد شد", ToastKind::Success));
				}
				Err(error) => auth.notify(ToastRequest::new(error_text(&error), ToastKind::Error)),
			}
			set_submitting.set(false);
		});
	};

	view! {
		<div id="customer_tickets">
			<h1>"تیکت‌های پشتیبانی"</h1>
			<Transition fallback=|| view! { <div class="loading">"در حال بارگذاری تیکت‌ها..."</div> }>
				{
					move || match tickets.get() {
						None => ().into_any(),
						Some(Err(error)) => view! {
							<div class="page_error">
								<p>{error_text(&error)}</p>
								<a href="/login">"ورود به حساب کاربری"</a>
							</div>
						}.into_any(),
						Some(Ok(tickets)) => {
							let stats = TicketStats::of(&tickets);
							view! {
								<div id="ticket_stats">
									<div class="stat"><span>"همه"</span><strong>{stats.total}</strong></div>
									<div class="stat"><span>"باز"</span><strong>{stats.open}</strong></div>
									<div class="stat"><span>"پاسخ داده شده"</span><strong>{stats.answered}</strong></div>
								</div>
								<TicketTable tickets base_path="/account/tickets" show_creator=false />
							}.into_any()
						}
					}
				}
			</Transition>
			<section id="new_ticket">
				<h2>"ارسال تیکت جدید"</h2>
				<form on:submit=form_submit novalidate>
					<label>
						<span class="form_label">"عنوان"</span>
						<input type="text" bind:value=(title, set_title) />
						{error_for("title")}
					</label>
					<label>
						<span class="form_label">"دپارتمان"</span>
						<select on:change=move |event| set_department.set(event_target_value(&event))>
							{
								TICKET_DEPARTMENTS
									.iter()
									.map(|value| view! {
										<option value=*value selected=move || department.get() == *value>
											{department_label(value)}
										</option>
									})
									.collect_view()
							}
						</select>
					</label>
					<label>
						<span class="form_label">"متن پیام"</span>
						<textarea bind:value=(message, set_message) />
						{error_for("message")}
					</label>
					<button type="submit" disabled=move || submitting.get()>"ارسال تیکت"</button>
				</form>
			</section>
		</div>
	}
}

/// Ticket list linking each row to `{base_path}/{id}`
#[component]
pub fn TicketTable(tickets: Vec<Ticket>, base_path: &'static str, show_creator: bool) -> impl IntoView {
	if tickets.is_empty() {
		return view! { <p class="empty_state">"تیکتی یافت نشد."</p> }.into_any();
	}

	view! {
		<table class="ticket_table">
			<thead>
				<tr>
					<th>"شناسه"</th>
					<th>"عنوان"</th>
					{show_creator.then(|| view! { <th>"کاربر"</th> })}
					<th>"دپارتمان"</th>
					<th>"وضعیت"</th>
					<th>"تاریخ"</th>
				</tr>
			</thead>
			<tbody>
				{
					tickets
						.into_iter()
						.map(|ticket| {
							let href = format!("{}/{}", base_path, ticket.id);
							let creator = show_creator.then(|| {
								let name = ticket.creator_name().unwrap_or("-").to_string();
								view! { <td>{name}</td> }
							});
							view! {
								<tr>
									<td><a href=href.clone()>{ticket.id.clone()}</a></td>
									<td><a href=href>{ticket.title.clone()}</a></td>
									{creator}
									<td>{department_label(&ticket.department).to_string()}</td>
									<td class=status_class(&ticket.status)>{ticket_status_label(&ticket.status).to_string()}</td>
									<td>{display_time(&ticket.created_at)}</td>
								</tr>
							}
						})
						.collect_view()
				}
			</tbody>
		</table>
	}
	.into_any()
}

#[component]
pub fn CustomerTicketPage() -> impl IntoView {
	let params = use_params::<TicketParams>();
	let ticket_id = Memo::new(move |_| params.read().as_ref().ok().and_then(|params| params.ticket.clone()));

	view! {
		<a class="back_link" href="/account/tickets">"بازگشت به تیکت‌ها"</a>
		{
			move || match ticket_id.get() {
				Some(ticket_id) => view! {
					<TicketConversation ticket_id context=ViewerContext::Customer />
				}.into_any(),
				None => view! { <NotFound /> }.into_any(),
			}
		}
	}
}

async fn load_thread(context: ViewerContext, ticket_id: String) -> Result<TicketThread, ServerFnError> {
	match context {
		ViewerContext::Customer => get_my_ticket(ticket_id).await,
		ViewerContext::Admin => get_admin_ticket(ticket_id).await,
	}
}

async fn send_reply(context: ViewerContext, ticket_id: String, message: String) -> Result<(), ServerFnError> {
	match context {
		ViewerContext::Customer => reply_to_my_ticket(ticket_id, message).await,
		ViewerContext::Admin => reply_as_admin(ticket_id, message).await,
	}
}

/// A ticket's messages, each on its side of the conversation, with a reply box
#[component]
pub fn TicketConversation(ticket_id: String, context: ViewerContext) -> impl IntoView {
	let auth = use_auth();
	let (refresh, set_refresh) = signal(0_u32);
	let thread = Resource::new(move || refresh.get(), {
		let ticket_id = ticket_id.clone();
		move |_| load_thread(context, ticket_id.clone())
	});

	let (reply, set_reply) = signal(String::new());
	let (sending, set_sending) = signal(false);

	let reply_submit = move |event: SubmitEvent| {
		event.prevent_default();
		let message = reply.get_untracked();
		if message.trim().is_empty() {
			auth.notify(ToastRequest::new("متن پیام الزامی است", ToastKind::Warning));
			return;
		}

		let ticket_id = ticket_id.clone();
		set_sending.set(true);
		spawn(async move {
			match send_reply(context, ticket_id, message.trim().to_string()).await {
				Ok(()) => {
					set_reply.set(String::new());
					set_refresh.update(|count| *count += 1);
					auth.notify(ToastRequest::new("پاسخ شما ارسال شد", ToastKind::Success));
				}
				Err(error) => auth.notify(ToastRequest::new(error_text(&error), ToastKind::Error)),
			}
			set_sending.set(false);
		});
	};

	view! {
		<Transition fallback=|| view! { <div class="loading">"در حال بارگذاری تیکت..."</div> }>
			{
				move || match thread.get() {
					None => ().into_any(),
					Some(Err(error)) => view! { <p class="page_error">{error_text(&error)}</p> }.into_any(),
					Some(Ok(TicketThread { ticket: None, .. })) => view! { <NotFound /> }.into_any(),
					Some(Ok(TicketThread { ticket: Some(ticket), messages })) => {
						let (ticket_messages, _) = signal(messages);
						view! {
							<div id="ticket_header">
								<h1 id="ticket_title">{ticket.title.clone()}</h1>
								<span class=status_class(&ticket.status)>{ticket_status_label(&ticket.status).to_string()}</span>
								<span class="ticket_department">{department_label(&ticket.department).to_string()}</span>
							</div>
							<div id="ticket_message_list">
								<For
									each=move || ticket_messages.get()
									key=|message| message.id.clone()
									children=move |message| {
										let side = match message.role {
											SenderRole::User => "ticket_message ticket_message_user",
											SenderRole::Admin => "ticket_message ticket_message_admin",
										};
										view! {
											<div class=side>
												<div class="ticket_message_start">
													<span class="ticket_message_author">
														{sender_label(message.role, context, message.sender_name.as_deref())}
													</span>
													<span class="ticket_message_time">{display_time(&message.created_at)}</span>
												</div>
												<div class="ticket_message_body">{message.message}</div>
											</div>
										}
									}
								/>
							</div>
						}.into_any()
					}
				}
			}
		</Transition>
		<form id="ticket_reply" on:submit=reply_submit>
			<textarea bind:value=(reply, set_reply) placeholder="پاسخ خود را بنویسید..." />
			<button type="submit" disabled=move || sending.get()>"ارسال پاسخ"</button>
		</form>
	}
}

#[server]
async fn get_my_tickets() -> Result<Vec<Ticket>, ServerFnError> {
	use super::server_utils::{get_backend, get_credentials_from_request, user_facing_error};

	let credentials = get_credentials_from_request().await?;
	let token = credentials.require_token().map_err(user_facing_error)?;
	get_backend().tickets(Some(token)).await.map_err(user_facing_error)
}

#[server]
async fn get_my_ticket(ticket_id: String) -> Result<TicketThread, ServerFnError> {
	use super::server_utils::{get_backend, get_credentials_from_request, user_facing_error};

	let credentials = get_credentials_from_request().await?;
	let token = credentials.require_token().map_err(user_facing_error)?;
	let viewer = credentials.user().await.map_err(user_facing_error)?;

	let detail = get_backend()
		.ticket_detail(Some(token), &ticket_id)
		.await
		.map_err(user_facing_error)?;
	Ok(TicketThread::new(
		detail,
		viewer.as_ref().map(|user| user.id.as_str()),
		ViewerContext::Customer,
	))
}

#[server]
async fn reply_to_my_ticket(ticket_id: String, message: String) -> Result<(), ServerFnError> {
	use super::server_utils::{get_backend, get_credentials_from_request, user_facing_error};

	let credentials = get_credentials_from_request().await?;
	let token = credentials.require_token().map_err(user_facing_error)?;
	get_backend()
		.reply_to_ticket(Some(token), &ticket_id, &message)
		.await
		.map_err(user_facing_error)
}

#[server]
async fn open_ticket(form: NewTicketForm) -> Result<(), ServerFnError> {
	use super::server_utils::{get_backend, get_credentials_from_request, user_facing_error};
	use crate::model::NewTicket;
	use crate::web::error::ApiError;

	ApiError::check(form.validate()).map_err(user_facing_error)?;
	let credentials = get_credentials_from_request().await?;
	let token = credentials.require_token().map_err(user_facing_error)?;

	let ticket = NewTicket {
		title: form.title.trim().to_string(),
		department: form.department_or_default().to_string(),
		message: form.message.trim().to_string(),
	};
	get_backend()
		.create_ticket(Some(token), &ticket)
		.await
		.map_err(user_facing_error)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn customers_see_their_own_messages_as_theirs() {
		assert_eq!(sender_label(SenderRole::User, ViewerContext::Customer, Some("سارا")), "شما");
		assert_eq!(sender_label(SenderRole::Admin, ViewerContext::Customer, Some("علی")), "پشتیبانی");
	}

	#[test]
	fn admins_see_the_customer_name() {
		assert_eq!(sender_label(SenderRole::User, ViewerContext::Admin, Some("سارا")), "سارا");
		assert_eq!(sender_label(SenderRole::User, ViewerContext::Admin, None), "کاربر");
	}
}
