// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::utils::error_text;
use crate::catalog::account::Order;
use leptos::prelude::*;
use leptos_router::hooks::use_params;
use leptos_router::params::Params;

#[derive(Clone, Debug, Params, PartialEq)]
struct OrderParams {
	order: Option<String>,
}

#[component]
pub fn Orders() -> impl IntoView {
	let orders = OnceResource::new(get_orders());

	view! {
		<div id="orders_page">
			<h1>"سفارش‌های من"</h1>
			<Transition fallback=|| view! { <div class="loading">"در حال بارگذاری سفارش‌ها..."</div> }>
				{
					move || match orders.get() {
						None => ().into_any(),
						Some(Err(error)) => view! { <p class="page_error">{error_text(&error)}</p> }.into_any(),
						Some(Ok(orders)) if orders.is_empty() => view! {
							<p class="empty_state">"هنوز سفارشی ثبت نکرده‌اید."</p>
						}.into_any(),
						Some(Ok(orders)) => view! {
							<table class="order_table">
								<thead>
									<tr>
										<th>"شماره سفارش"</th>
										<th>"تاریخ"</th>
										<th>"اقلام"</th>
										<th>"مبلغ"</th>
										<th>"وضعیت"</th>
									</tr>
								</thead>
								<tbody>
									<For
										each=move || orders.clone()
										key=|order| order.id.clone()
										children=|order| {
											let href = format!("/account/orders/{}", order.id);
											view! {
												<tr>
													<td><a href=href>{order.id}</a></td>
													<td>{order.date}</td>
													<td>{order.items}</td>
													<td>{order.amount}</td>
													<td>{order.status}</td>
												</tr>
											}
										}
									/>
								</tbody>
							</table>
						}.into_any(),
					}
				}
			</Transition>
		</div>
	}
}

#[component]
pub fn OrderPage() -> impl IntoView {
	let params = use_params::<OrderParams>();
	let order_id = move || {
		params
			.read()
			.as_ref()
			.ok()
			.and_then(|params| params.order.clone())
			.unwrap_or_default()
	};
	let order = Resource::new(order_id, get_order);

	view! {
		<div id="order_page">
			<a class="back_link" href="/account/orders">"بازگشت به سفارش‌ها"</a>
			<Transition fallback=|| view! { <div class="loading">"در حال بارگذاری سفارش..."</div> }>
				{
					move || match order.get() {
						None => ().into_any(),
						Some(Err(error)) => view! { <p class="page_error">{error_text(&error)}</p> }.into_any(),
						Some(Ok(None)) => view! {
							<div class="empty_state">
								<h1>"سفارش یافت نشد"</h1>
								<p>"سفارشی با این شماره در حساب شما وجود ندارد."</p>
							</div>
						}.into_any(),
						Some(Ok(Some(order))) => view! {
							<h1>{format!("سفارش {}", order.id)}</h1>
							<dl class="order_details">
								<dt>"تاریخ"</dt>
								<dd>{order.date}</dd>
								<dt>"اقلام"</dt>
								<dd>{order.items}</dd>
								<dt>"مبلغ"</dt>
								<dd>{order.amount}</dd>
								<dt>"وضعیت"</dt>
								<dd>{order.status}</dd>
							</dl>
						}.into_any(),
					}
				}
			</Transition>
		</div>
	}
}

#[server]
async fn get_orders() -> Result<Vec<Order>, ServerFnError> {
	use super::server_utils::{get_credentials_from_request, user_facing_error};
	use crate::catalog::account::orders;

	let credentials = get_credentials_from_request().await?;
	credentials.require_token().map_err(user_facing_error)?;
	Ok(orders())
}

#[server]
async fn get_order(order_id: String) -> Result<Option<Order>, ServerFnError> {
	use super::server_utils::{get_credentials_from_request, user_facing_error};
	use crate::catalog::account::find_order;

	let credentials = get_credentials_from_request().await?;
	credentials.require_token().map_err(user_facing_error)?;
	Ok(find_order(&order_id))
}
