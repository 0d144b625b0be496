// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cart, subscriptions and coupons of the signed-in customer.

use super::products::format_toman;
use super::utils::{error_text, use_auth};
use crate::auth_state::{ToastKind, ToastRequest};
use crate::catalog::account::{CartItem, Coupon, Subscription, cart_total};
use leptos::prelude::*;
use leptos::task::spawn;
use leptos_router::hooks::use_params;
use leptos_router::params::Params;

#[derive(Clone, Debug, Params, PartialEq)]
struct SubscriptionParams {
	subscription: Option<String>,
}

/// Cart items the visitor hasn't removed during this visit
fn remaining_items(items: &[CartItem], removed: &[String]) -> Vec<CartItem> {
	items
		.iter()
		.filter(|item| !removed.contains(&item.id))
		.cloned()
		.collect()
}

#[component]
pub fn Cart() -> impl IntoView {
	let auth = use_auth();
	let items = OnceResource::new(get_cart());
	let removed = RwSignal::new(Vec::<String>::new());

	let remove = move |id: String| {
		spawn(async move {
			match remove_cart_item(id.clone()).await {
				Ok(()) => removed.update(|removed| removed.push(id)),
				Err(error) => auth.notify(ToastRequest::new(error_text(&error), ToastKind::Error)),
			}
		});
	};

	view! {
		<div id="cart_page">
			<h1>"سبد خرید"</h1>
			<Transition fallback=|| view! { <div class="loading">"در حال بارگذاری سبد خرید..."</div> }>
				{
					move || match items.get() {
						None => ().into_any(),
						Some(Err(error)) => view! { <p class="page_error">{error_text(&error)}</p> }.into_any(),
						Some(Ok(items)) => {
							let shown = removed.with(|removed| remaining_items(&items, removed));
							if shown.is_empty() {
								return view! { <p class="empty_state">"سبد خرید شما خالی است."</p> }.into_any();
							}
							let total = cart_total(&shown);
							view! {
								<table class="cart_table">
									<thead>
										<tr>
											<th>"محصول"</th>
											<th>"نوع"</th>
											<th>"قیمت"</th>
											<th></th>
										</tr>
									</thead>
									<tbody>
										{
											shown
												.into_iter()
												.map(|item| {
													let id = item.id.clone();
													view! {
														<tr>
															<td>{item.product}</td>
															<td>{item.kind}</td>
															<td>{format_toman(item.unit_price)}</td>
															<td>
																<button type="button" on:click=move |_| remove(id.clone())>"حذف"</button>
															</td>
														</tr>
													}
												})
												.collect_view()
										}
									</tbody>
								</table>
								<p class="cart_total">{format!("جمع کل: {}", format_toman(total))}</p>
							}.into_any()
						}
					}
				}
			</Transition>
		</div>
	}
}

#[component]
pub fn Subscriptions() -> impl IntoView {
	let subscriptions = OnceResource::new(get_subscriptions());

	view! {
		<div id="subscriptions_page">
			<h1>"اشتراک‌های من"</h1>
			<Transition fallback=|| view! { <div class="loading">"در حال بارگذاری اشتراک‌ها..."</div> }>
				{
					move || match subscriptions.get() {
						None => ().into_any(),
						Some(Err(error)) => view! { <p class="page_error">{error_text(&error)}</p> }.into_any(),
						Some(Ok(subscriptions)) => view! {
							<table class="subscription_table">
								<thead>
									<tr>
										<th>"سرویس"</th>
										<th>"پلن"</th>
										<th>"مبلغ"</th>
										<th>"دوره"</th>
										<th>"وضعیت"</th>
										<th>"پایان"</th>
									</tr>
								</thead>
								<tbody>
									<For
										each=move || subscriptions.clone()
										key=|subscription| subscription.id.clone()
										children=|subscription| {
											let href = format!("/account/subscriptions/{}", subscription.id);
											view! {
												<tr>
													<td><a href=href>{subscription.service}</a></td>
													<td>{subscription.plan}</td>
													<td>{subscription.price}</td>
													<td>{subscription.period}</td>
													<td>{subscription.status}</td>
													<td>{subscription.end_date}</td>
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
pub fn SubscriptionPage() -> impl IntoView {
	let params = use_params::<SubscriptionParams>();
	let subscription_id = move || {
		params
			.read()
			.as_ref()
			.ok()
			.and_then(|params| params.subscription.clone())
			.unwrap_or_default()
	};
	let subscription = Resource::new(subscription_id, get_subscription);

	view! {
		<div id="subscription_page">
			<a class="back_link" href="/account/subscriptions">"بازگشت به اشتراک‌ها"</a>
			<Transition fallback=|| view! { <div class="loading">"در حال بارگذاری اشتراک..."</div> }>
				{
					move || match subscription.get() {
						None => ().into_any(),
						Some(Err(error)) => view! { <p class="page_error">{error_text(&error)}</p> }.into_any(),
						Some(Ok(None)) => view! {
							<div class="empty_state">
								<h1>"اشتراک یافت نشد"</h1>
							</div>
						}.into_any(),
						Some(Ok(Some(subscription))) => view! {
							<h1>{format!("{} - {}", subscription.service, subscription.plan)}</h1>
							<dl class="subscription_details">
								<dt>"شناسه"</dt>
								<dd>{subscription.id}</dd>
								<dt>"مبلغ"</dt>
								<dd>{subscription.price}</dd>
								<dt>"دوره"</dt>
								<dd>{subscription.period}</dd>
								<dt>"وضعیت"</dt>
								<dd>{subscription.status}</dd>
								<dt>"شروع"</dt>
								<dd>{subscription.start_date}</dd>
								<dt>"پایان"</dt>
								<dd>{subscription.end_date}</dd>
							</dl>
						}.into_any(),
					}
				}
			</Transition>
		</div>
	}
}

#[component]
pub fn Coupons() -> impl IntoView {
	let coupons = OnceResource::new(get_coupons());

	view! {
		<div id="coupons_page">
			<h1>"کدهای تخفیف"</h1>
			<Transition fallback=|| view! { <div class="loading">"در حال بارگذاری کدهای تخفیف..."</div> }>
				{
					move || match coupons.get() {
						None => ().into_any(),
						Some(Err(error)) => view! { <p class="page_error">{error_text(&error)}</p> }.into_any(),
						Some(Ok(coupons)) if coupons.is_empty() => view! {
							<p class="empty_state">"کد تخفیفی برای شما ثبت نشده است."</p>
						}.into_any(),
						Some(Ok(coupons)) => coupons
							.into_iter()
							.map(|coupon| view! {
								<div class="coupon_card">
									<code>{coupon.code}</code>
									<h3>{coupon.title}</h3>
									<span class="coupon_amount">{coupon.amount}</span>
									<span class="coupon_expiry">{format!("انقضا: {}", coupon.expire_at)}</span>
									<span class="coupon_status">{coupon.status}</span>
								</div>
							})
							.collect_view()
							.into_any(),
					}
				}
			</Transition>
		</div>
	}
}

#[server]
async fn get_cart() -> Result<Vec<CartItem>, ServerFnError> {
	use super::server_utils::{get_credentials_from_request, user_facing_error};
	use crate::catalog::account::cart_items;

	let credentials = get_credentials_from_request().await?;
	credentials.require_token().map_err(user_facing_error)?;
	Ok(cart_items())
}

#[server]
async fn remove_cart_item(id: String) -> Result<(), ServerFnError> {
	use super::server_utils::{get_credentials_from_request, user_facing_error};
	use crate::catalog::account::find_cart_item;
	use crate::web::error::ApiError;

	let credentials = get_credentials_from_request().await?;
	credentials.require_token().map_err(user_facing_error)?;
	find_cart_item(&id).ok_or(ApiError::NotFound).map_err(user_facing_error)?;
	Ok(())
}

#[server]
async fn get_subscriptions() -> Result<Vec<Subscription>, ServerFnError> {
	use super::server_utils::{get_credentials_from_request, user_facing_error};
	use crate::catalog::account::subscriptions;

	let credentials = get_credentials_from_request().await?;
	credentials.require_token().map_err(user_facing_error)?;
	Ok(subscriptions())
}

#[server]
async fn get_subscription(subscription_id: String) -> Result<Option<Subscription>, ServerFnError> {
	use super::server_utils::{get_credentials_from_request, user_facing_error};
	use crate::catalog::account::find_subscription;

	let credentials = get_credentials_from_request().await?;
	credentials.require_token().map_err(user_facing_error)?;
	Ok(find_subscription(&subscription_id))
}

#[server]
async fn get_coupons() -> Result<Vec<Coupon>, ServerFnError> {
	use super::server_utils::{get_credentials_from_request, user_facing_error};
	use crate::catalog::account::coupons;

	let credentials = get_credentials_from_request().await?;
	credentials.require_token().map_err(user_facing_error)?;
	Ok(coupons())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::account::cart_items;

	#[test]
	fn removed_items_leave_the_total() {
		let items = cart_items();
		let all = cart_total(&items);

		let shown = remaining_items(&items, &[String::from("C-101")]);
		assert_eq!(shown.len(), items.len() - 1);
		assert!(shown.iter().all(|item| item.id != "C-101"));
		assert_eq!(cart_total(&shown), all - 50_000);

		assert_eq!(remaining_items(&items, &[]), items);
	}
}
