// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::utils::{error_text, log_out, use_auth};
use crate::auth_state::{ToastKind, ToastRequest};
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn;
use leptos_router::hooks::use_navigate;

#[component]
pub fn PageHeader() -> impl IntoView {
	let auth = use_auth();

	let log_out_click = move |_: MouseEvent| {
		spawn(async move {
			match log_out().await {
				Ok(()) => {
					auth.signed_out();
					use_navigate()("/", Default::default());
				}
				Err(error) => auth.notify(ToastRequest::new(error_text(&error), ToastKind::Error)),
			}
		});
	};

	view! {
		<header id="header">
			<a id="header_logo" href="/">"وب‌کدینو"</a>
			<nav id="header_nav">
				<a href="/">"خانه"</a>
				<a href="/products">"محصولات"</a>
				<a href="/projects">"نمونه‌کارها"</a>
				<a href="/contact">"تماس با ما"</a>
			</nav>
			<div id="header_account">
				{
					move || {
						let state = auth.state.get();
						if state.is_loading() {
							return ().into_any();
						}
						match state.user() {
							Some(user) => {
								let admin_links = state.is_admin().then(|| view! {
									<a href="/admin/tickets">"پنل مدیریت"</a>
									<a href="/admin/contacts">"فرم‌های تماس"</a>
								});
								view! {
									<span id="header_user_name">{user.name.clone()}</span>
									<a href="/account/cart">"سبد خرید"</a>
									<a href="/account/tickets">"تیکت‌ها"</a>
									<a href="/account/orders">"سفارش‌ها"</a>
									<a href="/account/subscriptions">"اشتراک‌ها"</a>
									<a href="/account/coupons">"کدهای تخفیف"</a>
									<a href="/account/change-password">"تغییر رمز عبور"</a>
									{admin_links}
									<button type="button" on:click=log_out_click>"خروج"</button>
								}.into_any()
							}
							None => view! {
								<a href="/login">"ورود"</a>
								<a href="/register">"ثبت‌نام"</a>
							}.into_any(),
						}
					}
				}
			</div>
		</header>
	}
}
