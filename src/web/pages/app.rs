// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::about::{AboutItemPage, AboutPage, FaqItemPage, FaqPage};
use super::account::{Cart, Coupons, SubscriptionPage, Subscriptions};
use super::admin_contacts::AdminContacts;
use super::admin_tickets::{AdminTicketPage, AdminTickets};
use super::contact::ContactPage;
use super::errors::not_found::NotFound;
use super::header::PageHeader;
use super::home::Home;
use super::login::LoginPage;
use super::orders::{OrderPage, Orders};
use super::password::{ChangePasswordPage, ForgotPasswordPage};
use super::product_detail::ProductDetail;
use super::products::{Products, Projects};
use super::register::RegisterPage;
use super::tickets::{CustomerTicketPage, CustomerTickets};
use super::toasts::ToastContainer;
use super::utils::{AuthContext, get_current_user};
use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let auth = AuthContext::new();
	provide_context(auth);

	let current_user = OnceResource::new(get_current_user());
	Effect::new_isomorphic(move |_| {
		if let Some(result) = current_user.read().as_ref() {
			match result {
				Ok(user) => auth.resolve(user.clone()),
				Err(error) => {
					leptos::logging::error!("Failed to load the signed-in user: {}", error);
					auth.resolve(None);
				}
			}
		}
	});

	view! {
		<Stylesheet href="/pkg/webcodino.css" />
		<Title text="وب‌کدینو" />

		<Router>
			<PageHeader />
			<ToastContainer />
			<main>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=Home />
					<Route path=path!("/products") view=Products />
					<Route path=path!("/products/*filters") view=Products />
					<Route path=path!("/product/:slug") view=ProductDetail />
					<Route path=path!("/projects") view=Projects />
					<Route path=path!("/about") view=AboutPage />
					<Route path=path!("/about/:slug") view=AboutItemPage />
					<Route path=path!("/faq") view=FaqPage />
					<Route path=path!("/faq/:slug") view=FaqItemPage />
					<Route path=path!("/contact") view=ContactPage />
					<Route path=path!("/login") view=LoginPage />
					<Route path=path!("/register") view=RegisterPage />
					<Route path=path!("/auth/forgot") view=ForgotPasswordPage />
					<Route path=path!("/account/change-password") view=ChangePasswordPage />
					<Route path=path!("/account/cart") view=Cart />
					<Route path=path!("/account/subscriptions") view=Subscriptions />
					<Route path=path!("/account/subscriptions/:subscription") view=SubscriptionPage />
					<Route path=path!("/account/coupons") view=Coupons />
					<Route path=path!("/account/tickets") view=CustomerTickets />
					<Route path=path!("/account/tickets/:ticket") view=CustomerTicketPage />
					<Route path=path!("/account/orders") view=Orders />
					<Route path=path!("/account/orders/:order") view=OrderPage />
					<Route path=path!("/admin/tickets") view=AdminTickets />
					<Route path=path!("/admin/tickets/:ticket") view=AdminTicketPage />
					<Route path=path!("/admin/contacts") view=AdminContacts />
				</Routes>
			</main>
		</Router>
	}
}
