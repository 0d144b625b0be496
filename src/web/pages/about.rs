// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::errors::not_found::NotFound;
use crate::catalog::content::{ABOUT_ITEMS, FAQS, find_about_item, find_faq};
use leptos::prelude::*;
use leptos_router::hooks::use_params;
use leptos_router::params::Params;

#[derive(Clone, Debug, Params, PartialEq)]
struct SlugParams {
	slug: Option<String>,
}

fn use_slug() -> Memo<Option<String>> {
	let params = use_params::<SlugParams>();
	Memo::new(move |_| params.read().as_ref().ok().and_then(|params| params.slug.clone()))
}

#[component]
pub fn AboutPage() -> impl IntoView {
	view! {
		<div id="about_page">
			<h1>"درباره ما"</h1>
			{
				ABOUT_ITEMS
					.iter()
					.map(|item| view! {
						<section class="about_item">
							<h2><a href=format!("/about/{}", item.slug)>{item.title}</a></h2>
							<p>{item.body}</p>
						</section>
					})
					.collect_view()
			}
		</div>
	}
}

#[component]
pub fn AboutItemPage() -> impl IntoView {
	let slug = use_slug();
	move || match slug.get().as_deref().and_then(find_about_item) {
		Some(item) => view! {
			<article class="about_item">
				<h1>{item.title}</h1>
				<p>{item.body}</p>
				<a href="/about">"درباره ما"</a>
			</article>
		}
		.into_any(),
		None => view! { <NotFound /> }.into_any(),
	}
}

#[component]
pub fn FaqPage() -> impl IntoView {
	view! {
		<div id="faq_page">
			<h1>"سوالات متداول"</h1>
			{
				FAQS.iter()
					.map(|faq| view! {
						<details class="faq">
							<summary>{faq.question}</summary>
							<p>{faq.answer}</p>
							<a href=format!("/faq/{}", faq.slug)>"لینک این سوال"</a>
						</details>
					})
					.collect_view()
			}
		</div>
	}
}

#[component]
pub fn FaqItemPage() -> impl IntoView {
	let slug = use_slug();
	move || match slug.get().as_deref().and_then(find_faq) {
		Some(faq) => view! {
			<article class="faq">
				<h1>{faq.question}</h1>
				<p>{faq.answer}</p>
				<a href="/faq">"همه سوالات"</a>
			</article>
		}
		.into_any(),
		None => view! { <NotFound /> }.into_any(),
	}
}
