// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::products::ProductCard;
use crate::catalog::products::all_products;
use crate::filters::{FilterSelection, TAXONOMY};
use leptos::prelude::*;

const FEATURED_COUNT: usize = 4;

#[component]
pub fn Home() -> impl IntoView {
	let featured: Vec<_> = all_products()
		.iter()
		.filter(|product| product.title.contains("حرفه‌ای"))
		.take(FEATURED_COUNT)
		.collect();

	view! {
		<section id="home_hero">
			<h1>"وب‌کدینو"</h1>
			<p>"طراحی سایت، ربات، اپلیکیشن و تولید محتوا برای کسب‌وکار شما"</p>
			<a class="button" href="/products">"مشاهده محصولات"</a>
		</section>
		<section id="home_categories">
			<h2>"خدمات ما"</h2>
			<ul>
				{
					TAXONOMY
						.iter()
						.map(|category| {
							let first = category.subcategories.first();
							let href = first
								.map(|sub| FilterSelection::new().toggled(category.name, sub.label).encode())
								.unwrap_or_else(|| String::from("/products"));
							view! {
								<li>
									<a href=href>{category.name}</a>
								</li>
							}
						})
						.collect_view()
				}
			</ul>
		</section>
		<section id="home_featured">
			<h2>"محصولات پیشنهادی"</h2>
			<div class="product_grid">
				{featured.into_iter().map(|product| view! { <ProductCard product /> }).collect_view()}
			</div>
		</section>
	}
}
