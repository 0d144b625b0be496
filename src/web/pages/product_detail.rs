// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::errors::not_found::NotFound;
use super::products::{ProductCard, format_toman};
use crate::catalog::products::{Product, find_product_by_slug, related_products};
use crate::filters::{FilterSelection, lookup_label};
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_params;
use leptos_router::params::Params;

#[derive(Clone, Debug, Params, PartialEq)]
struct ProductParams {
	slug: Option<String>,
}

#[component]
pub fn ProductDetail() -> impl IntoView {
	let params = use_params::<ProductParams>();
	let product = Memo::new(move |_| {
		params
			.read()
			.as_ref()
			.ok()
			.and_then(|params| params.slug.clone())
			.and_then(|slug| find_product_by_slug(&slug))
	});

	move || match product.get() {
		Some(product) => view! { <ProductView product /> }.into_any(),
		None => view! { <NotFound /> }.into_any(),
	}
}

#[component]
fn ProductView(product: &'static Product) -> impl IntoView {
	let (page, set_page) = signal(0_usize);
	let related = move || related_products(product, page.get());
	let has_next_page = move || !related_products(product, page.get() + 1).is_empty();

	let previous_click = move |_: MouseEvent| set_page.update(|page| *page = page.saturating_sub(1));
	let next_click = move |_: MouseEvent| set_page.update(|page| *page += 1);

	let category_link = lookup_label(&product.subcategory)
		.map(|(category, sub)| FilterSelection::new().toggled(category.name, sub.label).encode());

	view! {
		<Title text=product.title.clone() />
		<article id="product_detail">
			<nav class="breadcrumbs">
				<a href="/products">"محصولات"</a>
				" / "
				{
					match category_link {
						Some(href) => view! { <a href=href>{product.subcategory.clone()}</a> }.into_any(),
						None => view! { <span>{product.subcategory.clone()}</span> }.into_any(),
					}
				}
			</nav>
			<h1>{product.tier_emoji()} " " {product.title.clone()}</h1>
			<p class="product_detail_desc">{product.desc.clone()}</p>
			<div class="product_detail_price">{format_toman(product.price)}</div>
		</article>
		<section id="related_products">
			<h2>"محصولات مرتبط"</h2>
			<div class="product_grid">
				{move || related().into_iter().map(|product| view! { <ProductCard product /> }).collect_view()}
			</div>
			<div class="pager">
				<button type="button" on:click=previous_click disabled=move || page.get() == 0>
					"قبلی"
				</button>
				<button type="button" on:click=next_click disabled=move || !has_next_page()>
					"بعدی"
				</button>
			</div>
		</section>
	}
}
