// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::catalog::content::all_projects;
use crate::catalog::products::{Product, all_products};
use crate::catalog::{filter_by_subcategories, parse_subcategory_query};
use crate::filters::{DISABLED_CATEGORIES, FilterSelection, PRODUCTS_PATH, TAXONOMY};
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate, use_query_map};

/// Formats a price as `1,250,000 تومان`.
pub fn format_toman(price: u64) -> String {
	let digits = price.to_string();
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (index, digit) in digits.chars().enumerate() {
		if index > 0 && (digits.len() - index) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(digit);
	}
	format!("{} تومان", grouped)
}

#[component]
pub fn ProductCard(product: &'static Product) -> impl IntoView {
	view! {
		<a class="product_card" href=product.detail_path()>
			<span class="product_card_badge">{product.tier_emoji()}</span>
			<h3 class="product_card_title">{product.title.clone()}</h3>
			<p class="product_card_desc">{product.short_desc()}</p>
			<span class="product_card_price">{format_toman(product.price)}</span>
		</a>
	}
}

/// Product listing whose filters live in the URL path.
#[component]
pub fn Products() -> impl IntoView {
	let location = use_location();
	let selection = Memo::new(move |_| FilterSelection::decode(&location.pathname.get()));

	let go_to = |path: String| use_navigate()(&path, Default::default());
	let toggle = move |category: &'static str, subcategory: &'static str| {
		go_to(selection.get_untracked().toggled(category, subcategory).encode());
	};
	let clear_click = move |_: MouseEvent| go_to(String::from(PRODUCTS_PATH));

	view! {
		<div id="products_page">
			<aside id="filter_sidebar">
				<h2>"دسته‌بندی‌ها"</h2>
				{
					TAXONOMY
						.iter()
						.map(|category| {
							view! {
								<div class="filter_category">
									<h3>
										{category.name}
										{
											move || {
												let count = selection.with(|selection| selection.count(category.name));
												(count > 0).then(|| view! { <span class="filter_count">{count}</span> })
											}
										}
									</h3>
									<ul>
										{
											category
												.subcategories
												.iter()
												.map(|sub| {
													view! {
														<li>
															<label>
																<input
																	type="checkbox"
																	prop:checked=move || selection.with(|selection| selection.contains(sub.label))
																	on:change=move |_| toggle(category.name, sub.label)
																/>
																{sub.label}
															</label>
														</li>
													}
												})
												.collect_view()
										}
									</ul>
								</div>
							}
						})
						.collect_view()
				}
				{
					DISABLED_CATEGORIES
						.iter()
						.map(|name| view! {
							<div class="filter_category filter_category_disabled">
								<h3>{*name}</h3>
								<span>"به‌زودی"</span>
							</div>
						})
						.collect_view()
				}
			</aside>
			<section id="product_list">
				{
					move || {
						let selection = selection.get();
						(!selection.is_empty()).then(|| view! {
							<div id="selected_filters">
								{
									selection
										.by_category()
										.into_iter()
										.map(|(category, labels)| {
											let labels = labels.into_iter().collect::<Vec<_>>().join("، ");
											view! { <span class="selected_filter">{format!("{category}: {labels}")}</span> }
										})
										.collect_view()
								}
								<button type="button" on:click=clear_click>"حذف همه فیلترها"</button>
							</div>
						})
					}
				}
				<div class="product_grid">
					{
						move || {
							let products = selection.with(|selection| selection.apply(all_products()));
							if products.is_empty() {
								view! { <p class="empty_state">"محصولی با این فیلترها پیدا نشد."</p> }.into_any()
							} else {
								products
									.into_iter()
									.map(|product| view! { <ProductCard product /> })
									.collect_view()
									.into_any()
							}
						}
					}
				</div>
			</section>
		</div>
	}
}

/// Portfolio, filtered by `?subcategories=a,b`.
#[component]
pub fn Projects() -> impl IntoView {
	let query = use_query_map();
	let projects = all_projects();

	let mut subcategories: Vec<String> = Vec::new();
	for project in projects.iter() {
		if !subcategories.contains(&project.subcategory) {
			subcategories.push(project.subcategory.clone());
		}
	}

	let selected = Memo::new(move |_| {
		query.with(|query| {
			let raw = query.get("subcategories");
			parse_subcategory_query(raw.as_deref())
				.into_iter()
				.map(str::to_string)
				.collect::<Vec<String>>()
		})
	});
	let visible = Memo::new(move |_| {
		let wanted = selected.get().join(",");
		filter_by_subcategories(&all_projects(), Some(&wanted))
	});

	let toggle = move |subcategory: String| {
		let mut wanted = selected.get_untracked();
		match wanted.iter().position(|entry| *entry == subcategory) {
			Some(index) => {
				wanted.remove(index);
			}
			None => wanted.push(subcategory),
		}
		let path = if wanted.is_empty() {
			String::from("/projects")
		} else {
			format!("/projects?subcategories={}", wanted.join(","))
		};
		use_navigate()(&path, Default::default());
	};

	view! {
		<div id="projects_page">
			<aside id="project_filters">
				{
					subcategories
						.into_iter()
						.map(|subcategory| {
							let label = subcategory.clone();
							let checked = subcategory.clone();
							view! {
								<label>
									<input
										type="checkbox"
										prop:checked=move || selected.with(|selected| selected.contains(&checked))
										on:change=move |_| toggle(subcategory.clone())
									/>
									{label}
								</label>
							}
						})
						.collect_view()
				}
			</aside>
			<div class="project_grid">
				<For
					each=move || visible.get()
					key=|project| project.id
					children=|project| {
						view! {
							<div class="project_card">
								<h3>{project.title}</h3>
								<p>{project.desc}</p>
								<span class="project_card_category">{project.subcategory}</span>
								{project.link.map(|link| view! { <a href=link>"مشاهده"</a> })}
							</div>
						}
					}
				/>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn prices_are_grouped_by_thousands() {
		assert_eq!(format_toman(0), "0 تومان");
		assert_eq!(format_toman(950), "950 تومان");
		assert_eq!(format_toman(50_000), "50,000 تومان");
		assert_eq!(format_toman(2_950_000), "2,950,000 تومان");
	}
}
