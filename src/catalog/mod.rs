// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Seed data served by the storefront.

pub mod account;
pub mod admin;
pub mod content;
pub mod products;

use crate::filters::Subcategorized;

/// Parses a `?subcategories=a,b` query value into its non-empty, trimmed entries.
pub fn parse_subcategory_query(query: Option<&str>) -> Vec<&str> {
	match query {
		Some(query) => query.split(',').map(str::trim).filter(|entry| !entry.is_empty()).collect(),
		None => Vec::new(),
	}
}

/// Keeps the items whose subcategory is listed in the query. A missing or empty query keeps everything.
pub fn filter_by_subcategories<T: Subcategorized + Clone>(items: &[T], query: Option<&str>) -> Vec<T> {
	let wanted = parse_subcategory_query(query);
	if wanted.is_empty() {
		return items.to_vec();
	}
	items
		.iter()
		.filter(|item| wanted.contains(&item.subcategory()))
		.cloned()
		.collect()
}
