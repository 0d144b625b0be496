// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Product filter selection and its URL representation.
//!
//! The selected subcategories are encoded into the path as `/products/<slug>/<slug>/...`, in the order in which
//! they were selected. Decoding is lenient: segments that aren't a known slug are dropped.

use std::collections::{BTreeMap, BTreeSet};

/// Listing path with no filters applied
pub const PRODUCTS_PATH: &str = "/products";

#[derive(Debug, Eq, PartialEq)]
pub struct Subcategory {
	/// Persian label shown next to the checkbox; products carry this label in their `subcategory` field.
	pub label: &'static str,
	/// URL segment for the subcategory
	pub slug: &'static str,
}

#[derive(Debug, Eq, PartialEq)]
pub struct Category {
	pub name: &'static str,
	pub subcategories: &'static [Subcategory],
}

pub static TAXONOMY: &[Category] = &[
	Category {
		name: "سایت",
		subcategories: &[
			Subcategory {
				label: "سایت شرکتی",
				slug: "company-site",
			},
			Subcategory {
				label: "فروشگاهی",
				slug: "shop",
			},
			Subcategory {
				label: "پزشکی",
				slug: "medical",
			},
			Subcategory {
				label: "وبلاگی",
				slug: "blog",
			},
			Subcategory {
				label: "رزومه‌ای",
				slug: "cv",
			},
		],
	},
	Category {
		name: "اپلیکیشن",
		subcategories: &[
			Subcategory {
				label: "اپلیکیشن فروشگاهی",
				slug: "shop-app",
			},
			Subcategory {
				label: "اپلیکیشن خدماتی",
				slug: "service-app",
			},
			Subcategory {
				label: "اپلیکیشن پزشکی",
				slug: "medical-app",
			},
			Subcategory {
				label: "اپلیکیشن شرکتی",
				slug: "company-app",
			},
		],
	},
	Category {
		name: "ربات",
		subcategories: &[
			Subcategory {
				label: "ربات تلگرام",
				slug: "telegram-bot",
			},
			Subcategory {
				label: "ربات اینستاگرام",
				slug: "instagram-bot",
			},
			Subcategory {
				label: "ربات بله",
				slug: "bale-bot",
			},
		],
	},
	Category {
		name: "تولید محتوا",
		subcategories: &[
			Subcategory {
				label: "لیست خدمات شرکت تولید محتوا (سوشیال مدیا + عکاسی)",
				slug: "content-services",
			},
			Subcategory {
				label: "پکیج‌های مدیریت و تولید محتوا",
				slug: "content-management",
			},
			Subcategory {
				label: "پکیج‌های عکاسی و ادیت",
				slug: "photo-editing",
			},
			Subcategory {
				label: "پکیج‌های ویدیو و ریلز",
				slug: "video-reels",
			},
			Subcategory {
				label: "پکیج‌های خدمات جانبی",
				slug: "additional-services",
			},
		],
	},
];

/// Categories shown in the sidebar as "coming soon"; they have no selectable subcategories.
pub const DISABLED_CATEGORIES: &[&str] = &["هاست", "سرور"];

/// Finds the subcategory and its owning category for a URL slug.
pub fn lookup_slug(slug: &str) -> Option<(&'static Category, &'static Subcategory)> {
	TAXONOMY.iter().find_map(|category| {
		category
			.subcategories
			.iter()
			.find(|sub| sub.slug == slug)
			.map(|sub| (category, sub))
	})
}

/// Finds the subcategory and its owning category for a subcategory label.
pub fn lookup_label(label: &str) -> Option<(&'static Category, &'static Subcategory)> {
	TAXONOMY.iter().find_map(|category| {
		category
			.subcategories
			.iter()
			.find(|sub| sub.label == label)
			.map(|sub| (category, sub))
	})
}

/// Every filter path, one per subcategory, in taxonomy order
pub fn all_filter_paths() -> Vec<String> {
	TAXONOMY
		.iter()
		.flat_map(|category| category.subcategories.iter())
		.map(|sub| format!("{}/{}", PRODUCTS_PATH, sub.slug))
		.collect()
}

/// Anything that can be narrowed down by the product filters
pub trait Subcategorized {
	fn subcategory(&self) -> &str;
}

/// The set of selected subcategories, remembering the order in which they were selected.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterSelection {
	selected: Vec<(&'static Category, &'static Subcategory)>,
}

impl FilterSelection {
	pub fn new() -> Self {
		Self::default()
	}

	/// Reconstructs the selection from a URL path.
	pub fn decode(path: &str) -> Self {
		let mut selection = Self::new();

		let Some(rest) = path.strip_prefix(PRODUCTS_PATH) else {
			return selection;
		};
		if !rest.is_empty() && !rest.starts_with('/') {
			return selection;
		}

		for segment in rest.split('/').filter(|segment| !segment.is_empty()) {
			let Some(entry) = lookup_slug(segment) else {
				continue;
			};
			if !selection.contains(entry.1.label) {
				selection.selected.push(entry);
			}
		}

		selection
	}

	/// Produces the canonical path for the selection.
	pub fn encode(&self) -> String {
		if self.selected.is_empty() {
			return String::from(PRODUCTS_PATH);
		}
		let slugs: Vec<&str> = self.selected.iter().map(|(_, sub)| sub.slug).collect();
		format!("{}/{}", PRODUCTS_PATH, slugs.join("/"))
	}

	pub fn is_empty(&self) -> bool {
		self.selected.is_empty()
	}

	pub fn len(&self) -> usize {
		self.selected.len()
	}

	pub fn contains(&self, subcategory: &str) -> bool {
		self.selected.iter().any(|(_, sub)| sub.label == subcategory)
	}

	/// Number of selected subcategories under a category
	pub fn count(&self, category: &str) -> usize {
		self.selected
			.iter()
			.filter(|(owner, _)| owner.name == category)
			.count()
	}

	/// Flips a subcategory on or off.
	///
	/// Newly selected subcategories go to the end of the order. Returns false (and changes nothing) if the
	/// subcategory isn't owned by the given category.
	pub fn toggle(&mut self, category: &str, subcategory: &str) -> bool {
		let Some(entry) = lookup_label(subcategory) else {
			return false;
		};
		if entry.0.name != category {
			return false;
		}

		match self.selected.iter().position(|(_, sub)| sub.label == subcategory) {
			Some(index) => {
				self.selected.remove(index);
			}
			None => self.selected.push(entry),
		}
		true
	}

	pub fn toggled(&self, category: &str, subcategory: &str) -> Self {
		let mut selection = self.clone();
		selection.toggle(category, subcategory);
		selection
	}

	/// Category to selected subcategories
	pub fn by_category(&self) -> BTreeMap<&'static str, BTreeSet<&'static str>> {
		let mut mapping: BTreeMap<&'static str, BTreeSet<&'static str>> = BTreeMap::new();
		for (category, sub) in self.selected.iter() {
			mapping.entry(category.name).or_default().insert(sub.label);
		}
		mapping
	}

	/// Narrows a list down to the selected subcategories. An empty selection keeps everything.
	pub fn apply<'a, T: Subcategorized>(&self, items: &'a [T]) -> Vec<&'a T> {
		if self.is_empty() {
			return items.iter().collect();
		}
		items.iter().filter(|item| self.contains(item.subcategory())).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	struct Item {
		name: &'static str,
		subcategory: &'static str,
	}

	impl Subcategorized for Item {
		fn subcategory(&self) -> &str {
			self.subcategory
		}
	}

	fn all_slugs() -> Vec<&'static str> {
		TAXONOMY
			.iter()
			.flat_map(|category| category.subcategories.iter().map(|sub| sub.slug))
			.collect()
	}

	#[test]
	fn bare_listing_path_is_empty_selection() {
		assert!(FilterSelection::decode("/products").is_empty());
		assert!(FilterSelection::decode("/products/").is_empty());
		assert_eq!(FilterSelection::new().encode(), "/products");
	}

	#[test]
	fn unknown_slugs_are_dropped() {
		assert!(FilterSelection::decode("/products/xyz").is_empty());

		let selection = FilterSelection::decode("/products/xyz/telegram-bot/nope");
		assert_eq!(selection.encode(), "/products/telegram-bot");
	}

	#[test]
	fn paths_outside_the_listing_decode_to_nothing() {
		assert!(FilterSelection::decode("/").is_empty());
		assert!(FilterSelection::decode("/productsshop").is_empty());
		assert!(FilterSelection::decode("/blog/shop").is_empty());
	}

	#[test]
	fn duplicate_segments_keep_first_position() {
		let selection = FilterSelection::decode("/products/shop/cv/shop");
		assert_eq!(selection.len(), 2);
		assert_eq!(selection.encode(), "/products/shop/cv");
	}

	#[test]
	fn encode_follows_selection_order() {
		let mut selection = FilterSelection::new();
		assert!(selection.toggle("سایت", "فروشگاهی"));
		assert!(selection.toggle("ربات", "ربات تلگرام"));
		assert_eq!(selection.encode(), "/products/shop/telegram-bot");

		let mut reversed = FilterSelection::new();
		reversed.toggle("ربات", "ربات تلگرام");
		reversed.toggle("سایت", "فروشگاهی");
		assert_eq!(reversed.encode(), "/products/telegram-bot/shop");
	}

	#[test]
	fn toggle_removes_selected_subcategory() {
		let mut selection = FilterSelection::decode("/products/shop/telegram-bot");
		selection.toggle("سایت", "فروشگاهی");
		assert_eq!(selection.encode(), "/products/telegram-bot");
		selection.toggle("ربات", "ربات تلگرام");
		assert_eq!(selection.encode(), "/products");
	}

	#[test]
	fn toggle_rejects_subcategory_from_other_category() {
		let mut selection = FilterSelection::new();
		assert!(!selection.toggle("ربات", "فروشگاهی"));
		assert!(!selection.toggle("سایت", "ناشناخته"));
		assert!(selection.is_empty());
	}

	#[test]
	fn by_category_groups_selection() {
		let selection = FilterSelection::decode("/products/shop/telegram-bot/cv");
		let mapping = selection.by_category();
		assert_eq!(mapping.len(), 2);
		assert_eq!(
			mapping.get("سایت"),
			Some(&BTreeSet::from(["فروشگاهی", "رزومه‌ای"]))
		);
		assert_eq!(mapping.get("ربات"), Some(&BTreeSet::from(["ربات تلگرام"])));
		assert_eq!(selection.count("سایت"), 2);
		assert_eq!(selection.count("اپلیکیشن"), 0);
	}

	#[test]
	fn apply_filters_by_subcategory_label() {
		let items = [
			Item {
				name: "basic shop",
				subcategory: "فروشگاهی",
			},
			Item {
				name: "telegram",
				subcategory: "ربات تلگرام",
			},
			Item {
				name: "medical",
				subcategory: "پزشکی",
			},
		];

		let everything = FilterSelection::new().apply(&items);
		assert_eq!(everything.len(), 3);

		let selection = FilterSelection::new()
			.toggled("سایت", "فروشگاهی")
			.toggled("ربات", "ربات تلگرام");
		let names: Vec<&str> = selection.apply(&items).iter().map(|item| item.name).collect();
		assert_eq!(names, vec!["basic shop", "telegram"]);
	}

	#[test]
	fn every_slug_belongs_to_one_subcategory() {
		let slugs = all_slugs();
		let unique: BTreeSet<&str> = slugs.iter().copied().collect();
		assert_eq!(slugs.len(), unique.len());
		assert_eq!(all_filter_paths().len(), slugs.len());
	}

	proptest! {
		#[test]
		fn decode_inverts_encode(
			slugs in proptest::sample::subsequence(all_slugs(), 0..=all_slugs().len()).prop_shuffle()
		) {
			let mut selection = FilterSelection::new();
			for slug in slugs {
				let (category, sub) = lookup_slug(slug).unwrap();
				selection.toggle(category.name, sub.label);
			}
			prop_assert_eq!(FilterSelection::decode(&selection.encode()), selection);
		}
	}
}
