// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::filters::Subcategorized;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Number of related products shown per page on a product's detail page
pub const RELATED_PAGE_SIZE: usize = 4;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Product {
	pub id: u32,
	pub slug: String,
	pub title: String,
	pub desc: String,
	pub category: String,
	pub subcategory: String,
	/// Price in toman
	pub price: u64,
}

impl Subcategorized for Product {
	fn subcategory(&self) -> &str {
		&self.subcategory
	}
}

impl Product {
	/// Badge for the product card, based on the package tier in the title
	pub fn tier_emoji(&self) -> &'static str {
		if self.title.contains("پایه") {
			"⭐"
		} else if self.title.contains("حرفه‌ای") {
			"🔥"
		} else if self.title.contains("ویژه") {
			"👑"
		} else {
			"🚀"
		}
	}

	/// First few words of the description for the product grid
	pub fn short_desc(&self) -> String {
		let words: Vec<&str> = self.desc.split(' ').take(5).collect();
		format!("{}...", words.join(" "))
	}

	pub fn detail_path(&self) -> String {
		format!("/product/{}", self.slug)
	}
}

/// One row of the product table: every tiered subcategory has a basic, professional, and premium package.
struct TieredLine {
	category: &'static str,
	subcategory: &'static str,
	title_stem: &'static str,
	slug_stem: &'static str,
	desc: &'static str,
	prices: [u64; 3],
}

const TIERS: [(&str, &str); 3] = [("پایه", "basic"), ("حرفه‌ای", "professional"), ("ویژه", "premium")];

const TIERED_LINES: &[TieredLine] = &[
	TieredLine {
		category: "سایت",
		subcategory: "سایت شرکتی",
		title_stem: "سایت شرکتی",
		slug_stem: "company-website",
		desc: "طراحی سایت شرکتی واکنش‌گرا با پنل مدیریت و سئوی پایه",
		prices: [8_000_000, 15_000_000, 25_000_000],
	},
	TieredLine {
		category: "سایت",
		subcategory: "فروشگاهی",
		title_stem: "فروشگاهی",
		slug_stem: "ecommerce-website",
		desc: "راه‌اندازی فروشگاه اینترنتی با درگاه پرداخت و مدیریت سفارش",
		prices: [12_000_000, 22_000_000, 38_000_000],
	},
	TieredLine {
		category: "سایت",
		subcategory: "پزشکی",
		title_stem: "پزشکی",
		slug_stem: "medical-website",
		desc: "سایت مطب و کلینیک با نوبت‌دهی آنلاین و معرفی خدمات",
		prices: [9_000_000, 17_000_000, 28_000_000],
	},
	TieredLine {
		category: "سایت",
		subcategory: "وبلاگی",
		title_stem: "وبلاگی",
		slug_stem: "blog-website",
		desc: "وبلاگ سریع و سئو شده برای انتشار محتوای تخصصی",
		prices: [5_000_000, 9_000_000, 16_000_000],
	},
	TieredLine {
		category: "سایت",
		subcategory: "رزومه‌ای",
		title_stem: "رزومه‌ای",
		slug_stem: "cv-website",
		desc: "سایت شخصی و رزومه آنلاین برای معرفی حرفه‌ای",
		prices: [3_000_000, 6_000_000, 10_000_000],
	},
	TieredLine {
		category: "اپلیکیشن",
		subcategory: "اپلیکیشن فروشگاهی",
		title_stem: "اپلیکیشن فروشگاهی",
		slug_stem: "shopping-app",
		desc: "اپلیکیشن فروشگاهی اندروید و iOS با سبد خرید و پرداخت",
		prices: [30_000_000, 55_000_000, 90_000_000],
	},
	TieredLine {
		category: "اپلیکیشن",
		subcategory: "اپلیکیشن خدماتی",
		title_stem: "اپلیکیشن خدماتی",
		slug_stem: "service-app",
		desc: "اپلیکیشن رزرو و ارائه خدمات با پنل مدیریت",
		prices: [28_000_000, 50_000_000, 85_000_000],
	},
	TieredLine {
		category: "اپلیکیشن",
		subcategory: "اپلیکیشن پزشکی",
		title_stem: "اپلیکیشن پزشکی",
		slug_stem: "medical-app",
		desc: "اپلیکیشن نوبت‌دهی و پرونده سلامت بیماران",
		prices: [32_000_000, 58_000_000, 95_000_000],
	},
	TieredLine {
		category: "اپلیکیشن",
		subcategory: "اپلیکیشن شرکتی",
		title_stem: "اپلیکیشن شرکتی",
		slug_stem: "company-app",
		desc: "اپلیکیشن سازمانی برای معرفی شرکت و ارتباط با مشتریان",
		prices: [25_000_000, 45_000_000, 80_000_000],
	},
	TieredLine {
		category: "ربات",
		subcategory: "ربات تلگرام",
		title_stem: "ربات تلگرام",
		slug_stem: "telegram-bot",
		desc: "ربات تلگرام برای فروش، پشتیبانی و اطلاع‌رسانی خودکار",
		prices: [4_000_000, 8_000_000, 14_000_000],
	},
	TieredLine {
		category: "ربات",
		subcategory: "ربات اینستاگرام",
		title_stem: "ربات اینستاگرام",
		slug_stem: "instagram-bot",
		desc: "ربات پاسخ‌گویی خودکار دایرکت و کامنت اینستاگرام",
		prices: [5_000_000, 9_000_000, 15_000_000],
	},
	TieredLine {
		category: "ربات",
		subcategory: "ربات بله",
		title_stem: "ربات بله",
		slug_stem: "bale-bot",
		desc: "ربات پیام‌رسان بله برای کسب‌وکارهای داخلی",
		prices: [3_500_000, 7_000_000, 12_000_000],
	},
	TieredLine {
		category: "تولید محتوا",
		subcategory: "پکیج‌های مدیریت و تولید محتوا",
		title_stem: "مدیریت و تولید محتوا",
		slug_stem: "content-management",
		desc: "مدیریت صفحات اجتماعی و تولید محتوای ماهانه",
		prices: [6_000_000, 11_000_000, 18_000_000],
	},
	TieredLine {
		category: "تولید محتوا",
		subcategory: "پکیج‌های عکاسی و ادیت",
		title_stem: "عکاسی و ادیت",
		slug_stem: "photography-editing",
		desc: "عکاسی محصول و تبلیغاتی همراه با ادیت حرفه‌ای",
		prices: [4_000_000, 7_500_000, 12_000_000],
	},
	TieredLine {
		category: "تولید محتوا",
		subcategory: "پکیج‌های ویدیو و ریلز",
		title_stem: "ویدیو و ریلز",
		slug_stem: "video-reels",
		desc: "تولید ویدیو و ریلز کوتاه برای شبکه‌های اجتماعی",
		prices: [5_000_000, 9_500_000, 16_000_000],
	},
	TieredLine {
		category: "تولید محتوا",
		subcategory: "پکیج‌های خدمات جانبی",
		title_stem: "خدمات جانبی",
		slug_stem: "additional-services",
		desc: "طراحی هویت بصری، کپشن‌نویسی و تبلیغات هدفمند",
		prices: [2_500_000, 5_000_000, 9_000_000],
	},
];

/// Single services listed under the content production service list
const CONTENT_SERVICES: &[(&str, &str, &str, u64)] = &[
	(
		"مدیریت و تولید محتوا",
		"content-management-services",
		"مدیریت کامل صفحات اجتماعی به صورت ماهانه",
		5_000_000,
	),
	(
		"عکاسی و ادیت",
		"photography-editing-services",
		"جلسه عکاسی و ادیت تصاویر به صورت تکی",
		3_000_000,
	),
	(
		"ویدیو و ریلز",
		"video-reels-services",
		"تولید ویدیو کوتاه به صورت سفارشی",
		4_000_000,
	),
	(
		"خدمات جانبی",
		"additional-services",
		"خدمات طراحی و تبلیغات به صورت تکی",
		2_000_000,
	),
];

const CONTENT_SERVICES_SUBCATEGORY: &str = "لیست خدمات شرکت تولید محتوا (سوشیال مدیا + عکاسی)";

static PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(build_products);

fn build_products() -> Vec<Product> {
	let mut products = Vec::new();
	let mut next_id = 1;

	for line in TIERED_LINES {
		for ((tier_title, tier_slug), price) in TIERS.iter().zip(line.prices) {
			products.push(Product {
				id: next_id,
				slug: format!("{}-{}", tier_slug, line.slug_stem),
				title: format!("پکیج {} {}", tier_title, line.title_stem),
				desc: line.desc.to_string(),
				category: line.category.to_string(),
				subcategory: line.subcategory.to_string(),
				price,
			});
			next_id += 1;
		}
	}

	for (title, slug, desc, price) in CONTENT_SERVICES {
		products.push(Product {
			id: next_id,
			slug: slug.to_string(),
			title: title.to_string(),
			desc: desc.to_string(),
			category: String::from("تولید محتوا"),
			subcategory: CONTENT_SERVICES_SUBCATEGORY.to_string(),
			price: *price,
		});
		next_id += 1;
	}

	products
}

pub fn all_products() -> &'static [Product] {
	&PRODUCTS
}

pub fn find_product_by_slug(slug: &str) -> Option<&'static Product> {
	PRODUCTS.iter().find(|product| product.slug == slug)
}

/// One page of the other products in the same category
pub fn related_products(product: &Product, page: usize) -> Vec<&'static Product> {
	PRODUCTS
		.iter()
		.filter(|other| other.id != product.id && other.category == product.category)
		.skip(page * RELATED_PAGE_SIZE)
		.take(RELATED_PAGE_SIZE)
		.collect()
}
