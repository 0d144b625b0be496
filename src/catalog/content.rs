// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::filters::Subcategorized;
use serde::{Deserialize, Serialize};

/// A completed portfolio project
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Project {
	pub id: u32,
	pub title: String,
	pub desc: String,
	pub category: String,
	pub subcategory: String,
	pub price: String,
	pub link: Option<String>,
	pub logo: Option<String>,
}

impl Subcategorized for Project {
	fn subcategory(&self) -> &str {
		&self.subcategory
	}
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
	pub id: u32,
	pub title: String,
	pub desc: String,
	pub category: String,
	pub subcategory: String,
	pub read_time: String,
}

impl Subcategorized for BlogPost {
	fn subcategory(&self) -> &str {
		&self.subcategory
	}
}

/// A section of the "about us" pages
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AboutItem {
	pub slug: &'static str,
	pub title: &'static str,
	pub body: &'static str,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Faq {
	pub slug: &'static str,
	pub question: &'static str,
	pub answer: &'static str,
}

pub fn all_projects() -> Vec<Project> {
	fn project(
		id: u32,
		title: &str,
		desc: &str,
		category: &str,
		subcategory: &str,
		link: &str,
		logo: &str,
	) -> Project {
		Project {
			id,
			title: title.to_string(),
			desc: desc.to_string(),
			category: category.to_string(),
			subcategory: subcategory.to_string(),
			price: String::from("تکمیل شده"),
			link: Some(link.to_string()),
			logo: Some(logo.to_string()),
		}
	}

	vec![
		project(
			1,
			"FX Credito",
			"تامین سرمایه و پرداخت وام، ویژه فعالان بازار فارکس، سهام بین‌الملل، ارزهای دیجیتال و کریپتو کارنسی",
			"مالی",
			"وام و اعتبار",
			"https://fxcredito.com/",
			"/fx_logo.svg",
		),
		project(
			2,
			"Octane Oil",
			"سایت فروشگاهی اکتان با ارائه خدمات متنوع در حوزه انرژی و سوخت",
			"فروشگاهی",
			"انرژی و سوخت",
			"https://octaneoll.com/",
			"/octaneoll.png",
		),
		project(
			3,
			"KD Financial Academy",
			"آکادمی مالی ارائه‌دهنده خدمات آموزشی و سیگنال‌های معاملاتی در بازارهای مالی",
			"آموزشی",
			"مالی و سرمایه‌گذاری",
			"https://kd-fa.com/",
			"/kd_logo.svg",
		),
		project(
			4,
			"امتداد",
			"مرکز تجربه‌نگاری امتداد با هدف شناسایی حلقه‌های میانی و تولید آثار مکتوب",
			"فرهنگی",
			"تجربه‌نگاری",
			"https://mtedad.org/",
			"/metdad_logo.png",
		),
		project(
			5,
			"Body Aroma",
			"اولین فروشگاه تخصصی بادی اسپلش و بادی لوشن‌های زنانه و مردانه با ارائه محصولات باکیفیت و اورجینال",
			"فروشگاهی",
			"لوازم آرایشی و بهداشتی",
			"https://bodyaroma.ir/",
			"/logo-bodyaroma.png",
		),
	]
}

pub fn all_posts() -> Vec<BlogPost> {
	let posts = [
		(1, "آموزش Next.js از صفر", "شروع سریع با App Router", "موضوع", "آموزشی", "۷ دقیقه"),
		(2, "ویدیو: بهینه‌سازی سئو در React", "نکات عملی و ابزارها", "قالب", "ویدیو", "۱۲ دقیقه"),
		(3, "خبر: انتشار نسخه جدید Node.js", "ویژگی‌های مهم نسخه اخیر", "موضوع", "اخبار", "۴ دقیقه"),
		(4, "راهنما: دیپلوی با Vercel", "گام‌به‌گام برای پروژه‌های Next.js", "موضوع", "راهنما", "۶ دقیقه"),
		(5, "مقاله: معماری DevOps", "الگوها و بهترین‌عمل‌ها", "قالب", "مقاله", "۱۰ دقیقه"),
		(6, "پادکست: آینده React", "مصاحبه با متخصصین", "قالب", "پادکست", "۱۵ دقیقه"),
		(7, "Next.js پیشرفته", "بهینه‌سازی پرفورمنس", "تکنولوژی", "Next.js", "۹ دقیقه"),
	];
	posts
		.into_iter()
		.map(|(id, title, desc, category, subcategory, read_time)| BlogPost {
			id,
			title: title.to_string(),
			desc: desc.to_string(),
			category: category.to_string(),
			subcategory: subcategory.to_string(),
			read_time: read_time.to_string(),
		})
		.collect()
}

pub const ABOUT_ITEMS: &[AboutItem] = &[
	AboutItem {
		slug: "team",
		title: "تیم وب‌کدینو",
		body: "تیمی از طراحان، توسعه‌دهندگان و تولیدکنندگان محتوا که محصولات دیجیتال را از ایده تا اجرا همراهی می‌کنند.",
	},
	AboutItem {
		slug: "mission",
		title: "ماموریت ما",
		body: "تبدیل ایده‌های کسب‌وکار به محصول دیجیتال موفق با کیفیت، پایداری و پشتیبانی واقعی.",
	},
	AboutItem {
		slug: "services",
		title: "خدمات ما",
		body: "طراحی سایت، اپلیکیشن، ربات، هاست و سرور و تولید محتوا برای کسب‌وکارهای کوچک و بزرگ.",
	},
];

pub const FAQS: &[Faq] = &[
	Faq {
		slug: "delivery-time",
		question: "زمان تحویل پروژه چقدر است؟",
		answer: "بسته به پکیج انتخابی، تحویل بین دو تا هشت هفته انجام می‌شود.",
	},
	Faq {
		slug: "support",
		question: "پس از تحویل پشتیبانی دارید؟",
		answer: "بله، همه پکیج‌ها شامل پشتیبانی فنی و امکان ارتقا هستند.",
	},
	Faq {
		slug: "payment",
		question: "پرداخت به چه صورت است؟",
		answer: "پرداخت به صورت مرحله‌ای و متناسب با پیشرفت پروژه انجام می‌شود.",
	},
];

pub fn find_about_item(slug: &str) -> Option<&'static AboutItem> {
	ABOUT_ITEMS.iter().find(|item| item.slug == slug)
}

pub fn find_faq(slug: &str) -> Option<&'static Faq> {
	FAQS.iter().find(|faq| faq.slug == slug)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::filters::FilterSelection;

	#[test]
	fn slugs_are_unique_and_findable() {
		for item in ABOUT_ITEMS {
			assert_eq!(find_about_item(item.slug), Some(item));
		}
		for faq in FAQS {
			assert_eq!(find_faq(faq.slug), Some(faq));
		}
		assert!(find_faq("missing").is_none());
	}

	#[test]
	fn projects_ignore_product_filters() {
		let projects = all_projects();
		assert_eq!(projects.len(), 5);
		let selection = FilterSelection::decode("/products");
		assert_eq!(selection.apply(&projects).len(), 5);
	}

	#[test]
	fn blog_post_serializes_camel_case() {
		let post = &all_posts()[0];
		let json = serde_json::to_value(post).unwrap();
		assert_eq!(json["readTime"], "۷ دقیقه");
	}
}
