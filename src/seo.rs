// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generates `sitemap.xml` and `robots.txt`.

use crate::catalog::content::{ABOUT_ITEMS, FAQS};
use crate::catalog::products::all_products;
use crate::filters::all_filter_paths;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fmt::Write;

const STATIC_PATHS: [&str; 6] = ["/", "/about", "/faq", "/products", "/projects", "/contact"];

const DISALLOWED_PATHS: [&str; 10] = [
	"/admin",
	"/admin/*",
	"/account",
	"/account/*",
	"/blog",
	"/login",
	"/register",
	"/auth",
	"/auth/*",
	"/api/*",
];

#[derive(Clone, Debug, PartialEq)]
pub struct SitemapEntry {
	pub url: String,
	pub last_modified: DateTime<Utc>,
	pub change_frequency: &'static str,
	pub priority: f32,
}

fn trim_base_url(base_url: &str) -> &str {
	base_url.strip_suffix('/').unwrap_or(base_url)
}

fn priority_for(path: &str) -> f32 {
	if path == "/" {
		1.0
	} else if path.starts_with("/product") {
		0.8
	} else {
		0.7
	}
}

/// Every public path worth indexing, without duplicates, in first-seen order
pub fn public_paths() -> Vec<String> {
	let candidates = STATIC_PATHS
		.iter()
		.map(|path| path.to_string())
		.chain(all_products().iter().map(|product| product.detail_path()))
		.chain(ABOUT_ITEMS.iter().map(|item| format!("/about/{}", item.slug)))
		.chain(FAQS.iter().map(|faq| format!("/faq/{}", faq.slug)))
		.chain(all_filter_paths());

	let mut seen = HashSet::new();
	candidates.filter(|path| seen.insert(path.clone())).collect()
}

pub fn sitemap_entries(base_url: &str, now: DateTime<Utc>) -> Vec<SitemapEntry> {
	let base_url = trim_base_url(base_url);
	public_paths()
		.into_iter()
		.map(|path| SitemapEntry {
			url: format!("{}{}", base_url, path),
			last_modified: now,
			change_frequency: "weekly",
			priority: priority_for(&path),
		})
		.collect()
}

fn escape_xml(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&apos;"),
			c => escaped.push(c),
		}
	}
	escaped
}

pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
	let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
	xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
	for entry in entries {
		// Writing to a String can't fail
		let _ = write!(
			xml,
			"<url>\n<loc>{}</loc>\n<lastmod>{}</lastmod>\n<changefreq>{}</changefreq>\n<priority>{:.1}</priority>\n</url>\n",
			escape_xml(&entry.url),
			entry.last_modified.to_rfc3339(),
			entry.change_frequency,
			entry.priority
		);
	}
	xml.push_str("</urlset>\n");
	xml
}

pub fn robots_txt(base_url: &str) -> String {
	let base_url = trim_base_url(base_url);
	let mut robots = String::from("User-Agent: *\nAllow: /\n");
	for path in DISALLOWED_PATHS {
		robots.push_str("Disallow: ");
		robots.push_str(path);
		robots.push('\n');
	}
	robots.push('\n');
	let _ = writeln!(robots, "Host: {}", base_url);
	let _ = writeln!(robots, "Sitemap: {}/sitemap.xml", base_url);
	robots
}
