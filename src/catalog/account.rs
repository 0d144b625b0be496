// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
	pub id: String,
	pub product: String,
	#[serde(rename = "type")]
	pub kind: String,
	/// Toman
	pub unit_price: u64,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Order {
	pub id: String,
	pub date: String,
	pub items: String,
	pub amount: String,
	pub status: String,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
	pub id: String,
	pub service: String,
	pub plan: String,
	pub price: String,
	pub period: String,
	pub status: String,
	pub start_date: String,
	pub end_date: String,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
	pub code: String,
	pub title: String,
	/// Either a percentage or a Toman amount, already formatted
	pub amount: String,
	pub expire_at: String,
	pub status: String,
}

pub fn cart_items() -> Vec<CartItem> {
	[
		("C-101", "هاست ایرانی پایه", "هاست", 50_000),
		("C-102", "سرور خارجی اختصاصی", "سرور", 900_000),
		("C-103", "طراحی سایت فروشگاهی", "سایت", 2_000_000),
	]
	.into_iter()
	.map(|(id, product, kind, unit_price)| CartItem {
		id: id.to_string(),
		product: product.to_string(),
		kind: kind.to_string(),
		unit_price,
	})
	.collect()
}

pub fn find_cart_item(id: &str) -> Option<CartItem> {
	cart_items().into_iter().find(|item| item.id == id)
}

/// Sum of the cart in Toman
pub fn cart_total(items: &[CartItem]) -> u64 {
	items.iter().map(|item| item.unit_price).sum()
}

pub fn orders() -> Vec<Order> {
	[
		("ORD-1001", "1403/05/01", "هاست ایرانی + دامنه", "۵۵۰,۰۰۰ تومان", "پرداخت شده"),
		("ORD-1002", "1403/05/10", "سرور اختصاصی", "۹۰۰,۰۰۰ تومان", "در حال پردازش"),
		("ORD-1003", "1403/05/15", "طراحی سایت فروشگاهی", "۲,۰۰۰,۰۰۰ تومان", "مرجوع"),
	]
	.into_iter()
	.map(|(id, date, items, amount, status)| Order {
		id: id.to_string(),
		date: date.to_string(),
		items: items.to_string(),
		amount: amount.to_string(),
		status: status.to_string(),
	})
	.collect()
}

pub fn find_order(id: &str) -> Option<Order> {
	orders().into_iter().find(|order| order.id == id)
}

pub fn subscriptions() -> Vec<Subscription> {
	[
		(
			"SUB-001",
			"هاست ایرانی",
			"اقتصادی",
			"۵۰,۰۰۰ تومان",
			"ماهانه",
			"فعال",
			"1403/05/15",
			"1403/06/15",
		),
		(
			"SUB-002",
			"سرور خارجی",
			"اختصاصی",
			"۹۰۰,۰۰۰ تومان",
			"ماهانه",
			"در انتظار",
			"1403/05/20",
			"1403/06/20",
		),
		(
			"SUB-003",
			"سایت فروشگاهی",
			"پرو",
			"۲,۰۰۰,۰۰۰ تومان",
			"سالانه",
			"منقضی",
			"1402/01/01",
			"1402/12/01",
		),
	]
	.into_iter()
	.map(
		|(id, service, plan, price, period, status, start_date, end_date)| Subscription {
			id: id.to_string(),
			service: service.to_string(),
			plan: plan.to_string(),
			price: price.to_string(),
			period: period.to_string(),
			status: status.to_string(),
			start_date: start_date.to_string(),
			end_date: end_date.to_string(),
		},
	)
	.collect()
}

pub fn find_subscription(id: &str) -> Option<Subscription> {
	subscriptions().into_iter().find(|subscription| subscription.id == id)
}

pub fn coupons() -> Vec<Coupon> {
	[
		("WEB10", "۱۰٪ تخفیف خدمات وب", "۱۰٪", "1403/06/30", "فعال"),
		("HOST50K", "۵۰هزار تومان تخفیف هاست", "۵۰,۰۰۰ تومان", "1403/05/30", "منقضی"),
	]
	.into_iter()
	.map(|(code, title, amount, expire_at, status)| Coupon {
		code: code.to_string(),
		title: title.to_string(),
		amount: amount.to_string(),
		expire_at: expire_at.to_string(),
		status: status.to_string(),
	})
	.collect()
}
