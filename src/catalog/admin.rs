// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Back-office tables.

use super::account::{Order, orders};
use serde::{Deserialize, Serialize};

const SAMPLE_USER_NAMES: [&str; 4] = ["علی رضایی", "نگار محمدی", "پارسا صالحی", "سارا احمدی"];
const SAMPLE_NATIONAL_IDS: [&str; 4] = ["0012345678", "1234567890", "0987654321", "1122334455"];

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserRow {
	pub id: String,
	pub name: String,
	pub email: String,
	/// ادمین, کاربر, or پشتیبان
	pub role: String,
	/// فعال, غیرفعال, or مسدود
	pub status: String,
	pub created_at: String,
}

/// Body of a user creation request; every field is optional
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdminUser {
	pub name: Option<String>,
	pub email: Option<String>,
	pub role: Option<String>,
	pub status: Option<String>,
	pub created_at: Option<String>,
}

impl NewAdminUser {
	/// Builds the row for a new user, filling in defaults for anything not given.
	pub fn into_row(self, id: String) -> AdminUserRow {
		AdminUserRow {
			id,
			name: self.name.unwrap_or_default(),
			email: self.email.unwrap_or_default(),
			role: self.role.unwrap_or_else(|| String::from("کاربر")),
			status: self.status.unwrap_or_else(|| String::from("فعال")),
			created_at: self.created_at.unwrap_or_else(|| String::from("1403/01/01")),
		}
	}
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderRow {
	#[serde(flatten)]
	pub order: Order,
	pub user_name: String,
	pub user_national_id: String,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceTransaction {
	pub id: String,
	pub date: String,
	pub user_name: String,
	pub national_id: String,
	/// واریز or برداشت
	pub kind: String,
	pub method: String,
	pub amount: String,
	/// موفق, ناموفق, or در انتظار
	pub status: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AdminProject {
	pub id: u32,
	pub title: String,
	pub desc: String,
	pub category: String,
	pub subcategory: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub link: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminTicketRow {
	pub id: String,
	pub subject: String,
	pub question: String,
	pub answer: Option<String>,
	pub status: String,
	pub created_at: String,
	pub user_name: String,
}

pub fn users() -> Vec<AdminUserRow> {
	[
		("U-1001", "علی رضایی", "ali@example.com", "ادمین", "فعال", "1403/01/12"),
		("U-1002", "نگار محمدی", "negar@example.com", "کاربر", "فعال", "1403/02/03"),
		("U-1003", "پارسا صالحی", "parsa@example.com", "پشتیبان", "غیرفعال", "1403/02/20"),
		("U-1004", "سارا احمدی", "sara@example.com", "کاربر", "مسدود", "1403/03/01"),
	]
	.into_iter()
	.map(|(id, name, email, role, status, created_at)| AdminUserRow {
		id: id.to_string(),
		name: name.to_string(),
		email: email.to_string(),
		role: role.to_string(),
		status: status.to_string(),
		created_at: created_at.to_string(),
	})
	.collect()
}

/// The account orders with a sample owner assigned to each, cycling through the sample users
pub fn admin_orders() -> Vec<AdminOrderRow> {
	orders()
		.into_iter()
		.enumerate()
		.map(|(index, order)| AdminOrderRow {
			order,
			user_name: SAMPLE_USER_NAMES[index % SAMPLE_USER_NAMES.len()].to_string(),
			user_national_id: SAMPLE_NATIONAL_IDS[index % SAMPLE_NATIONAL_IDS.len()].to_string(),
		})
		.collect()
}

pub fn finance_transactions() -> Vec<FinanceTransaction> {
	vec![FinanceTransaction {
		id: String::from("TX-1001"),
		date: String::from("1403/05/01"),
		user_name: String::from("علی رضایی"),
		national_id: String::from("0012345678"),
		kind: String::from("واریز"),
		method: String::from("آنلاین - ریالی"),
		amount: String::from("۱,۲۵۰,۰۰۰"),
		status: String::from("موفق"),
		description: Some(String::from("پرداخت سفارش ORD-1001")),
	}]
}

pub fn admin_projects() -> Vec<AdminProject> {
	vec![AdminProject {
		id: 1,
		title: String::from("پروژه سایت فروشگاهی"),
		desc: String::from("راه‌اندازی فروش آنلاین"),
		category: String::from("سایت"),
		subcategory: String::from("فروشگاهی"),
		link: Some(String::from("/projects")),
	}]
}

pub fn admin_tickets() -> Vec<AdminTicketRow> {
	vec![AdminTicketRow {
		id: String::from("T-1001"),
		subject: String::from("سوال درباره تمدید هاست"),
		question: String::from("سلام..."),
		answer: Some(String::from("از بخش اشتراک‌ها...")),
		status: String::from("پاسخ داده شد"),
		created_at: String::from("1403/05/12"),
		user_name: String::from("علی رضایی"),
	}]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_user_gets_defaults() {
		let row = NewAdminUser {
			name: Some(String::from("مهدی")),
			..Default::default()
		}
		.into_row(String::from("U-42"));
		assert_eq!(row.id, "U-42");
		assert_eq!(row.name, "مهدی");
		assert_eq!(row.email, "");
		assert_eq!(row.role, "کاربر");
		assert_eq!(row.status, "فعال");
		assert_eq!(row.created_at, "1403/01/01");
	}

	#[test]
	fn orders_get_owners_round_robin() {
		let rows = admin_orders();
		assert_eq!(rows.len(), orders().len());
		assert_eq!(rows[0].user_name, "علی رضایی");
		assert_eq!(rows[1].user_national_id, "1234567890");
		assert_eq!(rows[2].user_name, "پارسا صالحی");
	}

	#[test]
	fn admin_order_row_is_flat_on_the_wire() {
		let json = serde_json::to_value(&admin_orders()[0]).unwrap();
		assert_eq!(json["id"], "ORD-1001");
		assert_eq!(json["userName"], "علی رضایی");
		assert_eq!(json["userNationalId"], "0012345678");
	}
}
