// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Support tickets and contact requests as the storefront works with them, independent of the upstream API's shapes.

use crate::attribution::Authored;
use chrono::{DateTime, Datelike};
use serde::{Deserialize, Serialize};

/// Shown whenever the upstream API can't be reached or doesn't explain its failure
pub const GENERIC_ERROR_MESSAGE: &str = "خطا در ارتباط با سرور";

pub const TICKET_STATUSES: [&str; 4] = ["open", "in_progress", "answered", "closed"];
pub const TICKET_DEPARTMENTS: [&str; 4] = ["Technical Support", "Finance", "Sales", "Other"];

/// Someone on a ticket: its creator or a message's sender.
///
/// The upstream API sends either a bare ID or a populated object, so every field may be missing.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TicketParty {
	pub id: Option<String>,
	pub name: Option<String>,
	pub email: Option<String>,
	pub role: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Ticket {
	pub id: String,
	pub title: String,
	pub status: String,
	pub priority: String,
	pub department: String,
	/// ISO 8601 timestamp as sent upstream
	pub created_at: String,
	pub created_by: Option<TicketParty>,
}

impl Ticket {
	pub fn creator_id(&self) -> Option<&str> {
		self.created_by.as_ref().and_then(|party| party.id.as_deref())
	}

	pub fn creator_name(&self) -> Option<&str> {
		self.created_by.as_ref().and_then(|party| party.name.as_deref())
	}
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TicketMessage {
	pub id: String,
	pub message: String,
	pub created_at: String,
	pub sender: Option<TicketParty>,
}

impl Authored for TicketMessage {
	fn sender_id(&self) -> Option<&str> {
		self.sender.as_ref().and_then(|party| party.id.as_deref())
	}
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TicketDetail {
	/// Missing when the upstream detail response leaves it out
	pub ticket: Option<Ticket>,
	pub messages: Vec<TicketMessage>,
}

/// Data for opening a new ticket
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewTicket {
	pub title: String,
	pub department: String,
	pub message: String,
}

pub fn ticket_status_label(status: &str) -> &str {
	match status {
		"open" => "باز",
		"in_progress" => "در حال بررسی",
		"answered" => "پاسخ داده شد",
		"closed" => "بسته شده",
		other => other,
	}
}

pub fn department_label(department: &str) -> &str {
	match department {
		"Technical Support" => "پشتیبانی فنی",
		"Finance" => "مالی",
		"Sales" => "فروش",
		"Other" => "سایر",
		other => other,
	}
}

/// Counters shown above the customer's ticket list
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TicketStats {
	pub total: usize,
	pub open: usize,
	pub answered: usize,
}

impl TicketStats {
	pub fn of(tickets: &[Ticket]) -> Self {
		Self {
			total: tickets.len(),
			open: tickets.iter().filter(|ticket| ticket.status == "open").count(),
			answered: tickets.iter().filter(|ticket| ticket.status == "answered").count(),
		}
	}
}

/// Back-office ticket list filters. `None` means "all".
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TicketFilter {
	pub search: String,
	pub status: Option<String>,
	pub department: Option<String>,
	/// `YYYY` or `YYYY/MM`
	pub date: Option<String>,
}

impl TicketFilter {
	pub fn matches(&self, ticket: &Ticket) -> bool {
		self.matches_search(ticket)
			&& self.status.as_ref().is_none_or(|status| *status == ticket.status)
			&& self
				.department
				.as_ref()
				.is_none_or(|department| *department == ticket.department)
			&& self.date.as_ref().is_none_or(|date| matches_date(date, &ticket.created_at))
	}

	pub fn apply<'a>(&self, tickets: &'a [Ticket]) -> Vec<&'a Ticket> {
		tickets.iter().filter(|ticket| self.matches(ticket)).collect()
	}

	fn matches_search(&self, ticket: &Ticket) -> bool {
		let search = self.search.trim().to_lowercase();
		if search.is_empty() {
			return true;
		}
		ticket.id.to_lowercase().contains(&search)
			|| ticket.title.to_lowercase().contains(&search)
			|| ticket
				.creator_name()
				.is_some_and(|name| name.to_lowercase().contains(&search))
	}
}

fn matches_date(filter: &str, created_at: &str) -> bool {
	let Ok(created_at) = DateTime::parse_from_rfc3339(created_at) else {
		return false;
	};
	let mut parts = filter.split('/');
	let year = parts.next().and_then(|year| year.parse::<i32>().ok());
	let month = parts.next().map(|month| month.parse::<u32>().ok());
	match (year, month) {
		(Some(year), None) => created_at.year() == year,
		(Some(year), Some(Some(month))) => created_at.year() == year && created_at.month() == month,
		_ => false,
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
	New,
	Answered,
}

impl ContactStatus {
	pub const ALL: [Self; 2] = [Self::New, Self::Answered];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::New => "new",
			Self::Answered => "answered",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|status| status.as_str() == value)
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::New => "جدید",
			Self::Answered => "پاسخ داده شده",
		}
	}
}

/// Persian label for a contact form subject; unknown subjects are shown as sent.
pub fn contact_subject_label(subject: &str) -> &str {
	match subject {
		"consult" => "مشاوره",
		"support" => "پشتیبانی",
		"cooperation" => "پیشنهاد همکاری",
		"order" => "سفارش پروژه",
		"other" => "سایر",
		other => other,
	}
}

/// A message left through the contact form
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactItem {
	pub id: String,
	pub name: String,
	pub email: String,
	pub phone: String,
	pub subject: String,
	pub description: String,
	pub status: ContactStatus,
	pub created_at: String,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
	pub page: u32,
	pub limit: u32,
	pub total: u32,
	pub total_pages: u32,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ContactPage {
	pub items: Vec<ContactItem>,
	pub pagination: Option<Pagination>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ContactStats {
	pub new: u32,
	pub answered: u32,
	pub total: u32,
}

/// Query for the contact list
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct ContactQuery {
	pub page: Option<u32>,
	pub limit: Option<u32>,
	pub status: Option<ContactStatus>,
}
