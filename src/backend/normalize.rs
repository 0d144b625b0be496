// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turns the upstream API's loosely shaped JSON into storefront types.

use crate::auth_state::SessionUser;
use crate::model::{
	ContactItem, ContactPage, ContactStats, ContactStatus, Pagination, Ticket, TicketDetail, TicketMessage, TicketParty,
};
use serde_json::Value;

fn string_field(value: &Value, key: &str) -> Option<String> {
	value.get(key).and_then(Value::as_str).map(String::from)
}

/// Mongo-style `_id`, falling back to `id`
fn record_id(value: &Value) -> Option<String> {
	string_field(value, "_id").or_else(|| string_field(value, "id"))
}

fn non_null<'a>(value: Option<&'a Value>) -> Option<&'a Value> {
	value.filter(|value| !value.is_null())
}

/// The error message from a failed response: `message`, then the first of `errors`
pub fn error_message(body: &Value) -> Option<String> {
	string_field(body, "message").or_else(|| {
		body.get("errors")
			.and_then(Value::as_array)
			.and_then(|errors| errors.first())
			.and_then(Value::as_str)
			.map(String::from)
	})
}

pub fn message(body: &Value) -> Option<String> {
	string_field(body, "message")
}

pub fn token(body: &Value) -> Option<String> {
	string_field(body, "token")
		.or_else(|| string_field(body, "accessToken"))
		.or_else(|| body.get("updateUser").and_then(|user| string_field(user, "accessToken")))
}

pub fn user(source: &Value) -> Option<SessionUser> {
	if !source.is_object() {
		return None;
	}
	Some(SessionUser {
		id: record_id(source).unwrap_or_default(),
		name: string_field(source, "name").unwrap_or_default(),
		email: string_field(source, "email").unwrap_or_default(),
		phone: string_field(source, "phone"),
		role: string_field(source, "role").unwrap_or_else(|| String::from("user")),
	})
}

/// The user in a login response: `user`, `updateUser`, or `data`
pub fn login_user(body: &Value) -> Option<SessionUser> {
	non_null(body.get("user"))
		.or_else(|| non_null(body.get("updateUser")))
		.or_else(|| non_null(body.get("data")))
		.and_then(user)
}

/// The user in a `/auth/me` response: `data`, `user`, or the body itself
pub fn current_user(body: &Value) -> Option<SessionUser> {
	let source = non_null(body.get("data"))
		.or_else(|| non_null(body.get("user")))
		.unwrap_or(body);
	user(source)
}

/// The registration response is the created user, recognised by its `_id`
pub fn registered_user(body: &Value) -> Option<SessionUser> {
	body.get("_id").and(user(body))
}

pub fn party(value: &Value) -> Option<TicketParty> {
	match value {
		Value::String(id) => Some(TicketParty {
			id: Some(id.clone()),
			..Default::default()
		}),
		Value::Object(_) => Some(TicketParty {
			id: record_id(value),
			name: string_field(value, "name"),
			email: string_field(value, "email"),
			role: string_field(value, "role"),
		}),
		_ => None,
	}
}

pub fn ticket(value: &Value) -> Option<Ticket> {
	Some(Ticket {
		id: record_id(value)?,
		title: string_field(value, "title").unwrap_or_default(),
		status: string_field(value, "status").unwrap_or_else(|| String::from("open")),
		priority: string_field(value, "priority").unwrap_or_else(|| String::from("medium")),
		department: string_field(value, "department").unwrap_or_default(),
		created_at: string_field(value, "createdAt").unwrap_or_default(),
		created_by: value.get("createdBy").and_then(party),
	})
}

/// Messages without an id are keyed by their position in the thread.
fn ticket_message(position: usize, value: &Value) -> Option<TicketMessage> {
	if !value.is_object() {
		return None;
	}
	Some(TicketMessage {
		id: record_id(value).unwrap_or_else(|| format!("message-{}", position)),
		message: string_field(value, "message").unwrap_or_default(),
		created_at: string_field(value, "createdAt").unwrap_or_default(),
		sender: value.get("sender").and_then(party),
	})
}

/// A ticket list is either a bare array or `{ tickets: [...] }`; anything else is empty.
pub fn ticket_list(body: &Value) -> Vec<Ticket> {
	let entries = match body {
		Value::Array(entries) => entries,
		_ => match body.get("tickets").and_then(Value::as_array) {
			Some(entries) => entries,
			None => return Vec::new(),
		},
	};
	entries.iter().filter_map(ticket).collect()
}

pub fn ticket_detail(body: &Value) -> TicketDetail {
	TicketDetail {
		ticket: body.get("ticket").and_then(ticket),
		messages: body
			.get("messages")
			.and_then(Value::as_array)
			.map(|messages| {
				messages
					.iter()
					.enumerate()
					.filter_map(|(position, message)| ticket_message(position, message))
					.collect()
			})
			.unwrap_or_default(),
	}
}

pub fn contact(value: &Value) -> Option<ContactItem> {
	let status = match value.get("status").and_then(Value::as_str) {
		Some("answered") => ContactStatus::Answered,
		_ => ContactStatus::New,
	};
	Some(ContactItem {
		id: record_id(value)?,
		name: string_field(value, "name").unwrap_or_default(),
		email: string_field(value, "email").unwrap_or_default(),
		phone: string_field(value, "phone").unwrap_or_default(),
		subject: string_field(value, "subject").unwrap_or_default(),
		description: string_field(value, "description").unwrap_or_default(),
		status,
		created_at: string_field(value, "createdAt").unwrap_or_default(),
	})
}

pub fn contact_page(body: &Value) -> ContactPage {
	ContactPage {
		items: body
			.get("data")
			.and_then(Value::as_array)
			.map(|items| items.iter().filter_map(contact).collect())
			.unwrap_or_default(),
		pagination: body
			.get("pagination")
			.and_then(|pagination| serde_json::from_value::<Pagination>(pagination.clone()).ok()),
	}
}

pub fn contact_stats(body: &Value) -> ContactStats {
	let data = body.get("data").unwrap_or(&Value::Null);
	let count = |key: &str| {
		data.get(key)
			.and_then(Value::as_u64)
			.and_then(|count| u32::try_from(count).ok())
			.unwrap_or(0)
	};
	ContactStats {
		new: count("new"),
		answered: count("answered"),
		total: count("total"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn token_sources_in_priority_order() {
		assert_eq!(token(&json!({ "token": "a", "accessToken": "b" })).as_deref(), Some("a"));
		assert_eq!(token(&json!({ "accessToken": "b" })).as_deref(), Some("b"));
		assert_eq!(
			token(&json!({ "updateUser": { "accessToken": "c" } })).as_deref(),
			Some("c")
		);
		assert_eq!(token(&json!({ "message": "ok" })), None);
	}

	#[test]
	fn login_user_prefers_user_then_update_user_then_data() {
		let body = json!({
			"updateUser": { "_id": "U2", "name": "Negar", "email": "n@example.com", "role": "admin" },
			"data": { "id": "U3" }
		});
		let user = login_user(&body).unwrap();
		assert_eq!(user.id, "U2");
		assert!(user.is_admin());

		let body = json!({ "user": null, "data": { "id": "U3", "name": "Parsa" } });
		assert_eq!(login_user(&body).unwrap().id, "U3");
		assert!(login_user(&json!({ "message": "bad" })).is_none());
	}

	#[test]
	fn current_user_falls_back_to_body() {
		let user = current_user(&json!({ "_id": "U1", "name": "Sara", "email": "s@example.com" })).unwrap();
		assert_eq!(user.id, "U1");
		assert_eq!(user.role, "user");
		assert_eq!(current_user(&json!({ "data": { "_id": "U9" } })).unwrap().id, "U9");
	}

	#[test]
	fn registered_user_needs_mongo_id() {
		assert!(registered_user(&json!({ "id": "U1" })).is_none());
		assert_eq!(registered_user(&json!({ "_id": "U1" })).unwrap().id, "U1");
	}

	#[test]
	fn ticket_lists_in_either_shape() {
		let ticket = json!({ "_id": "t1", "title": "Help", "status": "open", "createdBy": "U1" });
		assert_eq!(ticket_list(&json!([ticket.clone()])).len(), 1);
		assert_eq!(ticket_list(&json!({ "tickets": [ticket] })).len(), 1);
		assert!(ticket_list(&json!({ "tickets": "nope" })).is_empty());
		assert!(ticket_list(&json!("nope")).is_empty());
	}

	#[test]
	fn messages_without_ids_are_kept() {
		let detail = ticket_detail(&json!({
			"ticket": { "_id": "t1", "createdBy": "U1" },
			"messages": [
				{ "_id": "m1", "message": "سلام", "sender": "U1" },
				{ "message": "پاسخ", "sender": { "_id": "A1" } },
				"garbage"
			]
		}));
		let ids: Vec<&str> = detail.messages.iter().map(|message| message.id.as_str()).collect();
		assert_eq!(ids, vec!["m1", "message-1"]);
		assert_eq!(detail.messages[1].message, "پاسخ");
	}

	#[test]
	fn parties_can_be_ids_or_objects() {
		let detail = ticket_detail(&json!({
			"ticket": { "_id": "t1", "createdBy": { "_id": "U1", "name": "Sara" } },
			"messages": [
				{ "_id": "m1", "message": "hi", "sender": "U1" },
				{ "_id": "m2", "message": "hello", "sender": { "_id": "A1", "role": "admin" } },
				{ "_id": "m3", "message": "?" },
				{ "message": "dropped without an id" }
			]
		}));
		let ticket = detail.ticket.unwrap();
		assert_eq!(ticket.creator_id(), Some("U1"));
		assert_eq!(ticket.creator_name(), Some("Sara"));
		assert_eq!(detail.messages.len(), 3);
		assert_eq!(detail.messages[0].sender.as_ref().unwrap().id.as_deref(), Some("U1"));
		assert_eq!(detail.messages[1].sender.as_ref().unwrap().role.as_deref(), Some("admin"));
		assert!(detail.messages[2].sender.is_none());
	}

	#[test]
	fn error_message_uses_message_then_errors() {
		assert_eq!(error_message(&json!({ "message": "m", "errors": ["e"] })).as_deref(), Some("m"));
		assert_eq!(error_message(&json!({ "errors": ["e1", "e2"] })).as_deref(), Some("e1"));
		assert_eq!(error_message(&json!({})), None);
	}

	#[test]
	fn contacts_and_stats() {
		let page = contact_page(&json!({
			"success": true,
			"data": [{ "_id": "c1", "name": "Ali", "status": "answered" }],
			"pagination": { "page": 1, "limit": 10, "total": 1, "totalPages": 1 }
		}));
		assert_eq!(page.items[0].status, ContactStatus::Answered);
		assert_eq!(page.pagination.unwrap().total_pages, 1);

		let stats = contact_stats(&json!({ "data": { "new": 2, "answered": 3, "total": 5 } }));
		assert_eq!(stats.total, 5);
		assert_eq!(contact_stats(&json!({})), ContactStats::default());
	}
}
