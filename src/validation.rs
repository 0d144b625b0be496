// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Form validation shared by the pages and the REST handlers. Messages are user-facing (Persian).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\+98|0)?9[0-9]{9}$").unwrap());
static NATIONAL_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static PERSIAN_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\x{0600}-\x{06FF}\s]+$").unwrap());
static LATIN_LETTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-zA-Z]").unwrap());
static DIGIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").unwrap());

/// A validation failure attached to a form field
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ValidationError {
	pub field: String,
	pub message: String,
}

impl ValidationError {
	pub fn new(field: &str, message: impl Into<String>) -> Self {
		Self {
			field: field.to_string(),
			message: message.into(),
		}
	}
}

pub fn validate_email(email: &str) -> Option<String> {
	if email.trim().is_empty() {
		return Some(String::from("ایمیل الزامی است"));
	}
	if !EMAIL_PATTERN.is_match(email) {
		return Some(String::from("فرمت ایمیل نامعتبر است"));
	}
	None
}

pub fn validate_phone(phone: &str) -> Option<String> {
	if phone.trim().is_empty() {
		return Some(String::from("شماره تلفن الزامی است"));
	}
	if !PHONE_PATTERN.is_match(phone) {
		return Some(String::from("شماره تلفن معتبر نیست (مثال: 09123456789)"));
	}
	None
}

/// Validates an Iranian national code, including its check digit.
pub fn validate_national_code(national_code: &str) -> Option<String> {
	if national_code.trim().is_empty() {
		return Some(String::from("کد ملی الزامی است"));
	}
	if national_code.chars().count() != 10 {
		return Some(String::from("کد ملی باید 10 رقم باشد"));
	}
	if !NATIONAL_CODE_PATTERN.is_match(national_code) {
		return Some(String::from("کد ملی فقط باید شامل اعداد باشد"));
	}

	let digits: Vec<u32> = national_code.chars().filter_map(|c| c.to_digit(10)).collect();
	let check_digit = digits[9];
	let sum: u32 = digits[..9]
		.iter()
		.enumerate()
		.map(|(index, digit)| digit * (10 - index as u32))
		.sum();
	let remainder = sum % 11;
	let expected_check_digit = if remainder < 2 { remainder } else { 11 - remainder };

	if check_digit != expected_check_digit {
		return Some(String::from("کد ملی نامعتبر است"));
	}
	None
}

pub fn validate_password(password: &str) -> Option<String> {
	if password.is_empty() {
		return Some(String::from("رمز عبور الزامی است"));
	}
	let length = password.chars().count();
	if length < 6 {
		return Some(String::from("رمز عبور باید حداقل 6 کاراکتر باشد"));
	}
	if length > 50 {
		return Some(String::from("رمز عبور نمی‌تواند بیشتر از 50 کاراکتر باشد"));
	}
	if !LATIN_LETTER_PATTERN.is_match(password) || !DIGIT_PATTERN.is_match(password) {
		return Some(String::from("رمز عبور باید شامل حروف و اعداد باشد"));
	}
	None
}

/// Validates a name written in Persian script. `field_name` is used in the message.
pub fn validate_name(name: &str, field_name: &str) -> Option<String> {
	if name.trim().is_empty() {
		return Some(format!("{} الزامی است", field_name));
	}
	let length = name.chars().count();
	if length < 2 {
		return Some(format!("{} باید حداقل 2 کاراکتر باشد", field_name));
	}
	if length > 50 {
		return Some(format!("{} نمی‌تواند بیشتر از 50 کاراکتر باشد", field_name));
	}
	if !PERSIAN_NAME_PATTERN.is_match(name) {
		return Some(format!("{} فقط باید شامل حروف فارسی باشد", field_name));
	}
	None
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginForm {
	pub identifier: String,
	pub password: String,
	pub remember: bool,
}

impl LoginForm {
	pub fn validate(&self) -> Vec<ValidationError> {
		let mut errors = Vec::new();
		if self.identifier.trim().is_empty() {
			errors.push(ValidationError::new("identifier", "ایمیل یا شماره تلفن الزامی است"));
		}
		if self.password.is_empty() {
			errors.push(ValidationError::new("password", "رمز عبور الزامی است"));
		}
		errors
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterForm {
	pub name: String,
	pub email: String,
	pub phone: String,
	pub password: String,
	pub confirm_password: String,
}

impl RegisterForm {
	pub fn validate(&self) -> Vec<ValidationError> {
		let mut errors = Vec::new();
		if let Some(message) = validate_name(&self.name, "نام و نام خانوادگی") {
			errors.push(ValidationError::new("name", message));
		}
		if let Some(message) = validate_email(&self.email) {
			errors.push(ValidationError::new("email", message));
		}
		if let Some(message) = validate_phone(&self.phone) {
			errors.push(ValidationError::new("phone", message));
		}
		if let Some(message) = validate_password(&self.password) {
			errors.push(ValidationError::new("password", message));
		}
		if self.password != self.confirm_password {
			errors.push(ValidationError::new(
				"confirmPassword",
				"تکرار رمز عبور با رمز عبور یکسان نیست",
			));
		}
		errors
	}
}

pub fn validate_forgot_password_form(email: &str) -> Vec<ValidationError> {
	validate_email(email)
		.map(|message| vec![ValidationError::new("email", message)])
		.unwrap_or_default()
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactForm {
	pub name: String,
	pub email: String,
	pub phone: String,
	pub subject: String,
	pub description: String,
}

impl ContactForm {
	pub fn validate(&self) -> Vec<ValidationError> {
		if PHONE_PATTERN.is_match(&self.phone) {
			Vec::new()
		} else {
			vec![ValidationError::new("phone", "لطفا شماره موبایل معتبر وارد کنید")]
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NewTicketForm {
	pub title: String,
	pub department: String,
	pub message: String,
}

impl NewTicketForm {
	pub const DEFAULT_DEPARTMENT: &'static str = "Technical Support";

	pub fn validate(&self) -> Vec<ValidationError> {
		let mut errors = Vec::new();
		if self.title.trim().is_empty() {
			errors.push(ValidationError::new("title", "عنوان تیکت الزامی است"));
		}
		if self.message.trim().is_empty() {
			errors.push(ValidationError::new("message", "متن پیام الزامی است"));
		}
		errors
	}

	/// Department to send upstream; blank selections fall back to technical support.
	pub fn department_or_default(&self) -> &str {
		if self.department.trim().is_empty() {
			Self::DEFAULT_DEPARTMENT
		} else {
			&self.department
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ChangePasswordForm {
	pub current: String,
	pub next: String,
	#[serde(default)]
	pub confirm: Option<String>,
}

impl ChangePasswordForm {
	pub fn validate(&self) -> Vec<ValidationError> {
		let mut errors = Vec::new();
		if self.current.is_empty() {
			errors.push(ValidationError::new("current", "رمز عبور فعلی الزامی است"));
		}
		if self.next.is_empty() {
			errors.push(ValidationError::new("next", "رمز عبور جدید الزامی است"));
		}
		if self.confirm.as_ref().is_some_and(|confirm| *confirm != self.next) {
			errors.push(ValidationError::new("confirm", "تکرار رمز با رمز عبور جدید یکسان نیست."));
		}
		errors
	}
}

/// Finds the message for a field, if that field failed validation.
pub fn field_error<'a>(errors: &'a [ValidationError], field: &str) -> Option<&'a str> {
	errors
		.iter()
		.find(|error| error.field == field)
		.map(|error| error.message.as_str())
}
