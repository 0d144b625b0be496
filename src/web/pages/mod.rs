// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod about;
mod account;
mod admin_contacts;
mod admin_tickets;
pub mod app;
mod contact;
mod errors;
mod header;
mod home;
mod login;
mod orders;
mod password;
mod product_detail;
mod products;
mod register;
#[cfg(feature = "ssr")]
mod server_utils;
#[cfg(feature = "ssr")]
pub mod shell;
mod tickets;
mod toasts;
mod utils;
