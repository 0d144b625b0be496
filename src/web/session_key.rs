// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Bearer token issued by the external API
pub const AUTH_TOKEN: &str = "auth_token";
/// The signed-in [`SessionUser`](crate::auth_state::SessionUser)
pub const SESSION_USER: &str = "session_user";
