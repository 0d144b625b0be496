// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::utils::use_auth;
use crate::auth_state::Toast;
use leptos::prelude::*;
use std::time::Duration;

/// Shows queued toasts and removes each one once its time is up.
#[component]
pub fn ToastContainer() -> impl IntoView {
	let auth = use_auth();
	let (visible, set_visible) = signal(Vec::<Toast>::new());

	let dismiss = move |id: u64| {
		set_visible.update(|toasts| toasts.retain(|toast| toast.id != id));
	};

	Effect::new(move |_| {
		if auth.toasts.with(|queue| queue.is_empty()) {
			return;
		}
		let mut arrived = Vec::new();
		auth.toasts.update(|queue| arrived = queue.drain());

		for toast in arrived.iter() {
			let id = toast.id;
			set_timeout(move || dismiss(id), Duration::from_millis(toast.duration_ms.into()));
		}
		set_visible.update(|toasts| toasts.extend(arrived));
	});

	view! {
		<div id="toast_container">
			<For
				each=move || visible.get()
				key=|toast| toast.id
				children=move |toast| {
					let id = toast.id;
					view! {
						<div class=format!("toast {}", toast.kind.css_class())>
							<span class="toast_message">{toast.message}</span>
							<button type="button" class="toast_close" on:click=move |_| dismiss(id)>
								"×"
							</button>
						</div>
					}
				}
			/>
		</div>
	}
}
