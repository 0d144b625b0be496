// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use leptos::prelude::*;

#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div id="not_found_page">
			<h1>"صفحه پیدا نشد"</h1>
			<p>"محتوایی که به دنبال آن بودید اینجا نیست."</p>
			<a href="/">"بازگشت به صفحه اصلی"</a>
		</div>
	}
}
