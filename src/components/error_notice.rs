//! Inline error line shown under a form or list.

use leptos::prelude::*;

#[component]
pub fn ErrorNotice(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|text| {
            view! { <p class="error-notice" role="alert">{text}</p> }
        })
    }
}
