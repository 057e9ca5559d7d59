//! Email + password login page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wrapped in `GuestOnly`: once the login transition lands the guard sends
//! the user to `/`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::AppApi;
use crate::components::error_notice::ErrorNotice;
use crate::net::error::ApiError;
use crate::state::session::SessionSignal;

/// Message for a failed login. Bad credentials get a fixed wording so the
/// form does not echo backend text.
pub(crate) fn login_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized(_) => "Invalid email or password.".to_owned(),
        other => other.to_string(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = expect_context::<AppApi>();
    let session = expect_context::<SessionSignal>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        error.set(None);
        let api = api.clone();
        let email_value = email.get();
        let password_value = password.get();
        leptos::task::spawn_local(async move {
            match api.login(&email_value, &password_value).await {
                Ok(response) => {
                    if let Err(e) = session.login(response.token) {
                        error.set(Some(e.to_string()));
                    }
                }
                Err(e) => error.set(Some(login_failure_message(&e))),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h1>"Log in"</h1>
                <input
                    type="email"
                    placeholder="you@example.com"
                    autocomplete="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Log in" }}
                </button>
                <ErrorNotice message=error/>
                <p>"No account yet? " <A href="/register">"Register"</A></p>
            </form>
        </div>
    }
}
