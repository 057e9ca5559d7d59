//! Registration page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::AppApi;
use crate::components::error_notice::ErrorNotice;
use crate::net::error::ApiError;
use crate::state::session::SessionSignal;
use crate::util::validate::MIN_PASSWORD_LEN;

pub(crate) fn register_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Conflict(_) => "An account with this email already exists.".to_owned(),
        other => other.to_string(),
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
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
            match api.register(&email_value, &password_value).await {
                Ok(response) => {
                    if let Err(e) = session.login(response.token) {
                        error.set(Some(e.to_string()));
                    }
                }
                Err(e) => error.set(Some(register_failure_message(&e))),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h1>"Create an account"</h1>
                <input
                    type="email"
                    placeholder="you@example.com"
                    autocomplete="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder=format!("Password ({MIN_PASSWORD_LEN}+ characters)")
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || busy.get()>
                    "Register"
                </button>
                <ErrorNotice message=error/>
                <p>"Already registered? " <A href="/login">"Log in"</A></p>
            </form>
        </div>
    }
}
