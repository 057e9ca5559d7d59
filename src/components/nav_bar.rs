//! Top navigation with the sign-out action.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered on every route. Links only appear while signed in; signing out
//! flips the session signal and the route guard takes the user to `/login`.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::session::SessionSignal;

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<SessionSignal>();

    view! {
        <nav class="nav-bar">
            <span class="nav-bar__brand">"LedgerX"</span>
            <Show
                when=move || session.is_authenticated()
                fallback=|| {
                    view! {
                        <A href="/login">"Log in"</A>
                        <A href="/register">"Register"</A>
                    }
                }
            >
                <A href="/">"Accounts"</A>
                <A href="/exports">"Exports"</A>
                <button class="nav-bar__logout" type="button" on:click=move |_| session.logout()>
                    "Log out"
                </button>
            </Show>
        </nav>
    }
}
