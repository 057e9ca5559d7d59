//! Root application component and route table.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` restores the session from `localStorage`, provides it and the API
//! client via context, and declares the routes. Protected routes sit behind
//! `RequireSession`; login and register sit behind `GuestOnly`.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::{ParamSegment, StaticSegment};

use crate::components::nav_bar::NavBar;
use crate::config::ApiConfig;
use crate::net::api::LedgerApi;
use crate::net::browser::BrowserTransport;
use crate::pages::account_details::AccountDetailsPage;
use crate::pages::accounts::AccountsPage;
use crate::pages::exports::ExportsPage;
use crate::pages::login::LoginPage;
use crate::pages::register::RegisterPage;
use crate::state::session::SessionSignal;
use crate::util::auth::{GuestOnly, RequireSession};

/// API client as used by the pages.
pub type AppApi = LedgerApi<BrowserTransport, SessionSignal>;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionSignal::init();
    let config = ApiConfig::from_build_env();
    let backend = if config.base_url.is_empty() { "same-origin" } else { config.base_url.as_str() };
    log::info!("LedgerX UI starting; backend {backend}");
    provide_context(session);
    provide_context::<AppApi>(LedgerApi::new(BrowserTransport, session, config));

    view! {
        <Title text="LedgerX"/>
        <Router>
            <NavBar/>
            <main>
                <Routes fallback=|| view! { <p>"Page not found."</p> }>
                    <Route
                        path=StaticSegment("login")
                        view=|| view! { <GuestOnly><LoginPage/></GuestOnly> }
                    />
                    <Route
                        path=StaticSegment("register")
                        view=|| view! { <GuestOnly><RegisterPage/></GuestOnly> }
                    />
                    <Route
                        path=StaticSegment("")
                        view=|| view! { <RequireSession><AccountsPage/></RequireSession> }
                    />
                    <Route
                        path=(StaticSegment("accounts"), ParamSegment("id"))
                        view=|| view! { <RequireSession><AccountDetailsPage/></RequireSession> }
                    />
                    <Route
                        path=StaticSegment("exports")
                        view=|| view! { <RequireSession><ExportsPage/></RequireSession> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
