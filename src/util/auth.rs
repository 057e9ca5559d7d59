//! Route guards.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes wrap their page in [`RequireSession`]; the login and
//! register routes wrap theirs in [`GuestOnly`]. Both re-evaluate on every
//! session change, so a logout anywhere (including the API client's forced
//! logout on a rejected token) immediately sends the user to `/login`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Redirect;

use crate::state::session::{Session, SessionSignal};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// What a guarded route should do for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    /// Navigate away, replacing the history entry so Back cannot return to
    /// the guarded view.
    Redirect { to: &'static str, replace: bool },
}

/// Decision for a view that requires a session.
pub fn route_guard(session: &Session) -> GuardDecision {
    if session.is_authenticated() {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect { to: LOGIN_PATH, replace: true }
    }
}

/// Decision for a view only meant for signed-out users.
pub fn guest_guard(session: &Session) -> GuardDecision {
    if session.is_authenticated() {
        GuardDecision::Redirect { to: HOME_PATH, replace: true }
    } else {
        GuardDecision::Render
    }
}

fn render_decision(decision: GuardDecision, children: &ChildrenFn) -> AnyView {
    match decision {
        GuardDecision::Render => children(),
        GuardDecision::Redirect { to, replace } => {
            let options = NavigateOptions { replace, ..NavigateOptions::default() };
            view! { <Redirect path=to options=options/> }.into_any()
        }
    }
}

/// Render `children` only while a session exists.
#[component]
pub fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<SessionSignal>();
    move || render_decision(route_guard(&session.session()), &children)
}

/// Render `children` only while signed out.
#[component]
pub fn GuestOnly(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<SessionSignal>();
    move || render_decision(guest_guard(&session.session()), &children)
}
