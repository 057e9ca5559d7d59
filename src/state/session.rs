//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`SessionStore`] exists per running app. It is created from durable
//! storage at startup and only changes through `login`/`logout`. In the
//! browser it lives inside a [`SessionSignal`] provided via context, so route
//! guards and views re-render on every transition. The API client reads the
//! token through [`SessionHandle`] at send time and calls
//! [`SessionHandle::expire`] when the backend rejects it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use leptos::prelude::*;

use super::storage::{BrowserTokenStorage, TokenStorage};
use crate::util::claims;

/// Whether the user is signed in, and with which token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(String),
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(token) => Some(token),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The `user_id` claim carried by the token, if readable.
    pub fn user_id(&self) -> Option<i64> {
        self.token().and_then(claims::user_id_from_token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("refusing to sign in with an empty token")]
    EmptyToken,
}

/// The session plus its durable backing.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    session: Session,
}

impl<S: TokenStorage> SessionStore<S> {
    /// Restore the session from durable storage. No network call.
    pub fn init(storage: S) -> Self {
        let session = match storage.load() {
            Some(token) if !token.trim().is_empty() => Session::Authenticated(token),
            _ => Session::Anonymous,
        };
        log::debug!("session restored: authenticated={}", session.is_authenticated());
        Self { storage, session }
    }

    /// Store `token` and become authenticated. Re-login with the same token
    /// only rewrites storage.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyToken`] for a blank token; the session is
    /// left unchanged.
    pub fn login(&mut self, token: impl Into<String>) -> Result<(), SessionError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }
        if let Err(e) = self.storage.save(&token) {
            log::warn!("session token not persisted: {e}");
        }
        self.session = Session::Authenticated(token);
        log::info!("signed in");
        Ok(())
    }

    /// Forget the token in memory and in durable storage.
    pub fn logout(&mut self) {
        if let Err(e) = self.storage.clear() {
            log::warn!("stored session token not cleared: {e}");
        }
        if self.session.is_authenticated() {
            log::info!("signed out");
        }
        self.session = Session::Anonymous;
    }

    /// Log out if `rejected` is still the active token. Returns whether the
    /// session was dropped; a token replaced by a newer login is ignored.
    pub fn expire(&mut self, rejected: &str) -> bool {
        if self.token() != Some(rejected) {
            log::debug!("rejected token is no longer active; session kept");
            return false;
        }
        self.logout();
        true
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

/// What the API client needs from the session.
pub trait SessionHandle {
    /// Token to attach to a protected request, read at send time.
    fn current_token(&self) -> Option<String>;

    /// Drop the session after the backend rejected `rejected`, unless a
    /// different token has been stored since it was sent.
    fn expire(&self, rejected: &str);
}

/// Shared store for native consumers.
pub type SharedSession<S> = Arc<Mutex<SessionStore<S>>>;

/// Wrap a store for sharing between a caller and the API client.
pub fn shared<S: TokenStorage>(store: SessionStore<S>) -> SharedSession<S> {
    Arc::new(Mutex::new(store))
}

fn locked<S>(session: &SharedSession<S>) -> MutexGuard<'_, SessionStore<S>> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: TokenStorage> SessionHandle for SharedSession<S> {
    fn current_token(&self) -> Option<String> {
        locked(self).token().map(str::to_owned)
    }

    fn expire(&self, rejected: &str) {
        locked(self).expire(rejected);
    }
}

/// Reactive session container provided to the whole app via context.
#[derive(Clone, Copy)]
pub struct SessionSignal(RwSignal<SessionStore<BrowserTokenStorage>>);

impl SessionSignal {
    /// Restore from `localStorage` and wrap in a signal.
    pub fn init() -> Self {
        Self(RwSignal::new(SessionStore::init(BrowserTokenStorage::default())))
    }

    /// Current session, tracked.
    pub fn session(&self) -> Session {
        self.0.with(|store| store.session().clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.with(SessionStore::is_authenticated)
    }

    /// # Errors
    ///
    /// Returns [`SessionError::EmptyToken`] for a blank token.
    pub fn login(&self, token: String) -> Result<(), SessionError> {
        let mut outcome = Ok(());
        self.0.update(|store| outcome = store.login(token));
        outcome
    }

    pub fn logout(&self) {
        self.0.update(SessionStore::logout);
    }
}

impl SessionHandle for SessionSignal {
    fn current_token(&self) -> Option<String> {
        self.0.with_untracked(|store| store.token().map(str::to_owned))
    }

    fn expire(&self, rejected: &str) {
        if self.0.with_untracked(|store| store.token() == Some(rejected)) {
            self.0.update(|store| {
                store.expire(rejected);
            });
        }
    }
}
