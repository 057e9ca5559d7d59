//! Durable token storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store persists exactly one value: the auth token, under
//! [`TOKEN_STORAGE_KEY`] in `localStorage`. Writes are best-effort; a browser
//! with storage disabled still keeps the session for the page's lifetime.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const TOKEN_STORAGE_KEY: &str = "jwt";

/// Errors produced by durable storage writes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No durable storage exists in this environment.
    #[error("durable storage unavailable")]
    Unavailable,

    #[error("storage write failed: {0}")]
    Write(String),
}

/// Where the session token survives page reloads.
pub trait TokenStorage {
    /// Stored token, if any.
    fn load(&self) -> Option<String>;

    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the value could not be written.
    fn save(&self, token: &str) -> Result<(), StorageError>;

    /// Remove the stored token.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the value could not be removed.
    fn clear(&self) -> Result<(), StorageError>;
}

/// `window.localStorage`, keyed by [`TOKEN_STORAGE_KEY`].
#[derive(Clone, Copy, Debug)]
pub struct BrowserTokenStorage {
    key: &'static str,
}

impl Default for BrowserTokenStorage {
    fn default() -> Self {
        Self { key: TOKEN_STORAGE_KEY }
    }
}

impl BrowserTokenStorage {
    #[cfg(test)]
    pub(crate) fn key(&self) -> &'static str {
        self.key
    }
}

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    let window = web_sys::window()?;
    match window.local_storage() {
        Ok(storage) => storage,
        Err(e) => {
            log::warn!("localStorage access denied: {e:?}");
            None
        }
    }
}

impl TokenStorage for BrowserTokenStorage {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            match local_storage()?.get_item(self.key) {
                Ok(value) => value,
                Err(e) => {
                    log::warn!("reading {} from localStorage failed: {e:?}", self.key);
                    None
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()
                .ok_or(StorageError::Unavailable)?
                .set_item(self.key, token)
                .map_err(|e| StorageError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            log::debug!("no durable storage for {} ({} bytes)", self.key, token.len());
            Err(StorageError::Unavailable)
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()
                .ok_or(StorageError::Unavailable)?
                .remove_item(self.key)
                .map_err(|e| StorageError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            Ok(())
        }
    }
}

/// In-process storage for native consumers and tests. Clones share the
/// same slot, so a test can keep a handle after moving one into a store.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStorage {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { slot: Arc::new(Mutex::new(Some(token.into()))) }
    }

    /// Current stored value.
    pub fn peek(&self) -> Option<String> {
        self.slot().clone()
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<String> {
        self.peek()
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        *self.slot() = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot() = None;
        Ok(())
    }
}
