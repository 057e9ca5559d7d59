//! Account-list state for the accounts page.

#[cfg(test)]
#[path = "accounts_test.rs"]
mod accounts_test;

use crate::net::error::ApiError;
use crate::net::types::Account;

/// Cached account list plus request flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountsState {
    pub items: Vec<Account>,
    pub loading: bool,
    pub create_pending: bool,
    pub error: Option<String>,
}

impl AccountsState {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replace the cached list with the backend's, preserving its order. A
    /// failed reload keeps the previous list on screen.
    pub fn finish_load(&mut self, result: Result<Vec<Account>, ApiError>) {
        self.loading = false;
        match result {
            Ok(items) => self.items = items,
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn begin_create(&mut self) {
        self.create_pending = true;
        self.error = None;
    }

    /// Append a created account. Returns `true` when the form should reset.
    pub fn finish_create(&mut self, result: Result<Account, ApiError>) -> bool {
        self.create_pending = false;
        match result {
            Ok(account) => {
                self.items.retain(|existing| existing.id != account.id);
                self.items.push(account);
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }
}
