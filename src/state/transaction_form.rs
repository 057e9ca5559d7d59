//! Submission state for the new-transaction form.
//!
//! DESIGN
//! ======
//! A submission keeps its idempotency key until the backend gives a definite
//! answer. When the outcome is unknown (network failure, 5xx) the user can
//! retry under the same key and the backend deduplicates; editing the form
//! and submitting again is a new transaction with a new key.

#[cfg(test)]
#[path = "transaction_form_test.rs"]
mod transaction_form_test;

use crate::net::error::{ApiError, ErrorKind};
use crate::net::idempotency::IdempotencyKey;
use crate::net::types::{NewTransaction, Transaction};

/// A transaction body paired with the key it was first sent under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSubmission {
    pub draft: NewTransaction,
    pub key: IdempotencyKey,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionFormState {
    pub pending: Option<PendingSubmission>,
    pub submitting: bool,
    pub error: Option<String>,
    pub last_created: Option<Transaction>,
}

impl TransactionFormState {
    /// Start a fresh submission under a new key.
    pub fn submit(&mut self, draft: NewTransaction) -> PendingSubmission {
        let pending = PendingSubmission { draft, key: IdempotencyKey::generate() };
        self.start(pending)
    }

    /// Re-send the unresolved submission under the key it was first sent with.
    pub fn retry(&mut self) -> Option<PendingSubmission> {
        let pending = self.pending.clone()?;
        log::info!("retrying transaction under key {}", pending.key);
        Some(self.start(pending))
    }

    fn start(&mut self, pending: PendingSubmission) -> PendingSubmission {
        self.submitting = true;
        self.error = None;
        self.pending = Some(pending.clone());
        pending
    }

    /// Whether a retry is offered: a submission exists and its outcome is
    /// unknown.
    pub fn can_retry(&self) -> bool {
        !self.submitting && self.pending.is_some()
    }

    /// Record the backend's answer. Returns `true` when the form should reset.
    pub fn finish(&mut self, result: Result<Transaction, ApiError>) -> bool {
        self.submitting = false;
        match result {
            Ok(created) => {
                self.pending = None;
                self.last_created = Some(created);
                true
            }
            Err(e) => {
                if !outcome_unknown(&e) {
                    self.pending = None;
                }
                self.error = Some(e.to_string());
                false
            }
        }
    }
}

/// Failures worth re-sending under the same key: the row may or may not
/// exist, or the backend asked the client to come back later.
pub fn outcome_unknown(error: &ApiError) -> bool {
    match error.kind() {
        ErrorKind::Network => true,
        ErrorKind::Server => !matches!(error, ApiError::Decode(_)),
        _ => false,
    }
}
