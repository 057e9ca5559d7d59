//! Idempotency keys for retry-safe mutations.

#[cfg(test)]
#[path = "idempotency_test.rs"]
mod idempotency_test;

use std::fmt;

use uuid::Uuid;

/// A client-generated key the backend uses to deduplicate retried
/// submissions of the same logical mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(Uuid);

impl IdempotencyKey {
    /// A fresh random (v4) key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[cfg(test)]
    pub(crate) fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
