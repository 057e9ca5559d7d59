//! Error taxonomy for backend calls.
//!
//! ERROR HANDLING
//! ==============
//! Every failure a view can see is an [`ApiError`]. Client-side validation
//! failures never reach the network; HTTP failures are classified once, in
//! [`ApiError::from_status`], so pages never inspect status codes themselves.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Coarse error classes used by views to decide where to show a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Authentication,
    NotFound,
    Conflict,
    Network,
    Server,
}

/// Errors produced by API client operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Input rejected before any request was sent.
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    /// The backend rejected the request body or query (400 / 422).
    #[error("request rejected: {0}")]
    BadRequest(String),

    /// A protected call was attempted without a session; nothing was sent.
    #[error("not signed in")]
    NotAuthenticated,

    /// The backend rejected the credentials or token (401 / 403).
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("too many requests: {0}")]
    RateLimited(String),

    /// Any other non-success status.
    #[error("server error {status}: {body}")]
    Server { status: u16, body: String },

    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// A success response whose body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation { field, message: message.into() }
    }

    /// Classify a non-success HTTP response.
    ///
    /// The backend writes plain-text error bodies; duplicate-key failures on
    /// registration come back as 400 with "duplicate" in the message.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = body.trim().to_owned();
        match status {
            400 if message.to_ascii_lowercase().contains("duplicate") => Self::Conflict(message),
            400 | 422 => Self::BadRequest(message),
            401 | 403 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            429 => Self::RateLimited(message),
            _ => Self::Server { status, body: message },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::BadRequest(_) => ErrorKind::Validation,
            Self::NotAuthenticated | Self::Unauthorized(_) => ErrorKind::Authentication,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Network(_) => ErrorKind::Network,
            Self::RateLimited(_) | Self::Server { .. } | Self::Decode(_) => ErrorKind::Server,
        }
    }

    /// Form field the error belongs to, if it came from input validation.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn is_authentication(&self) -> bool {
        self.kind() == ErrorKind::Authentication
    }
}
