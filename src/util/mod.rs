//! Utility helpers shared across pages and the API client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure helpers (validation, months, money, token claims) stay testable
//! natively; `auth` and `download` hold the browser-facing pieces.

pub mod auth;
pub mod claims;
pub mod download;
pub mod money;
pub mod month;
pub mod validate;
