//! Client-side state containers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` and `storage` hold the one app-wide value, the auth session.
//! The remaining modules are plain per-page state structs that pages wrap in
//! `RwSignal`s; their transitions are pure so they test without a browser.

pub mod accounts;
pub mod account_detail;
pub mod exports;
pub mod session;
pub mod storage;
pub mod transaction_form;
