//! Networking modules for the LedgerX REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns every backend operation and the response interceptor,
//! `transport` is the seam to the HTTP stack (`browser` in the app, `native`
//! for non-wasm consumers), and `types` defines the wire schema.

pub mod api;
pub mod browser;
pub mod error;
pub mod idempotency;
#[cfg(not(target_arch = "wasm32"))]
pub mod native;
pub mod transport;
pub mod types;
