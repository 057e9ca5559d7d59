//! # ledgerx-ui
//!
//! Leptos + WASM frontend for the LedgerX personal ledger.
//!
//! This crate contains pages, components, the session store, and the typed
//! REST client for the LedgerX backend. Browser-only glue sits behind the
//! `csr` feature; everything else builds and tests natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and mount the application.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = config::log_level(option_env!("LEDGERX_LOG"));
    if let Err(e) = console_log::init_with_level(level) {
        leptos::logging::warn!("logger init failed: {e}");
    }
    leptos::mount::mount_to_body(app::App);
}
