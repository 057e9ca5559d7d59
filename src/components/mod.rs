//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render ledger data handed to them by pages; only `nav_bar`
//! reads shared state (the session) from context.

pub mod error_notice;
pub mod export_row;
pub mod nav_bar;
pub mod summary_card;
