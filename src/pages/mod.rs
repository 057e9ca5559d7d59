//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its route-scoped state and API calls and delegates
//! rendering details to `components`. Pages never inspect status codes; they
//! render the `ApiError` they get back.

pub mod account_details;
pub mod accounts;
pub mod exports;
pub mod login;
pub mod register;
