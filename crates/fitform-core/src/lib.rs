//! fitform-core
//!
//! Pure domain types and storage key conventions. No I/O dependency —
//! this is the shared vocabulary of the FitForm system.

pub mod error;
pub mod models;
pub mod store_keys;
