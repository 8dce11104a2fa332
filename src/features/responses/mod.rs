//! # Responses Feature
//!
//! Gated viewer over stored registrations: shared-credential login,
//! session tokens, and CSV export.
//!
//! - **Version**: 1.0.1
//! - **Since**: 0.5.0
//! - **Toggleable**: false

pub mod auth;
pub mod export;

pub use auth::{SessionStore, SESSION_TTL, VALID_PASSWORD, VALID_USERNAME};
pub use export::{export_csv, export_filename, EXPORT_HEADERS};
