//! # Core Module
//!
//! Configuration and small shared utilities for the symposium service.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add csv module backing the response export
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod csv;

// Re-export commonly used items
pub use config::{Config, StoreBackend, DEFAULT_FROM_EMAIL, DEFAULT_HTTP_ADDR};
pub use csv::{build_document, build_record, escape_field};
