//! # Notifications Feature
//!
//! Best-effort organizer email on each new registration.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//! - **Toggleable**: true

pub mod notifier;

pub use notifier::{build_test_email, NotifyPayload, RegistrationNotifier, TEST_FROM, TEST_SUBJECT};
