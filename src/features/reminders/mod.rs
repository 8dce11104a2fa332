//! # Reminders Feature
//!
//! Batch scheduling of event reminder emails with per-language templates.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.4.0
//! - **Toggleable**: true

pub mod scheduler;
pub mod templates;

pub use scheduler::{
    ReminderMode, ReminderOutcome, ReminderScheduler, REMINDER_1_SEND_AT, REMINDER_2_SEND_AT,
    TEST_RECIPIENTS, TEST_SEND_AT,
};
pub use templates::ReminderTemplates;
