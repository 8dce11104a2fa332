//! # Features Module
//!
//! Feature modules for the symposium registration service.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

pub mod mailer;
pub mod notifications;
pub mod reminders;
pub mod responses;

pub use mailer::{EmailMessage, Mailer, ResendMailer, SendPacer, SendReceipt};
pub use notifications::{build_test_email, NotifyPayload, RegistrationNotifier};
pub use reminders::{ReminderMode, ReminderOutcome, ReminderScheduler, ReminderTemplates};
pub use responses::{export_csv, export_filename, SessionStore};

/// Feature metadata reported at startup.
#[derive(Debug, Clone, Copy)]
pub struct FeatureInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Service version from the crate manifest.
pub fn get_service_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// All features with their versions, as logged at startup.
pub fn get_features() -> Vec<FeatureInfo> {
    vec![
        FeatureInfo {
            name: "Registration Intake",
            version: "1.2.0",
        },
        FeatureInfo {
            name: "Organizer Notifications",
            version: "1.1.0",
        },
        FeatureInfo {
            name: "Reminder Scheduling",
            version: "1.1.0",
        },
        FeatureInfo {
            name: "Response Viewer",
            version: "1.0.1",
        },
        FeatureInfo {
            name: "Outbound Email",
            version: "1.1.0",
        },
    ]
}
