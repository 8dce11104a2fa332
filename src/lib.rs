// Core layer - shared configuration and utilities
pub mod core;

// Domain model
pub mod registrations;

// Infrastructure - registration persistence
pub mod database;

// Features layer - all feature modules
pub mod features;

// HTTP layer - public API surface
pub mod http;

// Re-export core config for convenience
pub use crate::core::Config;

// Re-export feature items
pub use features::{
    // Outbound email
    EmailMessage, Mailer, ResendMailer, SendPacer,
    // Notifications
    NotifyPayload, RegistrationNotifier,
    // Reminders
    ReminderMode, ReminderOutcome, ReminderScheduler, ReminderTemplates,
    // Response viewer
    SessionStore,
};

// Re-export HTTP server items
pub use http::{build_router, run_server, AppState};
