//! # Mailer Feature
//!
//! Outbound email: provider client, transport trait, and send pacing.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

pub mod pacer;
pub mod resend;

pub use pacer::{SendPacer, PROVIDER_MAX_SENDS, PROVIDER_WINDOW};
pub use resend::{EmailMessage, Mailer, ResendMailer, SendReceipt};
