//! # Feature: Reminder Scheduling
//!
//! One batch run walks every stored registration and hands the provider
//! a reminder email with a fixed delivery instant. The provider holds
//! the messages until then, so the batch can run days ahead of the
//! event. Individual rejects are collected, never fatal; only a store
//! read failure aborts the batch.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.4.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 1.1.0: Test mode restricted to the allow-listed contacts
//! - 1.0.0: Initial batch scheduling with per-language templates

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::templates::ReminderTemplates;
use crate::database::RegistrationStore;
use crate::features::mailer::{EmailMessage, Mailer};
use crate::registrations::Registration;

// Delivery instants in UTC; the event runs on Netherlands time (CEST).
/// October 7, 2025 at 18:30 Netherlands time - dry run.
pub const TEST_SEND_AT: &str = "2025-10-07T16:30:00.000Z";
/// October 8, 2025 at 12:00 Netherlands time.
pub const REMINDER_1_SEND_AT: &str = "2025-10-08T10:00:00.000Z";
/// October 14, 2025 at 12:00 Netherlands time.
pub const REMINDER_2_SEND_AT: &str = "2025-10-14T10:00:00.000Z";

/// Contacts a test batch may target.
pub const TEST_RECIPIENTS: [&str; 2] = [
    "reminders-test@utrechtsymposium.nl",
    "redactie-test@utrechtsymposium.nl",
];

/// Which batch to run. Each mode maps to one fixed delivery instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderMode {
    Test,
    Reminder1,
    Reminder2,
}

impl ReminderMode {
    pub fn send_at(&self) -> &'static str {
        match self {
            ReminderMode::Test => TEST_SEND_AT,
            ReminderMode::Reminder1 => REMINDER_1_SEND_AT,
            ReminderMode::Reminder2 => REMINDER_2_SEND_AT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderMode::Test => "test",
            ReminderMode::Reminder1 => "reminder1",
            ReminderMode::Reminder2 => "reminder2",
        }
    }
}

/// Aggregate outcome of one scheduling batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderOutcome {
    /// Sends the provider accepted.
    pub scheduled: usize,
    /// Sends the provider rejected or that never reached it.
    pub failed: usize,
    /// Registrations in the store when the batch started.
    pub total: usize,
    /// Delivery instant every accepted send was queued for.
    pub send_at: String,
    /// One `contact: reason` line per failed send.
    pub errors: Vec<String>,
}

/// Runs reminder batches against the registration store.
pub struct ReminderScheduler {
    store: Arc<dyn RegistrationStore>,
    mailer: Arc<dyn Mailer>,
    templates: Arc<ReminderTemplates>,
    from: String,
}

impl ReminderScheduler {
    pub fn new(
        store: Arc<dyn RegistrationStore>,
        mailer: Arc<dyn Mailer>,
        templates: Arc<ReminderTemplates>,
        from: String,
    ) -> ReminderScheduler {
        ReminderScheduler {
            store,
            mailer,
            templates,
            from,
        }
    }

    /// Run one batch. Store read failures abort; per-recipient failures
    /// are recorded in the outcome and the batch keeps going.
    pub async fn run(&self, mode: ReminderMode) -> Result<ReminderOutcome> {
        let registrations = self
            .store
            .fetch_all()
            .await
            .context("failed to fetch registrations")?;
        let total = registrations.len();
        let send_at = mode.send_at().to_string();

        if registrations.is_empty() {
            info!("no registrations found, nothing to schedule");
            return Ok(ReminderOutcome {
                send_at,
                ..ReminderOutcome::default()
            });
        }

        let recipients: Vec<Registration> = match mode {
            ReminderMode::Test => registrations
                .into_iter()
                .filter(|r| TEST_RECIPIENTS.contains(&r.contact.as_str()))
                .collect(),
            _ => registrations,
        };

        info!(
            "scheduling {} batch for {} of {} registrations, delivery at {}",
            mode.as_str(),
            recipients.len(),
            total,
            send_at
        );

        let mut outcome = ReminderOutcome {
            total,
            send_at: send_at.clone(),
            ..ReminderOutcome::default()
        };

        for registration in recipients {
            let language = registration.reminder_language();
            let subject = self.templates.subject(language).to_string();
            let html = match self.templates.render_body(language, &registration.name) {
                Ok(html) => html,
                Err(e) => {
                    warn!("failed to render reminder for {}: {e:#}", registration.contact);
                    outcome.failed += 1;
                    outcome.errors.push(format!("{}: {e:#}", registration.contact));
                    continue;
                }
            };

            let message = EmailMessage {
                from: self.from.clone(),
                to: vec![registration.contact.clone()],
                subject,
                html,
                scheduled_at: Some(send_at.clone()),
            };

            match self.mailer.send(&message).await {
                Ok(_) => {
                    debug!("reminder queued for {}", registration.contact);
                    outcome.scheduled += 1;
                }
                Err(e) => {
                    warn!("failed to queue reminder for {}: {e:#}", registration.contact);
                    outcome.failed += 1;
                    outcome.errors.push(format!("{}: {e:#}", registration.contact));
                }
            }
        }

        info!(
            "{} batch done: {} scheduled, {} failed",
            mode.as_str(),
            outcome.scheduled,
            outcome.failed
        );
        Ok(outcome)
    }
}
