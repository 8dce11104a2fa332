//! # Feature: Organizer Notification
//!
//! Emails the organizers about each new registration. Delivery is best
//! effort by contract: a provider outage must never fail the intake
//! that triggered it, so every error ends here as a log line.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 1.1.0: Template moved out of the handler into templates/
//! - 1.0.0: Initial organizer email on registration

use std::sync::Arc;

use anyhow::{Context as AnyhowContext, Result};
use chrono::Utc;
use log::{error, info, warn};
use tera::{Context, Tera};

use crate::features::mailer::{EmailMessage, Mailer};
use crate::registrations::{organizer_role_label, Registration};

const NOTIFICATION_TEMPLATE: &str = include_str!("../../../templates/notification.html");
const TEST_EMAIL_TEMPLATE: &str = include_str!("../../../templates/test_email.html");

/// Sender identity for the configuration test email.
pub const TEST_FROM: &str = "Symposium Test <noreply@resend.dev>";
pub const TEST_SUBJECT: &str = "Test Email - Symposium Registration System";

/// Fields embedded in the organizer email.
#[derive(Debug, Clone)]
pub struct NotifyPayload {
    pub name: String,
    pub role: String,
    pub contact: String,
    pub comments: String,
    pub language: String,
}

impl From<&Registration> for NotifyPayload {
    fn from(registration: &Registration) -> NotifyPayload {
        NotifyPayload {
            name: registration.name.clone(),
            role: registration.role.clone(),
            contact: registration.contact.clone(),
            comments: registration.comments_text().to_string(),
            language: registration.language_code().to_string(),
        }
    }
}

/// Sends the organizer email when both the transport and the
/// destination address are configured; stays quiet otherwise.
pub struct RegistrationNotifier {
    mailer: Option<Arc<dyn Mailer>>,
    destination: Option<String>,
    from: String,
    tera: Tera,
}

impl RegistrationNotifier {
    pub fn new(
        mailer: Option<Arc<dyn Mailer>>,
        destination: Option<String>,
        from: String,
    ) -> Result<RegistrationNotifier> {
        let mut tera = Tera::default();
        tera.add_raw_template("notification.html", NOTIFICATION_TEMPLATE)
            .context("notification template failed to parse")?;
        Ok(RegistrationNotifier {
            mailer,
            destination,
            from,
            tera,
        })
    }

    /// Notify the organizers of one registration. Never fails the caller.
    pub async fn notify(&self, payload: &NotifyPayload) {
        info!(
            "processing registration notification for {} ({})",
            payload.name, payload.role
        );

        let (Some(mailer), Some(destination)) = (self.mailer.as_ref(), self.destination.as_ref())
        else {
            info!("notification skipped - provider key or destination address not configured");
            return;
        };

        let html = match self.render(payload) {
            Ok(html) => html,
            Err(e) => {
                error!("failed to render registration notification: {e:#}");
                return;
            }
        };

        let message = EmailMessage {
            from: self.from.clone(),
            to: vec![destination.clone()],
            subject: format!("Nieuwe Symposium Registratie - {}", payload.name),
            html,
            scheduled_at: None,
        };

        match mailer.send(&message).await {
            Ok(receipt) => info!(
                "organizer notified of registration from {} (receipt {})",
                payload.name,
                receipt.id.as_deref().unwrap_or("-")
            ),
            Err(e) => warn!("failed to send registration notification: {e:#}"),
        }
    }

    fn render(&self, payload: &NotifyPayload) -> Result<String> {
        let mut context = Context::new();
        context.insert("name", &payload.name);
        context.insert("role", organizer_role_label(&payload.role));
        context.insert("contact", &payload.contact);
        let comments = if payload.comments.trim().is_empty() {
            "Geen opmerkingen"
        } else {
            payload.comments.as_str()
        };
        context.insert("comments", comments);
        context.insert("language", &payload.language.to_uppercase());
        context.insert(
            "received_at",
            &Utc::now().format("%d-%m-%Y %H:%M:%S").to_string(),
        );
        self.tera
            .render("notification.html", &context)
            .context("notification template failed to render")
    }
}

/// Fixed diagnostic message confirming provider configuration end to end.
pub fn build_test_email(to: &str) -> Result<EmailMessage> {
    let mut context = Context::new();
    context.insert(
        "sent_at",
        &Utc::now().format("%d-%m-%Y %H:%M:%S").to_string(),
    );
    let html = Tera::one_off(TEST_EMAIL_TEMPLATE, &context, true)
        .context("test email template failed to render")?;
    Ok(EmailMessage {
        from: TEST_FROM.to_string(),
        to: vec![to.to_string()],
        subject: TEST_SUBJECT.to_string(),
        html,
        scheduled_at: None,
    })
}
