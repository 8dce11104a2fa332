//! # Feature: Outbound Email
//!
//! Thin client for the Resend HTTP API plus the [`Mailer`] trait the
//! rest of the service depends on. Scheduled sends pass a fixed
//! delivery instant; immediate sends leave it unset.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Recipient shape check and send pacing ahead of provider calls
//! - 1.0.0: Initial Resend client with scheduled delivery support

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::pacer::{SendPacer, PROVIDER_MAX_SENDS, PROVIDER_WINDOW};

/// Base URL of the provider API.
pub const RESEND_API_BASE: &str = "https://api.resend.com";

/// Rough shape of a deliverable address. The provider does the real
/// validation; this catches phone numbers submitted in the contact
/// field before they cost an API call.
const ADDRESS_SHAPE: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// One outbound email. `scheduled_at` defers delivery to a fixed
/// RFC 3339 instant.
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

/// Provider acknowledgement for an accepted send.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendReceipt {
    #[serde(default)]
    pub id: Option<String>,
}

/// Error body the provider returns for rejected sends.
#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default)]
    message: Option<String>,
}

/// Behavior of an email transport. Feature code holds the trait object
/// so tests can record sends instead of calling out.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<SendReceipt>;
}

/// Resend-backed [`Mailer`].
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    pacer: SendPacer,
    address_shape: Regex,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>) -> Result<ResendMailer> {
        Ok(ResendMailer {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            pacer: SendPacer::new(PROVIDER_MAX_SENDS, PROVIDER_WINDOW),
            address_shape: Regex::new(ADDRESS_SHAPE).context("address pattern failed to compile")?,
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: &EmailMessage) -> Result<SendReceipt> {
        for recipient in &message.to {
            if !self.address_shape.is_match(recipient) {
                return Err(anyhow!("invalid recipient address: {recipient}"));
            }
        }

        self.pacer.acquire().await;

        let response = self
            .client
            .post(format!("{RESEND_API_BASE}/emails"))
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await
            .context("email provider request failed")?;

        let status = response.status();
        if status.is_success() {
            // a delivered send with an unreadable receipt is still a success
            Ok(response.json().await.unwrap_or_default())
        } else {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ProviderError>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or(body);
            Err(anyhow!("email provider rejected send ({status}): {detail}"))
        }
    }
}
