//! # Registration Store
//!
//! Persistence for symposium registrations. The hosted store is a
//! Postgres instance reached over its REST interface with the
//! service-role credential; an in-memory implementation backs tests
//! and local demo runs.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Store trait with in-memory implementation for local runs
//! - 1.0.0: Hosted REST client with service-role auth

use std::sync::RwLock;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::debug;
use uuid::Uuid;

use crate::registrations::{NewRegistration, Registration};

/// Table holding one row per submitted registration.
pub const REGISTRATIONS_TABLE: &str = "symposium_registrations";

/// Behavior every registration store provides. Handlers hold the trait
/// object so tests can swap in [`MemoryStore`].
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Insert one row and return it with store-assigned fields filled in.
    async fn insert(&self, new: NewRegistration) -> Result<Registration>;

    /// Every stored registration, order unspecified.
    async fn fetch_all(&self) -> Result<Vec<Registration>>;

    /// Every stored registration, newest first.
    async fn fetch_recent_first(&self) -> Result<Vec<Registration>>;
}

/// REST client for the hosted registration store.
///
/// Requests carry the service-role key in both the `apikey` header and
/// the bearer token, which is what the hosted API expects from
/// server-side callers.
pub struct Database {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl Database {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Database {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Database {
            client: reqwest::Client::new(),
            base_url,
            service_key: service_key.into(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, REGISTRATIONS_TABLE)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn select(&self, query: &[(&str, &str)]) -> Result<Vec<Registration>> {
        let response = self
            .authed(self.client.get(self.table_url()))
            .query(query)
            .send()
            .await
            .context("registration select request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("registration select rejected ({status}): {body}"));
        }
        response
            .json()
            .await
            .context("invalid select response from registration store")
    }
}

#[async_trait]
impl RegistrationStore for Database {
    async fn insert(&self, new: NewRegistration) -> Result<Registration> {
        debug!("inserting registration for {}", new.name);
        let response = self
            .authed(self.client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&[&new])
            .send()
            .await
            .context("registration insert request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("registration insert rejected ({status}): {body}"));
        }
        let rows: Vec<Registration> = response
            .json()
            .await
            .context("invalid insert response from registration store")?;
        rows.into_iter()
            .next()
            .ok_or_else(|| anyhow!("registration store returned no row for insert"))
    }

    async fn fetch_all(&self) -> Result<Vec<Registration>> {
        self.select(&[("select", "*")]).await
    }

    async fn fetch_recent_first(&self) -> Result<Vec<Registration>> {
        self.select(&[("select", "*"), ("order", "created_at.desc")])
            .await
    }
}

/// In-memory registration store. Rows live for the process lifetime.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Registration>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn insert(&self, new: NewRegistration) -> Result<Registration> {
        let row = Registration {
            id: Uuid::new_v4(),
            name: new.name,
            role: new.role,
            contact: new.contact,
            comments: Some(new.comments),
            language: Some(new.language),
            created_at: new.created_at,
        };
        self.rows
            .write()
            .expect("registration rows poisoned")
            .push(row.clone());
        Ok(row)
    }

    async fn fetch_all(&self) -> Result<Vec<Registration>> {
        Ok(self.rows.read().expect("registration rows poisoned").clone())
    }

    async fn fetch_recent_first(&self) -> Result<Vec<Registration>> {
        let mut rows = self.fetch_all().await?;
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn new_registration(name: &str, offset_minutes: i64) -> NewRegistration {
        NewRegistration {
            name: name.to_string(),
            role: "parent".to_string(),
            contact: format!("{}@example.com", name.to_lowercase()),
            comments: String::new(),
            language: "nl".to_string(),
            created_at: Utc::now() + Duration::minutes(offset_minutes),
        }
    }

    #[tokio::test]
    async fn test_memory_store_assigns_unique_ids() {
        let store = MemoryStore::new();
        let first = store.insert(new_registration("Anna", 0)).await.unwrap();
        let second = store.insert(new_registration("Bram", 1)).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.fetch_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_memory_store_orders_recent_first() {
        let store = MemoryStore::new();
        store.insert(new_registration("Oldest", -10)).await.unwrap();
        store.insert(new_registration("Newest", 10)).await.unwrap();
        store.insert(new_registration("Middle", 0)).await.unwrap();

        let rows = store.fetch_recent_first().await.unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Newest", "Middle", "Oldest"]);
    }

    #[tokio::test]
    async fn test_memory_store_keeps_submitted_fields() {
        let store = MemoryStore::new();
        let mut new = new_registration("Dana", 0);
        new.role = "other: journalist".to_string();
        new.comments = "two seats please".to_string();
        new.language = "ar".to_string();

        let row = store.insert(new).await.unwrap();
        assert_eq!(row.role, "other: journalist");
        assert_eq!(row.comments_text(), "two seats please");
        assert_eq!(row.language_code(), "ar");
    }

    #[test]
    fn test_database_trims_trailing_slash() {
        let database = Database::new("https://example.supabase.co/", "key");
        assert_eq!(
            database.table_url(),
            format!("https://example.supabase.co/rest/v1/{REGISTRATIONS_TABLE}")
        );
    }
}
