//! # Feature: Response Viewer Access
//!
//! Login gate for the response viewer. Credentials are a single shared
//! pair handed to the journalist team; a successful login yields an
//! opaque session token that the data endpoints require.
//!
//! - **Version**: 1.0.1
//! - **Since**: 0.5.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.1: Sessions expire instead of living for the process
//! - 1.0.0: Initial shared-credential gate

use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

pub const VALID_USERNAME: &str = "utrecht-journalists";
pub const VALID_PASSWORD: &str = "Hubbies8";

/// Sessions idle out after this long.
pub const SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Issued session tokens and when they were created.
pub struct SessionStore {
    sessions: DashMap<String, Instant>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new() -> SessionStore {
        SessionStore::with_ttl(SESSION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> SessionStore {
        SessionStore {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Check the shared pair; a match issues a fresh session token.
    pub fn login(&self, username: &str, password: &str) -> Option<String> {
        if username == VALID_USERNAME && password == VALID_PASSWORD {
            let token = Uuid::new_v4().to_string();
            self.sessions.insert(token.clone(), Instant::now());
            Some(token)
        } else {
            None
        }
    }

    /// True when the token names a live session. Expired tokens are
    /// evicted on the way out.
    pub fn validate(&self, token: &str) -> bool {
        let expired = match self.sessions.get(token) {
            Some(created_at) => created_at.elapsed() >= self.ttl,
            None => return false,
        };
        if expired {
            self.sessions.remove(token);
            return false;
        }
        true
    }

    pub fn logout(&self, token: &str) {
        self.sessions.remove(token);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        SessionStore::new()
    }
}
