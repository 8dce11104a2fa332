//! # Registration Model
//!
//! Domain types for symposium registrations, shared by intake, storage,
//! email delivery, and the response viewer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Languages the registration form ships translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Nl,
    En,
    Ar,
    Tr,
}

impl Language {
    /// Two-letter code as stored alongside each registration.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Nl => "nl",
            Language::En => "en",
            Language::Ar => "ar",
            Language::Tr => "tr",
        }
    }

    /// Parse a stored code. Unknown or empty codes yield `None`;
    /// callers that need a template fall back to Dutch.
    pub fn from_code(code: &str) -> Option<Language> {
        match code.trim().to_lowercase().as_str() {
            "nl" => Some(Language::Nl),
            "en" => Some(Language::En),
            "ar" => Some(Language::Ar),
            "tr" => Some(Language::Tr),
            _ => None,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Nl
    }
}

/// Attendee roles offered by the form. `Other` carries a free-text
/// description submitted in a separate field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Parent,
    PolicyMaker,
    Expert,
    School,
    Other,
}

impl Role {
    pub fn key(&self) -> &'static str {
        match self {
            Role::Parent => "parent",
            Role::PolicyMaker => "policyMaker",
            Role::Expert => "expert",
            Role::School => "school",
            Role::Other => "other",
        }
    }

    /// String form stored in the row: the bare key, or `other: <text>`
    /// when the attendee described their own role.
    pub fn stored_value(&self, other_role: Option<&str>) -> String {
        match self {
            Role::Other => match other_role.map(str::trim).filter(|t| !t.is_empty()) {
                Some(text) => format!("other: {text}"),
                None => "other".to_string(),
            },
            _ => self.key().to_string(),
        }
    }
}

/// Bilingual role label for the organizer notification email (Dutch first).
/// Stored values outside the known set pass through unchanged.
pub fn organizer_role_label(role: &str) -> &str {
    match role {
        "parent" => "Ouder / Parent",
        "policyMaker" => "Beleidsmaker / Policy Maker",
        "expert" => "Expert",
        "school" => "Vanuit school / School Staff",
        "other" => "Anders (student) / Other (student)",
        other => other,
    }
}

/// Bilingual role label for the response viewer and CSV export (English first).
pub fn viewer_role_label(role: &str) -> &str {
    match role {
        "parent" => "Parent / Ouder",
        "policyMaker" => "Policy Maker / Beleidsmaker",
        "expert" => "Expert",
        "school" => "School Staff / Vanuit school",
        "other" => "Other / Anders",
        other => other,
    }
}

/// One stored registration row.
///
/// `comments` and `language` are optional on the wire so rows written
/// by hand or by older form revisions still deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub contact: String,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    /// Stored language code, defaulting to Dutch when absent or blank.
    pub fn language_code(&self) -> &str {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .unwrap_or("nl")
    }

    /// Language used for reminder templates. Unknown codes get the
    /// Dutch template rather than no reminder at all.
    pub fn reminder_language(&self) -> Language {
        Language::from_code(self.language_code()).unwrap_or_default()
    }

    pub fn comments_text(&self) -> &str {
        self.comments.as_deref().unwrap_or("")
    }
}

/// Insert payload for a new registration. The store assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewRegistration {
    pub name: String,
    pub role: String,
    pub contact: String,
    pub comments: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes_round_trip() {
        for language in [Language::Nl, Language::En, Language::Ar, Language::Tr] {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
    }

    #[test]
    fn test_language_from_code_is_tolerant() {
        assert_eq!(Language::from_code(" NL "), Some(Language::Nl));
        assert_eq!(Language::from_code("Tr"), Some(Language::Tr));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code(""), None);
    }

    #[test]
    fn test_language_serde_uses_lowercase_codes() {
        assert_eq!(serde_json::to_string(&Language::Ar).unwrap(), "\"ar\"");
        let parsed: Language = serde_json::from_str("\"tr\"").unwrap();
        assert_eq!(parsed, Language::Tr);
    }

    #[test]
    fn test_role_stored_values() {
        assert_eq!(Role::Parent.stored_value(None), "parent");
        assert_eq!(Role::PolicyMaker.stored_value(None), "policyMaker");
        assert_eq!(Role::School.stored_value(Some("ignored")), "school");
        assert_eq!(Role::Other.stored_value(Some("journalist")), "other: journalist");
        assert_eq!(Role::Other.stored_value(Some("  student  ")), "other: student");
        assert_eq!(Role::Other.stored_value(None), "other");
        assert_eq!(Role::Other.stored_value(Some("   ")), "other");
    }

    #[test]
    fn test_role_serde_uses_camel_case_keys() {
        let parsed: Role = serde_json::from_str("\"policyMaker\"").unwrap();
        assert_eq!(parsed, Role::PolicyMaker);
        assert!(serde_json::from_str::<Role>("\"volunteer\"").is_err());
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(organizer_role_label("parent"), "Ouder / Parent");
        assert_eq!(viewer_role_label("parent"), "Parent / Ouder");
        assert_eq!(organizer_role_label("expert"), "Expert");
        // Composed and unknown values pass through for display
        assert_eq!(viewer_role_label("other: student"), "other: student");
    }

    #[test]
    fn test_registration_language_defaults_to_dutch() {
        let mut registration = sample();
        registration.language = None;
        assert_eq!(registration.language_code(), "nl");
        registration.language = Some("  ".to_string());
        assert_eq!(registration.language_code(), "nl");
        registration.language = Some("fr".to_string());
        assert_eq!(registration.reminder_language(), Language::Nl);
        registration.language = Some("ar".to_string());
        assert_eq!(registration.reminder_language(), Language::Ar);
    }

    #[test]
    fn test_registration_deserializes_without_optional_fields() {
        let row = serde_json::json!({
            "id": "7b6f3c0a-8d3e-4a5b-9c1d-2e4f5a6b7c8d",
            "name": "Fatima",
            "role": "parent",
            "contact": "fatima@example.com",
            "created_at": "2025-10-01T18:30:00+00:00",
        });
        let registration: Registration = serde_json::from_value(row).unwrap();
        assert_eq!(registration.comments_text(), "");
        assert_eq!(registration.language_code(), "nl");
    }

    fn sample() -> Registration {
        Registration {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            role: "parent".to_string(),
            contact: "test@example.com".to_string(),
            comments: None,
            language: Some("nl".to_string()),
            created_at: Utc::now(),
        }
    }
}
