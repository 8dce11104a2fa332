//! # HTTP Protocol
//!
//! JSON request and response bodies for the public API. Field names
//! match what the registration form and the viewer dashboard send.

use serde::{Deserialize, Serialize};

use crate::features::reminders::{ReminderMode, ReminderOutcome};
use crate::registrations::{Language, Registration, Role};

/// Body for `POST /api/register`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub role: Role,
    /// Free-text role description, required when `role` is `other`.
    #[serde(default)]
    pub other_role: Option<String>,
    pub contact: String,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub registration: Registration,
}

/// Body for `POST /api/notify`, the fields the form submits.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyRequest {
    pub name: String,
    pub role: String,
    pub contact: String,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Plain acknowledgement.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
}

/// Body for `POST /api/schedule-reminders`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRemindersRequest {
    pub reminder_date: ReminderMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRemindersResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub scheduled: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ScheduleRemindersResponse {
    pub fn from_outcome(outcome: ReminderOutcome) -> ScheduleRemindersResponse {
        if outcome.total == 0 {
            return ScheduleRemindersResponse {
                success: true,
                message: Some("No registrations found".to_string()),
                scheduled: 0,
                failed: None,
                total: None,
                scheduled_at: None,
                errors: None,
            };
        }
        ScheduleRemindersResponse {
            success: true,
            message: None,
            scheduled: outcome.scheduled,
            failed: Some(outcome.failed),
            total: Some(outcome.total),
            scheduled_at: Some(outcome.send_at),
            errors: if outcome.errors.is_empty() {
                None
            } else {
                Some(outcome.errors)
            },
        }
    }
}

/// Body for `POST /api/responses/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

/// Response for `GET /api/responses`.
#[derive(Debug, Serialize)]
pub struct RegistrationList {
    pub registrations: Vec<Registration>,
    pub total: usize,
}

/// Query parameters accepted by `GET /api/responses/live`. Browsers
/// cannot set headers on an EventSource, so the token may ride along
/// as a query parameter instead.
#[derive(Debug, Deserialize)]
pub struct LiveQuery {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEmailResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    pub sent_to: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reminders::REMINDER_2_SEND_AT;

    #[test]
    fn test_register_request_parses_form_fields() {
        let body = serde_json::json!({
            "name": "Ayşe",
            "role": "other",
            "otherRole": "student journalist",
            "contact": "ayse@example.com",
            "comments": "front row please",
            "language": "tr",
        });
        let request: RegisterRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.role, Role::Other);
        assert_eq!(request.other_role.as_deref(), Some("student journalist"));
        assert_eq!(request.language, Some(Language::Tr));
    }

    #[test]
    fn test_register_request_defaults_optional_fields() {
        let body = serde_json::json!({
            "name": "Jan",
            "role": "parent",
            "contact": "jan@example.com",
        });
        let request: RegisterRequest = serde_json::from_value(body).unwrap();
        assert!(request.other_role.is_none());
        assert!(request.comments.is_none());
        assert!(request.language.is_none());
    }

    #[test]
    fn test_register_request_rejects_unknown_role() {
        let body = serde_json::json!({
            "name": "Jan",
            "role": "sponsor",
            "contact": "jan@example.com",
        });
        assert!(serde_json::from_value::<RegisterRequest>(body).is_err());
    }

    #[test]
    fn test_schedule_request_parses_reminder_date_key() {
        let request: ScheduleRemindersRequest =
            serde_json::from_str(r#"{"reminderDate": "reminder2"}"#).unwrap();
        assert_eq!(request.reminder_date, ReminderMode::Reminder2);
        assert!(serde_json::from_str::<ScheduleRemindersRequest>(r#"{"reminderDate": "soon"}"#).is_err());
        assert!(serde_json::from_str::<ScheduleRemindersRequest>(r#"{}"#).is_err());
    }

    #[test]
    fn test_schedule_response_for_a_run_batch() {
        let outcome = ReminderOutcome {
            scheduled: 2,
            failed: 1,
            total: 3,
            send_at: REMINDER_2_SEND_AT.to_string(),
            errors: vec!["0612345678: invalid recipient address".to_string()],
        };
        let json = serde_json::to_value(ScheduleRemindersResponse::from_outcome(outcome)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["scheduled"], 2);
        assert_eq!(json["failed"], 1);
        assert_eq!(json["total"], 3);
        assert_eq!(json["scheduledAt"], REMINDER_2_SEND_AT);
        assert_eq!(json["errors"][0], "0612345678: invalid recipient address");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_schedule_response_for_an_empty_store() {
        let outcome = ReminderOutcome {
            send_at: REMINDER_2_SEND_AT.to_string(),
            ..ReminderOutcome::default()
        };
        let json = serde_json::to_value(ScheduleRemindersResponse::from_outcome(outcome)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "No registrations found");
        assert_eq!(json["scheduled"], 0);
        assert!(json.get("total").is_none());
        assert!(json.get("scheduledAt").is_none());
    }

    #[test]
    fn test_schedule_response_omits_empty_error_list() {
        let outcome = ReminderOutcome {
            scheduled: 2,
            failed: 0,
            total: 2,
            send_at: REMINDER_2_SEND_AT.to_string(),
            errors: Vec::new(),
        };
        let json = serde_json::to_value(ScheduleRemindersResponse::from_outcome(outcome)).unwrap();
        assert!(json.get("errors").is_none());
    }
}
