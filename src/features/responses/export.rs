//! CSV export of the response list, in the order the viewer shows it.

use chrono::{DateTime, Utc};

use crate::core::csv::build_document;
use crate::registrations::{viewer_role_label, Registration};

pub const EXPORT_HEADERS: [&str; 6] = ["Name", "Role", "Contact", "Comments", "Language", "Date"];

/// Build the export document. Rows arrive already ordered newest first.
pub fn export_csv(registrations: &[Registration]) -> String {
    let rows: Vec<Vec<String>> = registrations
        .iter()
        .map(|registration| {
            vec![
                registration.name.clone(),
                viewer_role_label(&registration.role).to_string(),
                registration.contact.clone(),
                registration.comments_text().to_string(),
                registration.language_code().to_uppercase(),
                registration.created_at.format("%d-%m-%Y %H:%M:%S").to_string(),
            ]
        })
        .collect();
    build_document(&EXPORT_HEADERS, &rows)
}

/// Attachment filename stamped with the export instant.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("symposium-registrations-{}.csv", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn registration(name: &str, role: &str, comments: &str) -> Registration {
        Registration {
            id: Uuid::new_v4(),
            name: name.to_string(),
            role: role.to_string(),
            contact: "contact@example.com".to_string(),
            comments: Some(comments.to_string()),
            language: Some("tr".to_string()),
            created_at: Utc.with_ymd_and_hms(2025, 10, 1, 18, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_export_header_line() {
        let document = export_csv(&[]);
        assert_eq!(document, "Name,Role,Contact,Comments,Language,Date");
    }

    #[test]
    fn test_export_row_content() {
        let document = export_csv(&[registration("Anna", "parent", "none")]);
        let lines: Vec<&str> = document.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "\"Anna\",\"Parent / Ouder\",\"contact@example.com\",\"none\",\"TR\",\"01-10-2025 18:30:00\""
        );
    }

    #[test]
    fn test_export_quotes_fields_with_commas_and_quotes() {
        let document = export_csv(&[registration("D\"Angelo, Jr", "other: press", "a,b")]);
        let lines: Vec<&str> = document.split('\n').collect();
        // embedded quote doubled, field still closed
        assert!(lines[1].starts_with("\"D\"\"Angelo, Jr\","));
        assert!(lines[1].contains("\"other: press\""));
        assert!(lines[1].contains("\"a,b\""));
    }

    #[test]
    fn test_export_preserves_row_order() {
        let rows = vec![
            registration("First", "expert", ""),
            registration("Second", "school", ""),
        ];
        let document = export_csv(&rows);
        let first_pos = document.find("First").unwrap();
        let second_pos = document.find("Second").unwrap();
        assert!(first_pos < second_pos);
    }

    #[test]
    fn test_export_filename_uses_millis() {
        let now = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        assert_eq!(
            export_filename(now),
            format!("symposium-registrations-{}.csv", now.timestamp_millis())
        );
    }
}
