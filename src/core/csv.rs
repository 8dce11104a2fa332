//! # CSV Module
//!
//! Plain CSV assembly for the response export. Every data field is
//! quoted so commas, newlines, and embedded quotes survive spreadsheet
//! imports; header cells stay bare like the dashboard download.
//!
//! - **Version**: 1.0.1
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.1: Close the trailing quote on escaped fields
//! - 1.0.0: Initial export assembly

/// Quote a single field, doubling any embedded double quotes.
pub fn escape_field(field: &str) -> String {
    let mut escaped = String::with_capacity(field.len() + 2);
    escaped.push('"');
    for ch in field.chars() {
        if ch == '"' {
            escaped.push('"');
        }
        escaped.push(ch);
    }
    escaped.push('"');
    escaped
}

/// Join one record's fields into a CSV line.
pub fn build_record(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| escape_field(field))
        .collect::<Vec<_>>()
        .join(",")
}

/// Assemble a document: bare header line followed by one quoted record
/// per row, newline separated.
pub fn build_document(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(","));
    for row in rows {
        lines.push(build_record(row));
    }
    lines.join("\n")
}
