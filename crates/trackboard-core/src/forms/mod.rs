//! Form input for new records.
//!
//! Each draft holds the raw text a user typed, the way a form would submit
//! it. `build` checks the required fields and turns the text into a record:
//! comma fields become trimmed lists, multi-line fields become one item per
//! non-blank line, blank optional fields become `None`, free text is cut at
//! [`MAX_TEXT_LENGTH`] characters and progress is clamped to 0..=100.

pub mod drafts;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::utils::truncate_chars;

pub use drafts::{ActivityDraft, CertificateDraft, MiniProjectDraft, ProjectDraft};

/// Bound for descriptions and notes.
pub const MAX_TEXT_LENGTH: usize = 500;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("'{0}' is required")]
    MissingField(&'static str),
}

/// Record identifier derived from the creation time (epoch milliseconds).
pub fn record_id(created_at: DateTime<Utc>) -> String {
    created_at.timestamp_millis().to_string()
}

/// Trimmed value of a required field, or `MissingField`.
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// `None` for blank input.
pub(crate) fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// "Nmap, Wireshark" -> ["Nmap", "Wireshark"]
pub fn split_comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// One item per non-blank line.
pub fn split_lines(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn bounded_text(value: &str) -> String {
    truncate_chars(value.trim(), MAX_TEXT_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_split_comma_list() {
        assert_eq!(split_comma_list("Nmap, Wireshark"), vec!["Nmap", "Wireshark"]);
        assert_eq!(split_comma_list(" Python ,, Bash ,"), vec!["Python", "Bash"]);
        assert!(split_comma_list("").is_empty());
        assert!(split_comma_list(" , ").is_empty());
    }

    #[test]
    fn test_split_lines() {
        let input = "Learn nmap flags\n\n  Scan a lab subnet  \r\n   \nWrite report";
        assert_eq!(
            split_lines(input),
            vec!["Learn nmap flags", "Scan a lab subnet", "Write report"]
        );
        assert!(split_lines("\n\n").is_empty());
    }

    #[test]
    fn test_required_and_optional() {
        assert_eq!(required("title", "  SOC lab "), Ok("SOC lab".to_string()));
        assert_eq!(required("title", "   "), Err(FormError::MissingField("title")));
        assert_eq!(optional(""), None);
        assert_eq!(optional(" https://git.example "), Some("https://git.example".to_string()));
    }

    #[test]
    fn test_bounded_text() {
        let long = "a".repeat(MAX_TEXT_LENGTH + 20);
        assert_eq!(bounded_text(&long).len(), MAX_TEXT_LENGTH);
        assert_eq!(bounded_text(" short "), "short");
    }

    #[test]
    fn test_record_id_from_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(record_id(at), "1705276800000");
    }
}
