//! Form-shaped drafts for every create operation. A draft holds raw text exactly as
//! typed; `validate` turns it into a seed for the entity store or reports every
//! offending field at once.

use chrono::NaiveDate;

use crate::error::ValidationError;

mod material;
mod project;
mod team_member;
mod directory;
mod invoice;
mod task;
mod labour;

pub use material::MaterialDraft;
pub use project::ProjectDraft;
pub use team_member::TeamMemberDraft;
pub use directory::{DirectoryDraft, FileUpload, UploadDraft};
pub use invoice::InvoiceDraft;
pub use task::TaskDraft;
pub use labour::LabourDraft;

/// One editable text field of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(key: &'static str, label: &'static str) -> Self {
        Self { key, label, required: true }
    }

    pub const fn optional(key: &'static str, label: &'static str) -> Self {
        Self { key, label, required: false }
    }
}

/// Uniform access to a draft's text fields, so one form widget can edit any of them.
/// Field indexes follow `fields()`.
pub trait FormDraft: Default {
    const TITLE: &'static str;

    fn fields() -> &'static [FieldSpec];
    fn field(&self, index: usize) -> &str;
    fn field_mut(&mut self, index: usize) -> Option<&mut String>;
}

/// Records `message` against `field` when `value` is blank.
pub(crate) fn require(errors: &mut ValidationError, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(field, message);
    }
}

/// Parses an amount that may carry thousands separators ("15,000,000").
pub fn parse_amount(value: &str) -> Option<u64> {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse().ok()
}

/// Extracts the count from a quantity with an embedded unit: every digit is kept and
/// everything else dropped, so "5,000 Pcs" is 5000. `None` when there are no digits.
pub fn parse_quantity(value: &str) -> Option<u64> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Dates are entered as `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// First letter of every word, uppercased: "Sara Ahmed" is "SA".
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Splits a comma separated list, trimming entries and dropping blanks.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// `Some(trimmed)` for non-blank text.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantities_keep_only_digits() {
        assert_eq!(parse_quantity("200 Bags"), Some(200));
        assert_eq!(parse_quantity("5,000 Pcs"), Some(5000));
        assert_eq!(parse_quantity("Bags"), None);
        assert_eq!(parse_quantity(""), None);
    }

    #[test]
    fn amounts_strip_separators() {
        assert_eq!(parse_amount("15,000,000"), Some(15_000_000));
        assert_eq!(parse_amount(" 850 "), Some(850));
        assert_eq!(parse_amount("12a"), None);
        assert_eq!(parse_amount("-5"), None);
    }

    #[test]
    fn initials_take_first_letters() {
        assert_eq!(initials("Sara Ahmed"), "SA");
        assert_eq!(initials("  muhammad  ali khan "), "MAK");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn lists_drop_blank_entries() {
        assert_eq!(
            split_list(" Mall of Lahore, ,Wild Zoo Complex,"),
            vec!["Mall of Lahore".to_string(), "Wild Zoo Complex".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn dates_are_iso_formatted() {
        assert_eq!(parse_date("2025-03-15"), NaiveDate::from_ymd_opt(2025, 3, 15));
        assert_eq!(parse_date("March 15, 2025"), None);
        assert_eq!(parse_date("2025-02-30"), None);
    }
}
