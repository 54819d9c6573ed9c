//! Warranty entity, coverage window and code format

use chrono::{DateTime, Months, Utc};

use crate::domain::{DomainError, DomainResult};

/// Prefix of every warranty code
pub const WARRANTY_CODE_PREFIX: &str = "BH";

/// Coverage record for a whole device or for one repair item
#[derive(Debug, Clone, PartialEq)]
pub struct Warranty {
    pub id: i32,
    pub device_id: i32,
    pub repair_session_id: i32,
    /// `None` covers the whole device
    pub repair_item_id: Option<i32>,
    pub warranty_months: i32,
    pub start_date: DateTime<Utc>,
    /// `start_date` plus `warranty_months` calendar months
    pub end_date: DateTime<Utc>,
    /// Globally unique, `BH` followed by 8 uppercase hex characters
    pub warranty_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Warranty {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.end_date < now
    }
}

/// Calendar-month arithmetic: Jan 31 + 1 month = Feb 28/29.
pub fn coverage_end(start: DateTime<Utc>, months: i32) -> DomainResult<DateTime<Utc>> {
    if months <= 0 {
        return Err(DomainError::Validation(
            "warrantyMonths must be greater than 0".into(),
        ));
    }
    start
        .checked_add_months(Months::new(months as u32))
        .ok_or_else(|| DomainError::Validation(format!("warrantyMonths out of range: {}", months)))
}

/// Random candidate code; uniqueness is checked by the caller.
pub fn generate_warranty_code() -> String {
    format!("{}{:08X}", WARRANTY_CODE_PREFIX, rand::random::<u32>())
}

pub fn is_valid_warranty_code(code: &str) -> bool {
    code.len() == WARRANTY_CODE_PREFIX.len() + 8
        && code.starts_with(WARRANTY_CODE_PREFIX)
        && code[WARRANTY_CODE_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn generated_codes_match_format() {
        for _ in 0..200 {
            let code = generate_warranty_code();
            assert!(is_valid_warranty_code(&code), "bad code {}", code);
        }
    }

    #[test]
    fn code_validation_rejects_lowercase_and_wrong_length() {
        assert!(is_valid_warranty_code("BH00AF12CD"));
        assert!(!is_valid_warranty_code("BH00af12cd"));
        assert!(!is_valid_warranty_code("BH00AF12C"));
        assert!(!is_valid_warranty_code("XX00AF12CD"));
    }

    #[test]
    fn coverage_end_uses_calendar_months() {
        let start = Utc.with_ymd_and_hms(2024, 1, 31, 10, 0, 0).unwrap();
        let end = coverage_end(start, 1).unwrap();
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 2, 29, 10, 0, 0).unwrap());

        let end = coverage_end(start, 12).unwrap();
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 31, 10, 0, 0).unwrap());
    }

    #[test]
    fn non_positive_months_are_rejected() {
        let start = Utc::now();
        assert!(coverage_end(start, 0).is_err());
        assert!(coverage_end(start, -3).is_err());
    }
}
