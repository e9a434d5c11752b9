//! Date validation functions
//!
//! Dates are accepted only in the ISO-8601 calendar form `YYYY-MM-DD`, which is
//! what `<input type="date">` submits. Locale forms such as `13/45/2024` or
//! `Jan 5 2024` are rejected rather than guessed at.

use chrono::NaiveDate;

/// Format string for ISO-8601 calendar dates
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a strict `YYYY-MM-DD` date
///
/// Returns `None` when the shape is wrong (missing zero padding, extra
/// characters, signs) or the date does not exist on the calendar (`2023-02-29`).
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 {
        return None;
    }

    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }

    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

/// Validates that a string is a representable ISO calendar date
pub fn is_valid_date(value: &str) -> bool {
    parse_iso_date(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2024-01-15")]
    #[case("2024-02-29")]
    #[case("1999-12-31")]
    fn test_valid_dates(#[case] value: &str) {
        assert!(is_valid_date(value), "{value} should be valid");
    }

    #[rstest]
    #[case("not-a-date")]
    #[case("")]
    #[case("2023-02-29")]
    #[case("2024-13-01")]
    #[case("2024-1-5")]
    #[case("13/45/2024")]
    #[case("01/15/2024")]
    #[case("2024-01-15T10:00")]
    #[case("+024-01-15")]
    fn test_invalid_dates(#[case] value: &str) {
        assert!(!is_valid_date(value), "{value} should be invalid");
    }

    #[test]
    fn test_parse_iso_date() {
        let date = parse_iso_date("2024-01-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }
}
