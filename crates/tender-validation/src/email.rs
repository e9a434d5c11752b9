//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

// local@domain.tld shape: no whitespace, no extra '@', at least one dot after the '@'
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Validates basic email shape
///
/// Checks for:
/// - No whitespace anywhere
/// - Exactly one '@' with content on both sides
/// - At least one '.' in the domain part, with content after it
///
/// This is a shape check only. Deliverability is the server's concern.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
