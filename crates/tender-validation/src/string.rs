//! String validation functions

/// Number of characters in the trimmed value
///
/// Counts `char`s, not bytes, so "café" is four characters.
pub fn trimmed_len(s: &str) -> usize {
    s.trim().chars().count()
}

/// Validates that the trimmed value has at least `min` characters
pub fn validate_min_length(s: &str, min: usize) -> Result<(), String> {
    if trimmed_len(s) >= min {
        Ok(())
    } else {
        Err(format!("Must be at least {} characters", min))
    }
}

/// True when the value is empty or whitespace-only
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Case-insensitive substring containment
///
/// An empty needle is contained in everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
