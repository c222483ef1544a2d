//! # Validation Utilities
//!
//! Input validation helpers. Each returns the violation message on failure
//! so callers can attach it to the offending field.

/// Validate that a string is not empty (whitespace-only counts as empty).
pub fn validate_not_empty(value: &str, message: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(message.to_string())
    } else {
        Ok(())
    }
}

/// Validate email syntax.
///
/// Requires exactly one `@`, a non-empty local part, and a dotted domain
/// whose labels are non-empty alphanumerics or hyphens. No whitespace.
pub fn validate_email(email: &str) -> Result<(), String> {
    let invalid = || Err("Please include a valid email".to_string());

    if email.chars().any(char::is_whitespace) {
        return invalid();
    }

    let Some((local, domain)) = email.split_once('@') else {
        return invalid();
    };

    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return invalid();
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return invalid();
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    // Top-level domain is at least two letters
    let tld_ok = labels
        .last()
        .map(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false);

    if labels_ok && tld_ok {
        Ok(())
    } else {
        invalid()
    }
}

/// Validate minimum length in characters.
pub fn validate_min_length(value: &str, min: usize, message: &str) -> Result<(), String> {
    if value.chars().count() < min {
        Err(message.to_string())
    } else {
        Ok(())
    }
}
