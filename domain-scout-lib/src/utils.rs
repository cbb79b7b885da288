//! Utility functions for domain processing and validation.
//!
//! Helpers for normalizing user input, validating domain and base tokens,
//! and formatting numbers for display.

use crate::error::DomainScoutError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DOMAIN_PATTERN: Regex =
        Regex::new(r"^[a-z0-9-]+\.[a-z]{2,}$").expect("domain pattern is a valid regex");
    static ref BASE_PATTERN: Regex =
        Regex::new(r"^[a-z0-9-]+$").expect("base pattern is a valid regex");
}

/// Shortest base token a suggestion request accepts.
pub const MIN_BASE_LENGTH: usize = 3;

/// Trim, lowercase and validate a domain string.
///
/// Returns the normalized domain on success.
pub fn normalize_domain(input: &str) -> Result<String, DomainScoutError> {
    let domain = input.trim().to_lowercase();

    if domain.is_empty() {
        return Err(DomainScoutError::invalid_domain(input, "domain required"));
    }

    if !DOMAIN_PATTERN.is_match(&domain) {
        return Err(DomainScoutError::invalid_domain(
            domain,
            "expected <label>.<tld> using a-z, 0-9 and '-'",
        ));
    }

    Ok(domain)
}

/// Trim, lowercase and validate a suggestion base token.
pub fn normalize_base(input: &str) -> Result<String, DomainScoutError> {
    let base = input.trim().to_lowercase();

    if base.chars().count() < MIN_BASE_LENGTH {
        return Err(DomainScoutError::invalid_base(
            base,
            format!("use {}+ characters", MIN_BASE_LENGTH),
        ));
    }

    if !BASE_PATTERN.is_match(&base) {
        return Err(DomainScoutError::invalid_base(
            base,
            "only a-z, 0-9 and '-' are allowed",
        ));
    }

    Ok(base)
}

/// Round to one decimal place for reporting.
///
/// Rounds the exact binary value, so `4.35` (stored just below 4.35) gives
/// `4.3`. Exact ties go to the even digit.
pub(crate) fn round1(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Format an integer with comma thousands separators, e.g. `1234567` -> `1,234,567`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
