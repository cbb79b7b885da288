//! Domain rating and value estimation.
//!
//! Scoring is a pure function of the domain string and the static tables in
//! [`crate::tables`]. Five components are weighted into a total:
//!
//! | Component    | Weight | Raw score                                  |
//! |--------------|--------|--------------------------------------------|
//! | TLD          | 0.35   | table lookup, 10 for unlisted TLDs         |
//! | Length       | 0.30   | 100 up to 6 chars, minus 15 per extra char |
//! | Cleanliness  | 0.05   | 100 minus hyphen (15) and digit (10)       |
//! | Dictionary   | 0.10   | 20 for a dictionary word                   |
//! | Brandability | 0.20   | 50 plus vowel percentage                   |
//!
//! # Example
//!
//! ```
//! use domain_scout_lib::score_domain;
//!
//! let report = score_domain("ai.com").unwrap();
//! assert_eq!(report.rating, 100.0);
//! assert!(report.value.min <= report.value.max);
//! ```

use crate::error::DomainScoutError;
use crate::tables::{is_dictionary_word, recent_sales, tld_score};
use crate::types::{DomainName, ScoreBreakdown, ScoreReport, ValueEstimate};
use crate::utils::{format_thousands, round1};

const TLD_WEIGHT: f64 = 0.35;
const LENGTH_WEIGHT: f64 = 0.30;
const CLEANLINESS_WEIGHT: f64 = 0.05;
const DICTIONARY_WEIGHT: f64 = 0.10;
const BRANDABILITY_WEIGHT: f64 = 0.20;

/// Labels up to this length get the full length score.
const IDEAL_LABEL_LENGTH: usize = 6;
const LENGTH_DECAY_PER_CHAR: i64 = 15;

const HYPHEN_PENALTY: f64 = 15.0;
const DIGIT_PENALTY: f64 = 10.0;
const DICTIONARY_BONUS: f64 = 20.0;

const VALUE_LOW_FACTOR: f64 = 0.8;
const VALUE_HIGH_FACTOR: f64 = 1.4;

/// Unweighted component scores for one label.
#[derive(Debug, Clone, PartialEq)]
struct RawScores {
    tld: f64,
    length: f64,
    cleanliness: f64,
    dictionary: f64,
    brandability: f64,
}

impl RawScores {
    fn weighted_total(&self) -> f64 {
        self.tld * TLD_WEIGHT
            + self.length * LENGTH_WEIGHT
            + self.cleanliness * CLEANLINESS_WEIGHT
            + self.dictionary * DICTIONARY_WEIGHT
            + self.brandability * BRANDABILITY_WEIGHT
    }

    fn breakdown(&self) -> ScoreBreakdown {
        ScoreBreakdown {
            tld: round1(self.tld * TLD_WEIGHT),
            length: round1(self.length * LENGTH_WEIGHT),
            cleanliness: round1(self.cleanliness * CLEANLINESS_WEIGHT),
            dictionary: round1(self.dictionary * DICTIONARY_WEIGHT),
            brandability: round1(self.brandability * BRANDABILITY_WEIGHT),
        }
    }
}

/// Validate and rate a domain string.
///
/// # Errors
///
/// Returns [`DomainScoutError::InvalidDomain`] when the input is empty or
/// does not match `^[a-z0-9-]+\.[a-z]{2,}$` after trimming and lowercasing.
pub fn score_domain(input: &str) -> Result<ScoreReport, DomainScoutError> {
    let domain = DomainName::parse(input)?;
    Ok(score(&domain))
}

/// Rate an already validated domain.
pub fn score(domain: &DomainName) -> ScoreReport {
    let label = domain.label();
    let is_dictionary = is_dictionary_word(label);

    let raw = RawScores {
        tld: tld_score(domain.dotted_tld()),
        length: length_score(label.len()),
        cleanliness: cleanliness_score(label),
        dictionary: if is_dictionary { DICTIONARY_BONUS } else { 0.0 },
        brandability: brandability_score(label),
    };

    let total = raw.weighted_total();

    ScoreReport {
        domain: domain.clone(),
        rating: round1(total.clamp(0.0, 100.0)),
        breakdown: raw.breakdown(),
        value: estimate_value(total, domain.dotted_tld(), is_dictionary, label.len()),
    }
}

/// 100 for short labels, losing 15 per character beyond six, never below 0.
pub fn length_score(label_len: usize) -> f64 {
    if label_len <= IDEAL_LABEL_LENGTH {
        return 100.0;
    }
    let excess = (label_len - IDEAL_LABEL_LENGTH) as i64;
    (100 - excess.saturating_mul(LENGTH_DECAY_PER_CHAR)).max(0) as f64
}

/// 100 minus additive hyphen and digit penalties. Not clamped.
pub fn cleanliness_score(label: &str) -> f64 {
    let mut penalty = 0.0;
    if label.contains('-') {
        penalty += HYPHEN_PENALTY;
    }
    if label.chars().any(|c| c.is_ascii_digit()) {
        penalty += DIGIT_PENALTY;
    }
    100.0 - penalty
}

/// 50 plus the rounded percentage of vowels in the label.
pub fn brandability_score(label: &str) -> f64 {
    let len = label.chars().count();
    if len == 0 {
        return 50.0;
    }
    let vowels = label
        .chars()
        .filter(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
        .count();
    50.0 + (100.0 * vowels as f64 / len as f64).round_ties_even()
}

/// Derive the value range from the unclamped total and category multipliers.
fn estimate_value(total: f64, dotted_tld: &str, is_dictionary: bool, label_len: usize) -> ValueEstimate {
    let base = if total > 50.0 {
        500.0 + (total - 50.0) * 30.0
    } else {
        100.0 + total * 8.0
    };

    let tld_mult = match dotted_tld {
        ".com" => 3.0,
        ".ai" | ".io" => 1.8,
        _ => 1.0,
    };
    let dict_mult = if is_dictionary { 2.5 } else { 1.0 };
    let length_mult = if label_len <= 6 {
        3.0
    } else if label_len <= 8 {
        2.0
    } else {
        1.0
    };

    let scaled = base * tld_mult * dict_mult * length_mult;
    let min = floor_hundreds(scaled * VALUE_LOW_FACTOR);
    let max = floor_hundreds(scaled * VALUE_HIGH_FACTOR);

    ValueEstimate {
        min,
        max,
        formatted: format!("${} - ${}", format_thousands(min), format_thousands(max)),
        recent_sales: recent_sales(),
    }
}

/// Truncate to an integer, then down to a multiple of 100 (toward zero).
fn floor_hundreds(value: f64) -> i64 {
    let whole = value as i64;
    (whole / 100) * 100
}
