//! Core data types for domain rating and availability probing.
//!
//! This module defines the validated domain name, probe results, score
//! reports and the configuration shared by the probe and engine.

use crate::error::DomainScoutError;
use crate::utils::normalize_domain;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// A validated `<label>.<tld>` domain name.
///
/// Always lowercase and trimmed. Construct with [`DomainName::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName {
    name: String,
    dot: usize,
}

impl DomainName {
    /// Normalize and validate a domain string.
    pub fn parse(input: &str) -> Result<Self, DomainScoutError> {
        let name = normalize_domain(input)?;
        // Validation guarantees exactly one dot.
        let dot = name
            .rfind('.')
            .ok_or_else(|| DomainScoutError::invalid_domain(input.trim(), "missing TLD"))?;
        Ok(Self { name, dot })
    }

    /// Part before the TLD, e.g. `example` for `example.com`.
    pub fn label(&self) -> &str {
        &self.name[..self.dot]
    }

    /// TLD without the leading dot, e.g. `com`.
    pub fn tld(&self) -> &str {
        &self.name[self.dot + 1..]
    }

    /// TLD with its leading dot, e.g. `.com`.
    pub fn dotted_tld(&self) -> &str {
        &self.name[self.dot..]
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Length of the full domain string. Names are ASCII after validation.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.name.len()
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for DomainName {
    type Err = DomainScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DomainName {
    type Error = DomainScoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DomainName> for String {
    fn from(value: DomainName) -> Self {
        value.name
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

/// Outcome of probing a single candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateResult {
    /// The probed domain
    pub domain: DomainName,

    /// `false` only when a registration record was confirmed or the
    /// domain was too long to be worth probing
    pub available: bool,
}

/// Response to a suggestion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestions {
    /// Normalized base token
    pub base: String,

    /// Probed candidates, available first then shortest first
    pub suggestions: Vec<CandidateResult>,
}

/// One row of a synthetic generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDomain {
    /// Brand name as generated, e.g. `NexaAI`
    pub name: String,

    /// Lowercased FQDN, e.g. `nexaai.io`
    pub domain: String,

    /// Dotted TLD, e.g. `.io`
    pub tld: String,

    pub available: bool,
}

/// Weighted score components, each rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub tld: f64,
    pub length: f64,
    pub cleanliness: f64,
    pub dictionary: f64,
    pub brandability: f64,
}

/// A reference sale shown alongside an estimate. Illustrative only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub domain: String,
    pub price: u64,
}

/// Estimated resale value range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueEstimate {
    /// Lower bound, a multiple of 100
    pub min: i64,

    /// Upper bound, a multiple of 100
    pub max: i64,

    /// Display string, e.g. `$1,200 - $2,100`
    pub formatted: String,

    pub recent_sales: Vec<SaleRecord>,
}

/// Full result of rating one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub domain: DomainName,

    /// Clamped to [0, 100] and rounded to one decimal
    pub rating: f64,

    pub breakdown: ScoreBreakdown,

    pub value: ValueEstimate,
}

/// Which registration lookup backend to probe with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupBackend {
    /// System `whois` command
    #[default]
    Whois,

    /// RDAP over HTTPS
    Rdap,
}

impl fmt::Display for LookupBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupBackend::Whois => write!(f, "whois"),
            LookupBackend::Rdap => write!(f, "rdap"),
        }
    }
}

impl FromStr for LookupBackend {
    type Err = DomainScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "whois" => Ok(LookupBackend::Whois),
            "rdap" => Ok(LookupBackend::Rdap),
            other => Err(DomainScoutError::config(format!(
                "Unknown lookup backend '{}'. Use 'whois' or 'rdap'",
                other
            ))),
        }
    }
}

/// Configuration for probing and generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Maximum probes in flight at once
    /// Default: 6, Range: 1-100
    pub concurrency: usize,

    /// Hard timeout for a single registration lookup
    /// Default: 1 second
    #[serde(skip)]
    pub probe_timeout: Duration,

    /// Domains longer than this are reported unavailable without a lookup
    /// Default: 22
    pub max_probe_length: usize,

    /// How many keyword candidates a suggestion request probes
    /// Default: 12
    pub suggestion_limit: usize,

    /// Names produced by a generation request when none is given
    /// Default: 8
    pub generate_count: usize,

    /// Sampling attempts allowed before generation gives up.
    /// `None` scales with the requested count, between
    /// [`MIN_GENERATION_ATTEMPTS`] and [`MAX_GENERATION_ATTEMPTS`].
    pub max_generation_attempts: Option<usize>,

    /// Registration lookup backend
    pub backend: LookupBackend,
}

/// Floor of the scaled generation attempt cap.
pub const MIN_GENERATION_ATTEMPTS: usize = 1_000;

/// Ceiling of the scaled generation attempt cap.
pub const MAX_GENERATION_ATTEMPTS: usize = 100_000;

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            concurrency: 6,
            probe_timeout: Duration::from_secs(1),
            max_probe_length: 22,
            suggestion_limit: 12,
            generate_count: 8,
            max_generation_attempts: None,
            backend: LookupBackend::Whois,
        }
    }
}

impl ScoutConfig {
    /// Set the worker pool size, capped to 1-100.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, 100);
        self
    }

    /// Set the per-lookup timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_max_probe_length(mut self, length: usize) -> Self {
        self.max_probe_length = length;
        self
    }

    /// Set how many keyword candidates a suggestion request probes.
    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    pub fn with_generate_count(mut self, count: usize) -> Self {
        self.generate_count = count;
        self
    }

    pub fn with_max_generation_attempts(mut self, attempts: usize) -> Self {
        self.max_generation_attempts = Some(attempts);
        self
    }

    pub fn with_backend(mut self, backend: LookupBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Attempt cap for a generation request of `count` names.
    pub fn generation_attempts_for(&self, count: usize) -> usize {
        self.max_generation_attempts.unwrap_or_else(|| {
            count
                .saturating_mul(100)
                .clamp(MIN_GENERATION_ATTEMPTS, MAX_GENERATION_ATTEMPTS)
        })
    }
}
