//! WHOIS lookups through the system `whois` command.
//!
//! Output is free-form text that varies between registries, so this only
//! looks for a handful of markers. Anything it cannot classify is an error,
//! which the probe treats as "available".

use super::{Registration, RegistrationLookup};
use crate::error::DomainScoutError;
use crate::types::DomainName;
use async_trait::async_trait;
use tokio::process::Command;

/// Phrases registries use when no record exists.
const NOT_FOUND_PATTERNS: &[&str] = &[
    "no match",
    "not found",
    "no data found",
    "no entries found",
    "domain available",
    "status: available",
    "status: free",
    "not registered",
    "no matching record",
    "the queried object does not exist",
    "object does not exist",
    "this domain name has not been registered",
];

/// Field labels that appear in a registration record.
const RECORD_PATTERNS: &[&str] = &[
    "domain status:",
    "registrar:",
    "creation date:",
    "created:",
    "registry domain id:",
    "registrant:",
    "name server:",
    "nameservers:",
    "expiry date:",
    "registry expiry date:",
    "updated date:",
];

const RATE_LIMIT_PATTERNS: &[&str] = &[
    "rate limit exceeded",
    "too many requests",
    "quota exceeded",
    "try again later",
];

/// Record markers needed before a response counts as a registration.
const MIN_RECORD_MARKERS: usize = 2;

/// Looks domains up with the `whois` binary on `PATH`.
#[derive(Debug, Clone)]
pub struct WhoisLookup {
    program: String,
}

impl WhoisLookup {
    pub fn new() -> Self {
        Self {
            program: "whois".to_string(),
        }
    }

    /// Use a different executable, e.g. an absolute path to `whois`.
    pub fn with_program<P: Into<String>>(program: P) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn run(&self, domain: &DomainName) -> Result<String, DomainScoutError> {
        let output = Command::new(&self.program)
            .arg(domain.as_str())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainScoutError::lookup(
                    domain.as_str(),
                    format!(
                        "Failed to execute {}: {}. Make sure 'whois' is installed.",
                        self.program, e
                    ),
                )
            })?;

        let text = String::from_utf8_lossy(&output.stdout).to_lowercase();
        if text.trim().is_empty() && !output.status.success() {
            return Err(DomainScoutError::lookup(
                domain.as_str(),
                format!("{} exited with {}", self.program, output.status),
            ));
        }
        Ok(text)
    }
}

impl Default for WhoisLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistrationLookup for WhoisLookup {
    async fn lookup(&self, domain: &DomainName) -> Result<Registration, DomainScoutError> {
        let output = self.run(domain).await?;
        classify_whois_output(domain.as_str(), &output)
    }

    fn name(&self) -> &'static str {
        "whois"
    }
}

/// Classify WHOIS output as a record, an explicit miss, or unknown.
pub fn classify_whois_output(domain: &str, output: &str) -> Result<Registration, DomainScoutError> {
    let output = output.to_lowercase();

    if RATE_LIMIT_PATTERNS.iter().any(|p| output.contains(p)) {
        return Err(DomainScoutError::lookup(domain, "rate limited by WHOIS server"));
    }

    if NOT_FOUND_PATTERNS.iter().any(|p| output.contains(p)) {
        return Ok(Registration::NotFound);
    }

    let markers = RECORD_PATTERNS
        .iter()
        .filter(|p| output.contains(*p))
        .count();
    if markers >= MIN_RECORD_MARKERS {
        return Ok(Registration::Registered);
    }

    Err(DomainScoutError::lookup(
        domain,
        "Unable to determine domain status from WHOIS response",
    ))
}
