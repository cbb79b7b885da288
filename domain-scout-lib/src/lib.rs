//! # Domain Scout Library
//!
//! Rates domain names and finds available alternatives by probing a
//! registration lookup service under strict time budgets.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_scout_lib::DomainScout;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scout = DomainScout::new()?;
//!
//!     let report = scout.rate("example.com")?;
//!     println!("{}: {} ({})", report.domain, report.rating, report.value.formatted);
//!
//!     for row in scout.generate(3).await? {
//!         println!("{} {}", row.domain, row.available);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Scoring**: deterministic rating and resale value estimate
//! - **Suggestions**: keyword variations of a base name, probed concurrently
//! - **Synthetic names**: template-based brand names on `.com`, `.ai`, `.io`
//! - **Fail-open probing**: only a confirmed registration counts as taken
//! - **Pluggable lookups**: system `whois`, RDAP, or any [`RegistrationLookup`]

pub use checker::{DomainScout, PlannedDomain};
pub use concurrent::{sort_results, ConcurrentProcessor};
pub use config::{
    load_env_config, parse_timeout_string, ConfigManager, DefaultsConfig, EnvConfig, FileConfig,
    OutputConfig,
};
pub use error::DomainScoutError;
pub use probe::AvailabilityProbe;
pub use protocols::{build_lookup, Registration, RegistrationLookup};
#[cfg(feature = "rdap")]
pub use protocols::RdapLookup;
#[cfg(feature = "whois")]
pub use protocols::WhoisLookup;
pub use scoring::{score, score_domain};
pub use types::{
    CandidateResult, DomainName, GeneratedDomain, LookupBackend, SaleRecord, ScoreBreakdown,
    ScoreReport, ScoutConfig, Suggestions, ValueEstimate, MAX_GENERATION_ATTEMPTS,
    MIN_GENERATION_ATTEMPTS,
};
pub use utils::{format_thousands, normalize_base, normalize_domain};

// Public modules
pub mod generate;
pub mod protocols;
pub mod tables;

pub use generate::{expand_keywords, generate_brand_names, CandidateSet};

// Internal modules
mod checker;
mod concurrent;
mod config;
mod error;
mod probe;
mod scoring;
mod types;
mod utils;

pub type Result<T> = std::result::Result<T, DomainScoutError>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

/// Get library information for debugging or display purposes.
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        author: AUTHOR,
        features: get_enabled_features(),
    }
}

/// Information about the library build and features
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    pub version: &'static str,
    pub author: &'static str,
    pub features: Vec<&'static str>,
}

#[allow(clippy::vec_init_then_push)]
fn get_enabled_features() -> Vec<&'static str> {
    let mut features = Vec::new();

    #[cfg(feature = "whois")]
    features.push("whois");

    #[cfg(feature = "rdap")]
    features.push("rdap");

    features
}
