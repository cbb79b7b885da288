//! Registration lookup backends.
//!
//! A backend answers one question for one domain: does the registry hold a
//! record for it? The probe only consumes that signal plus success, failure
//! or timeout. Parsed registry fields are never surfaced.

use crate::error::DomainScoutError;
use crate::types::{DomainName, LookupBackend};
use async_trait::async_trait;
use std::sync::Arc;

/// RDAP over HTTPS
#[cfg(feature = "rdap")]
pub mod rdap;

/// System whois command
#[cfg(feature = "whois")]
pub mod whois;

#[cfg(feature = "rdap")]
pub use rdap::{rdap_endpoint, RdapLookup};
#[cfg(feature = "whois")]
pub use whois::WhoisLookup;

/// Definitive answer from a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// A registration record exists
    Registered,

    /// The registry reported no record
    NotFound,
}

/// A single registration lookup against an external service.
///
/// Implementations should not enforce their own deadline; the probe wraps
/// every call in a timeout and drops the future when it fires.
#[async_trait]
pub trait RegistrationLookup: Send + Sync {
    async fn lookup(&self, domain: &DomainName) -> Result<Registration, DomainScoutError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Build the lookup backend selected in configuration.
///
/// # Errors
///
/// Returns [`DomainScoutError::ConfigError`] when the backend's cargo
/// feature is disabled.
pub fn build_lookup(backend: LookupBackend) -> Result<Arc<dyn RegistrationLookup>, DomainScoutError> {
    match backend {
        #[cfg(feature = "whois")]
        LookupBackend::Whois => Ok(Arc::new(WhoisLookup::new())),
        #[cfg(feature = "rdap")]
        LookupBackend::Rdap => Ok(Arc::new(RdapLookup::new()?)),
        #[allow(unreachable_patterns)]
        disabled => Err(DomainScoutError::config(format!(
            "Lookup backend '{}' is not available in this build (enable the '{}' feature)",
            disabled, disabled
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(all(feature = "whois", feature = "rdap"))]
    #[test]
    fn test_build_lookup_default_features() {
        assert_eq!(build_lookup(LookupBackend::Whois).unwrap().name(), "whois");
        assert_eq!(build_lookup(LookupBackend::Rdap).unwrap().name(), "rdap");
    }

    #[cfg(not(feature = "rdap"))]
    #[test]
    fn test_build_lookup_without_rdap_feature() {
        let err = build_lookup(LookupBackend::Rdap).err().unwrap();
        assert!(err.to_string().contains("enable the 'rdap' feature"));
    }
}
