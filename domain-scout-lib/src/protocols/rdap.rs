//! RDAP (Registration Data Access Protocol) lookups.
//!
//! A `200 OK` for the domain object is a registration record and a `404` is
//! an explicit miss. Everything else, including TLDs without a known
//! endpoint, is an error.

use super::{Registration, RegistrationLookup};
use crate::error::DomainScoutError;
use crate::types::DomainName;
use async_trait::async_trait;
use lazy_static::lazy_static;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::time::Duration;

lazy_static! {
    /// TLD → RDAP domain endpoint base URL.
    static ref RDAP_ENDPOINTS: HashMap<&'static str, &'static str> = HashMap::from([
        ("com", "https://rdap.verisign.com/com/v1/domain/"),
        ("net", "https://rdap.verisign.com/net/v1/domain/"),
        ("org", "https://rdap.publicinterestregistry.org/rdap/domain/"),
        ("app", "https://pubapi.registry.google/rdap/domain/"),
        ("dev", "https://pubapi.registry.google/rdap/domain/"),
        ("xyz", "https://rdap.centralnic.com/xyz/domain/"),
        ("tech", "https://rdap.centralnic.com/tech/domain/"),
        ("ai", "https://rdap.identitydigital.services/rdap/domain/"),
        ("io", "https://rdap.identitydigital.services/rdap/domain/"),
        ("me", "https://rdap.identitydigital.services/rdap/domain/"),
        ("info", "https://rdap.identitydigital.services/rdap/domain/"),
        ("shop", "https://rdap.gmoregistry.net/rdap/domain/"),
    ]);
}

/// Default client-side deadline for one RDAP request. The probe's own
/// timeout is normally much shorter.
pub const RDAP_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// RDAP endpoint base URL for a TLD (without the dot), if known.
pub fn rdap_endpoint(tld: &str) -> Option<&'static str> {
    RDAP_ENDPOINTS.get(tld).copied()
}

/// Looks domains up against the built-in RDAP endpoint table.
#[derive(Clone)]
pub struct RdapLookup {
    http_client: reqwest::Client,
    request_timeout: Duration,
    /// Overrides the endpoint table, used to point at a local server
    base_url: Option<String>,
}

impl RdapLookup {
    /// Create a lookup using the built-in endpoint table.
    pub fn new() -> Result<Self, DomainScoutError> {
        Ok(Self {
            http_client: build_client(RDAP_REQUEST_TIMEOUT)?,
            request_timeout: RDAP_REQUEST_TIMEOUT,
            base_url: None,
        })
    }

    /// Send every lookup to `base_url` followed by the domain.
    pub fn with_base_url<U: Into<String>>(base_url: U) -> Result<Self, DomainScoutError> {
        Ok(Self {
            base_url: Some(base_url.into()),
            ..Self::new()?
        })
    }

    /// Replace the client-side request deadline.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Result<Self, DomainScoutError> {
        self.http_client = build_client(timeout)?;
        self.request_timeout = timeout;
        Ok(self)
    }

    fn request_error(&self, domain: &DomainName, err: reqwest::Error) -> DomainScoutError {
        if err.is_timeout() {
            DomainScoutError::timeout(format!("RDAP request for {}", domain), self.request_timeout)
        } else if err.is_connect() {
            DomainScoutError::lookup(domain.as_str(), format!("Connection failed: {}", err))
        } else {
            DomainScoutError::lookup(domain.as_str(), format!("HTTP request failed: {}", err))
        }
    }

    fn url_for(&self, domain: &DomainName) -> Result<String, DomainScoutError> {
        let endpoint = match &self.base_url {
            Some(base) => base.as_str(),
            None => rdap_endpoint(domain.tld()).ok_or_else(|| {
                DomainScoutError::lookup(
                    domain.as_str(),
                    format!("No RDAP endpoint known for .{}", domain.tld()),
                )
            })?,
        };
        Ok(format!("{}{}", endpoint, domain))
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, DomainScoutError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DomainScoutError::internal(format!("Failed to create RDAP HTTP client: {}", e)))
}

#[async_trait]
impl RegistrationLookup for RdapLookup {
    async fn lookup(&self, domain: &DomainName) -> Result<Registration, DomainScoutError> {
        let url = self.url_for(domain)?;
        tracing::trace!(%domain, %url, "rdap request");

        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/rdap+json")
            .send()
            .await
            .map_err(|e| self.request_error(domain, e))?;

        match response.status() {
            StatusCode::OK => Ok(Registration::Registered),
            StatusCode::NOT_FOUND => Ok(Registration::NotFound),
            code => Err(DomainScoutError::lookup(
                domain.as_str(),
                format!("RDAP server returned {}", code),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "rdap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_cover_scored_tlds() {
        for tld in ["com", "net", "org", "io", "ai", "tech", "app", "xyz"] {
            assert!(rdap_endpoint(tld).is_some(), "missing endpoint for {}", tld);
        }
        assert!(rdap_endpoint("museum").is_none());
    }

    #[test]
    fn test_all_endpoints_are_https_with_trailing_slash() {
        for (tld, url) in RDAP_ENDPOINTS.iter() {
            assert!(url.starts_with("https://"), "{} -> {}", tld, url);
            assert!(url.ends_with('/'), "{} -> {}", tld, url);
        }
    }

    #[test]
    fn test_url_for_known_tld() {
        let lookup = RdapLookup::new().unwrap();
        let domain = DomainName::parse("example.com").unwrap();
        assert_eq!(
            lookup.url_for(&domain).unwrap(),
            "https://rdap.verisign.com/com/v1/domain/example.com"
        );
    }

    #[tokio::test]
    async fn test_unknown_tld_is_error() {
        let lookup = RdapLookup::new().unwrap();
        let domain = DomainName::parse("example.museum").unwrap();
        let result = lookup.lookup(&domain).await;
        assert!(matches!(result, Err(DomainScoutError::Lookup { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_error() {
        // Port 9 (discard) on localhost is closed on test machines
        let lookup = RdapLookup::with_base_url("http://127.0.0.1:9/domain/").unwrap();
        let domain = DomainName::parse("example.com").unwrap();
        assert!(matches!(
            lookup.lookup(&domain).await,
            Err(DomainScoutError::Lookup { .. })
        ));
    }

    #[tokio::test]
    async fn test_silent_server_reports_client_timeout() {
        // Accepts connections and never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let timeout = Duration::from_millis(200);
        let lookup = RdapLookup::with_base_url(format!("http://{}/domain/", addr))
            .unwrap()
            .with_request_timeout(timeout)
            .unwrap();
        let domain = DomainName::parse("example.com").unwrap();

        match lookup.lookup(&domain).await {
            Err(DomainScoutError::Timeout { duration, operation }) => {
                assert_eq!(duration, timeout);
                assert!(operation.contains("example.com"));
            }
            other => panic!("Expected Timeout, got {:?}", other),
        }
    }
}
