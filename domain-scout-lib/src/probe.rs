//! Single-domain availability probe.
//!
//! The probe is asymmetric: only a lookup that completes in
//! time and confirms a registration record reports `available = false`.
//! Timeouts, process or network failures, unparseable responses and
//! explicit "no record" answers all report `available = true`.
//!
//! Domains longer than the configured maximum are reported unavailable
//! before any lookup is made.

use crate::protocols::{Registration, RegistrationLookup};
use crate::types::{CandidateResult, DomainName, ScoutConfig};
use std::sync::Arc;
use std::time::Duration;

/// Wraps a lookup backend with a hard timeout and the fail-open policy.
#[derive(Clone)]
pub struct AvailabilityProbe {
    lookup: Arc<dyn RegistrationLookup>,
    timeout: Duration,
    max_length: usize,
}

impl AvailabilityProbe {
    /// Create a probe with an explicit timeout and length cut-off.
    pub fn new(lookup: Arc<dyn RegistrationLookup>, timeout: Duration, max_length: usize) -> Self {
        Self {
            lookup,
            timeout,
            max_length,
        }
    }

    /// Create a probe using the timeout and length cut-off from `config`.
    pub fn from_config(lookup: Arc<dyn RegistrationLookup>, config: &ScoutConfig) -> Self {
        Self::new(lookup, config.probe_timeout, config.max_probe_length)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe one domain. Never fails.
    pub async fn probe(&self, domain: DomainName) -> CandidateResult {
        if domain.len() > self.max_length {
            tracing::debug!(%domain, max = self.max_length, "too long, skipping lookup");
            return CandidateResult {
                domain,
                available: false,
            };
        }

        let available = match tokio::time::timeout(self.timeout, self.lookup.lookup(&domain)).await {
            Ok(Ok(Registration::Registered)) => false,
            Ok(Ok(Registration::NotFound)) => true,
            Ok(Err(e)) => {
                tracing::debug!(%domain, backend = self.lookup.name(), error = %e, "lookup failed, treating as available");
                true
            }
            Err(_) => {
                tracing::debug!(%domain, backend = self.lookup.name(), timeout = ?self.timeout, "lookup timed out, treating as available");
                true
            }
        };

        CandidateResult { domain, available }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::DomainScoutError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// How a mock lookup answers for one domain.
    #[derive(Debug, Clone)]
    pub(crate) enum Scripted {
        Registered,
        NotFound,
        Fail,
        Hang,
        Panic,
    }

    /// In-memory lookup with scripted answers and optional latency.
    pub(crate) struct MockLookup {
        pub(crate) answers: HashMap<String, Scripted>,
        pub(crate) fallback: Scripted,
        pub(crate) latency: Duration,
        pub(crate) calls: AtomicUsize,
        pub(crate) in_flight: AtomicUsize,
        pub(crate) peak_in_flight: AtomicUsize,
    }

    impl MockLookup {
        pub(crate) fn new(fallback: Scripted) -> Self {
            Self {
                answers: HashMap::new(),
                fallback,
                latency: Duration::ZERO,
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                peak_in_flight: AtomicUsize::new(0),
            }
        }

        pub(crate) fn answer(mut self, domain: &str, scripted: Scripted) -> Self {
            self.answers.insert(domain.to_string(), scripted);
            self
        }

        pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = latency;
            self
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub(crate) fn peak(&self) -> usize {
            self.peak_in_flight.load(Ordering::SeqCst)
        }
    }

    struct InFlight<'a>(&'a AtomicUsize);

    impl Drop for InFlight<'_> {
        fn drop(&mut self) {
            self.0.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl RegistrationLookup for MockLookup {
        async fn lookup(&self, domain: &DomainName) -> Result<Registration, DomainScoutError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
            let _guard = InFlight(&self.in_flight);

            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }

            match self.answers.get(domain.as_str()).unwrap_or(&self.fallback) {
                Scripted::Registered => Ok(Registration::Registered),
                Scripted::NotFound => Ok(Registration::NotFound),
                Scripted::Fail => Err(DomainScoutError::lookup(domain.as_str(), "connection refused")),
                Scripted::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(Registration::Registered)
                }
                Scripted::Panic => panic!("lookup backend blew up for {}", domain),
            }
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    fn domain(name: &str) -> DomainName {
        DomainName::parse(name).unwrap()
    }

    fn probe_with(lookup: Arc<MockLookup>) -> AvailabilityProbe {
        AvailabilityProbe::from_config(lookup, &ScoutConfig::default())
    }

    #[tokio::test]
    async fn test_registered_is_unavailable() {
        let lookup = Arc::new(MockLookup::new(Scripted::Registered));
        let result = probe_with(lookup.clone()).probe(domain("google.com")).await;
        assert!(!result.available);
        assert_eq!(result.domain.as_str(), "google.com");
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test]
    async fn test_not_found_is_available() {
        let lookup = Arc::new(MockLookup::new(Scripted::NotFound));
        assert!(probe_with(lookup).probe(domain("zzqx.io")).await.available);
    }

    #[tokio::test]
    async fn test_lookup_error_fails_open() {
        let lookup = Arc::new(MockLookup::new(Scripted::Fail));
        assert!(probe_with(lookup).probe(domain("flaky.ai")).await.available);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_fails_open() {
        let lookup = Arc::new(MockLookup::new(Scripted::Hang));
        let started = tokio::time::Instant::now();
        let result = probe_with(lookup).probe(domain("slow.com")).await;
        assert!(result.available);
        assert_eq!(started.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_registered_answer_after_timeout_is_available() {
        let lookup =
            Arc::new(MockLookup::new(Scripted::Registered).with_latency(Duration::from_millis(1500)));
        assert!(probe_with(lookup).probe(domain("taken.com")).await.available);
    }

    #[tokio::test(start_paused = true)]
    async fn test_registered_answer_within_timeout_is_unavailable() {
        let lookup =
            Arc::new(MockLookup::new(Scripted::Registered).with_latency(Duration::from_millis(900)));
        assert!(!probe_with(lookup).probe(domain("taken.com")).await.available);
    }

    #[tokio::test]
    async fn test_long_domain_skips_lookup() {
        let lookup = Arc::new(MockLookup::new(Scripted::NotFound));
        let long = domain("toolongdomainnamemorethan22characters.com");
        let result = probe_with(lookup.clone()).probe(long).await;
        assert!(!result.available);
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_exactly_max_length_is_probed() {
        let lookup = Arc::new(MockLookup::new(Scripted::NotFound));
        // 18 + ".com" = 22
        let edge = domain("abcdefghijklmnopqr.com");
        assert_eq!(edge.len(), 22);
        assert!(probe_with(lookup.clone()).probe(edge).await.available);
        assert_eq!(lookup.calls(), 1);
    }
}
