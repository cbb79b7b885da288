//! Concurrent processing of availability probes.
//!
//! Every candidate becomes one task in a [`JoinSet`]. A shared semaphore caps
//! how many of those tasks are inside a lookup at once, and a single
//! collector drains results in completion order. A task that panics or is
//! cancelled loses its candidate; the rest of the batch is unaffected.

use crate::error::DomainScoutError;
use crate::probe::AvailabilityProbe;
use crate::types::{CandidateResult, DomainName};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Probes batches of candidates with bounded parallelism.
#[derive(Clone)]
pub struct ConcurrentProcessor {
    probe: Arc<AvailabilityProbe>,
    max_concurrency: usize,
}

impl ConcurrentProcessor {
    /// Create a processor running at most `max_concurrency` probes at once.
    pub fn new(probe: AvailabilityProbe, max_concurrency: usize) -> Self {
        Self {
            probe: Arc::new(probe),
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Probe every candidate once and return `(dispatch index, result)`
    /// pairs in completion order.
    ///
    /// Candidates whose task failed are missing from the output.
    pub async fn probe_batch<I>(&self, candidates: I) -> Vec<(usize, CandidateResult)>
    where
        I: IntoIterator<Item = DomainName>,
    {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut join_set: JoinSet<Result<(usize, CandidateResult), DomainScoutError>> =
            JoinSet::new();

        for (index, domain) in candidates.into_iter().enumerate() {
            let probe = Arc::clone(&self.probe);
            let permit = Arc::clone(&semaphore);

            join_set.spawn(async move {
                let _permit = permit.acquire_owned().await.map_err(|e| {
                    DomainScoutError::internal(format!("Failed to acquire probe permit: {}", e))
                })?;
                Ok((index, probe.probe(domain).await))
            });
        }

        let dispatched = join_set.len();
        let mut results = Vec::with_capacity(dispatched);
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(Ok(pair)) => results.push(pair),
                Ok(Err(e)) => warn!("Dropping candidate: {}", e),
                Err(e) => warn!("Probe task failed, dropping candidate: {}", e),
            }
        }

        info!(
            dispatched,
            completed = results.len(),
            available = results.iter().filter(|(_, r)| r.available).count(),
            "probe batch finished"
        );
        results
    }

    /// Probe every candidate and return results ordered available first,
    /// then shortest domain first, then by input position.
    pub async fn check_all<I>(&self, candidates: I) -> Vec<CandidateResult>
    where
        I: IntoIterator<Item = DomainName>,
    {
        let mut results = self.probe_batch(candidates).await;
        sort_results(&mut results);
        results.into_iter().map(|(_, result)| result).collect()
    }
}

/// Sort `(dispatch index, result)` pairs into the final presentation order.
pub fn sort_results(results: &mut [(usize, CandidateResult)]) {
    results.sort_by_key(|(index, result)| (!result.available, result.domain.len(), *index));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::tests::{MockLookup, Scripted};
    use std::time::Duration;

    fn domains(names: &[&str]) -> Vec<DomainName> {
        names.iter().map(|n| DomainName::parse(n).unwrap()).collect()
    }

    fn processor(lookup: Arc<MockLookup>, concurrency: usize) -> ConcurrentProcessor {
        let probe = AvailabilityProbe::new(lookup, Duration::from_secs(1), 22);
        ConcurrentProcessor::new(probe, concurrency)
    }

    fn names(results: &[CandidateResult]) -> Vec<&str> {
        results.iter().map(|r| r.domain.as_str()).collect()
    }

    #[tokio::test]
    async fn test_check_all_orders_available_then_length_then_input() {
        let lookup = Arc::new(
            MockLookup::new(Scripted::NotFound)
                .answer("cloudlabs.com", Scripted::Registered)
                .answer("cloudzen.io", Scripted::Registered),
        );
        let candidates = domains(&[
            "cloudlabs.com",
            "cloudlabs.net",
            "cloudzen.io",
            "cloudnova.ai",
            "cloudlabs.io",
            "cloudgrid.co",
        ]);

        let results = processor(lookup, 6).check_all(candidates).await;
        assert_eq!(
            names(&results),
            vec![
                "cloudnova.ai",
                "cloudlabs.io",
                "cloudgrid.co",
                "cloudlabs.net",
                "cloudzen.io",
                "cloudlabs.com",
            ]
        );
        assert!(results[..4].iter().all(|r| r.available));
        assert!(results[4..].iter().all(|r| !r.available));
    }

    #[tokio::test]
    async fn test_every_candidate_probed_once() {
        let lookup = Arc::new(MockLookup::new(Scripted::NotFound));
        let candidates = domains(&["alpha.com", "bravo.com", "charlie.com", "delta.com"]);
        let results = processor(lookup.clone(), 2).probe_batch(candidates).await;

        assert_eq!(results.len(), 4);
        assert_eq!(lookup.calls(), 4);
        let mut indices: Vec<usize> = results.iter().map(|(i, _)| *i).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_is_bounded() {
        let lookup =
            Arc::new(MockLookup::new(Scripted::NotFound).with_latency(Duration::from_millis(50)));
        let candidates: Vec<DomainName> = (0..20)
            .map(|i| DomainName::parse(&format!("candidate{}.com", i)).unwrap())
            .collect();

        let results = processor(lookup.clone(), 6).check_all(candidates).await;
        assert_eq!(results.len(), 20);
        assert_eq!(lookup.peak(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_duration_bounded_by_waves() {
        let lookup = Arc::new(MockLookup::new(Scripted::Hang));
        let candidates: Vec<DomainName> = (0..13)
            .map(|i| DomainName::parse(&format!("slow{}.io", i)).unwrap())
            .collect();

        let started = tokio::time::Instant::now();
        let results = processor(lookup, 6).check_all(candidates).await;
        let elapsed = started.elapsed();

        // ceil(13 / 6) = 3 waves of 1s timeouts
        assert_eq!(results.len(), 13);
        assert!(results.iter().all(|r| r.available));
        assert!(elapsed >= Duration::from_secs(3));
        assert!(elapsed < Duration::from_millis(3100), "took {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_panicking_probe_drops_only_its_candidate() {
        let lookup = Arc::new(
            MockLookup::new(Scripted::NotFound).answer("broken.com", Scripted::Panic),
        );
        let candidates = domains(&["first.com", "broken.com", "third.com"]);

        let results = processor(lookup, 6).check_all(candidates).await;
        assert_eq!(names(&results), vec!["first.com", "third.com"]);
    }

    #[tokio::test]
    async fn test_failures_and_long_names() {
        let lookup = Arc::new(MockLookup::new(Scripted::Fail));
        let candidates = domains(&["averyveryverylongname.com", "fine.io"]);

        let results = processor(lookup.clone(), 6).check_all(candidates).await;
        assert_eq!(names(&results), vec!["fine.io", "averyveryverylongname.com"]);
        assert!(results[0].available);
        assert!(!results[1].available);
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let lookup = Arc::new(MockLookup::new(Scripted::NotFound));
        let results = processor(lookup, 6).check_all(Vec::new()).await;
        assert!(results.is_empty());
    }

    #[test]
    fn test_sort_results_is_total() {
        let result = |name: &str, available| CandidateResult {
            domain: DomainName::parse(name).unwrap(),
            available,
        };
        let mut pairs = vec![
            (3, result("bbbb.com", true)),
            (0, result("aa.io", false)),
            (1, result("cccc.com", true)),
            (2, result("dd.ai", true)),
        ];
        sort_results(&mut pairs);
        let order: Vec<usize> = pairs.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![2, 1, 3, 0]);
    }
}
