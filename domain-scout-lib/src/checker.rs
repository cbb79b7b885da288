//! Main entry point tying scoring, generation and probing together.
//!
//! [`DomainScout`] owns the configuration and a [`ConcurrentProcessor`]
//! built around the selected lookup backend, and exposes the three request
//! types: rate, suggest and generate.

use crate::concurrent::ConcurrentProcessor;
use crate::error::DomainScoutError;
use crate::generate::{expand_keywords, generate_brand_names};
use crate::probe::AvailabilityProbe;
use crate::protocols::{build_lookup, RegistrationLookup};
use crate::scoring::score_domain;
use crate::tables::GENERATION_TLDS;
use crate::types::{DomainName, GeneratedDomain, ScoreReport, ScoutConfig, Suggestions};
use crate::utils::normalize_base;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// A synthetic name crossed with one generation TLD, before probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDomain {
    /// Brand name as generated
    pub name: String,
    pub domain: DomainName,
}

/// Rates domains and finds available alternatives.
///
/// # Example
///
/// ```rust,no_run
/// use domain_scout_lib::DomainScout;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scout = DomainScout::new()?;
///
///     let report = scout.rate("example.com")?;
///     println!("{} rated {}", report.domain, report.rating);
///
///     let found = scout.suggest("cloud").await?;
///     for candidate in found.suggestions {
///         println!("{} available={}", candidate.domain, candidate.available);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct DomainScout {
    config: ScoutConfig,
    processor: ConcurrentProcessor,
}

impl DomainScout {
    /// Create a scout with default configuration and the default backend.
    pub fn new() -> Result<Self, DomainScoutError> {
        Self::with_config(ScoutConfig::default())
    }

    /// Create a scout using the backend named in `config`.
    pub fn with_config(config: ScoutConfig) -> Result<Self, DomainScoutError> {
        let lookup = build_lookup(config.backend)?;
        Ok(Self::with_lookup(config, lookup))
    }

    /// Create a scout around a caller-provided lookup backend.
    pub fn with_lookup(config: ScoutConfig, lookup: Arc<dyn RegistrationLookup>) -> Self {
        let probe = AvailabilityProbe::from_config(lookup, &config);
        let processor = ConcurrentProcessor::new(probe, config.concurrency);
        Self { config, processor }
    }

    pub fn config(&self) -> &ScoutConfig {
        &self.config
    }

    /// Score a single domain. No lookups are made.
    pub fn rate(&self, domain: &str) -> Result<ScoreReport, DomainScoutError> {
        score_domain(domain)
    }

    /// Candidates a suggestion request for `base` would probe, in
    /// generation order.
    pub fn plan_suggest(&self, base: &str) -> Result<Vec<DomainName>, DomainScoutError> {
        let mut candidates = expand_keywords(base)?;
        candidates.truncate(self.config.suggestion_limit);
        Ok(candidates.into_vec())
    }

    /// Probe keyword variations of `base`, available and short ones first.
    pub async fn suggest(&self, base: &str) -> Result<Suggestions, DomainScoutError> {
        let base = normalize_base(base)?;
        let candidates = self.plan_suggest(&base)?;
        info!(%base, candidates = candidates.len(), "probing suggestions");

        let suggestions = self.processor.check_all(candidates).await;
        Ok(Suggestions { base, suggestions })
    }

    /// Sample `count` distinct names and cross each with the generation
    /// TLDs, name-major.
    pub fn plan_generate<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<PlannedDomain>, DomainScoutError> {
        let attempts = self.config.generation_attempts_for(count);
        let names = generate_brand_names(rng, count, attempts)?;

        let mut planned = Vec::with_capacity(names.len() * GENERATION_TLDS.len());
        for name in names {
            let label = name.to_lowercase();
            for tld in GENERATION_TLDS {
                planned.push(PlannedDomain {
                    domain: DomainName::parse(&format!("{}{}", label, tld))?,
                    name: name.clone(),
                });
            }
        }
        Ok(planned)
    }

    /// Generate `count` synthetic names and probe each on every generation
    /// TLD.
    pub async fn generate(&self, count: usize) -> Result<Vec<GeneratedDomain>, DomainScoutError> {
        let planned = self.plan_generate(count, &mut StdRng::from_entropy())?;
        self.probe_planned(planned).await
    }

    /// [`generate`](Self::generate) with a caller-supplied random source.
    pub async fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<GeneratedDomain>, DomainScoutError> {
        let planned = self.plan_generate(count, rng)?;
        self.probe_planned(planned).await
    }

    /// Results keep planning order. Candidates lost to a failed worker are
    /// left out.
    async fn probe_planned(
        &self,
        planned: Vec<PlannedDomain>,
    ) -> Result<Vec<GeneratedDomain>, DomainScoutError> {
        let domains: Vec<DomainName> = planned.iter().map(|p| p.domain.clone()).collect();
        let availability: HashMap<usize, bool> = self
            .processor
            .probe_batch(domains)
            .await
            .into_iter()
            .map(|(index, result)| (index, result.available))
            .collect();

        Ok(planned
            .into_iter()
            .enumerate()
            .filter_map(|(index, plan)| {
                let available = *availability.get(&index)?;
                Some(GeneratedDomain {
                    tld: plan.domain.dotted_tld().to_string(),
                    domain: plan.domain.into(),
                    name: plan.name,
                    available,
                })
            })
            .collect())
    }
}
