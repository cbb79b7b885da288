//! Candidate domain generation.
//!
//! Two modes feed the availability engine:
//!
//! - **Keyword expansion** appends every suggestion keyword and TLD to a
//!   base token: `cloud` → `cloudlabs.com`, `cloudlabs.net`, ...
//! - **Synthetic names** samples brand-style names from a handful of
//!   templates (`NexaAI`, `GetLuma`, `SolarGrid`, `Zenith`, ...) until the
//!   requested number of distinct names exists.
//!
//! # Examples
//!
//! ```
//! use domain_scout_lib::generate::{expand_keywords, generate_brand_names};
//! use rand::SeedableRng;
//!
//! let candidates = expand_keywords("cloud").unwrap();
//! assert_eq!(candidates.iter().next().unwrap().as_str(), "cloudlabs.com");
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let names = generate_brand_names(&mut rng, 5, 1000).unwrap();
//! assert_eq!(names.len(), 5);
//! ```

use crate::error::DomainScoutError;
use crate::tables::{
    ACTION_VERBS, BRAND_PREFIXES, BRAND_SUFFIXES, BRAND_WORDS, STANDALONE_NAMES,
    SUGGESTION_KEYWORDS, SUGGESTION_TLDS, TECH_TAGS, THEME_MODIFIERS,
};
use crate::types::DomainName;
use crate::utils::normalize_base;
use lazy_static::lazy_static;
use rand::Rng;
use std::collections::HashSet;

/// Shortest keyword candidate kept, TLD included.
pub const MIN_CANDIDATE_LENGTH: usize = 6;

/// Longest keyword candidate kept, TLD included.
pub const MAX_CANDIDATE_LENGTH: usize = 22;

/// An insertion-ordered set of distinct candidate domains.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    domains: Vec<DomainName>,
    seen: HashSet<DomainName>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a domain. Returns `false` and keeps the set unchanged if it was
    /// already produced.
    pub fn insert(&mut self, domain: DomainName) -> bool {
        if self.seen.contains(&domain) {
            return false;
        }
        self.seen.insert(domain.clone());
        self.domains.push(domain);
        true
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn contains(&self, domain: &DomainName) -> bool {
        self.seen.contains(domain)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainName> {
        self.domains.iter()
    }

    /// Keep only the first `limit` candidates in generation order.
    pub fn truncate(&mut self, limit: usize) {
        for dropped in self.domains.drain(limit.min(self.domains.len())..) {
            self.seen.remove(&dropped);
        }
    }

    pub fn into_vec(self) -> Vec<DomainName> {
        self.domains
    }
}

impl IntoIterator for CandidateSet {
    type Item = DomainName;
    type IntoIter = std::vec::IntoIter<DomainName>;

    fn into_iter(self) -> Self::IntoIter {
        self.domains.into_iter()
    }
}

impl FromIterator<DomainName> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = DomainName>>(iter: I) -> Self {
        let mut set = CandidateSet::new();
        for domain in iter {
            set.insert(domain);
        }
        set
    }
}

/// Expand a base token into `base + keyword + tld` candidates.
///
/// Keywords are the outer loop and TLDs the inner one, so the first
/// candidates all share the first keyword. Candidates outside
/// [`MIN_CANDIDATE_LENGTH`]..=[`MAX_CANDIDATE_LENGTH`] are skipped.
///
/// # Errors
///
/// Returns [`DomainScoutError::InvalidBase`] for bases shorter than three
/// characters or containing characters a domain label cannot hold.
pub fn expand_keywords(base: &str) -> Result<CandidateSet, DomainScoutError> {
    let base = normalize_base(base)?;
    let mut candidates = CandidateSet::new();

    for keyword in SUGGESTION_KEYWORDS {
        for tld in SUGGESTION_TLDS {
            let candidate = format!("{}{}{}", base, keyword, tld);
            let len = candidate.len();
            if !(MIN_CANDIDATE_LENGTH..=MAX_CANDIDATE_LENGTH).contains(&len) {
                continue;
            }
            candidates.insert(DomainName::parse(&candidate)?);
        }
    }

    Ok(candidates)
}

/// The shapes a synthetic name can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameTemplate {
    /// `NexaAI`
    PrefixTag,
    /// `GetLuma`
    VerbPrefix,
    /// `ApexHub`
    PrefixSuffix,
    /// `SolarGrid`
    ModifierWord,
    /// `Zenith`
    Standalone,
}

/// Tail for templates that are a single fixed word.
const NO_TAIL: &[&str] = &[""];

const TEMPLATES: &[NameTemplate] = &[
    NameTemplate::PrefixTag,
    NameTemplate::VerbPrefix,
    NameTemplate::PrefixSuffix,
    NameTemplate::ModifierWord,
    NameTemplate::Standalone,
];

impl NameTemplate {
    fn parts(self) -> (&'static [&'static str], &'static [&'static str]) {
        match self {
            NameTemplate::PrefixTag => (BRAND_PREFIXES, TECH_TAGS),
            NameTemplate::VerbPrefix => (ACTION_VERBS, BRAND_PREFIXES),
            NameTemplate::PrefixSuffix => (BRAND_PREFIXES, BRAND_SUFFIXES),
            NameTemplate::ModifierWord => (THEME_MODIFIERS, BRAND_WORDS),
            NameTemplate::Standalone => (STANDALONE_NAMES, NO_TAIL),
        }
    }

    fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> String {
        let (head, tail) = self.parts();
        format!("{}{}", pick(rng, head), pick(rng, tail))
    }

    /// Every name this template can produce.
    fn all(self) -> impl Iterator<Item = String> {
        let (head, tail) = self.parts();
        head.iter()
            .flat_map(move |h| tail.iter().map(move |t| format!("{}{}", h, t)))
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, options: &'static [&'static str]) -> &'static str {
    options[rng.gen_range(0..options.len())]
}

/// Sample one synthetic name from a uniformly chosen template.
pub fn sample_brand_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    TEMPLATES[rng.gen_range(0..TEMPLATES.len())].sample(rng)
}

lazy_static! {
    static ref NAME_CAPACITY: usize = TEMPLATES
        .iter()
        .flat_map(|t| t.all())
        .map(|name| name.to_lowercase())
        .collect::<HashSet<_>>()
        .len();
}

/// Number of distinct names (case-insensitive) the templates can produce.
pub fn distinct_name_capacity() -> usize {
    *NAME_CAPACITY
}

/// Sample until `count` distinct names exist, in first-seen order.
///
/// Names differing only in case count as duplicates since they map to the
/// same domain.
///
/// # Errors
///
/// Returns [`DomainScoutError::GenerationExhausted`] when `max_attempts`
/// samples do not yield `count` distinct names, or without sampling at all
/// when `count` exceeds [`distinct_name_capacity`].
pub fn generate_brand_names<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    max_attempts: usize,
) -> Result<Vec<String>, DomainScoutError> {
    if count > distinct_name_capacity() {
        return Err(DomainScoutError::GenerationExhausted {
            requested: count,
            produced: 0,
            attempts: 0,
        });
    }

    let mut names = Vec::with_capacity(count.min(1024));
    let mut seen = HashSet::with_capacity(count.min(1024));
    let mut attempts = 0usize;

    while names.len() < count {
        if attempts >= max_attempts {
            return Err(DomainScoutError::GenerationExhausted {
                requested: count,
                produced: names.len(),
                attempts,
            });
        }
        attempts += 1;

        let name = sample_brand_name(rng);
        if seen.insert(name.to_lowercase()) {
            names.push(name);
        }
    }

    tracing::debug!(count, attempts, "generated synthetic names");
    Ok(names)
}
