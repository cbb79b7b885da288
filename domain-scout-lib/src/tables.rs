//! Static lookup tables for scoring and candidate generation.
//!
//! Everything here is read-only for the life of the process. Maps and sets
//! are built once on first use.

use crate::types::SaleRecord;
use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

/// Score for a TLD missing from [`TLD_WEIGHTS`].
pub const DEFAULT_TLD_SCORE: f64 = 10.0;

/// Dotted TLD → base score.
pub const TLD_WEIGHTS: &[(&str, f64)] = &[
    (".com", 100.0),
    (".net", 60.0),
    (".org", 50.0),
    (".io", 75.0),
    (".co", 40.0),
    (".ai", 85.0),
    (".xyz", 25.0),
    (".tech", 65.0),
    (".app", 70.0),
];

/// Common short words that count as real-word labels.
pub const DICTIONARY_WORDS: &[&str] = &[
    "shop", "tech", "ai", "crypto", "nft", "app", "web", "cloud", "data", "host", "game", "blog",
    "news", "video", "music", "store", "buy", "sell", "trade", "invest", "startup", "car",
    "hotel", "fitness", "law", "design", "photo", "travel",
];

/// Keywords appended to a base token in suggestion mode, in probe order.
pub const SUGGESTION_KEYWORDS: &[&str] = &[
    "labs", "genius", "pulse", "forge", "vault", "core", "hive", "flow", "orbit", "spark", "peak",
    "aura", "node", "shift", "mode", "logic", "boost", "drive", "sphere", "grid", "loop", "edge",
    "flare", "nexus", "zen", "nova", "echo", "atom", "byte", "pixel", "glow", "trend", "alpha",
    "omega", "prime", "elite", "next", "now", "live",
];

/// TLDs crossed with every keyword in suggestion mode.
pub const SUGGESTION_TLDS: &[&str] = &[".com", ".net", ".org", ".io", ".ai", ".tech", ".app", ".co"];

/// TLDs every synthetic name is checked under.
pub const GENERATION_TLDS: &[&str] = &[".com", ".ai", ".io"];

pub const BRAND_PREFIXES: &[&str] = &[
    "Nexa", "Aura", "Virtuo", "Thinka", "Luma", "Kilo", "Stellar", "Apex", "Pulse", "Orbit",
];

pub const BRAND_SUFFIXES: &[&str] = &[
    "IQ", "X", "Labs", "Hub", "Gen", "Core", "Flow", "Shift", "Node", "Vault",
];

pub const BRAND_WORDS: &[&str] = &[
    "Spark", "Logic", "Drive", "Sphere", "Grid", "Boost", "Echo", "Atom", "Zen", "Nova",
];

/// Short tags that follow a prefix, e.g. `NexaAI`.
pub const TECH_TAGS: &[&str] = &["AI", "IQ", "X", "Labs"];

/// Verbs that lead a prefix, e.g. `GetLuma`.
pub const ACTION_VERBS: &[&str] = &["Get", "Go", "Try"];

/// Modifiers that lead a word, e.g. `SolarGrid`.
pub const THEME_MODIFIERS: &[&str] = &["Urban", "Solar", "Neuro", "Meta"];

/// Complete names used as-is.
pub const STANDALONE_NAMES: &[&str] = &["Aurora", "Strive", "Zenith", "Cognito", "Vanta", "Echelon"];

/// Reference sales shown next to every estimate.
const RECENT_SALES: &[(&str, u64)] = &[
    ("ai.com", 1_200_000),
    ("crypto.com", 12_000_000),
    ("nft.com", 24_000_000),
    ("aitech.ai", 12_500),
    ("startup.io", 8_500),
];

/// How many reference sales a report carries.
pub const RECENT_SALES_SHOWN: usize = 3;

lazy_static! {
    static ref TLD_SCORES: HashMap<&'static str, f64> = TLD_WEIGHTS.iter().copied().collect();
    static ref DICTIONARY: HashSet<&'static str> = DICTIONARY_WORDS.iter().copied().collect();
}

/// Base score for a dotted TLD such as `.com`.
pub fn tld_score(dotted_tld: &str) -> f64 {
    TLD_SCORES
        .get(dotted_tld)
        .copied()
        .unwrap_or(DEFAULT_TLD_SCORE)
}

/// Whether a label is one of the dictionary words.
pub fn is_dictionary_word(label: &str) -> bool {
    DICTIONARY.contains(label)
}

/// The reference sales attached to a report.
pub fn recent_sales() -> Vec<SaleRecord> {
    RECENT_SALES
        .iter()
        .take(RECENT_SALES_SHOWN)
        .map(|(domain, price)| SaleRecord {
            domain: domain.to_string(),
            price: *price,
        })
        .collect()
}
