//! Configuration file parsing and management.
//!
//! Settings come from four layers. Built-in defaults are overridden by
//! discovered TOML files, which are overridden by `DS_*` environment
//! variables, which the CLI in turn overrides with explicit flags.

use crate::error::DomainScoutError;
use crate::types::{LookupBackend, ScoutConfig};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for probing and generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Output formatting preferences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

/// `[defaults]` table.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Maximum probes in flight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Per-lookup timeout (as string, e.g. "1s", "500ms")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// "whois" or "rdap"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_probe_length: Option<usize>,

    /// Keyword candidates probed per suggestion request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion_limit: Option<usize>,

    /// Names per generation request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_generation_attempts: Option<usize>,
}

/// `[output]` table.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Emit JSON instead of text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,

    /// Colorized text output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
}

impl DefaultsConfig {
    /// Overlay these values onto `config`.
    pub fn apply_to(&self, mut config: ScoutConfig) -> Result<ScoutConfig, DomainScoutError> {
        if let Some(concurrency) = self.concurrency {
            config = config.with_concurrency(concurrency);
        }
        if let Some(timeout) = &self.timeout {
            config = config.with_timeout(require_timeout(timeout)?);
        }
        if let Some(backend) = &self.backend {
            config = config.with_backend(backend.parse()?);
        }
        if let Some(length) = self.max_probe_length {
            config = config.with_max_probe_length(length);
        }
        if let Some(limit) = self.suggestion_limit {
            config = config.with_suggestion_limit(limit);
        }
        if let Some(count) = self.generate_count {
            config = config.with_generate_count(count);
        }
        if let Some(attempts) = self.max_generation_attempts {
            config = config.with_max_generation_attempts(attempts);
        }
        Ok(config)
    }
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to report which files were loaded
    pub verbose: bool,
}

impl ConfigManager {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load and validate configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, DomainScoutError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainScoutError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DomainScoutError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content)?;
        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover configuration files in standard locations and merge them,
    /// XDG first, then global, then local.
    pub fn discover_and_load(&self) -> Result<FileConfig, DomainScoutError> {
        let candidates = [
            self.get_xdg_config_path(),
            self.get_global_config_path(),
            self.get_local_config_path(),
        ];

        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        for path in candidates.into_iter().flatten() {
            match self.load_file(&path) {
                Ok(config) => {
                    merged_config = self.merge_configs(merged_config, config);
                    loaded_files.push(path);
                }
                Err(e) => warn!("Ignoring config file {}: {}", path.display(), e),
            }
        }

        if self.verbose {
            for path in &loaded_files {
                info!("Loaded config file {}", path.display());
            }
        }

        Ok(merged_config)
    }

    /// `./domain-scout.toml` or `./.domain-scout.toml`.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        ["./domain-scout.toml", "./.domain-scout.toml"]
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// `~/.domain-scout.toml` or `~/domain-scout.toml`.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        [".domain-scout.toml", "domain-scout.toml"]
            .iter()
            .map(|candidate| Path::new(&home).join(candidate))
            .find(|path| path.exists())
    }

    /// `$XDG_CONFIG_HOME/domain-scout/config.toml`, falling back to `~/.config`.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("domain-scout").join("config.toml");
        path.exists().then_some(path)
    }

    /// Merge two configurations. Values from `higher` win.
    fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(lower), Some(higher)) => Some(DefaultsConfig {
                    concurrency: higher.concurrency.or(lower.concurrency),
                    timeout: higher.timeout.or(lower.timeout),
                    backend: higher.backend.or(lower.backend),
                    max_probe_length: higher.max_probe_length.or(lower.max_probe_length),
                    suggestion_limit: higher.suggestion_limit.or(lower.suggestion_limit),
                    generate_count: higher.generate_count.or(lower.generate_count),
                    max_generation_attempts: higher
                        .max_generation_attempts
                        .or(lower.max_generation_attempts),
                }),
                (lower, higher) => higher.or(lower),
            },
            output: match (lower.output, higher.output) {
                (Some(lower), Some(higher)) => Some(OutputConfig {
                    json: higher.json.or(lower.json),
                    pretty: higher.pretty.or(lower.pretty),
                }),
                (lower, higher) => higher.or(lower),
            },
        }
    }

    fn validate_config(&self, config: &FileConfig) -> Result<(), DomainScoutError> {
        let Some(defaults) = &config.defaults else {
            return Ok(());
        };

        if let Some(concurrency) = defaults.concurrency {
            if concurrency == 0 || concurrency > 100 {
                return Err(DomainScoutError::config(
                    "Concurrency must be between 1 and 100",
                ));
            }
        }

        if let Some(timeout) = &defaults.timeout {
            require_timeout(timeout)?;
        }

        if let Some(backend) = &defaults.backend {
            backend.parse::<LookupBackend>()?;
        }

        if defaults.max_probe_length == Some(0) {
            return Err(DomainScoutError::config(
                "max_probe_length must be at least 1",
            ));
        }

        if defaults.max_generation_attempts == Some(0) {
            return Err(DomainScoutError::config(
                "max_generation_attempts must be at least 1",
            ));
        }

        Ok(())
    }
}

/// Settings taken from `DS_*` environment variables.
///
/// Invalid values are logged and ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub concurrency: Option<usize>,
    pub timeout: Option<Duration>,
    pub backend: Option<LookupBackend>,
    pub suggestion_limit: Option<usize>,
    pub count: Option<usize>,
    pub config: Option<String>,
}

impl EnvConfig {
    /// Parse settings through an arbitrary variable source.
    pub fn from_lookup<F>(mut var: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut env_config = EnvConfig::default();

        if let Some(val) = var("DS_CONCURRENCY") {
            match val.trim().parse::<usize>() {
                Ok(n) if (1..=100).contains(&n) => env_config.concurrency = Some(n),
                _ => warn!("Invalid DS_CONCURRENCY='{}', must be 1-100", val),
            }
        }

        if let Some(val) = var("DS_TIMEOUT") {
            match parse_timeout_string(&val).filter(|d| !d.is_zero()) {
                Some(timeout) => env_config.timeout = Some(timeout),
                None => warn!(
                    "Invalid DS_TIMEOUT='{}', use format like '1s', '500ms', '2m'",
                    val
                ),
            }
        }

        if let Some(val) = var("DS_BACKEND") {
            match val.parse::<LookupBackend>() {
                Ok(backend) => env_config.backend = Some(backend),
                Err(e) => warn!("Invalid DS_BACKEND: {}", e),
            }
        }

        if let Some(val) = var("DS_SUGGESTION_LIMIT") {
            match val.trim().parse::<usize>() {
                Ok(n) => env_config.suggestion_limit = Some(n),
                Err(_) => warn!("Invalid DS_SUGGESTION_LIMIT='{}'", val),
            }
        }

        if let Some(val) = var("DS_COUNT") {
            match val.trim().parse::<usize>() {
                Ok(n) => env_config.count = Some(n),
                Err(_) => warn!("Invalid DS_COUNT='{}'", val),
            }
        }

        if let Some(val) = var("DS_CONFIG") {
            if !val.trim().is_empty() {
                env_config.config = Some(val);
            }
        }

        env_config
    }

    /// Overlay these values onto `config`.
    pub fn apply_to(&self, mut config: ScoutConfig) -> ScoutConfig {
        if let Some(concurrency) = self.concurrency {
            config = config.with_concurrency(concurrency);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        if let Some(backend) = self.backend {
            config = config.with_backend(backend);
        }
        if let Some(limit) = self.suggestion_limit {
            config = config.with_suggestion_limit(limit);
        }
        if let Some(count) = self.count {
            config = config.with_generate_count(count);
        }
        config
    }
}

/// Load configuration from the process environment.
pub fn load_env_config() -> EnvConfig {
    EnvConfig::from_lookup(|key| env::var(key).ok())
}

/// Parse a timeout string like "1s", "500ms" or "2m". A bare number is
/// seconds.
pub fn parse_timeout_string(timeout_str: &str) -> Option<Duration> {
    let timeout_str = timeout_str.trim().to_lowercase();

    if let Some(ms) = timeout_str.strip_suffix("ms") {
        ms.trim().parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(secs) = timeout_str.strip_suffix('s') {
        secs.trim().parse::<u64>().ok().map(Duration::from_secs)
    } else if let Some(mins) = timeout_str.strip_suffix('m') {
        mins.trim()
            .parse::<u64>()
            .ok()
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs)
    } else {
        timeout_str.parse::<u64>().ok().map(Duration::from_secs)
    }
}

fn require_timeout(timeout: &str) -> Result<Duration, DomainScoutError> {
    parse_timeout_string(timeout)
        .filter(|d| !d.is_zero())
        .ok_or_else(|| {
            DomainScoutError::config(format!(
                "Invalid timeout '{}'. Use a non-zero value like '1s', '500ms', '2m'",
                timeout
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_parse_timeout_string() {
        assert_eq!(parse_timeout_string("1s"), Some(Duration::from_secs(1)));
        assert_eq!(parse_timeout_string("500ms"), Some(Duration::from_millis(500)));
        assert_eq!(parse_timeout_string("2m"), Some(Duration::from_secs(120)));
        assert_eq!(parse_timeout_string(" 5 "), Some(Duration::from_secs(5)));
        assert_eq!(parse_timeout_string("invalid"), None);
        assert_eq!(parse_timeout_string("ms"), None);
    }

    #[test]
    fn test_load_valid_config() {
        let temp_file = write_config(
            r#"
[defaults]
concurrency = 4
timeout = "750ms"
backend = "rdap"
suggestion_limit = 20

[output]
pretty = true
"#,
        );

        let config = ConfigManager::new(false).load_file(temp_file.path()).unwrap();
        let defaults = config.defaults.unwrap();
        assert_eq!(defaults.concurrency, Some(4));
        assert_eq!(defaults.timeout.as_deref(), Some("750ms"));
        assert_eq!(defaults.backend.as_deref(), Some("rdap"));
        assert_eq!(defaults.suggestion_limit, Some(20));
        assert_eq!(config.output.unwrap().pretty, Some(true));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let manager = ConfigManager::new(false);
        for content in [
            "[defaults]\nconcurrency = 0\n",
            "[defaults]\nconcurrency = 101\n",
            "[defaults]\ntimeout = \"soon\"\n",
            "[defaults]\ntimeout = \"0s\"\n",
            "[defaults]\nbackend = \"dns\"\n",
            "[defaults]\nmax_generation_attempts = 0\n",
        ] {
            let temp_file = write_config(content);
            assert!(
                manager.load_file(temp_file.path()).is_err(),
                "accepted: {}",
                content
            );
        }
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let temp_file = write_config("[defaults\nconcurrency = ");
        let result = ConfigManager::new(false).load_file(temp_file.path());
        assert!(matches!(result, Err(DomainScoutError::ConfigError { .. })));
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let result = ConfigManager::new(false).load_file("/nonexistent/domain-scout.toml");
        assert!(matches!(result, Err(DomainScoutError::FileError { .. })));
    }

    #[test]
    fn test_merge_configs() {
        let manager = ConfigManager::new(false);

        let lower = FileConfig {
            defaults: Some(DefaultsConfig {
                concurrency: Some(10),
                backend: Some("rdap".to_string()),
                ..Default::default()
            }),
            output: Some(OutputConfig {
                json: Some(true),
                pretty: Some(false),
            }),
        };

        let higher = FileConfig {
            defaults: Some(DefaultsConfig {
                concurrency: Some(3),
                timeout: Some("2s".to_string()),
                ..Default::default()
            }),
            output: None,
        };

        let merged = manager.merge_configs(lower, higher);
        let defaults = merged.defaults.unwrap();
        assert_eq!(defaults.concurrency, Some(3));
        assert_eq!(defaults.backend.as_deref(), Some("rdap"));
        assert_eq!(defaults.timeout.as_deref(), Some("2s"));
        assert_eq!(merged.output.unwrap().json, Some(true));
    }

    #[test]
    fn test_defaults_apply_to_config() {
        let defaults = DefaultsConfig {
            concurrency: Some(2),
            timeout: Some("250ms".to_string()),
            backend: Some("rdap".to_string()),
            generate_count: Some(3),
            ..Default::default()
        };
        let config = defaults.apply_to(ScoutConfig::default()).unwrap();
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.probe_timeout, Duration::from_millis(250));
        assert_eq!(config.backend, LookupBackend::Rdap);
        assert_eq!(config.generate_count, 3);
        assert_eq!(config.suggestion_limit, 12);
    }

    #[test]
    fn test_env_config_parsing() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DS_CONCURRENCY", "3"),
            ("DS_TIMEOUT", "2s"),
            ("DS_BACKEND", "RDAP"),
            ("DS_COUNT", "5"),
            ("DS_CONFIG", "/tmp/scout.toml"),
        ]);
        let env_config = EnvConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(env_config.concurrency, Some(3));
        assert_eq!(env_config.timeout, Some(Duration::from_secs(2)));
        assert_eq!(env_config.backend, Some(LookupBackend::Rdap));
        assert_eq!(env_config.count, Some(5));
        assert_eq!(env_config.suggestion_limit, None);
        assert_eq!(env_config.config.as_deref(), Some("/tmp/scout.toml"));

        let config = env_config.apply_to(ScoutConfig::default());
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.generate_count, 5);
    }

    #[test]
    fn test_env_config_ignores_invalid_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DS_CONCURRENCY", "0"),
            ("DS_TIMEOUT", "fast"),
            ("DS_BACKEND", "dns"),
            ("DS_CONFIG", "  "),
        ]);
        let env_config = EnvConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(env_config, EnvConfig::default());
    }
}
