//! Domain Scout CLI Application
//!
//! Rates domain names, suggests available variations of a base name and
//! generates brand-style names, using domain-scout-lib for the work.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use domain_scout_lib::{
    load_env_config, parse_timeout_string, ConfigManager, DomainScout, FileConfig, LookupBackend,
    ScoutConfig,
};
use std::process;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domain-scout
#[derive(Parser, Debug)]
#[command(name = "domain-scout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Sai Dutt G.V <gvs46@protonmail.com>")]
#[command(about = "Rate domain names and find available alternatives")]
#[command(
    long_about = "Rate domain names and find available alternatives.\n\nScores a domain and estimates its value, probes keyword variations of a base name, or generates brand-style names and checks them on .com, .ai and .io."
)]
#[command(styles = STYLES)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", global = true, help_heading = "Output Format")]
    pub json: bool,

    /// Colored, grouped output with a progress spinner
    #[arg(short = 'p', long = "pretty", global = true, help_heading = "Output Format")]
    pub pretty: bool,

    /// Max concurrent lookups (default: 6, max: 100)
    #[arg(
        short = 'c',
        long = "concurrency",
        value_name = "N",
        global = true,
        help_heading = "Performance"
    )]
    pub concurrency: Option<usize>,

    /// Per-lookup timeout, e.g. "1s", "500ms" (default: 1s)
    #[arg(
        long = "timeout",
        value_name = "DURATION",
        global = true,
        help_heading = "Performance"
    )]
    pub timeout: Option<String>,

    /// Lookup backend: whois or rdap (default: whois)
    #[arg(
        long = "backend",
        value_name = "BACKEND",
        global = true,
        help_heading = "Protocol"
    )]
    pub backend: Option<String>,

    /// Use specific config file instead of automatic discovery
    #[arg(
        long = "config",
        value_name = "FILE",
        global = true,
        help_heading = "Configuration"
    )]
    pub config: Option<String>,

    /// Show debug logging
    #[arg(short = 'd', long = "debug", global = true, help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", global = true, help_heading = "Configuration")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score a domain and estimate its resale value
    Rate {
        /// Domain to rate, e.g. example.com
        #[arg(value_name = "DOMAIN")]
        domain: String,
    },

    /// Probe keyword variations of a base name
    Suggest {
        /// Base name, at least 3 characters
        #[arg(value_name = "BASE")]
        base: String,
    },

    /// Generate brand-style names and probe them on .com, .ai and .io
    Generate {
        /// Number of distinct names (default: 8)
        #[arg(short = 'n', long = "count", value_name = "N")]
        count: Option<usize>,

        /// Preview generated domains without checking availability
        #[arg(long = "dry-run")]
        dry_run: bool,
    },
}

/// Output settings resolved from flags and config files.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputMode {
    pub json: bool,
    pub pretty: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logger(&args);

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over the flags.
fn init_logger(args: &Args) {
    let default_filter = if args.debug {
        "domain_scout=debug,domain_scout_lib=debug,warn"
    } else if args.verbose {
        "domain_scout=info,domain_scout_lib=info,warn"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(args.debug)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let (config, file_config) = build_config(&args)?;
    let output = resolve_output_mode(&args, &file_config);
    tracing::debug!(?config, "resolved configuration");

    let scout = DomainScout::with_config(config)?;

    match &args.command {
        Command::Rate { domain } => {
            let report = scout.rate(domain)?;
            ui::display_score_report(&report, output)?;
        }
        Command::Suggest { base } => {
            let started = Instant::now();
            let spinner = output
                .pretty
                .then(|| ui::Spinner::start(format!("Probing variations of {}...", base.trim())));
            let result = scout.suggest(base).await;
            if let Some(spinner) = spinner {
                spinner.stop().await;
            }
            ui::display_suggestions(&result?, output, started.elapsed())?;
        }
        Command::Generate { count, dry_run } => {
            let count = count.unwrap_or(scout.config().generate_count);
            if *dry_run {
                let planned = scout.plan_generate(count, &mut rand_source())?;
                ui::display_planned(&planned, output)?;
                return Ok(());
            }

            let started = Instant::now();
            let spinner = output
                .pretty
                .then(|| ui::Spinner::start(format!("Generating and probing {} names...", count)));
            let result = scout.generate(count).await;
            if let Some(spinner) = spinner {
                spinner.stop().await;
            }
            ui::display_generated(&result?, output, started.elapsed())?;
        }
    }

    Ok(())
}

fn rand_source() -> rand::rngs::StdRng {
    use rand::SeedableRng;
    rand::rngs::StdRng::from_entropy()
}

/// Build the effective configuration: defaults < config file < `DS_*`
/// environment < CLI flags.
fn build_config(args: &Args) -> Result<(ScoutConfig, FileConfig), Box<dyn std::error::Error>> {
    let config_manager = ConfigManager::new(args.verbose);
    let env_config = load_env_config();

    let file_config = if let Some(path) = &args.config {
        tracing::info!("Using explicit config file (CLI --config): {}", path);
        config_manager
            .load_file(path)
            .map_err(|e| format!("Failed to load config file '{}': {}", path, e))?
    } else if let Some(path) = &env_config.config {
        tracing::info!("Using explicit config file (DS_CONFIG env var): {}", path);
        config_manager
            .load_file(path)
            .map_err(|e| format!("Failed to load config file '{}': {}", path, e))?
    } else {
        config_manager.discover_and_load().unwrap_or_else(|e| {
            tracing::warn!("Config discovery warning: {}", e);
            FileConfig::default()
        })
    };

    let mut config = ScoutConfig::default();
    if let Some(defaults) = &file_config.defaults {
        config = defaults.apply_to(config)?;
    }
    config = env_config.apply_to(config);
    config = apply_cli_args_to_config(config, args)?;

    Ok((config, file_config))
}

/// Apply CLI arguments to config (highest precedence).
fn apply_cli_args_to_config(
    mut config: ScoutConfig,
    args: &Args,
) -> Result<ScoutConfig, Box<dyn std::error::Error>> {
    if let Some(concurrency) = args.concurrency {
        if concurrency == 0 || concurrency > 100 {
            return Err("Concurrency must be between 1 and 100".into());
        }
        config = config.with_concurrency(concurrency);
    }

    if let Some(timeout) = &args.timeout {
        let timeout = parse_timeout_string(timeout)
            .filter(|d| !d.is_zero())
            .ok_or_else(|| {
                format!(
                    "Invalid timeout '{}'. Use a non-zero value like '1s', '500ms', '2m'",
                    timeout
                )
            })?;
        config = config.with_timeout(timeout);
    }

    if let Some(backend) = &args.backend {
        config = config.with_backend(backend.parse::<LookupBackend>()?);
    }

    Ok(config)
}

/// Flags win; config file `[output]` fills in when a flag is absent.
fn resolve_output_mode(args: &Args, file_config: &FileConfig) -> OutputMode {
    let output = file_config.output.clone().unwrap_or_default();
    let json = args.json || output.json.unwrap_or(false);
    OutputMode {
        json,
        pretty: !json && (args.pretty || output.pretty.unwrap_or(false)),
    }
}
