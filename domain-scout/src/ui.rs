//! Display logic for domain-scout CLI.
//!
//! Text output for every command, the `--pretty` grouped layout with a
//! spinner and summary, and JSON output. Uses only the `console` crate for
//! styling; colors are dropped automatically when stdout is not a terminal.

use console::{pad_str, style, Alignment, Term};
use domain_scout_lib::{
    format_thousands, CandidateResult, GeneratedDomain, PlannedDomain, SaleRecord, ScoreReport,
    Suggestions,
};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::OutputMode;

type DisplayResult = Result<(), Box<dyn std::error::Error>>;

const DOMAIN_WIDTH: usize = 26;

// ── Spinner ──────────────────────────────────────────────────────────────────

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An async braille-dot spinner that writes to stderr so stdout stays clean.
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    pub fn start(message: String) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let handle = tokio::spawn(async move {
            let term = Term::stderr();
            if !term.is_term() {
                return;
            }
            let mut idx = 0usize;
            while running_clone.load(Ordering::Relaxed) {
                let frame = SPINNER_FRAMES[idx % SPINNER_FRAMES.len()];
                let _ = term.clear_line();
                let _ = term.write_str(&format!("{} {}", style(frame).cyan(), message));
                idx += 1;
                tokio::time::sleep(Duration::from_millis(80)).await;
            }
            let _ = term.clear_line();
        });

        Self {
            running,
            handle: Some(handle),
        }
    }

    /// Stop the spinner and clear the line.
    pub async fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(h) = self.handle.take() {
            let _ = h.await;
        }
    }
}

// ── Rate ─────────────────────────────────────────────────────────────────────

pub fn display_score_report(report: &ScoreReport, mode: OutputMode) -> DisplayResult {
    if mode.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "{}  {}",
        style(report.domain.as_str()).bold(),
        style(format!("{:.1}/100", report.rating)).cyan().bold(),
    );
    if mode.pretty {
        println!();
    }

    let b = &report.breakdown;
    for (label, value) in [
        ("TLD", b.tld),
        ("Length", b.length),
        ("Cleanliness", b.cleanliness),
        ("Dictionary", b.dictionary),
        ("Brandability", b.brandability),
    ] {
        println!(
            "  {} {:>5.1}",
            pad_str(label, 14, Alignment::Left, None),
            value
        );
    }

    println!();
    println!(
        "  {} {}",
        style("Estimated value:").dim(),
        style(&report.value.formatted).green().bold()
    );
    if !report.value.recent_sales.is_empty() {
        let sales: Vec<String> = report.value.recent_sales.iter().map(format_sale).collect();
        println!("  {} {}", style("Recent sales:").dim(), sales.join(", "));
    }
    Ok(())
}

/// `ai.com ($1,200,000)`
pub fn format_sale(sale: &SaleRecord) -> String {
    let price = i64::try_from(sale.price).unwrap_or(i64::MAX);
    format!("{} (${})", sale.domain, format_thousands(price))
}

// ── Suggest ──────────────────────────────────────────────────────────────────

pub fn display_suggestions(
    result: &Suggestions,
    mode: OutputMode,
    duration: Duration,
) -> DisplayResult {
    if mode.json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    let rows: Vec<(&str, bool)> = result
        .suggestions
        .iter()
        .map(|c: &CandidateResult| (c.domain.as_str(), c.available))
        .collect();

    if mode.pretty {
        println!(
            "{} {}",
            style("domain-scout").bold(),
            style(format!("— Suggestions for '{}'", result.base)).dim(),
        );
        println!();
        print_grouped(&rows);
        print_summary(&rows, duration);
    } else {
        print_flat(&rows);
    }
    Ok(())
}

// ── Generate ─────────────────────────────────────────────────────────────────

pub fn display_generated(
    generated: &[GeneratedDomain],
    mode: OutputMode,
    duration: Duration,
) -> DisplayResult {
    if mode.json {
        println!("{}", serde_json::to_string_pretty(generated)?);
        return Ok(());
    }

    if mode.pretty {
        let mut current: Option<&str> = None;
        for row in generated {
            if current != Some(row.name.as_str()) {
                if current.is_some() {
                    println!();
                }
                println!("  {}", style(&row.name).bold());
                current = Some(row.name.as_str());
            }
            print_line(&row.domain, row.available, "    ");
        }
        println!();
        let rows: Vec<(&str, bool)> = generated
            .iter()
            .map(|g| (g.domain.as_str(), g.available))
            .collect();
        print_summary(&rows, duration);
    } else {
        for row in generated {
            println!(
                "{} {}",
                pad_str(&row.name, 14, Alignment::Left, None),
                status_line(&row.domain, row.available)
            );
        }
    }
    Ok(())
}

/// `--dry-run`: list what would be probed.
pub fn display_planned(planned: &[PlannedDomain], mode: OutputMode) -> DisplayResult {
    if mode.json {
        let rows: Vec<_> = planned
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "domain": p.domain.as_str(),
                    "tld": p.domain.dotted_tld(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for p in planned {
        println!("{}", p.domain);
    }
    if mode.pretty {
        println!();
        println!(
            "  {}",
            style(format!(
                "{} domain{} (dry run, nothing was checked)",
                planned.len(),
                plural(planned.len())
            ))
            .dim()
        );
    }
    Ok(())
}

// ── Shared layout ────────────────────────────────────────────────────────────

fn status_line(domain: &str, available: bool) -> String {
    let padded = pad_str(domain, DOMAIN_WIDTH, Alignment::Left, Some(".."));
    let status = if available {
        style("AVAILABLE").green().bold()
    } else {
        style("TAKEN").red().bold()
    };
    format!("{}  {}", padded, status)
}

fn print_line(domain: &str, available: bool, indent: &str) {
    println!("{}{}", indent, status_line(domain, available));
}

fn print_flat(rows: &[(&str, bool)]) {
    for (domain, available) in rows {
        print_line(domain, *available, "");
    }
}

/// Available then taken; empty sections are omitted.
fn print_grouped(rows: &[(&str, bool)]) {
    let (available, taken) = split_by_availability(rows);

    if !available.is_empty() {
        println!(
            "  {} {}",
            style(format!("── Available ({}) ", available.len()))
                .green()
                .bold(),
            style("─".repeat(30)).green().dim(),
        );
        for domain in &available {
            println!("    {}", domain);
        }
        println!();
    }

    if !taken.is_empty() {
        println!(
            "  {} {}",
            style(format!("── Taken ({}) ", taken.len())).red().bold(),
            style("─".repeat(34)).red().dim(),
        );
        for domain in &taken {
            println!("    {}", domain);
        }
        println!();
    }
}

fn split_by_availability<'a>(rows: &[(&'a str, bool)]) -> (Vec<&'a str>, Vec<&'a str>) {
    let available = rows.iter().filter(|(_, a)| *a).map(|(d, _)| *d).collect();
    let taken = rows.iter().filter(|(_, a)| !*a).map(|(d, _)| *d).collect();
    (available, taken)
}

fn print_summary(rows: &[(&str, bool)], duration: Duration) {
    let (available, taken) = split_by_availability(rows);
    println!("  {}", style("─".repeat(44)).dim());
    println!(
        "  {} domain{} in {:.1}s  {}  {}  {}  {}",
        style(rows.len()).bold(),
        plural(rows.len()),
        duration.as_secs_f64(),
        style("|").dim(),
        style(format!("{} available", available.len())).green(),
        style("|").dim(),
        style(format!("{} taken", taken.len())).red(),
    );
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
