//! customdep CLI - flags usages of project-specific deprecated APIs.
//!
//! Reads host fact files (`*.facts.json`) produced by a symbol-resolving
//! analyzer, matches every visited call, construction, member access, and
//! identifier against the configured deprecated API list, and prints the
//! findings.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use customdep_core::{init_structured_logging, print_json, print_plain, CustomDep, Severity};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum SeverityArg {
    Info,
    Minor,
    Major,
    Critical,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Info => Severity::Info,
            SeverityArg::Minor => Severity::Minor,
            SeverityArg::Major => Severity::Major,
            SeverityArg::Critical => Severity::Critical,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Project-specific deprecated API detector")]
pub struct Cli {
    /// Fact file or directory containing *.facts.json files
    #[arg(default_value = ".")]
    path: String,

    /// JSON file with the deprecated API list
    #[arg(long, value_name = "FILE")]
    rules: Option<String>,

    /// Deprecated API list as inline JSON (overrides --rules)
    #[arg(long, value_name = "JSON")]
    rules_text: Option<String>,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Directory names to skip while scanning
    #[arg(long, num_args = 1..)]
    exclude: Vec<String>,

    /// Ignore customdep.toml
    #[arg(long)]
    no_config: bool,

    /// Severity attached to findings
    #[arg(long, value_enum)]
    severity: Option<SeverityArg>,

    /// Exit with status 1 when any finding is reported
    #[arg(long)]
    fail_on_findings: bool,
}

fn run(cli: &Cli) -> Result<bool> {
    let root = Path::new(&cli.path);

    let mut analysis = CustomDep::new(root)
        .use_config(!cli.no_config)
        .exclude_dirs(cli.exclude.iter().cloned());

    if let Some(text) = &cli.rules_text {
        analysis = analysis.with_rules_text(text.clone());
    } else if let Some(file) = &cli.rules {
        analysis = analysis.with_rules_file(file);
    }
    if let Some(severity) = cli.severity {
        analysis = analysis.with_severity(severity.into());
    }

    let result = analysis
        .analyze()
        .with_context(|| format!("Failed to analyze {}", cli.path))?;

    if cli.json || result.prefer_json {
        print_json(&result.findings);
    } else {
        print_plain(&result.findings);
        eprintln!(
            "Analyzed {} file(s), {} node(s), {} rule(s); skipped {} file(s).",
            result.stats.files_analyzed,
            result.stats.nodes_visited,
            result.stats.rule_count,
            result.stats.files_skipped
        );
    }

    Ok(!result.findings.is_empty())
}

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] customdep internal error: {}", info);
        eprintln!("[PANIC] The process will exit with code 2.");
    }));

    // JSON to stderr, respects RUST_LOG
    init_structured_logging();

    let cli = Cli::parse();

    let outcome = run(&cli);
    if let Err(e) = &outcome {
        eprintln!("Error: {:#}", e);
    }
    ExitCode::from(exit_status(&outcome, cli.fail_on_findings))
}

/// 0 on success, 1 for findings under `--fail-on-findings`, 2 on error.
fn exit_status(outcome: &Result<bool>, fail_on_findings: bool) -> u8 {
    match outcome {
        Ok(true) if fail_on_findings => 1,
        Ok(_) => 0,
        Err(_) => 2,
    }
}
