//! Builder pattern API for deprecated API analysis.
//!
//! ```rust,ignore
//! use customdep_core::prelude::*;
//!
//! let result = CustomDep::new("/path/to/facts")
//!     .with_rules_text(r#"[{"fqcn":"com.example.OldApi","member":"oldMethod"}]"#)
//!     .exclude_dirs(["generated"])
//!     .analyze()?;
//!
//! for finding in &result.findings {
//!     println!("{}:{} {}", finding.file, finding.line, finding.message);
//! }
//! ```
//!
//! The rule set is loaded once per run and shared read-only by every
//! fact file evaluated in parallel.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::check::{DeprecationCheck, Finding, Severity};
use crate::config::{load_config, CustomDepConfig};
use crate::error::CustomDepError;
use crate::facts::load_fact_file;
use crate::rules::RuleSet;
use crate::scan::gather_fact_files;

/// Builder for configuring an analysis run.
#[derive(Debug, Clone)]
pub struct CustomDep {
    /// Fact file or directory of fact files
    root: PathBuf,

    /// Inline rule JSON; takes precedence over every other source
    rules_text: Option<String>,

    /// Rule JSON file
    rules_file: Option<PathBuf>,

    /// Whether to read customdep.toml at the root
    use_config: bool,

    /// Extra directories to prune while scanning
    excluded_dirs: Vec<String>,

    /// Severity override for findings
    severity: Option<Severity>,
}

/// Result of an analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisResult {
    /// Findings sorted by file, line, column
    pub findings: Vec<Finding>,
    pub stats: AnalysisStats,
    /// customdep.toml asked for JSON output
    pub prefer_json: bool,
}

/// Counters collected during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisStats {
    pub rule_count: usize,
    pub files_analyzed: usize,
    /// Fact files that could not be read or decoded
    pub files_skipped: usize,
    pub nodes_visited: usize,
}

impl CustomDep {
    /// Create a new analysis builder for the given path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            rules_text: None,
            rules_file: None,
            use_config: true,
            excluded_dirs: Vec::new(),
            severity: None,
        }
    }

    /// Use this JSON text as the deprecated API list.
    pub fn with_rules_text(mut self, text: impl Into<String>) -> Self {
        self.rules_text = Some(text.into());
        self
    }

    /// Read the deprecated API list from a JSON file.
    pub fn with_rules_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.rules_file = Some(path.into());
        self
    }

    /// Enable or disable reading customdep.toml.
    pub fn use_config(mut self, enabled: bool) -> Self {
        self.use_config = enabled;
        self
    }

    /// Add directories to exclude from scanning.
    pub fn exclude_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excluded_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Override the severity of findings.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Reads customdep.toml. An unreadable or invalid file is ignored.
    fn config(&self) -> Option<CustomDepConfig> {
        if !self.use_config || !self.root.is_dir() {
            return None;
        }
        match load_config(&self.root) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(error = %e, "ignoring configuration file; running without it");
                None
            }
        }
    }

    /// Resolves the rule text from the configured sources.
    fn rules_source(&self, cfg: Option<&CustomDepConfig>) -> Option<String> {
        if let Some(text) = &self.rules_text {
            return Some(text.clone());
        }

        if let Some(path) = &self.rules_file {
            return match fs::read_to_string(path) {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cannot read rules file; running with no rules");
                    None
                }
            };
        }

        cfg.and_then(|c| c.rules_text(&self.root))
    }

    /// Loads the rule set. Malformed rule text yields an empty set.
    pub fn load_rules(&self) -> RuleSet {
        self.rules_with(self.config().as_ref())
    }

    fn rules_with(&self, cfg: Option<&CustomDepConfig>) -> RuleSet {
        RuleSet::parse_or_empty(self.rules_source(cfg).as_deref())
    }

    /// Run the analysis and return results.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        if !self.root.exists() {
            return Err(CustomDepError::invalid_argument(format!(
                "path does not exist: {}",
                self.root.display()
            ))
            .into());
        }

        let cfg = self.config();
        let rules = self.rules_with(cfg.as_ref());

        let mut excludes = self.excluded_dirs.clone();
        if let Some(ignore) = cfg.as_ref().and_then(|c| c.ignore.as_ref()) {
            excludes.extend(ignore.iter().cloned());
        }
        let exclude_refs: Vec<&str> = excludes.iter().map(String::as_str).collect();
        let files = gather_fact_files(&self.root, &exclude_refs)
            .context("Failed to gather fact files")?;

        let mut check = DeprecationCheck::new(&rules);
        if let Some(severity) = self.severity {
            check = check.with_severity(severity);
        }

        let per_file: Vec<Option<(usize, Vec<Finding>)>> = files
            .par_iter()
            .map(|path| match load_fact_file(path) {
                Ok(unit) => Some((unit.nodes.len(), check.check_unit(&unit))),
                Err(e) => {
                    warn!(error = %e, "skipping fact file");
                    None
                }
            })
            .collect();

        let mut result = AnalysisResult {
            stats: AnalysisStats {
                rule_count: rules.len(),
                ..Default::default()
            },
            prefer_json: cfg.as_ref().is_some_and(CustomDepConfig::wants_json),
            ..Default::default()
        };

        for outcome in per_file {
            match outcome {
                Some((nodes, findings)) => {
                    result.stats.files_analyzed += 1;
                    result.stats.nodes_visited += nodes;
                    result.findings.extend(findings);
                }
                None => result.stats.files_skipped += 1,
            }
        }

        result
            .findings
            .sort_by(|a, b| (&a.file, a.line, a.column).cmp(&(&b.file, b.line, b.column)));

        info!(
            rules = result.stats.rule_count,
            files = result.stats.files_analyzed,
            skipped = result.stats.files_skipped,
            findings = result.findings.len(),
            "analysis complete"
        );

        Ok(result)
    }
}
