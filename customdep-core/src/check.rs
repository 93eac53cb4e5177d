//! The deprecation check: extraction, matching, and message building per node.
//!
//! A [`DeprecationCheck`] borrows an immutable [`RuleSet`] and is cheap to
//! create per analysis unit. Many checks may share one rule set across
//! threads.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::facts::FactFile;
use crate::matcher::find_match;
use crate::message::build_message;
use crate::reference::{extract, NodeShape, ResolvableReference};
use crate::rules::RuleSet;

/// Static description of the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMetadata {
    pub repository_key: &'static str,
    pub rule_key: &'static str,
    pub name: &'static str,
    pub default_severity: Severity,
}

/// Metadata of the custom deprecation rule.
pub const RULE: RuleMetadata = RuleMetadata {
    repository_key: "customdeprecation",
    rule_key: "CustomDeprecation",
    name: "Custom deprecated API should not be used",
    default_severity: Severity::Minor,
};

/// Finding severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Minor,
    Major,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Minor => write!(f, "minor"),
            Severity::Major => write!(f, "major"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// A reported usage of a deprecated API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub rule_key: String,
    pub severity: Severity,
    pub message: String,
    pub owner_fqcn: String,
    pub member: String,
}

struct Hit {
    owner_fqcn: String,
    member: String,
    message: String,
}

/// Runs the deprecation rule over visited nodes.
#[derive(Debug, Clone, Copy)]
pub struct DeprecationCheck<'r> {
    rules: &'r RuleSet,
    severity: Severity,
}

impl<'r> DeprecationCheck<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self {
            rules,
            severity: RULE.default_severity,
        }
    }

    /// Override the severity attached to findings.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn rules(&self) -> &'r RuleSet {
        self.rules
    }

    /// Evaluates one node. Returns the message when it uses a deprecated API.
    pub fn check_node<S: ResolvableReference + ?Sized>(
        &self,
        node: &NodeShape<'_, S>,
    ) -> Option<String> {
        self.evaluate(node).map(|hit| hit.message)
    }

    fn evaluate<S: ResolvableReference + ?Sized>(&self, node: &NodeShape<'_, S>) -> Option<Hit> {
        if self.rules.is_empty() {
            return None;
        }
        let reference = extract(node)?;
        let entry = find_match(&reference, self.rules)?;
        trace!(
            owner = %entry.owner_fqcn,
            member = %entry.member,
            "deprecated API usage"
        );
        Some(Hit {
            owner_fqcn: entry.owner_fqcn.clone(),
            member: entry.member.clone(),
            message: build_message(entry),
        })
    }

    /// Evaluates every node of a fact file, in order.
    pub fn check_unit(&self, unit: &FactFile) -> Vec<Finding> {
        if self.rules.is_empty() {
            return Vec::new();
        }

        unit.nodes
            .iter()
            .filter_map(|node| {
                let hit = self.evaluate(&node.shape.as_shape())?;
                Some(Finding {
                    file: unit.file.clone(),
                    line: node.line,
                    column: node.column,
                    rule_key: RULE.rule_key.to_string(),
                    severity: self.severity,
                    message: hit.message,
                    owner_fqcn: hit.owner_fqcn,
                    member: hit.member,
                })
            })
            .collect()
    }
}
