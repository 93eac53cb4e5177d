//! Deprecated-API rule set.
//!
//! Rules come from a JSON array, usually held as text in a rule parameter
//! or `customdep.toml`:
//!
//! ```json
//! [
//!   { "fqcn": "com.example.OldApi", "member": "oldMethod",
//!     "signature": "(Ljava/lang/String;)V",
//!     "migration": "Use NewApi.newMethod()", "note": "removed in 3.0" }
//! ]
//! ```
//!
//! A loaded [`RuleSet`] is immutable and shared read-only by every matcher.
//! Malformed text never aborts analysis: [`RuleSet::parse_or_empty`] logs a
//! warning and yields an empty set.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CustomDepError, CustomDepResult};
use crate::signature::{is_descriptor, source_arguments_descriptor};

/// One configured deprecated API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeprecatedEntry {
    /// Declaring type, compared verbatim.
    #[serde(rename = "fqcn")]
    pub owner_fqcn: String,
    /// Member simple name, or `<init>` for constructors.
    pub member: String,
    /// Descriptor; `None` or empty matches every overload.
    pub signature: Option<String>,
    pub migration: Option<String>,
    pub note: Option<String>,
}

impl DeprecatedEntry {
    /// Entry matching every overload of `member`.
    pub fn new(owner_fqcn: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            owner_fqcn: owner_fqcn.into(),
            member: member.into(),
            signature: None,
            migration: None,
            note: None,
        }
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_migration(mut self, migration: impl Into<String>) -> Self {
        self.migration = Some(migration.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// True when the entry applies to all overloads.
    pub fn is_wildcard(&self) -> bool {
        self.signature.as_deref().map_or(true, str::is_empty)
    }
}

/// Wire shape of one configuration element.
#[derive(Debug, Deserialize)]
struct RawEntry {
    fqcn: String,
    member: String,
    #[serde(default)]
    signature: Option<String>,
    /// Source-style argument list, e.g. `(java.lang.String,int)`.
    #[serde(default)]
    arguments: Option<String>,
    #[serde(default)]
    migration: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

impl RawEntry {
    fn into_entry(self, index: usize) -> CustomDepResult<DeprecatedEntry> {
        if self.fqcn.is_empty() {
            return Err(CustomDepError::rule_set(format!(
                "entry {index}: `fqcn` must not be empty"
            )));
        }
        if self.member.is_empty() {
            return Err(CustomDepError::rule_set(format!(
                "entry {index}: `member` must not be empty"
            )));
        }

        let signature = match (non_empty(self.signature), non_empty(self.arguments)) {
            (Some(sig), Some(_)) => {
                warn!(
                    entry = index,
                    fqcn = %self.fqcn,
                    member = %self.member,
                    "both `signature` and `arguments` set; using `signature`"
                );
                Some(normalize_signature(sig, index))
            }
            (Some(sig), None) => Some(normalize_signature(sig, index)),
            (None, Some(args)) => Some(source_arguments_descriptor(&args).map_err(|e| {
                CustomDepError::rule_set(format!("entry {index}: {e}"))
            })?),
            (None, None) => None,
        };

        if let Some(sig) = &signature {
            if !is_descriptor(sig) {
                warn!(
                    entry = index,
                    signature = %sig,
                    "signature is not a method descriptor and will never match"
                );
            }
        }

        Ok(DeprecatedEntry {
            owner_fqcn: self.fqcn,
            member: self.member,
            signature,
            migration: self.migration,
            note: self.note,
        })
    }
}

/// Source-style lists in `signature`, e.g. `(java.lang.String)`, become
/// parameter-only descriptors. Anything else is kept verbatim.
fn normalize_signature(sig: String, index: usize) -> String {
    if is_descriptor(&sig) {
        return sig;
    }
    match source_arguments_descriptor(&sig) {
        Ok(descriptor) => {
            debug!(entry = index, from = %sig, to = %descriptor, "converted source-style signature");
            descriptor
        }
        Err(_) => sig,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Ordered, immutable list of deprecated entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    entries: Vec<DeprecatedEntry>,
}

impl RuleSet {
    /// A rule set with no entries; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<DeprecatedEntry>) -> Self {
        Self { entries }
    }

    /// Parses the JSON array form. Blank text is an empty set.
    pub fn parse(text: &str) -> CustomDepResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::empty());
        }

        let raw: Vec<RawEntry> =
            serde_json::from_str(text).map_err(|e| CustomDepError::rule_set(e.to_string()))?;

        let entries = raw
            .into_iter()
            .enumerate()
            .map(|(i, entry)| entry.into_entry(i))
            .collect::<CustomDepResult<Vec<_>>>()?;

        debug!(count = entries.len(), "loaded deprecated API rules");
        Ok(Self { entries })
    }

    /// Parses `text`, degrading to an empty set on any error.
    pub fn parse_or_empty(text: Option<&str>) -> Self {
        let Some(text) = text else {
            return Self::empty();
        };
        match Self::parse(text) {
            Ok(rules) => rules,
            Err(e) => {
                warn!(
                    error = %e,
                    "Failed to parse deprecated API configuration; running with no rules"
                );
                Self::empty()
            }
        }
    }

    pub fn entries(&self) -> &[DeprecatedEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeprecatedEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a DeprecatedEntry;
    type IntoIter = std::slice::Iter<'a, DeprecatedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
