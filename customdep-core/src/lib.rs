//! customdep-core: project-specific deprecated API detection.
//!
//! Flags usages of methods, constructors, fields, and statically imported
//! members listed in a user-supplied deprecation list. Source parsing and
//! symbol resolution belong to the host analyzer; this crate consumes the
//! resolved facts and decides what to report.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use customdep_core::prelude::*;
//!
//! let rules = RuleSet::parse_or_empty(Some(
//!     r#"[{"fqcn":"com.example.OldApi","member":"oldMethod","migration":"Use NewApi"}]"#,
//! ));
//! let check = DeprecationCheck::new(&rules);
//!
//! if let Some(message) = check.check_node(&NodeShape::Call { symbol: Some(&resolved) }) {
//!     host.report(location, message);
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`signature`]: Canonical type and method descriptors
//! - [`reference`]: Node shapes and canonical reference extraction
//! - [`matcher`]: Rule matching (exact owner/member, optional signature)
//! - [`message`]: Issue message formatting
//! - [`rules`]: Deprecated API rule set loading
//! - [`check`]: Per-node and per-file evaluation, findings
//! - [`facts`]: Host fact-file adapter
//! - [`builder`]: Fluent API over directories of fact files
//! - [`error`]: Typed error handling

pub mod builder;
pub mod check;
pub mod config;
pub mod error;
pub mod facts;
pub mod logging;
pub mod matcher;
pub mod message;
pub mod prelude;
pub mod reference;
pub mod report;
pub mod rules;
pub mod scan;
pub mod signature;

// ============================================================================
// Explicit Re-exports
// ============================================================================

// Error types
pub use error::{CustomDepError, CustomDepResult, IoResultExt};

// Builder API
pub use builder::{AnalysisResult, AnalysisStats, CustomDep};

// Configuration
pub use config::{load_config, CustomDepConfig, OutputConfig};

// Engine
pub use check::{DeprecationCheck, Finding, RuleMetadata, Severity, RULE};
pub use matcher::find_match;
pub use message::{build_message, MESSAGE_PREFIX};
pub use reference::{
    extract, CanonicalReference, IdentifierRole, NodeShape, ResolvableReference, SymbolKind,
    CONSTRUCTOR_MEMBER,
};
pub use rules::{DeprecatedEntry, RuleSet};
pub use signature::{
    constructor_descriptor, method_descriptor, parameter_descriptor, type_descriptor, TypeFact,
};

// Host facts
pub use facts::{load_fact_file, FactFile, NodeFacts, OwnerFacts, ShapeFacts, SymbolFacts};

// Logging
pub use logging::init_structured_logging;

// Reporting
pub use report::{format_plain, json_report, print_json, print_plain};

// File scanning
pub use scan::gather_fact_files;
