//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use customdep_core::prelude::*;
//! ```

// Engine
pub use crate::check::{DeprecationCheck, Finding, Severity};
pub use crate::reference::{IdentifierRole, NodeShape, ResolvableReference, SymbolKind};
pub use crate::rules::{DeprecatedEntry, RuleSet};
pub use crate::signature::TypeFact;

// Errors
pub use crate::error::{CustomDepError, CustomDepResult};

// Builder API
pub use crate::builder::{AnalysisResult, CustomDep};

// Configuration
pub use crate::config::{load_config, CustomDepConfig};
