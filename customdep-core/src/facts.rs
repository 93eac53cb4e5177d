//! Host fact files.
//!
//! The engine does not parse source code. A host analyzer resolves every
//! call, construction, member access, and identifier it visits and writes
//! one `*.facts.json` file per source file:
//!
//! ```json
//! {
//!   "file": "src/main/java/com/example/Client.java",
//!   "nodes": [
//!     { "line": 7, "column": 9, "kind": "call",
//!       "symbol": { "name": "oldMethod", "kind": "method",
//!                   "owner": { "fqcn": "com.example.OldApi" },
//!                   "parameters": [], "return_type": { "kind": "void" } } }
//!   ]
//! }
//! ```
//!
//! [`SymbolFacts`] is the adapter implementing [`ResolvableReference`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CustomDepError, CustomDepResult, IoResultExt};
use crate::reference::{IdentifierRole, NodeShape, ResolvableReference, SymbolKind};
use crate::signature::TypeFact;

/// Suffix identifying fact files.
pub const FACT_FILE_SUFFIX: &str = ".facts.json";

fn default_true() -> bool {
    true
}

fn default_void() -> TypeFact {
    TypeFact::Void
}

/// The declaring owner of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerFacts {
    /// `None` when the host could not resolve the owner type.
    #[serde(default)]
    pub fqcn: Option<String>,
    /// False for locals and parameters, whose owner is a method.
    #[serde(default = "default_true")]
    pub is_type: bool,
}

/// A resolved symbol as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolFacts {
    pub name: String,
    pub kind: SymbolKind,
    #[serde(default)]
    pub owner: Option<OwnerFacts>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub parameters: Vec<TypeFact>,
    #[serde(default = "default_void")]
    pub return_type: TypeFact,
}

impl ResolvableReference for SymbolFacts {
    fn owner_fqcn(&self) -> Option<&str> {
        self.owner.as_ref()?.fqcn.as_deref()
    }

    fn owner_is_type(&self) -> bool {
        self.owner.as_ref().is_some_and(|o| o.is_type)
    }

    fn member_name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SymbolKind {
        self.kind
    }

    fn is_static(&self) -> bool {
        self.is_static
    }

    fn parameter_types(&self) -> &[TypeFact] {
        &self.parameters
    }

    fn return_type(&self) -> &TypeFact {
        &self.return_type
    }
}

/// Shape-specific part of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeFacts {
    Call {
        #[serde(default)]
        symbol: Option<SymbolFacts>,
    },
    Construction {
        #[serde(default)]
        symbol: Option<SymbolFacts>,
    },
    MemberAccess {
        #[serde(default)]
        symbol: Option<SymbolFacts>,
    },
    Identifier {
        #[serde(default)]
        symbol: Option<SymbolFacts>,
        #[serde(default)]
        role: IdentifierRole,
    },
}

impl ShapeFacts {
    /// Borrows this node as an engine [`NodeShape`].
    pub fn as_shape(&self) -> NodeShape<'_, SymbolFacts> {
        match self {
            Self::Call { symbol } => NodeShape::Call {
                symbol: symbol.as_ref(),
            },
            Self::Construction { symbol } => NodeShape::Construction {
                symbol: symbol.as_ref(),
            },
            Self::MemberAccess { symbol } => NodeShape::MemberAccess {
                symbol: symbol.as_ref(),
            },
            Self::Identifier { symbol, role } => NodeShape::Identifier {
                symbol: symbol.as_ref(),
                role: *role,
            },
        }
    }
}

/// One visited node with its source position (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFacts {
    pub line: usize,
    #[serde(default)]
    pub column: usize,
    #[serde(flatten)]
    pub shape: ShapeFacts,
}

/// All visited nodes of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactFile {
    /// Source file the facts describe.
    pub file: String,
    #[serde(default)]
    pub nodes: Vec<NodeFacts>,
}

impl FactFile {
    /// Decodes a fact file; `path` is only used for error context.
    pub fn from_json(path: &Path, text: &str) -> CustomDepResult<Self> {
        serde_json::from_str(text).map_err(|e| CustomDepError::facts(path, e.to_string()))
    }
}

/// Reads and decodes a fact file from disk.
pub fn load_fact_file(path: &Path) -> CustomDepResult<FactFile> {
    let text = fs::read_to_string(path).with_path(path)?;
    FactFile::from_json(path, &text)
}

/// True when `path` names a fact file.
pub fn is_fact_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.len() > FACT_FILE_SUFFIX.len() && n.ends_with(FACT_FILE_SUFFIX))
}
