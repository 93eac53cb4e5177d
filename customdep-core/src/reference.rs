//! Canonical reference extraction from host-resolved nodes.
//!
//! The host visits four kinds of syntax node:
//! - Calls: `api.oldMethod()`, `oldMethod()`
//! - Constructions: `new OldApi()`
//! - Qualified member access: `Constants.OLD_VALUE`, `obj.field`
//! - Bare identifiers: statically imported fields used without qualification
//!
//! Each node is turned into a [`CanonicalReference`] or rejected as a
//! non-usage. A usage reachable through more than one shape is only
//! extracted by the call/construction/member-access path.

use serde::{Deserialize, Serialize};

use crate::signature::{constructor_descriptor, method_descriptor, TypeFact};

/// Member name used for constructors.
pub const CONSTRUCTOR_MEMBER: &str = "<init>";

/// Kind of the resolved symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Variable,
    Method,
    Type,
    Other,
}

/// Position of an identifier inside its parent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierRole {
    /// Not part of a call, qualified access, or declaration.
    #[default]
    Standalone,
    /// The method-select of an enclosing call: `foo` in `foo()`.
    CallTarget,
    /// The member portion of a qualified access: `b` in `a.b`.
    AccessMember,
    /// The qualifier of a qualified access: `a` in `a.b`.
    AccessQualifier,
    /// The name introduced by a variable declaration: `x` in `T x = ...`.
    DeclaredName,
}

/// Narrow view over a symbol the host has resolved.
///
/// Adapters implement this over whatever symbol model the host uses; the
/// engine never sees more than these facts.
pub trait ResolvableReference {
    /// Fully qualified name of the declaring type, `None` if unresolved.
    fn owner_fqcn(&self) -> Option<&str>;

    /// Whether the owner is a type (as opposed to a method or block for locals).
    fn owner_is_type(&self) -> bool;

    /// Simple name of the member.
    fn member_name(&self) -> &str;

    fn kind(&self) -> SymbolKind;

    fn is_static(&self) -> bool;

    /// Declared parameter types, in order. Empty for variables.
    fn parameter_types(&self) -> &[TypeFact];

    /// Declared return type; `void` when the host does not report one.
    fn return_type(&self) -> &TypeFact;

    fn is_variable(&self) -> bool {
        self.kind() == SymbolKind::Variable
    }
}

/// A visited node, classified by shape.
///
/// `symbol` is `None` when the host could not resolve the node.
#[derive(Debug)]
pub enum NodeShape<'a, S: ResolvableReference + ?Sized> {
    Call { symbol: Option<&'a S> },
    Construction { symbol: Option<&'a S> },
    MemberAccess { symbol: Option<&'a S> },
    Identifier {
        symbol: Option<&'a S>,
        role: IdentifierRole,
    },
}

/// Canonical identity of one usage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalReference {
    /// Declaring type; `None` never matches.
    pub owner_fqcn: Option<String>,
    pub member: String,
    /// Descriptor for calls and constructions, `None` for field access.
    pub signature: Option<String>,
}

impl CanonicalReference {
    fn from_symbol<S: ResolvableReference + ?Sized>(
        symbol: &S,
        member: &str,
        signature: Option<String>,
    ) -> Self {
        Self {
            owner_fqcn: symbol.owner_fqcn().map(str::to_owned),
            member: member.to_owned(),
            signature,
        }
    }
}

/// Extracts the canonical reference for a node, or `None` if the node is
/// not a usage.
pub fn extract<S: ResolvableReference + ?Sized>(
    node: &NodeShape<'_, S>,
) -> Option<CanonicalReference> {
    match *node {
        NodeShape::Call { symbol } => {
            let symbol = symbol?;
            let signature = method_descriptor(symbol.parameter_types(), symbol.return_type());
            Some(CanonicalReference::from_symbol(
                symbol,
                symbol.member_name(),
                Some(signature),
            ))
        }

        NodeShape::Construction { symbol } => {
            let symbol = symbol?;
            let signature = constructor_descriptor(symbol.parameter_types());
            Some(CanonicalReference::from_symbol(
                symbol,
                CONSTRUCTOR_MEMBER,
                Some(signature),
            ))
        }

        NodeShape::MemberAccess { symbol } => {
            let symbol = symbol.filter(|s| s.is_variable())?;
            Some(CanonicalReference::from_symbol(
                symbol,
                symbol.member_name(),
                None,
            ))
        }

        NodeShape::Identifier { symbol, role } => {
            if is_covered_elsewhere(role) {
                return None;
            }
            let symbol = symbol?;
            if !symbol.is_variable() || !symbol.is_static() || !symbol.owner_is_type() {
                return None;
            }
            Some(CanonicalReference::from_symbol(
                symbol,
                symbol.member_name(),
                None,
            ))
        }
    }
}

/// Identifier positions that are either handled by another shape or are
/// declarations rather than usages.
fn is_covered_elsewhere(role: IdentifierRole) -> bool {
    matches!(
        role,
        IdentifierRole::CallTarget | IdentifierRole::AccessMember | IdentifierRole::DeclaredName
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sym {
        owner: Option<&'static str>,
        owner_is_type: bool,
        name: &'static str,
        kind: SymbolKind,
        is_static: bool,
        params: Vec<TypeFact>,
        ret: TypeFact,
    }

    impl ResolvableReference for Sym {
        fn owner_fqcn(&self) -> Option<&str> {
            self.owner
        }
        fn owner_is_type(&self) -> bool {
            self.owner_is_type
        }
        fn member_name(&self) -> &str {
            self.name
        }
        fn kind(&self) -> SymbolKind {
            self.kind
        }
        fn is_static(&self) -> bool {
            self.is_static
        }
        fn parameter_types(&self) -> &[TypeFact] {
            &self.params
        }
        fn return_type(&self) -> &TypeFact {
            &self.ret
        }
    }

    fn method(owner: &'static str, name: &'static str, params: Vec<TypeFact>) -> Sym {
        Sym {
            owner: Some(owner),
            owner_is_type: true,
            name,
            kind: SymbolKind::Method,
            is_static: false,
            params,
            ret: TypeFact::Void,
        }
    }

    fn static_field(owner: &'static str, name: &'static str) -> Sym {
        Sym {
            owner: Some(owner),
            owner_is_type: true,
            name,
            kind: SymbolKind::Variable,
            is_static: true,
            params: Vec::new(),
            ret: TypeFact::Void,
        }
    }

    #[test]
    fn test_call_builds_method_descriptor() {
        let sym = method("com.example.Api", "process", vec![TypeFact::named("java.lang.String")]);
        let r = extract(&NodeShape::Call { symbol: Some(&sym) }).unwrap();
        assert_eq!(r.owner_fqcn.as_deref(), Some("com.example.Api"));
        assert_eq!(r.member, "process");
        assert_eq!(r.signature.as_deref(), Some("(Ljava/lang/String;)V"));
    }

    #[test]
    fn test_unresolved_call_skipped() {
        let node: NodeShape<'_, Sym> = NodeShape::Call { symbol: None };
        assert!(extract(&node).is_none());
    }

    #[test]
    fn test_construction_uses_init_and_void() {
        let mut sym = method("com.example.OldClass", "OldClass", vec![TypeFact::named("int")]);
        sym.ret = TypeFact::named("com.example.OldClass");
        let r = extract(&NodeShape::Construction { symbol: Some(&sym) }).unwrap();
        assert_eq!(r.member, CONSTRUCTOR_MEMBER);
        assert_eq!(r.signature.as_deref(), Some("(I)V"));
    }

    #[test]
    fn test_member_access_requires_variable() {
        let field = static_field("com.example.Constants", "OLD_VALUE");
        let r = extract(&NodeShape::MemberAccess { symbol: Some(&field) }).unwrap();
        assert_eq!(r.member, "OLD_VALUE");
        assert!(r.signature.is_none());

        let m = method("com.example.OldApi", "oldMethod", vec![]);
        assert!(extract(&NodeShape::MemberAccess { symbol: Some(&m) }).is_none());
    }

    #[test]
    fn test_identifier_accepts_standalone_static_field() {
        let field = static_field("com.example.Constants", "OLD_VALUE");
        for role in [IdentifierRole::Standalone, IdentifierRole::AccessQualifier] {
            let node = NodeShape::Identifier {
                symbol: Some(&field),
                role,
            };
            assert!(extract(&node).is_some(), "{role:?} should be a usage");
        }
    }

    #[test]
    fn test_identifier_suppressed_positions() {
        let field = static_field("com.example.Constants", "OLD_VALUE");
        for role in [
            IdentifierRole::CallTarget,
            IdentifierRole::AccessMember,
            IdentifierRole::DeclaredName,
        ] {
            let node = NodeShape::Identifier {
                symbol: Some(&field),
                role,
            };
            assert!(extract(&node).is_none(), "{role:?} must be suppressed");
        }
    }

    #[test]
    fn test_identifier_rejects_instance_and_local() {
        let mut instance = static_field("com.example.Holder", "value");
        instance.is_static = false;
        assert!(extract(&NodeShape::Identifier {
            symbol: Some(&instance),
            role: IdentifierRole::Standalone
        })
        .is_none());

        let mut local = static_field("com.example.Holder#run", "tmp");
        local.owner_is_type = false;
        assert!(extract(&NodeShape::Identifier {
            symbol: Some(&local),
            role: IdentifierRole::Standalone
        })
        .is_none());
    }

    #[test]
    fn test_identifier_rejects_static_method() {
        let mut m = method("com.example.OldApi", "oldMethod", vec![]);
        m.is_static = true;
        assert!(extract(&NodeShape::Identifier {
            symbol: Some(&m),
            role: IdentifierRole::Standalone
        })
        .is_none());
    }
}
