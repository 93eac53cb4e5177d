//! Matching canonical references against the rule set.
//!
//! Owner and member are compared with exact string equality. The signature
//! comparison depends on the configured form:
//! - absent or empty: wildcard, every overload matches
//! - full descriptor `(..)R`: must equal the observed descriptor
//! - parameter-only descriptor `(..)`: must equal the observed parameter section
//!
//! The first matching entry in configuration order wins.

use crate::reference::CanonicalReference;
use crate::rules::{DeprecatedEntry, RuleSet};
use crate::signature::{is_parameter_only, parameter_section};

impl DeprecatedEntry {
    /// Tests this entry against an observed owner, member, and signature.
    ///
    /// An unresolved owner never matches.
    pub fn matches(&self, owner_fqcn: Option<&str>, member: &str, signature: Option<&str>) -> bool {
        let Some(owner) = owner_fqcn else {
            return false;
        };
        if owner != self.owner_fqcn || member != self.member {
            return false;
        }

        let expected = match self.signature.as_deref() {
            None | Some("") => return true,
            Some(sig) => sig,
        };

        match signature {
            None => false,
            Some(observed) if is_parameter_only(expected) => {
                parameter_section(observed) == Some(expected)
            }
            Some(observed) => observed == expected,
        }
    }
}

/// Returns the first entry matching `reference`, if any.
pub fn find_match<'r>(
    reference: &CanonicalReference,
    rules: &'r RuleSet,
) -> Option<&'r DeprecatedEntry> {
    let owner = reference.owner_fqcn.as_deref()?;
    rules
        .iter()
        .find(|entry| entry.matches(Some(owner), &reference.member, reference.signature.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(owner: &str, member: &str, sig: &str) -> CanonicalReference {
        CanonicalReference {
            owner_fqcn: Some(owner.into()),
            member: member.into(),
            signature: Some(sig.into()),
        }
    }

    fn field(owner: &str, member: &str) -> CanonicalReference {
        CanonicalReference {
            owner_fqcn: Some(owner.into()),
            member: member.into(),
            signature: None,
        }
    }

    #[test]
    fn test_wildcard_matches_every_overload() {
        let rules = RuleSet::from_entries(vec![DeprecatedEntry::new("com.example.Api", "process")]);
        for sig in ["(Ljava/lang/String;)V", "(I)V", "(Ljava/lang/String;Ljava/lang/String;)V"] {
            assert!(find_match(&call("com.example.Api", "process", sig), &rules).is_some());
        }
        assert!(find_match(&field("com.example.Api", "process"), &rules).is_some());
    }

    #[test]
    fn test_exact_signature_only() {
        let rules = RuleSet::from_entries(vec![
            DeprecatedEntry::new("com.example.Api", "process").with_signature("(Ljava/lang/String;)V"),
        ]);
        assert!(find_match(&call("com.example.Api", "process", "(Ljava/lang/String;)V"), &rules).is_some());
        assert!(find_match(&call("com.example.Api", "process", "(I)V"), &rules).is_none());
        assert!(find_match(&field("com.example.Api", "process"), &rules).is_none());
    }

    #[test]
    fn test_zero_arg_descriptor_vs_overload() {
        let full = RuleSet::from_entries(vec![
            DeprecatedEntry::new("com.example.Overload", "noArg").with_signature("()V"),
        ]);
        let params_only = RuleSet::from_entries(vec![
            DeprecatedEntry::new("com.example.Overload", "noArg").with_signature("()"),
        ]);
        for rules in [&full, &params_only] {
            assert!(find_match(&call("com.example.Overload", "noArg", "()V"), rules).is_some());
            assert!(find_match(
                &call("com.example.Overload", "noArg", "(Ljava/lang/String;)V"),
                rules
            )
            .is_none());
        }
    }

    #[test]
    fn test_parameter_only_ignores_return_type() {
        let rules = RuleSet::from_entries(vec![
            DeprecatedEntry::new("a.B", "get").with_signature("(I)"),
        ]);
        assert!(find_match(&call("a.B", "get", "(I)Ljava/lang/String;"), &rules).is_some());
        assert!(find_match(&call("a.B", "get", "(J)Ljava/lang/String;"), &rules).is_none());
    }

    #[test]
    fn test_different_owner_never_matches() {
        let rules = RuleSet::from_entries(vec![DeprecatedEntry::new("com.example.OldApi", "oldMethod")]);
        assert!(find_match(&call("com.example.DifferentApi", "oldMethod", "()V"), &rules).is_none());
        assert!(find_match(&call("com.example.oldapi", "oldMethod", "()V"), &rules).is_none());
    }

    #[test]
    fn test_unresolved_owner_fails_closed() {
        let rules = RuleSet::from_entries(vec![DeprecatedEntry::new("com.example.OldApi", "oldMethod")]);
        let r = CanonicalReference {
            owner_fqcn: None,
            member: "oldMethod".into(),
            signature: None,
        };
        assert!(find_match(&r, &rules).is_none());
        assert!(!rules.entries()[0].matches(None, "oldMethod", None));
    }

    #[test]
    fn test_first_match_wins() {
        let rules = RuleSet::from_entries(vec![
            DeprecatedEntry::new("a.B", "m").with_migration("first"),
            DeprecatedEntry::new("a.B", "m").with_signature("()V").with_migration("second"),
        ]);
        let hit = find_match(&call("a.B", "m", "()V"), &rules).unwrap();
        assert_eq!(hit.migration.as_deref(), Some("first"));
    }

    #[test]
    fn test_empty_rules_never_match() {
        assert!(find_match(&call("a.B", "m", "()V"), &RuleSet::empty()).is_none());
    }
}
