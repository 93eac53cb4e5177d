//! Canonical signature descriptors.
//!
//! Parameter and return types resolved by the host are encoded as
//! JVM-style descriptors so that configured signatures and observed ones
//! can be compared with plain string equality:
//!
//! ```text
//! void process(String s, int[] xs)   ->  (Ljava/lang/String;[I)V
//! new Widget()                       ->  ()V
//! ```
//!
//! Unresolved types never fail; they collapse to the `java.lang.Object`
//! descriptor so that partially-resolved code still gets a best-effort match.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CustomDepError, CustomDepResult};

/// Descriptor used for unresolved or unnamed types.
pub const OBJECT_DESCRIPTOR: &str = "Ljava/lang/Object;";

/// Descriptor for `void`.
pub const VOID_DESCRIPTOR: &str = "V";

const ARRAY_MARKER: char = '[';
const ARRAY_SUFFIX: &str = "[]";
const VARARGS_SUFFIX: &str = "...";

/// Primitive type names and their single-letter descriptor codes.
const PRIMITIVES: [(&str, char); 8] = [
    ("boolean", 'Z'),
    ("byte", 'B'),
    ("char", 'C'),
    ("short", 'S'),
    ("int", 'I'),
    ("long", 'J'),
    ("float", 'F'),
    ("double", 'D'),
];

/// A type as resolved by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeFact {
    /// The host could not resolve the type.
    Unknown,
    /// `void` return type.
    Void,
    /// A named type, primitive or reference.
    Named {
        /// Fully qualified dotted name, possibly with trailing `[]` markers.
        #[serde(default)]
        fqn: Option<String>,
        /// Simple name, used when the qualified name is unavailable.
        #[serde(default)]
        name: Option<String>,
        /// Array depth reported separately from the name.
        #[serde(default)]
        dims: usize,
    },
}

impl TypeFact {
    /// A named type with a fully qualified name.
    pub fn named(fqn: impl Into<String>) -> Self {
        Self::Named {
            fqn: Some(fqn.into()),
            name: None,
            dims: 0,
        }
    }

    /// An array of `dims` dimensions over the named element type.
    pub fn array(fqn: impl Into<String>, dims: usize) -> Self {
        Self::Named {
            fqn: Some(fqn.into()),
            name: None,
            dims,
        }
    }
}

/// Returns the descriptor code of a primitive type name.
pub fn primitive_code(name: &str) -> Option<char> {
    PRIMITIVES
        .iter()
        .find(|(primitive, _)| *primitive == name)
        .map(|(_, code)| *code)
}

/// Returns the primitive type name for a descriptor code.
pub fn primitive_name(code: char) -> Option<&'static str> {
    PRIMITIVES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| *name)
}

/// Wraps a dotted type name as an object descriptor: `a.b.C` -> `La/b/C;`.
pub fn object_descriptor(dotted: &str) -> String {
    let mut out = String::with_capacity(dotted.len() + 2);
    out.push('L');
    out.extend(dotted.chars().map(|c| if c == '.' { '/' } else { c }));
    out.push(';');
    out
}

/// Recovers the dotted name from an object descriptor: `La/b/C;` -> `a.b.C`.
///
/// Returns `None` for primitive, array, or malformed descriptors.
pub fn dotted_name(descriptor: &str) -> Option<String> {
    let inner = descriptor.strip_prefix('L')?.strip_suffix(';')?;
    if inner.is_empty() {
        return None;
    }
    Some(inner.replace('/', "."))
}

/// Number of leading array markers in a descriptor.
pub fn array_dimensions(descriptor: &str) -> usize {
    descriptor.chars().take_while(|c| *c == ARRAY_MARKER).count()
}

/// Encodes a type name, stripping trailing `[]` markers into array dimensions.
///
/// `extra_dims` adds dimensions the host reported outside the name.
pub fn name_descriptor(name: &str, extra_dims: usize) -> String {
    let mut element = name.trim();
    let mut dims = extra_dims;

    loop {
        if let Some(stripped) = element.strip_suffix(ARRAY_SUFFIX) {
            element = stripped.trim_end();
            dims += 1;
        } else if let Some(stripped) = element.strip_suffix(VARARGS_SUFFIX) {
            element = stripped.trim_end();
            dims += 1;
        } else {
            break;
        }
    }

    // Type arguments are erased.
    if let Some(idx) = element.find('<') {
        element = element[..idx].trim_end();
    }

    let base = if element.is_empty() {
        OBJECT_DESCRIPTOR.to_string()
    } else if let Some(code) = primitive_code(element) {
        code.to_string()
    } else {
        object_descriptor(element)
    };

    let mut out = String::with_capacity(dims + base.len());
    out.extend(std::iter::repeat(ARRAY_MARKER).take(dims));
    out.push_str(&base);
    out
}

/// Encodes one resolved type.
pub fn type_descriptor(ty: &TypeFact) -> String {
    match ty {
        TypeFact::Unknown => OBJECT_DESCRIPTOR.to_string(),
        TypeFact::Void => VOID_DESCRIPTOR.to_string(),
        TypeFact::Named { fqn, name, dims } => {
            let chosen = [fqn, name]
                .into_iter()
                .flatten()
                .map(|s| s.trim())
                .find(|s| !s.is_empty());

            match chosen {
                Some("void") if *dims == 0 => VOID_DESCRIPTOR.to_string(),
                Some(n) => name_descriptor(n, *dims),
                None => name_descriptor("", *dims),
            }
        }
    }
}

/// Encodes a parameter list: `(` + descriptors + `)`.
pub fn parameter_descriptor(params: &[TypeFact]) -> String {
    let mut out = String::from("(");
    for param in params {
        out.push_str(&type_descriptor(param));
    }
    out.push(')');
    out
}

/// Full method descriptor including the return type.
pub fn method_descriptor(params: &[TypeFact], return_type: &TypeFact) -> String {
    let mut out = parameter_descriptor(params);
    out.push_str(&type_descriptor(return_type));
    out
}

/// Constructor descriptor; constructors always return `void`.
pub fn constructor_descriptor(params: &[TypeFact]) -> String {
    method_descriptor(params, &TypeFact::Void)
}

/// The parameter section of a descriptor, up to and including `)`.
pub fn parameter_section(descriptor: &str) -> Option<&str> {
    if !descriptor.starts_with('(') {
        return None;
    }
    descriptor.find(')').map(|idx| &descriptor[..=idx])
}

/// True when the descriptor carries no return type, e.g. `(I)`.
pub fn is_parameter_only(descriptor: &str) -> bool {
    descriptor.starts_with('(') && descriptor.ends_with(')')
}

fn descriptor_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // SAFETY: hardcoded pattern, covered by tests below.
    REGEX.get_or_init(|| {
        Regex::new(r"^\((\[*([ZBCSIJFD]|L[^;()\[]+;))*\)(V|\[*([ZBCSIJFD]|L[^;()\[]+;))?$")
            .expect("Hardcoded regex pattern is valid")
    })
}

/// True when `s` is a well-formed method or parameter-only descriptor.
pub fn is_descriptor(s: &str) -> bool {
    descriptor_regex().is_match(s)
}

/// Converts a source-style argument list into a parameter-only descriptor.
///
/// `(java.lang.String, int[])` -> `(Ljava/lang/String;[I)`
pub fn source_arguments_descriptor(arguments: &str) -> CustomDepResult<String> {
    let trimmed = arguments.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| {
            CustomDepError::rule_set(format!(
                "arguments must be a parenthesized type list, got `{}`",
                arguments
            ))
        })?;

    let mut out = String::from("(");
    if !inner.trim().is_empty() {
        for part in split_top_level(inner) {
            let part = part.trim();
            if part.is_empty() {
                return Err(CustomDepError::rule_set(format!(
                    "empty type in arguments `{}`",
                    arguments
                )));
            }
            out.push_str(&name_descriptor(part, 0));
        }
    }
    out.push(')');
    Ok(out)
}

/// Splits on commas outside `<...>` type arguments.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in list.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&list[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&list[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_primitive_mapping_is_bijection() {
        let mut codes = HashSet::new();
        for (name, _) in PRIMITIVES {
            let code = primitive_code(name).unwrap();
            assert!(codes.insert(code), "duplicate code {code}");
            assert_eq!(primitive_name(code), Some(name));
        }
        assert_eq!(codes.len(), 8);
        assert_eq!(primitive_code("String"), None);
        assert_eq!(primitive_name('V'), None);
    }

    #[test]
    fn test_object_wrap_unwrap() {
        for name in ["java.lang.String", "com.example.OldApi", "Foo", "a.b.c.D$Inner"] {
            let desc = type_descriptor(&TypeFact::named(name));
            assert_eq!(dotted_name(&desc).as_deref(), Some(name));
        }
        assert_eq!(dotted_name("I"), None);
        assert_eq!(dotted_name("L;"), None);
    }

    #[test]
    fn test_array_dimensions_preserved() {
        for base in ["int", "java.lang.String"] {
            let plain = type_descriptor(&TypeFact::named(base));
            let one = type_descriptor(&TypeFact::named(format!("{base}[]")));
            let two = type_descriptor(&TypeFact::named(format!("{base}[][]")));
            assert_eq!(array_dimensions(&plain), 0);
            assert_eq!(one, format!("[{plain}"));
            assert_eq!(two, format!("[[{plain}"));
        }
        assert_eq!(type_descriptor(&TypeFact::array("long", 2)), "[[J");
        assert_eq!(type_descriptor(&TypeFact::array("byte[]", 1)), "[[B");
    }

    #[test]
    fn test_unknown_and_empty_fall_back_to_object() {
        assert_eq!(type_descriptor(&TypeFact::Unknown), OBJECT_DESCRIPTOR);
        let unnamed = TypeFact::Named {
            fqn: Some(String::new()),
            name: None,
            dims: 0,
        };
        assert_eq!(type_descriptor(&unnamed), OBJECT_DESCRIPTOR);
    }

    #[test]
    fn test_simple_name_used_when_fqn_missing() {
        let ty = TypeFact::Named {
            fqn: None,
            name: Some("Widget".into()),
            dims: 0,
        };
        assert_eq!(type_descriptor(&ty), "LWidget;");
    }

    #[test]
    fn test_generic_arguments_erased() {
        assert_eq!(
            type_descriptor(&TypeFact::named("java.util.List<java.lang.String>")),
            "Ljava/util/List;"
        );
    }

    #[test]
    fn test_method_and_constructor_descriptors() {
        let params = vec![TypeFact::named("java.lang.String"), TypeFact::named("int")];
        assert_eq!(
            method_descriptor(&params, &TypeFact::named("boolean")),
            "(Ljava/lang/String;I)Z"
        );
        assert_eq!(constructor_descriptor(&[]), "()V");
        assert_eq!(method_descriptor(&[], &TypeFact::Void), "()V");
    }

    #[test]
    fn test_parameter_section() {
        assert_eq!(parameter_section("(I)V"), Some("(I)"));
        assert_eq!(parameter_section("()Ljava/lang/String;"), Some("()"));
        assert_eq!(parameter_section("I"), None);
    }

    #[test]
    fn test_is_descriptor() {
        assert!(is_descriptor("()V"));
        assert!(is_descriptor("(Ljava/lang/String;[I)Z"));
        assert!(is_descriptor("(I)"));
        assert!(!is_descriptor("(java.lang.String)V"));
        assert!(!is_descriptor("process"));
    }

    #[test]
    fn test_source_arguments_descriptor() {
        assert_eq!(source_arguments_descriptor("()").unwrap(), "()");
        assert_eq!(
            source_arguments_descriptor("(java.lang.String, int[])").unwrap(),
            "(Ljava/lang/String;[I)"
        );
        assert_eq!(
            source_arguments_descriptor("(java.lang.Object...)").unwrap(),
            "([Ljava/lang/Object;)"
        );
        assert_eq!(
            source_arguments_descriptor("(java.util.Map<java.lang.String, java.lang.Integer>)")
                .unwrap(),
            "(Ljava/util/Map;)"
        );
        assert_eq!(
            source_arguments_descriptor("(java.util.Map<K, java.util.List<V>>, int)").unwrap(),
            "(Ljava/util/Map;I)"
        );
        assert!(source_arguments_descriptor("java.lang.String").is_err());
        assert!(source_arguments_descriptor("(int,,long)").is_err());
    }
}
