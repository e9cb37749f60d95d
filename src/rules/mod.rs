/*! Rule references and resolution.

Rules are declared by name (with optional keyword arguments) in the configuration,
and resolved once per source into strongly typed chains by the [registry].
Resolution is eager: an unknown name or an invalid argument fails the whole run before any processing.
!*/
use std::fmt;

use serde_json::{Map, Value};

use crate::config::RuleDecl;
use crate::error::Error;

pub mod registry;

pub use registry::{resolve, RuleSet};

/// Rule namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Filter,
    Transform,
    Augmenter,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RuleKind::Filter => "filter",
            RuleKind::Transform => "transform",
            RuleKind::Augmenter => "augmenter",
        };
        write!(f, "{}", s)
    }
}

/// A rule name along with its keyword arguments (always a JSON object).
#[derive(Debug, Clone, PartialEq)]
pub struct RuleRef {
    pub name: String,
    pub kwargs: Value,
}

impl RuleRef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kwargs: Value::Object(Map::new()),
        }
    }

    pub fn with_kwargs(name: &str, kwargs: Value) -> Self {
        Self {
            name: name.to_string(),
            kwargs,
        }
    }
}

impl TryFrom<&RuleDecl> for RuleRef {
    type Error = Error;

    fn try_from(decl: &RuleDecl) -> Result<Self, Self::Error> {
        match decl {
            RuleDecl::Name(name) => Ok(RuleRef::new(name)),
            RuleDecl::WithArgs(map) => {
                let mut entries = map.iter();
                match (entries.next(), entries.next()) {
                    (Some((name, kwargs @ Value::Object(_))), None) => {
                        Ok(RuleRef::with_kwargs(name, kwargs.clone()))
                    }
                    (Some((name, Value::Null)), None) => Ok(RuleRef::new(name)),
                    (Some((name, other)), None) => Err(Error::Config(format!(
                        "arguments of rule {:?} must be an object, got {}",
                        name, other
                    ))),
                    _ => Err(Error::Config(format!(
                        "a rule declaration must have exactly one key, got {:?}",
                        map.keys().collect::<Vec<_>>()
                    ))),
                }
            }
        }
    }
}

/// Wraps a rule with its stable identifier (the declared name), used for match accounting.
pub struct Named<T> {
    name: String,
    inner: T,
}

impl<T> Named<T> {
    pub fn new(name: &str, inner: T) -> Self {
        Self {
            name: name.to_string(),
            inner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T> fmt::Debug for Named<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Named").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;

    #[test]
    fn from_name() {
        let r = RuleRef::try_from(&RuleDecl::Name("duplicates".into())).unwrap();
        assert_eq!(r, RuleRef::new("duplicates"));
        assert_eq!(r.kwargs, json!({}));
    }

    #[test]
    fn from_args() {
        let mut m = BTreeMap::new();
        m.insert("char_length".to_string(), json!({"min": 3}));
        let r = RuleRef::try_from(&RuleDecl::WithArgs(m)).unwrap();
        assert_eq!(r.name, "char_length");
        assert_eq!(r.kwargs, json!({"min": 3}));
    }

    #[test]
    fn from_args_multiple_keys() {
        let mut m = BTreeMap::new();
        m.insert("a".to_string(), json!({}));
        m.insert("b".to_string(), json!({}));
        assert!(RuleRef::try_from(&RuleDecl::WithArgs(m)).is_err());
        assert!(RuleRef::try_from(&RuleDecl::WithArgs(BTreeMap::new())).is_err());
    }

    #[test]
    fn from_args_not_object() {
        let mut m = BTreeMap::new();
        m.insert("contains".to_string(), json!(["a"]));
        assert!(matches!(
            RuleRef::try_from(&RuleDecl::WithArgs(m)),
            Err(Error::Config(_))
        ));
    }
}
