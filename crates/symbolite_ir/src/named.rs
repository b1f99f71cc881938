//! Name and namespace identity shared by symbols and functions.

use std::fmt;
use std::sync::Arc;

/// Marker rendered for entities without a name.
pub const ANONYMOUS: &str = "<anonymous>";

/// Optional name plus namespace.
///
/// The namespace is empty for user-defined entities and set to a library
/// prefix (`scalar`, `vector`, `symbol`, ...) for library entries. Equality
/// and hashing are structural, so a `Named` can key a substitution map.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Named {
    name: Option<Arc<str>>,
    namespace: Arc<str>,
}

impl Named {
    pub fn new(name: impl Into<Arc<str>>, namespace: impl Into<Arc<str>>) -> Self {
        Named {
            name: Some(name.into()),
            namespace: namespace.into(),
        }
    }

    /// A name in the user namespace.
    pub fn user(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, "")
    }

    pub fn anonymous(namespace: impl Into<Arc<str>>) -> Self {
        Named {
            name: None,
            namespace: namespace.into(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }

    /// Same namespace, new name.
    #[must_use]
    pub fn renamed(&self, name: impl Into<Arc<str>>) -> Self {
        Named {
            name: Some(name.into()),
            namespace: Arc::clone(&self.namespace),
        }
    }
}

impl fmt::Display for Named {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            None => f.write_str(ANONYMOUS),
            Some(name) if self.namespace.is_empty() => f.write_str(name),
            Some(name) => write!(f, "{}.{name}", self.namespace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_display() {
        assert_eq!(Named::new("cos", "scalar").to_string(), "scalar.cos");
        assert_eq!(Named::user("x").to_string(), "x");
        assert_eq!(Named::anonymous("symbol").to_string(), "<anonymous>");
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Named::new("x", ""), Named::user("x"));
        assert_ne!(Named::new("pi", "scalar"), Named::user("pi"));
        assert!(Named::anonymous("").is_anonymous());
    }

    #[test]
    fn test_renamed_keeps_namespace() {
        let named = Named::anonymous("scalar").renamed("tau");
        assert_eq!(named.namespace(), "scalar");
        assert_eq!(named.name(), Some("tau"));
    }
}
