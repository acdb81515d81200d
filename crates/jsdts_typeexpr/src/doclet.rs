//! Hints a documentation comment carries alongside its type names.
//!
//! A bare `Object` or `function` type is made concrete by the properties,
//! parameters and return types documented next to it. Hints deserialize from
//! the camelCase JSON a documentation extractor produces.

use serde::Deserialize;

/// The kind of the documented symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocletKind {
    #[default]
    Member,
    Typedef,
    Callback,
    Function,
    Class,
    Constant,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocletHints {
    pub kind: DocletKind,
    /// Documented `@property` entries, nested by dotted name.
    pub properties: Vec<PropertyHint>,
    /// Documented `@param` entries, nested by dotted name.
    pub params: Vec<PropertyHint>,
    /// Type names of the `@returns` entry.
    pub returns: Vec<String>,
    /// Type of `this` inside a function, from `@this`.
    pub this_type: Option<String>,
}

impl DocletHints {
    pub fn new(kind: DocletKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_properties(mut self, properties: Vec<PropertyHint>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_params(mut self, params: Vec<PropertyHint>) -> Self {
        self.params = params;
        self
    }

    pub fn with_returns(mut self, returns: &[&str]) -> Self {
        self.returns = returns.iter().map(|name| name.to_string()).collect();
        self
    }

    pub fn with_this_type(mut self, this_type: &str) -> Self {
        self.this_type = Some(this_type.to_string());
        self
    }

    /// Whether a bare `Object` can be replaced by a type literal.
    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    /// Whether a bare `function` can be replaced by a concrete signature.
    pub fn is_callable(&self) -> bool {
        matches!(self.kind, DocletKind::Typedef | DocletKind::Callback | DocletKind::Function)
            && (!self.params.is_empty() || !self.returns.is_empty() || self.this_type.is_some())
    }
}

/// One documented property or parameter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyHint {
    pub name: String,
    #[serde(alias = "type")]
    pub type_names: Vec<String>,
    pub optional: bool,
    pub variadic: bool,
    pub nullable: bool,
    pub default_value: Option<String>,
    /// Nested properties, e.g. `options.timeout` under `options`.
    pub children: Vec<PropertyHint>,
}

impl PropertyHint {
    pub fn new(name: &str, type_names: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            type_names: type_names.iter().map(|name| name.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_default(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn with_children(mut self, children: Vec<PropertyHint>) -> Self {
        self.children = children;
        self
    }

    /// A property with a default value may be omitted.
    pub fn is_optional(&self) -> bool {
        self.optional || self.default_value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callable_requires_signature_hints() {
        let hints = DocletHints::new(DocletKind::Callback);
        assert!(!hints.is_callable());
        let hints = hints.with_returns(&["boolean"]);
        assert!(hints.is_callable());
        let hints = DocletHints::new(DocletKind::Member).with_returns(&["boolean"]);
        assert!(!hints.is_callable());
    }

    #[test]
    fn test_default_value_makes_optional() {
        assert!(!PropertyHint::new("a", &["string"]).is_optional());
        assert!(PropertyHint::new("a", &["string"]).with_default("'x'").is_optional());
        assert!(PropertyHint::new("a", &["string"]).optional().is_optional());
    }
}
