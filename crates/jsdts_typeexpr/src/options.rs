//! Resolution options.

/// Deepest bracket nesting the tree builder descends into before giving up
/// on the rest of an expression.
pub const DEFAULT_MAX_NESTING_DEPTH: u32 = 200;

/// Options shared by the tree builder and the resolvers.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub max_nesting_depth: u32,
    /// Prefix for the names of positional function parameters (`arg0`, ...).
    pub positional_prefix: String,
    /// Name of the rest parameter of untyped functions (`...args: any[]`).
    pub rest_parameter_name: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            positional_prefix: "arg".to_string(),
            rest_parameter_name: "args".to_string(),
        }
    }
}

impl ResolveOptions {
    pub fn with_max_nesting_depth(mut self, depth: u32) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Name of the positional parameter at `index`.
    pub fn positional_name(&self, index: usize) -> String {
        format!("{}{}", self.positional_prefix, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ResolveOptions::default();
        assert_eq!(options.max_nesting_depth, 200);
        assert_eq!(options.positional_name(2), "arg2");
        assert_eq!(options.rest_parameter_name, "args");
        assert_eq!(options.with_max_nesting_depth(3).max_nesting_depth, 3);
    }
}
