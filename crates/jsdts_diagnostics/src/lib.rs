//! jsdts_diagnostics: Diagnostic messages and the reporting capability.
//!
//! Resolving a documentation type expression never fails. Every repair the
//! resolver makes (substituting `any`, forcing a `string` map key, and so on)
//! is reported as a [`Diagnostic`] through a [`DiagnosticSink`] supplied by
//! the caller. Tests collect diagnostics with [`DiagnosticCollection`]; tools
//! forward them to `tracing` with [`TracingSink`].

mod sink;

pub use sink::{DiagnosticSink, TracingSink};

use jsdts_core::text::TextSpan;
use std::fmt;

/// A diagnostic message template with a code.
///
/// Every diagnostic is a warning: the resolver always produces a type.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub code: u32,
    /// The message template. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The full type expression being resolved, if any.
    pub source: Option<String>,
    /// The offending fragment within `source`.
    pub span: Option<TextSpan>,
    pub message_text: String,
    pub code: u32,
    /// Extra context such as a dump of the offending subtree. Only attached
    /// when the sink asks for verbose output.
    pub context: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            source: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            context: None,
        }
    }

    /// Create a diagnostic pointing at a fragment of a type expression.
    pub fn with_location(
        source: &str,
        span: TextSpan,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            source: Some(source.to_string()),
            span: Some(span),
            ..Self::new(message, args)
        }
    }

    /// Attach extra context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref source) = self.source {
            write!(f, "'{}'", source)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "warning JSDTS{}: {}", self.code, self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated during resolution.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
    verbose: bool,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection that asks reporters for extra context.
    pub fn verbose() -> Self {
        Self {
            diagnostics: Vec::new(),
            verbose: true,
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Whether any diagnostic carries the given message code.
    pub fn contains_code(&self, message: &DiagnosticMessage) -> bool {
        self.diagnostics.iter().any(|d| d.code == message.code)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

impl DiagnosticSink for DiagnosticCollection {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.add(diagnostic);
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $msg:expr) => {
            DiagnosticMessage { code: $code, message: $msg }
        };
    }

    // ========================================================================
    // Tree building (1000-1099)
    // ========================================================================
    pub const UNBALANCED_BRACKET: DiagnosticMessage = diag!(1001, "Unable to find a matching '{1}' for '{0}' in '{2}', defaulting to 'any'.");
    pub const STRAY_BRACKET: DiagnosticMessage = diag!(1002, "Unexpected '{0}' in '{1}', ignoring it.");
    pub const NESTING_TOO_DEEP: DiagnosticMessage = diag!(1003, "Type expression '{0}' is nested deeper than {1} levels, defaulting to 'any'.");
    pub const OBJECT_MEMBER_WITHOUT_TYPE: DiagnosticMessage = diag!(1004, "Property '{0}' in '{1}' has no type, defaulting to 'any'.");
    pub const EMPTY_MODULE_PATH: DiagnosticMessage = diag!(1005, "Module reference in '{0}' has no path, defaulting to 'any'.");
    pub const EMPTY_PARAMETER_TYPE: DiagnosticMessage = diag!(1006, "Function parameter {0} in '{1}' has no type, defaulting to 'any'.");
    pub const OBJECT_MEMBER_WITHOUT_KEY: DiagnosticMessage = diag!(1007, "Object member '{0}' in '{1}' has no property name, ignoring it.");

    // ========================================================================
    // Tree resolution (1100-1199)
    // ========================================================================
    pub const UNION_WITHOUT_MEMBERS: DiagnosticMessage = diag!(1101, "Union in '{0}' resolved no member types, defaulting to 'any'.");
    pub const OBJECT_VALUE_UNRESOLVED: DiagnosticMessage = diag!(1102, "Unable to resolve the type of property '{0}' in '{1}', defaulting to 'any'.");
    pub const MAP_ARGUMENT_COUNT: DiagnosticMessage = diag!(1103, "Map type '{0}' expects 2 type arguments but got {1}.");
    pub const MAP_KEY_INVALID: DiagnosticMessage = diag!(1104, "Invalid map key type '{0}' in '{1}', keys must be 'string' or 'number'; defaulting to 'string'.");
    pub const MAP_VALUE_MISSING: DiagnosticMessage = diag!(1105, "Map type in '{0}' has no value type, defaulting to 'any'.");
    pub const ARRAY_ELEMENT_MISSING: DiagnosticMessage = diag!(1106, "Array type in '{0}' has no element type, defaulting to 'any'.");
    pub const CLASS_ARGUMENT_MISSING: DiagnosticMessage = diag!(1107, "Class type in '{0}' names no class, defaulting to 'any'.");
    pub const GENERIC_WITHOUT_ARGUMENTS: DiagnosticMessage = diag!(1108, "Generic type '{0}' in '{1}' has no type arguments, defaulting to 'any'.");

    // ========================================================================
    // Name resolution (1200-1299)
    // ========================================================================
    pub const EMPTY_TYPE_NAME: DiagnosticMessage = diag!(1201, "Failed to resolve an empty type name, defaulting to 'any'.");
    pub const TREE_GENERATION_FAILED: DiagnosticMessage = diag!(1202, "Failed to generate a type tree for '{0}', defaulting to 'any'.");
    pub const PARAMETER_WITHOUT_NAME: DiagnosticMessage = diag!(1203, "Parameter {0} has no name, naming it '{1}'.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let text = format_message("Unable to find a matching '{1}' for '{0}' in '{2}'.", &["<", ">", "Array.<string"]);
        assert_eq!(text, "Unable to find a matching '>' for '<' in 'Array.<string'.");
    }

    #[test]
    fn test_display_with_location() {
        let diag = Diagnostic::with_location(
            "Array.<string",
            TextSpan::new(6, 1),
            &messages::UNBALANCED_BRACKET,
            &["<", ">", "Array.<string"],
        );
        assert_eq!(
            diag.to_string(),
            "'Array.<string'(6): warning JSDTS1001: Unable to find a matching '>' for '<' in 'Array.<string', defaulting to 'any'."
        );
    }

    #[test]
    fn test_collection_counts() {
        let mut diags = DiagnosticCollection::new();
        assert!(!diags.is_verbose());
        diags.report(Diagnostic::new(&messages::EMPTY_TYPE_NAME, &[]));
        diags.report(Diagnostic::new(&messages::MAP_VALUE_MISSING, &["Object.<string>"]).with_context("dump"));
        assert_eq!(diags.len(), 2);
        assert!(diags.contains_code(&messages::EMPTY_TYPE_NAME));
        assert!(!diags.contains_code(&messages::UNBALANCED_BRACKET));
        assert_eq!(diags.diagnostics()[1].context.as_deref(), Some("dump"));
        assert!(DiagnosticCollection::verbose().is_verbose());
    }
}
