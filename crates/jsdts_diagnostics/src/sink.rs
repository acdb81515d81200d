//! The reporting capability injected into the resolver.

use crate::Diagnostic;

/// Receives every diagnostic produced while resolving type expressions.
///
/// Reporters check [`is_verbose`](DiagnosticSink::is_verbose) before building
/// expensive context such as subtree dumps.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);

    fn is_verbose(&self) -> bool {
        false
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }

    fn is_verbose(&self) -> bool {
        (**self).is_verbose()
    }
}

/// Forwards diagnostics to `tracing`, counting what it saw.
#[derive(Debug, Default)]
pub struct TracingSink {
    verbose: bool,
    warnings: usize,
}

impl TracingSink {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            ..Self::default()
        }
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        let source = diagnostic.source.as_deref().unwrap_or("");
        self.warnings += 1;
        match diagnostic.context.as_deref().filter(|_| self.verbose) {
            Some(context) => tracing::warn!(
                code = diagnostic.code,
                source,
                context,
                "{}",
                diagnostic.message_text
            ),
            None => tracing::warn!(code = diagnostic.code, source, "{}", diagnostic.message_text),
        }
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages;

    #[test]
    fn test_tracing_sink_counts() {
        let mut sink = TracingSink::new(true);
        assert!(sink.is_verbose());
        sink.report(Diagnostic::new(&messages::EMPTY_TYPE_NAME, &[]));
        sink.report(Diagnostic::new(&messages::TREE_GENERATION_FAILED, &["()"]).with_context("Union (UNION)"));
        assert_eq!(sink.warning_count(), 2);
    }

    #[test]
    fn test_forwarding_through_mut_reference() {
        fn report_into(mut sink: impl DiagnosticSink) {
            sink.report(Diagnostic::new(&messages::EMPTY_TYPE_NAME, &[]));
        }
        let mut diags = crate::DiagnosticCollection::new();
        report_into(&mut diags);
        assert_eq!(diags.len(), 1);
    }
}
