//! Builds a [`TypeTree`] from the tokens of a type expression.
//!
//! The builder is a recursive descent over token slices. Each nested bracket
//! pair becomes one recursive call on the tokens strictly between the
//! brackets. Malformed input never aborts the build: the offending part is
//! replaced by an `any` leaf and a warning is reported to the sink.

use crate::brackets::{find_matching_bracket, split_top_level, term_end, Bracket};
use crate::options::{ResolveOptions, DEFAULT_MAX_NESTING_DEPTH};
use crate::tokenizer::{tokenize, Token};
use crate::tree::{NodeStore, TreeNodeId, TreeNodeKind, TypeTree};
use jsdts_core::text::TextRange;
use jsdts_diagnostics::{messages, Diagnostic, DiagnosticMessage, DiagnosticSink};

/// Build the type tree of `source` with default options.
///
/// Returns `None` when the expression contains no type at all, e.g. when it
/// is empty or consists only of separators.
pub fn build_tree(source: &str, sink: &mut dyn DiagnosticSink) -> Option<TypeTree> {
    TreeBuilder::new(source, sink).build()
}

pub struct TreeBuilder<'s, 'd> {
    source: &'s str,
    store: NodeStore,
    sink: &'d mut dyn DiagnosticSink,
    max_depth: u32,
    depth: u32,
}

impl<'s, 'd> TreeBuilder<'s, 'd> {
    pub fn new(source: &'s str, sink: &'d mut dyn DiagnosticSink) -> Self {
        Self {
            source,
            store: NodeStore::default(),
            sink,
            max_depth: DEFAULT_MAX_NESTING_DEPTH,
            depth: 0,
        }
    }

    pub fn with_options(mut self, options: &ResolveOptions) -> Self {
        self.max_depth = options.max_nesting_depth;
        self
    }

    pub fn build(mut self) -> Option<TypeTree> {
        let tokens = tokenize(self.source);
        tracing::trace!(source = self.source, tokens = tokens.len(), "building type tree");
        let root = self.parse_term(&tokens, None)?;
        Some(TypeTree::new(self.source, self.store.into_nodes(), root))
    }

    /// Parse a span that denotes a single type. Several top-level types in
    /// the span are joined into a synthesized union.
    fn parse_term(&mut self, tokens: &[Token<'s>], parent: Option<TreeNodeId>) -> Option<TreeNodeId> {
        let mut nodes = Vec::new();
        self.parse_into(tokens, parent, &mut nodes);
        match nodes.len() {
            0 => None,
            1 => Some(nodes[0]),
            _ => {
                let range = self.store.range(nodes[0]).cover(self.store.range(nodes[nodes.len() - 1]));
                let union = self.store.push("Union", TreeNodeKind::Union, range, parent);
                for &node in &nodes {
                    self.store.set_parent(node, Some(union));
                }
                self.store.set_children(union, nodes);
                Some(union)
            }
        }
    }

    /// Parse every type in `tokens`, appending the resulting nodes to `out`
    /// in source order.
    fn parse_into(&mut self, tokens: &[Token<'s>], parent: Option<TreeNodeId>, out: &mut Vec<TreeNodeId>) {
        if self.depth >= self.max_depth {
            let range = span_of(tokens);
            let limit = self.max_depth.to_string();
            self.warn(&messages::NESTING_TOO_DEEP, range, &[self.source, &limit]);
            out.push(self.any_leaf(range, parent));
            return;
        }

        self.depth += 1;
        let mut i = 0;
        while i < tokens.len() {
            i = self.parse_one(tokens, i, parent, out);
        }
        self.depth -= 1;
    }

    /// Parse the construct starting at `tokens[i]` and return the index of
    /// the first token after it.
    fn parse_one(
        &mut self,
        tokens: &[Token<'s>],
        i: usize,
        parent: Option<TreeNodeId>,
        out: &mut Vec<TreeNodeId>,
    ) -> usize {
        let token = tokens[i];
        let next = tokens.get(i + 1);

        if !token.is_delimiter() && (token.text.ends_with('.') || next.is_some_and(|t| t.is("<"))) {
            return self.parse_generic(tokens, i, parent, out);
        }

        match token.text {
            "(" => self.parse_union(tokens, i, parent, out),
            "{" => self.parse_object(tokens, i, parent, out),
            "|" | "," | ":" => i + 1,
            text if Bracket::from_open(text).is_some() || Bracket::from_close(text).is_some() => {
                self.warn(&messages::STRAY_BRACKET, token.range, &[text, self.source]);
                i + 1
            }
            text if text.eq_ignore_ascii_case("function") && next.is_some_and(|t| t.is("(")) => {
                self.parse_function(tokens, i, parent, out)
            }
            text if text.eq_ignore_ascii_case("module") && next.is_some_and(|t| t.is(":")) => {
                self.parse_module(tokens, i, parent, out)
            }
            text => {
                out.push(self.store.push(basic_type_name(text), TreeNodeKind::Type, token.range, parent));
                i + 1
            }
        }
    }

    fn parse_generic(
        &mut self,
        tokens: &[Token<'s>],
        i: usize,
        parent: Option<TreeNodeId>,
        out: &mut Vec<TreeNodeId>,
    ) -> usize {
        let token = tokens[i];
        let close = match tokens.get(i + 1) {
            Some(open) if open.is("<") => find_matching_bracket(tokens, i + 1, Bracket::Angle),
            _ => None,
        };
        let Some(close) = close else {
            return self.recover_unbalanced(tokens, i, Bracket::Angle, parent, out);
        };

        let name = token.text.strip_suffix('.').unwrap_or(token.text).trim_end();
        let range = token.range.cover(tokens[close].range);
        let node = self.store.push(name, TreeNodeKind::Generic, range, parent);
        let mut children = Vec::new();
        self.parse_into(&tokens[i + 2..close], Some(node), &mut children);
        self.store.set_children(node, children);
        out.push(node);
        close + 1
    }

    fn parse_union(
        &mut self,
        tokens: &[Token<'s>],
        i: usize,
        parent: Option<TreeNodeId>,
        out: &mut Vec<TreeNodeId>,
    ) -> usize {
        let Some(close) = find_matching_bracket(tokens, i, Bracket::Paren) else {
            return self.recover_unbalanced(tokens, i, Bracket::Paren, parent, out);
        };

        let range = tokens[i].range.cover(tokens[close].range);
        let node = self.store.push("Union", TreeNodeKind::Union, range, parent);
        let mut children = Vec::new();
        self.parse_into(&tokens[i + 1..close], Some(node), &mut children);
        self.store.set_children(node, children);
        out.push(node);
        close + 1
    }

    fn parse_object(
        &mut self,
        tokens: &[Token<'s>],
        i: usize,
        parent: Option<TreeNodeId>,
        out: &mut Vec<TreeNodeId>,
    ) -> usize {
        let Some(close) = find_matching_bracket(tokens, i, Bracket::Brace) else {
            return self.recover_unbalanced(tokens, i, Bracket::Brace, parent, out);
        };

        let range = tokens[i].range.cover(tokens[close].range);
        let node = self.store.push("Object", TreeNodeKind::Object, range, parent);
        let mut children = Vec::new();
        for member in split_top_level(&tokens[i + 1..close], ",") {
            self.parse_object_member(member, node, &mut children);
        }
        self.store.set_children(node, children);
        out.push(node);
        close + 1
    }

    /// Append the key and value nodes of one `key: value` member.
    fn parse_object_member(&mut self, member: &[Token<'s>], object: TreeNodeId, out: &mut Vec<TreeNodeId>) {
        let key = member[0];
        if key.is_delimiter() {
            let range = span_of(member);
            self.warn(&messages::OBJECT_MEMBER_WITHOUT_KEY, range, &[range.text(self.source), self.source]);
            return;
        }
        out.push(self.store.push(key.text, TreeNodeKind::Type, key.range, Some(object)));

        let value_tokens = match member.get(1) {
            Some(colon) if colon.is(":") => &member[2..],
            _ => &member[1..],
        };
        let value = match self.parse_term(value_tokens, Some(object)) {
            Some(value) => value,
            None => {
                self.warn(&messages::OBJECT_MEMBER_WITHOUT_TYPE, key.range, &[key.text, self.source]);
                self.any_leaf(TextRange::empty(key.range.end), Some(object))
            }
        };
        out.push(value);
    }

    fn parse_function(
        &mut self,
        tokens: &[Token<'s>],
        i: usize,
        parent: Option<TreeNodeId>,
        out: &mut Vec<TreeNodeId>,
    ) -> usize {
        let Some(close) = find_matching_bracket(tokens, i + 1, Bracket::Paren) else {
            return self.recover_unbalanced(tokens, i, Bracket::Paren, parent, out);
        };

        let return_span = match tokens.get(close + 1) {
            Some(colon) if colon.is(":") => Some(close + 2..term_end(tokens, close + 2)),
            _ => None,
        };
        let end = return_span.as_ref().map_or(close + 1, |span| span.end.max(close + 2));
        let range = tokens[i].range.cover(tokens[end - 1].range);
        let node = self.store.push(tokens[i].text, TreeNodeKind::Function, range, parent);

        let mut children = Vec::new();
        for (index, param) in split_top_level(&tokens[i + 2..close], ",").into_iter().enumerate() {
            let param_type = strip_parameter_label(param);
            match self.parse_term(param_type, Some(node)) {
                Some(child) => children.push(child),
                None => {
                    let range = span_of(param);
                    self.warn(&messages::EMPTY_PARAMETER_TYPE, range, &[&index.to_string(), self.source]);
                    children.push(self.any_leaf(range, Some(node)));
                }
            }
        }

        let return_type = return_span.and_then(|span| self.parse_term(&tokens[span], Some(node)));
        let return_type = match return_type {
            Some(return_type) => return_type,
            None => {
                let range = TextRange::empty(tokens[end - 1].range.end);
                self.store.push("void", TreeNodeKind::Type, range, Some(node))
            }
        };
        children.push(return_type);

        self.store.set_children(node, children);
        out.push(node);
        end
    }

    /// `module:path~Qualifier.<args>`. The module reference consumes the rest
    /// of the span.
    fn parse_module(
        &mut self,
        tokens: &[Token<'s>],
        i: usize,
        parent: Option<TreeNodeId>,
        out: &mut Vec<TreeNodeId>,
    ) -> usize {
        let range = span_of(&tokens[i..]);
        let rest = &tokens[i + 2..];
        let generic_start = rest.iter().position(|t| t.is("<")).map(|pos| i + 2 + pos);
        let path_tokens = &tokens[i + 2..generic_start.unwrap_or(tokens.len())];
        let reference: String = path_tokens.iter().map(|t| t.text).collect();

        let (path, qualifier) = match reference.split_once('~') {
            Some((path, qualifier)) => {
                let qualifier = qualifier.strip_suffix('.').unwrap_or(qualifier);
                (path, (!qualifier.is_empty()).then(|| qualifier.to_string()))
            }
            None => (reference.strip_suffix('.').unwrap_or(&reference), None),
        };
        if path.is_empty() {
            self.warn(&messages::EMPTY_MODULE_PATH, range, &[self.source]);
            out.push(self.any_leaf(range, parent));
            return tokens.len();
        }

        let arguments = match generic_start {
            None => &tokens[tokens.len()..],
            Some(start) => match find_matching_bracket(tokens, start, Bracket::Angle) {
                Some(close) => &tokens[start + 1..close],
                None => return self.recover_unbalanced(tokens, i, Bracket::Angle, parent, out),
            },
        };

        let node = self.store.push(path, TreeNodeKind::Module { qualifier }, range, parent);
        let mut children = Vec::new();
        self.parse_into(arguments, Some(node), &mut children);
        self.store.set_children(node, children);
        out.push(node);
        tokens.len()
    }

    /// Replace everything from `tokens[at]` to the end of the span with an
    /// `any` leaf.
    fn recover_unbalanced(
        &mut self,
        tokens: &[Token<'s>],
        at: usize,
        bracket: Bracket,
        parent: Option<TreeNodeId>,
        out: &mut Vec<TreeNodeId>,
    ) -> usize {
        let range = span_of(&tokens[at..]);
        self.warn(
            &messages::UNBALANCED_BRACKET,
            range,
            &[bracket.open(), bracket.close(), self.source],
        );
        out.push(self.any_leaf(range, parent));
        tokens.len()
    }

    fn any_leaf(&mut self, range: TextRange, parent: Option<TreeNodeId>) -> TreeNodeId {
        self.store.push("any", TreeNodeKind::Type, range, parent)
    }

    fn warn(&mut self, message: &DiagnosticMessage, range: TextRange, args: &[&str]) {
        let mut diagnostic = Diagnostic::with_location(self.source, range.to_span(), message, args);
        if self.sink.is_verbose() {
            diagnostic = diagnostic.with_context(format!("near '{}'", range.text(self.source)));
        }
        self.sink.report(diagnostic);
    }
}

/// Map the JSDoc spellings that have a fixed meaning as bare names.
fn basic_type_name(text: &str) -> &str {
    if text == "*" {
        "any"
    } else if text.eq_ignore_ascii_case("object") {
        "object"
    } else if text.eq_ignore_ascii_case("array") {
        "any[]"
    } else if text.eq_ignore_ascii_case("function") {
        "Function"
    } else {
        text
    }
}

/// Drop a `name:` label from a function parameter, keeping only its type.
fn strip_parameter_label<'t, 's>(param: &'t [Token<'s>]) -> &'t [Token<'s>] {
    match param {
        [label, colon, ..]
            if colon.is(":") && !label.is_delimiter() && !label.text.eq_ignore_ascii_case("module") =>
        {
            &param[2..]
        }
        _ => param,
    }
}

fn span_of(tokens: &[Token<'_>]) -> TextRange {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => first.range.cover(last.range),
        _ => TextRange::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsdts_diagnostics::DiagnosticCollection;

    #[test]
    fn test_basic_type_names() {
        assert_eq!(basic_type_name("*"), "any");
        assert_eq!(basic_type_name("Object"), "object");
        assert_eq!(basic_type_name("array"), "any[]");
        assert_eq!(basic_type_name("function"), "Function");
        assert_eq!(basic_type_name("Foo"), "Foo");
    }

    #[test]
    fn test_strip_parameter_label() {
        let tokens = tokenize("this: Foo");
        assert_eq!(strip_parameter_label(&tokens).len(), 1);
        let tokens = tokenize("module:foo");
        assert_eq!(strip_parameter_label(&tokens).len(), 3);
        let tokens = tokenize("string");
        assert_eq!(strip_parameter_label(&tokens).len(), 1);
    }

    #[test]
    fn test_build_reports_nothing_for_well_formed_input() {
        let mut diagnostics = DiagnosticCollection::new();
        let tree = build_tree("Object.<string, Array.<number>>", &mut diagnostics).unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_verbose_sink_gets_context() {
        let mut diagnostics = DiagnosticCollection::verbose();
        build_tree("Array.<string", &mut diagnostics);
        let diagnostic = &diagnostics.diagnostics()[0];
        assert_eq!(diagnostic.context.as_deref(), Some("near 'Array.<string'"));
    }
}
