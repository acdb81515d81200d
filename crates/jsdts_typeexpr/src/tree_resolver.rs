//! Lowers a [`TypeTree`] into type AST nodes.
//!
//! Resolution is post-order: every child is resolved before its parent, and
//! the parent's rule then decides how the resolved children are combined.
//! Each child contributes exactly one type node, so the resolved children
//! line up index for index with the tree children.

use crate::factory::NodeFactory;
use crate::options::ResolveOptions;
use crate::tree::{TreeNode, TreeNodeId, TreeNodeKind, TypeTree};
use jsdts_ast::node::{TypeElement, TypeNode};
use jsdts_ast::syntax_kind::SyntaxKind;
use jsdts_core::text::TextRange;
use jsdts_core::ResolutionArena;
use jsdts_diagnostics::{messages, Diagnostic, DiagnosticMessage, DiagnosticSink};

/// Name of the key parameter in map index signatures.
const MAP_KEY_NAME: &str = "key";

/// Qualifier of a module reference without `~Name`.
const DEFAULT_EXPORT: &str = "default";

pub struct TreeResolver<'a, 'd> {
    factory: NodeFactory<'a>,
    sink: &'d mut dyn DiagnosticSink,
    options: ResolveOptions,
}

impl<'a, 'd> TreeResolver<'a, 'd> {
    pub fn new(arena: &'a ResolutionArena, sink: &'d mut dyn DiagnosticSink) -> Self {
        Self {
            factory: NodeFactory::new(arena),
            sink,
            options: ResolveOptions::default(),
        }
    }

    pub fn with_options(mut self, options: &ResolveOptions) -> Self {
        self.options = options.clone();
        self
    }

    /// Resolve a whole tree, starting at its root.
    pub fn resolve_tree(&mut self, tree: &TypeTree) -> &'a TypeNode<'a> {
        let mut out = Vec::with_capacity(1);
        self.resolve_into(tree, tree.root(), &mut out);
        let node = match out.pop() {
            Some(node) => node,
            None => self.factory.recovered_any(tree.root_node().range()),
        };
        self.factory.alloc(node)
    }

    /// Resolve the subtree rooted at `id` and append exactly one type node to
    /// `out`.
    pub fn resolve_into(&mut self, tree: &TypeTree, id: TreeNodeId, out: &mut Vec<TypeNode<'a>>) {
        let node = tree.node(id);
        let mut children = Vec::with_capacity(node.children().len());
        for &child in node.children() {
            self.resolve_into(tree, child, &mut children);
        }

        let range = node.range();
        let resolved = match node.kind() {
            TreeNodeKind::Type => self.factory.type_reference(node.name(), None, range),
            TreeNodeKind::Union => self.resolve_union(tree, id, children),
            TreeNodeKind::Function => self.resolve_function(range, children),
            TreeNodeKind::Tuple => self.factory.tuple_type(children, range),
            TreeNodeKind::Object => self.resolve_object(tree, id, children),
            TreeNodeKind::Generic => self.resolve_generic(tree, id, children),
            TreeNodeKind::Module { qualifier } => {
                let qualifier = qualifier.as_deref().unwrap_or(DEFAULT_EXPORT);
                let arguments = (!children.is_empty()).then_some(children);
                self.factory.import_type(node.name(), qualifier, arguments, range)
            }
        };
        out.push(resolved);
    }

    fn resolve_union(&mut self, tree: &TypeTree, id: TreeNodeId, mut members: Vec<TypeNode<'a>>) -> TypeNode<'a> {
        let range = tree.node(id).range();
        if members.is_empty() {
            self.warn(tree, id, &messages::UNION_WITHOUT_MEMBERS, &[tree.source()]);
            members.push(self.factory.recovered_any(range));
        }
        self.factory.union_type(members, range)
    }

    fn resolve_function(&mut self, range: TextRange, mut children: Vec<TypeNode<'a>>) -> TypeNode<'a> {
        let return_type = children.pop();
        let return_type = match return_type {
            Some(return_type) => return_type,
            None => self.factory.keyword(SyntaxKind::VoidKeyword, TextRange::empty(range.end)),
        };

        let parameters = if children.is_empty() {
            let any = self.factory.keyword(SyntaxKind::AnyKeyword, range);
            vec![self.factory.rest_parameter(&self.options.rest_parameter_name, any, range)]
        } else {
            children
                .into_iter()
                .enumerate()
                .map(|(index, ty)| {
                    let range = ty.data().range;
                    self.factory.parameter(&self.options.positional_name(index), ty, range)
                })
                .collect()
        };
        self.factory.function_type(parameters, return_type, range)
    }

    fn resolve_object(&mut self, tree: &TypeTree, id: TreeNodeId, children: Vec<TypeNode<'a>>) -> TypeNode<'a> {
        let node = tree.node(id);
        let mut values = children.into_iter().map(Some).collect::<Vec<_>>();
        let mut members = Vec::with_capacity(node.children().len() / 2);

        for (pair, keys) in node.children().chunks(2).enumerate() {
            let key = tree.node(keys[0]);
            let value = match values.get_mut(pair * 2 + 1).and_then(Option::take) {
                Some(value) => value,
                None => {
                    self.warn(tree, keys[0], &messages::OBJECT_VALUE_UNRESOLVED, &[key.name(), tree.source()]);
                    self.factory.recovered_any(key.range())
                }
            };
            members.push(self.factory.property_signature(key.name(), value, false, key.range()));
        }
        self.factory.type_literal(members, true, node.range())
    }

    fn resolve_generic(&mut self, tree: &TypeTree, id: TreeNodeId, mut children: Vec<TypeNode<'a>>) -> TypeNode<'a> {
        let node = tree.node(id);
        let range = node.range();
        let name = node.name();

        if name.eq_ignore_ascii_case("object") {
            return self.resolve_map(tree, id, children);
        }

        if name.eq_ignore_ascii_case("array") {
            let element = match children.into_iter().next() {
                Some(element) => element,
                None => {
                    self.warn(tree, id, &messages::ARRAY_ELEMENT_MISSING, &[tree.source()]);
                    self.factory.recovered_any(range)
                }
            };
            return self.factory.array_type(element, range);
        }

        if name.eq_ignore_ascii_case("class") {
            // Only the class name survives; the resolved argument is dropped.
            return match tree.children(id).next() {
                Some(class) => self.factory.type_query(class.name(), class.range()),
                None => {
                    self.warn(tree, id, &messages::CLASS_ARGUMENT_MISSING, &[tree.source()]);
                    self.factory.recovered_any(range)
                }
            };
        }

        if children.is_empty() {
            self.warn(tree, id, &messages::GENERIC_WITHOUT_ARGUMENTS, &[name, tree.source()]);
            children.push(self.factory.recovered_any(range));
        } else if name.eq_ignore_ascii_case("promise") {
            children.truncate(1);
        }
        self.factory.type_reference(name, Some(children), range)
    }

    /// `Object.<K, V>` becomes `{ [key: K]: V; }`.
    fn resolve_map(&mut self, tree: &TypeTree, id: TreeNodeId, children: Vec<TypeNode<'a>>) -> TypeNode<'a> {
        let node = tree.node(id);
        let range = node.range();
        if children.len() != 2 {
            let count = children.len().to_string();
            self.warn(tree, id, &messages::MAP_ARGUMENT_COUNT, &[range.text(tree.source()), &count]);
        }

        let key_type = self.resolve_map_key(tree, id, tree.children(id).next());
        let value_type = match children.into_iter().nth(1) {
            Some(value) => value,
            None => {
                self.warn(tree, id, &messages::MAP_VALUE_MISSING, &[tree.source()]);
                self.factory.recovered_any(range)
            }
        };

        let signature: TypeElement<'a> = self.factory.index_signature(MAP_KEY_NAME, key_type, value_type, range);
        self.factory.type_literal(vec![signature], true, range)
    }

    fn resolve_map_key(&mut self, tree: &TypeTree, id: TreeNodeId, key: Option<&TreeNode>) -> TypeNode<'a> {
        let kind = match key {
            Some(key) if key.kind() == &TreeNodeKind::Type && key.name().eq_ignore_ascii_case("string") => {
                Some(SyntaxKind::StringKeyword)
            }
            Some(key) if key.kind() == &TreeNodeKind::Type && key.name().eq_ignore_ascii_case("number") => {
                Some(SyntaxKind::NumberKeyword)
            }
            _ => None,
        };
        let range = key.map_or(tree.node(id).range(), TreeNode::range);
        match kind {
            Some(kind) => self.factory.keyword(kind, range),
            None => {
                let key_text = key.map_or("", |key| key.range().text(tree.source()));
                self.warn(tree, id, &messages::MAP_KEY_INVALID, &[key_text, tree.source()]);
                self.factory.keyword(SyntaxKind::StringKeyword, range)
            }
        }
    }

    fn warn(&mut self, tree: &TypeTree, id: TreeNodeId, message: &DiagnosticMessage, args: &[&str]) {
        let range = tree.node(id).range();
        let mut diagnostic = Diagnostic::with_location(tree.source(), range.to_span(), message, args);
        if self.sink.is_verbose() {
            diagnostic = diagnostic.with_context(format!("{}\n{}", tree.describe(id), tree.dump(id).trim_end()));
        }
        self.sink.report(diagnostic);
    }
}
