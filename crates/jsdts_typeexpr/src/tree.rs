//! The intermediate type tree.
//!
//! Nodes live in a flat vector owned by [`TypeTree`] and refer to each other
//! by [`TreeNodeId`]. Children are ordered; the parent link exists only so
//! diagnostics can describe where in an expression a node sits.

use jsdts_core::text::TextRange;
use std::fmt::{self, Write};

/// Index of a node within its [`TypeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeNodeId(u32);

impl TreeNodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Structural role of a tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNodeKind {
    /// `Name.<...>`; children are the type arguments.
    Generic,
    /// `(a|b)`; children are the members.
    Union,
    /// `function(...)`; children are the parameter types followed by the
    /// return type.
    Function,
    /// Reserved. Nothing produces tuples yet, but the resolver lowers them.
    Tuple,
    /// A named leaf type.
    Type,
    /// `{k: v, ...}`; children alternate between key and value.
    Object,
    /// `module:path~Qualifier`; the node name is the module path and
    /// children are type arguments.
    Module { qualifier: Option<String> },
}

impl TreeNodeKind {
    /// Upper-case label used in tree dumps.
    pub fn label(&self) -> &'static str {
        match self {
            TreeNodeKind::Generic => "GENERIC",
            TreeNodeKind::Union => "UNION",
            TreeNodeKind::Function => "FUNCTION",
            TreeNodeKind::Tuple => "TUPLE",
            TreeNodeKind::Type => "TYPE",
            TreeNodeKind::Object => "OBJECT",
            TreeNodeKind::Module { .. } => "MODULE",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    name: String,
    kind: TreeNodeKind,
    range: TextRange,
    children: Vec<TreeNodeId>,
    parent: Option<TreeNodeId>,
}

impl TreeNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &TreeNodeKind {
        &self.kind
    }

    /// Range of the type expression this node was built from.
    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn children(&self) -> &[TreeNodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<TreeNodeId> {
        self.parent
    }

    /// The `~Qualifier` of a module node.
    pub fn qualifier(&self) -> Option<&str> {
        match &self.kind {
            TreeNodeKind::Module { qualifier } => qualifier.as_deref(),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn header(&self) -> String {
        match self.qualifier() {
            Some(qualifier) => format!("{} ({} ~{})", self.name, self.kind.label(), qualifier),
            None => format!("{} ({})", self.name, self.kind.label()),
        }
    }
}

/// A parsed type expression. Always has a root.
#[derive(Debug, Clone)]
pub struct TypeTree {
    source: String,
    nodes: Vec<TreeNode>,
    root: TreeNodeId,
}

impl TypeTree {
    pub(crate) fn new(source: &str, nodes: Vec<TreeNode>, root: TreeNodeId) -> Self {
        debug_assert!(root.index() < nodes.len());
        Self {
            source: source.to_string(),
            nodes,
            root,
        }
    }

    /// The type expression this tree was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> TreeNodeId {
        self.root
    }

    pub fn root_node(&self) -> &TreeNode {
        self.node(self.root)
    }

    /// # Panics
    ///
    /// Panics if `id` belongs to a different tree.
    pub fn node(&self, id: TreeNodeId) -> &TreeNode {
        &self.nodes[id.index()]
    }

    pub fn children(&self, id: TreeNodeId) -> impl Iterator<Item = &TreeNode> {
        self.node(id).children.iter().map(|&child| self.node(child))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TreeNodeId, &TreeNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (TreeNodeId(i as u32), node))
    }

    /// Render the subtree rooted at `id`, one `name (KIND)` line per node,
    /// indented two spaces per level.
    pub fn dump(&self, id: TreeNodeId) -> String {
        let mut out = String::new();
        self.dump_into(id, 0, &mut out);
        out
    }

    fn dump_into(&self, id: TreeNodeId, depth: usize, out: &mut String) {
        let node = self.node(id);
        let _ = writeln!(out, "{:indent$}{}", "", node.header(), indent = depth * 2);
        for &child in &node.children {
            self.dump_into(child, depth + 1, out);
        }
    }

    /// Describe where `id` sits, from the node itself out to the root, for
    /// attaching to diagnostics.
    pub fn describe(&self, id: TreeNodeId) -> String {
        let mut path = vec![self.node(id).header()];
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            path.push(self.node(parent).header());
            current = self.node(parent).parent;
        }
        path.join(" in ")
    }
}

impl fmt::Display for TypeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump(self.root))
    }
}

/// Append-only node storage used while building a tree.
#[derive(Debug, Default)]
pub(crate) struct NodeStore {
    nodes: Vec<TreeNode>,
}

impl NodeStore {
    pub fn push(
        &mut self,
        name: &str,
        kind: TreeNodeKind,
        range: TextRange,
        parent: Option<TreeNodeId>,
    ) -> TreeNodeId {
        let id = TreeNodeId(self.nodes.len() as u32);
        self.nodes.push(TreeNode {
            name: name.to_string(),
            kind,
            range,
            children: Vec::new(),
            parent,
        });
        id
    }

    pub fn range(&self, id: TreeNodeId) -> TextRange {
        self.nodes[id.index()].range
    }

    pub fn set_children(&mut self, id: TreeNodeId, children: Vec<TreeNodeId>) {
        self.nodes[id.index()].children = children;
    }

    pub fn set_parent(&mut self, id: TreeNodeId, parent: Option<TreeNodeId>) {
        self.nodes[id.index()].parent = parent;
    }

    pub fn into_nodes(self) -> Vec<TreeNode> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TypeTree {
        let mut store = NodeStore::default();
        let array = store.push("Array", TreeNodeKind::Generic, TextRange::new(0, 14), None);
        let string = store.push("string", TreeNodeKind::Type, TextRange::new(7, 13), Some(array));
        store.set_children(array, vec![string]);
        TypeTree::new("Array.<string>", store.into_nodes(), array)
    }

    #[test]
    fn test_tree_navigation() {
        let tree = sample();
        let root = tree.root_node();
        assert_eq!(root.name(), "Array");
        assert_eq!(root.kind(), &TreeNodeKind::Generic);
        assert_eq!(root.children().len(), 1);
        let child = tree.node(root.children()[0]);
        assert_eq!(child.parent(), Some(tree.root()));
        assert!(child.is_leaf());
        assert_eq!(child.range().text(tree.source()), "string");
        assert_eq!(tree.children(tree.root()).count(), 1);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_dump_and_describe() {
        let tree = sample();
        assert_eq!(tree.dump(tree.root()), "Array (GENERIC)\n  string (TYPE)\n");
        assert_eq!(tree.to_string(), tree.dump(tree.root()));
        let (leaf, _) = tree.iter().nth(1).unwrap();
        assert_eq!(tree.describe(leaf), "string (TYPE) in Array (GENERIC)");
    }

    #[test]
    fn test_module_header_shows_qualifier() {
        let mut store = NodeStore::default();
        let module = store.push(
            "foo/bar",
            TreeNodeKind::Module { qualifier: Some("Baz".to_string()) },
            TextRange::new(0, 18),
            None,
        );
        let tree = TypeTree::new("module:foo/bar~Baz", store.into_nodes(), module);
        assert_eq!(tree.root_node().qualifier(), Some("Baz"));
        assert_eq!(tree.dump(module), "foo/bar (MODULE ~Baz)\n");
    }
}
