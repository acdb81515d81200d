//! jsdts_typeexpr: JSDoc type expressions to TypeScript type nodes.
//!
//! Resolution runs in stages:
//! - [`tokenizer`]: split the expression into trimmed tokens.
//! - [`builder`]: build a [`TypeTree`] by recursive descent over the tokens,
//!   using [`brackets`] to find the extent of each nested part.
//! - [`tree_resolver`]: lower the tree to type AST nodes, post-order.
//! - [`keywords`]: map keyword type names directly.
//!
//! [`TypeResolver`] ties the stages together and consults [`DocletHints`]
//! to make bare `Object` and `function` types concrete.

pub mod brackets;
pub mod builder;
pub mod doclet;
pub mod factory;
pub mod keywords;
pub mod options;
pub mod tokenizer;
pub mod tree;
pub mod tree_resolver;
pub mod type_resolver;

pub use builder::{build_tree, TreeBuilder};
pub use doclet::{DocletHints, DocletKind, PropertyHint};
pub use factory::NodeFactory;
pub use keywords::resolve_keyword_type;
pub use options::ResolveOptions;
pub use tree::{TreeNode, TreeNodeId, TreeNodeKind, TypeTree};
pub use tree_resolver::TreeResolver;
pub use type_resolver::TypeResolver;
