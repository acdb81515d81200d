//! jsdts_ast: The target type AST.
//!
//! Resolved documentation types are expressed as TypeScript type nodes. The
//! node set is the subset of TypeScript's type syntax a declaration emitter
//! needs for documented types: keyword types, references, function types,
//! type literals, arrays, unions, `typeof` queries and `import()` types.

pub mod node;
pub mod syntax_kind;
pub mod types;
pub mod utilities;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;
