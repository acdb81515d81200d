//! jsdts_core: Core utilities shared by the jsdts crates.
//!
//! Provides the resolution arena, string interning and source ranges used
//! by the type-expression resolver and the target type AST.

pub mod arena;
pub mod intern;
pub mod text;

// Re-export commonly used types
pub use arena::ResolutionArena;
pub use intern::{InternedString, StringInterner};
pub use text::{TextRange, TextSpan};
