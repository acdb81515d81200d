//! Flag types attached to type AST nodes.

bitflags::bitflags! {
    /// Flags for AST nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        const NONE        = 0;
        /// The node does not correspond to text in the type expression
        /// (a defaulted `any`, a positional parameter name, an implied `void`).
        const SYNTHESIZED = 1 << 0;
        /// The node replaces input that could not be resolved.
        const RECOVERED   = 1 << 1;
    }
}

bitflags::bitflags! {
    /// Hints for the printer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EmitFlags: u32 {
        const NONE        = 0;
        /// Print a type literal on a single line.
        const SINGLE_LINE = 1 << 0;
    }
}
