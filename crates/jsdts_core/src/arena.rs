//! Arena allocation for resolved type nodes.
//!
//! Every target type node produced while resolving a type expression is
//! allocated from a bump arena, and every name it carries is interned. The
//! arena outlives the nodes it hands out; dropping it frees them all at once.

use bumpalo::Bump;

use crate::intern::{InternedString, StringInterner};

/// Bump arena plus string interner backing one or more resolutions.
pub struct ResolutionArena {
    bump: Bump,
    interner: StringInterner,
}

impl ResolutionArena {
    /// Create a new arena with a fresh interner.
    pub fn new() -> Self {
        Self {
            bump: Bump::new(),
            interner: StringInterner::new(),
        }
    }

    /// The interner used for identifier and literal text.
    #[inline]
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Allocate a value in the arena and return a reference to it.
    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    /// Move the contents of a vector into the arena as a slice.
    pub fn alloc_vec<T>(&self, vec: Vec<T>) -> &[T] {
        if vec.is_empty() {
            return &[];
        }
        self.bump.alloc_slice_fill_iter(vec)
    }

    /// Intern a string.
    #[inline]
    pub fn intern(&self, s: &str) -> InternedString {
        self.interner.intern(s)
    }

    /// Resolve an interned string back to its text.
    #[inline]
    pub fn resolve(&self, key: InternedString) -> &str {
        self.interner.resolve(key)
    }
}

impl Default for ResolutionArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_vec_preserves_order() {
        let arena = ResolutionArena::new();
        let slice = arena.alloc_vec(vec![3, 1, 2]);
        assert_eq!(slice, &[3, 1, 2]);
        assert!(arena.alloc_vec::<u32>(Vec::new()).is_empty());
    }

    #[test]
    fn test_intern_through_arena() {
        let arena = ResolutionArena::new();
        let key = arena.intern("Promise");
        assert_eq!(arena.intern("Promise"), key);
        assert_eq!(arena.resolve(key), "Promise");
        assert_eq!(arena.interner().len(), 1);
    }
}
