//! String interning for type names.
//!
//! Identifiers, qualifiers and module specifiers produced during resolution
//! are interned so that repeated names (`string`, `Promise`, `arg0`) share
//! storage and compare as integers.

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// A lightweight handle (u32) to an interned string.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl InternedString {
    #[inline]
    pub fn from_spur(spur: Spur) -> Self {
        Self(spur)
    }

    #[inline]
    pub fn as_spur(self) -> Spur {
        self.0
    }
}

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternedString({:?})", self.0)
    }
}

/// Thread-safe string interner.
///
/// Clones share the same storage, so an interner can be handed to several
/// arenas (one per worker thread) while handles stay comparable.
#[derive(Clone)]
pub struct StringInterner {
    rodeo: Arc<ThreadedRodeo>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self {
            rodeo: Arc::new(ThreadedRodeo::new()),
        }
    }

    /// Intern a string, returning the existing handle if already present.
    #[inline]
    pub fn intern(&self, s: &str) -> InternedString {
        InternedString::from_spur(self.rodeo.get_or_intern(s))
    }

    #[inline]
    pub fn resolve(&self, key: InternedString) -> &str {
        self.rodeo.resolve(&key.as_spur())
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_type_names() {
        let interner = StringInterner::new();
        let a = interner.intern("string");
        let b = interner.intern("string");
        let c = interner.intern("number");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(c), "number");
    }

    #[test]
    fn test_clones_share_storage() {
        let interner = StringInterner::new();
        assert!(interner.is_empty());
        let clone = interner.clone();
        let key = clone.intern("Promise");
        assert_eq!(interner.resolve(key), "Promise");
        assert_eq!(interner.len(), 1);
    }
}
