//! Helpers for classifying identifier text and type node kinds.

use crate::syntax_kind::SyntaxKind;
use unicode_xid::UnicodeXID;

fn is_identifier_start(ch: char) -> bool {
    ch == '$' || ch == '_' || UnicodeXID::is_xid_start(ch)
}

fn is_identifier_part(ch: char) -> bool {
    ch == '$' || ch == '\u{200C}' || ch == '\u{200D}' || UnicodeXID::is_xid_continue(ch)
}

/// Whether `text` can be written as a bare identifier (e.g. as a property
/// name) without quoting.
pub fn is_identifier_text(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}

/// Whether a type of this kind must be parenthesized as an array element
/// type, as in `(a | b)[]`.
pub fn needs_parentheses_in_array(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::UnionType | SyntaxKind::FunctionType)
}

/// Whether a type of this kind must be parenthesized as a union member, as
/// in `(() => void) | a`.
pub fn needs_parentheses_in_union(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::FunctionType
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_text() {
        assert!(is_identifier_text("name"));
        assert!(is_identifier_text("$el"));
        assert!(is_identifier_text("_private1"));
        assert!(is_identifier_text("größe"));
        assert!(!is_identifier_text(""));
        assert!(!is_identifier_text("1st"));
        assert!(!is_identifier_text("content-type"));
        assert!(!is_identifier_text("a b"));
    }

    #[test]
    fn test_needs_parentheses() {
        assert!(needs_parentheses_in_array(SyntaxKind::UnionType));
        assert!(needs_parentheses_in_array(SyntaxKind::FunctionType));
        assert!(!needs_parentheses_in_array(SyntaxKind::TypeReference));
        assert!(needs_parentheses_in_union(SyntaxKind::FunctionType));
        assert!(!needs_parentheses_in_union(SyntaxKind::UnionType));
    }
}
