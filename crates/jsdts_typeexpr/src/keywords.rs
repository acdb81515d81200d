//! Keyword type names.

use jsdts_ast::node::{KeywordTypeNode, NodeData, ThisTypeNode, TypeNode};
use jsdts_ast::syntax_kind::SyntaxKind;
use jsdts_core::text::TextRange;

/// The keyword a type name denotes, if any. Matching ignores ASCII case, so
/// `String`, `Boolean` and `Object` name keyword types.
pub fn keyword_kind(name: &str) -> Option<SyntaxKind> {
    let kind = match name.to_ascii_lowercase().as_str() {
        "any" | "*" => SyntaxKind::AnyKeyword,
        "unknown" | "?" => SyntaxKind::UnknownKeyword,
        "number" => SyntaxKind::NumberKeyword,
        "bigint" => SyntaxKind::BigIntKeyword,
        "object" => SyntaxKind::ObjectKeyword,
        "boolean" | "bool" => SyntaxKind::BooleanKeyword,
        "string" => SyntaxKind::StringKeyword,
        "symbol" => SyntaxKind::SymbolKeyword,
        "this" => SyntaxKind::ThisKeyword,
        "void" => SyntaxKind::VoidKeyword,
        "undefined" => SyntaxKind::UndefinedKeyword,
        "null" => SyntaxKind::NullKeyword,
        "never" => SyntaxKind::NeverKeyword,
        _ => return None,
    };
    Some(kind)
}

/// Resolve a keyword type name to its type node.
///
/// Returns `None` for names that are not keywords; those become type
/// references instead.
pub fn resolve_keyword_type<'a>(name: &str, range: TextRange) -> Option<TypeNode<'a>> {
    let kind = keyword_kind(name)?;
    let data = NodeData::new(kind, range);
    Some(match kind {
        SyntaxKind::ThisKeyword => TypeNode::ThisType(ThisTypeNode {
            data: NodeData::new(SyntaxKind::ThisType, range),
        }),
        _ => TypeNode::KeywordType(KeywordTypeNode { data }),
    })
}
