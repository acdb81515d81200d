//! SyntaxKind enum - the token and node kinds used by the type AST.
//!
//! Discriminants match TypeScript's `SyntaxKind` so that kinds can be
//! compared against tooling that speaks the TypeScript numbering.

/// The kind of a token or node in the type AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // Literals
    StringLiteral = 10,

    // Punctuation
    DotDotDotToken = 25,
    QuestionToken = 57,

    // Identifiers
    Identifier = 79,

    // Reserved words
    NullKeyword = 103,
    ThisKeyword = 107,
    VoidKeyword = 113,

    // Contextual keywords
    AnyKeyword = 130,
    BooleanKeyword = 133,
    NeverKeyword = 143,
    NumberKeyword = 147,
    ObjectKeyword = 148,
    StringKeyword = 151,
    SymbolKeyword = 152,
    UndefinedKeyword = 154,
    UnknownKeyword = 156,
    BigIntKeyword = 160,

    // Names
    QualifiedName = 163,

    // Signature elements
    Parameter = 166,
    PropertySignature = 168,
    IndexSignature = 178,

    // Types
    TypeReference = 180,
    FunctionType = 181,
    TypeQuery = 183,
    TypeLiteral = 184,
    ArrayType = 185,
    TupleType = 186,
    UnionType = 189,
    ParenthesizedType = 193,
    ThisType = 194,
    LiteralType = 198,
    ImportType = 202,
}

impl SyntaxKind {
    /// Whether this kind is a keyword usable as a keyword type node.
    #[inline]
    pub fn is_keyword_type(self) -> bool {
        self.keyword_text().is_some() && self != SyntaxKind::ThisKeyword
    }

    /// The source text of a keyword kind.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::AnyKeyword => Some("any"),
            SyntaxKind::UnknownKeyword => Some("unknown"),
            SyntaxKind::NumberKeyword => Some("number"),
            SyntaxKind::BigIntKeyword => Some("bigint"),
            SyntaxKind::ObjectKeyword => Some("object"),
            SyntaxKind::BooleanKeyword => Some("boolean"),
            SyntaxKind::StringKeyword => Some("string"),
            SyntaxKind::SymbolKeyword => Some("symbol"),
            SyntaxKind::ThisKeyword => Some("this"),
            SyntaxKind::VoidKeyword => Some("void"),
            SyntaxKind::UndefinedKeyword => Some("undefined"),
            SyntaxKind::NullKeyword => Some("null"),
            SyntaxKind::NeverKeyword => Some("never"),
            _ => None,
        }
    }
}
