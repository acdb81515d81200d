//! Type AST node definitions.
//!
//! Nodes mirror TypeScript's type node interfaces and reference their
//! children through arena-allocated references, so a whole resolved type
//! lives exactly as long as the arena it was built in.

use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use jsdts_core::intern::InternedString;
use jsdts_core::text::TextRange;

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all AST nodes.
#[derive(Debug, Clone, Copy)]
pub struct NodeData {
    pub kind: SyntaxKind,
    /// Range in the type expression this node was resolved from.
    pub range: TextRange,
    pub flags: NodeFlags,
    pub emit_flags: EmitFlags,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            flags: NodeFlags::NONE,
            emit_flags: EmitFlags::NONE,
        }
    }

    /// Data for a node that has no counterpart in the source text.
    pub fn synthesized(kind: SyntaxKind, range: TextRange) -> Self {
        Self {
            flags: NodeFlags::SYNTHESIZED,
            ..Self::new(kind, range)
        }
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_emit_flags(mut self, emit_flags: EmitFlags) -> Self {
        self.emit_flags |= emit_flags;
        self
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

/// An optional arena-allocated node.
pub type OptionalNode<'a, T> = Option<&'a T>;

#[derive(Debug, Clone, Copy)]
pub struct Token {
    pub data: NodeData,
}

impl Token {
    pub fn new(kind: SyntaxKind, range: TextRange) -> Self {
        Self {
            data: NodeData::new(kind, range),
        }
    }
}

// ============================================================================
// Identifiers and literals
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Identifier {
    pub data: NodeData,
    pub text: InternedString,
}

#[derive(Debug, Clone, Copy)]
pub struct StringLiteral {
    pub data: NodeData,
    pub text: InternedString,
    pub is_single_quote: bool,
}

// ============================================================================
// Type Nodes
// ============================================================================

#[derive(Debug)]
pub enum TypeNode<'a> {
    KeywordType(KeywordTypeNode),
    TypeReference(TypeReferenceNode<'a>),
    FunctionType(FunctionTypeNode<'a>),
    TypeQuery(TypeQueryNode<'a>),
    TypeLiteral(TypeLiteralNode<'a>),
    ArrayType(ArrayTypeNode<'a>),
    TupleType(TupleTypeNode<'a>),
    UnionType(UnionTypeNode<'a>),
    ParenthesizedType(ParenthesizedTypeNode<'a>),
    ThisType(ThisTypeNode),
    LiteralType(LiteralTypeNode),
    ImportType(ImportTypeNode<'a>),
}

impl TypeNode<'_> {
    pub fn data(&self) -> &NodeData {
        match self {
            TypeNode::KeywordType(n) => &n.data,
            TypeNode::TypeReference(n) => &n.data,
            TypeNode::FunctionType(n) => &n.data,
            TypeNode::TypeQuery(n) => &n.data,
            TypeNode::TypeLiteral(n) => &n.data,
            TypeNode::ArrayType(n) => &n.data,
            TypeNode::TupleType(n) => &n.data,
            TypeNode::UnionType(n) => &n.data,
            TypeNode::ParenthesizedType(n) => &n.data,
            TypeNode::ThisType(n) => &n.data,
            TypeNode::LiteralType(n) => &n.data,
            TypeNode::ImportType(n) => &n.data,
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    /// Whether this is the keyword type of the given kind, e.g. `any`.
    #[inline]
    pub fn is_keyword(&self, kind: SyntaxKind) -> bool {
        matches!(self, TypeNode::KeywordType(n) if n.data.kind == kind)
    }
}

/// A keyword type; the keyword is `data.kind`.
#[derive(Debug)]
pub struct KeywordTypeNode {
    pub data: NodeData,
}

#[derive(Debug)]
pub struct TypeReferenceNode<'a> {
    pub data: NodeData,
    pub type_name: EntityName<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

#[derive(Debug)]
pub struct FunctionTypeNode<'a> {
    pub data: NodeData,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
}

/// `typeof Name`.
#[derive(Debug)]
pub struct TypeQueryNode<'a> {
    pub data: NodeData,
    pub expr_name: EntityName<'a>,
}

#[derive(Debug)]
pub struct TypeLiteralNode<'a> {
    pub data: NodeData,
    pub members: NodeList<'a, TypeElement<'a>>,
}

#[derive(Debug)]
pub struct ArrayTypeNode<'a> {
    pub data: NodeData,
    pub element_type: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct TupleTypeNode<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct UnionTypeNode<'a> {
    pub data: NodeData,
    pub types: NodeList<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct ParenthesizedTypeNode<'a> {
    pub data: NodeData,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct ThisTypeNode {
    pub data: NodeData,
}

#[derive(Debug)]
pub struct LiteralTypeNode {
    pub data: NodeData,
    pub literal: StringLiteral,
}

/// `import("argument").qualifier<type_arguments>`.
#[derive(Debug)]
pub struct ImportTypeNode<'a> {
    pub data: NodeData,
    pub argument: &'a TypeNode<'a>,
    pub qualifier: Option<EntityName<'a>>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

// ============================================================================
// Signature elements
// ============================================================================

#[derive(Debug)]
pub struct ParameterDeclaration<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: Option<Token>,
    pub name: Identifier,
    pub question_token: Option<Token>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub enum TypeElement<'a> {
    PropertySignature(PropertySignatureNode<'a>),
    IndexSignature(IndexSignatureNode<'a>),
}

#[derive(Debug)]
pub struct PropertySignatureNode<'a> {
    pub data: NodeData,
    pub name: PropertyName,
    pub question_token: Option<Token>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
}

/// `[key: K]: V`.
#[derive(Debug)]
pub struct IndexSignatureNode<'a> {
    pub data: NodeData,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
}

// ============================================================================
// Names
// ============================================================================

#[derive(Debug)]
pub enum EntityName<'a> {
    Identifier(Identifier),
    QualifiedName(&'a QualifiedName<'a>),
}

impl EntityName<'_> {
    pub fn data(&self) -> &NodeData {
        match self {
            EntityName::Identifier(n) => &n.data,
            EntityName::QualifiedName(n) => &n.data,
        }
    }
}

#[derive(Debug)]
pub struct QualifiedName<'a> {
    pub data: NodeData,
    pub left: EntityName<'a>,
    pub right: Identifier,
}

#[derive(Debug, Clone, Copy)]
pub enum PropertyName {
    Identifier(Identifier),
    StringLiteral(StringLiteral),
}
