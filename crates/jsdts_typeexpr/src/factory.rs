//! Construction of type nodes in a [`ResolutionArena`].

use jsdts_ast::node::*;
use jsdts_ast::syntax_kind::SyntaxKind;
use jsdts_ast::types::{EmitFlags, NodeFlags};
use jsdts_ast::utilities::{is_identifier_text, needs_parentheses_in_array, needs_parentheses_in_union};
use jsdts_core::text::TextRange;
use jsdts_core::ResolutionArena;

/// Creates type nodes whose children live in `arena`.
///
/// Every constructor returns the node by value; children are moved into the
/// arena. Array element and union member types are parenthesized here, so
/// callers never build a tree the printer would render ambiguously.
#[derive(Clone, Copy)]
pub struct NodeFactory<'a> {
    arena: &'a ResolutionArena,
}

impl<'a> NodeFactory<'a> {
    pub fn new(arena: &'a ResolutionArena) -> Self {
        Self { arena }
    }

    pub fn arena(&self) -> &'a ResolutionArena {
        self.arena
    }

    pub fn alloc(&self, node: TypeNode<'a>) -> &'a TypeNode<'a> {
        self.arena.alloc(node)
    }

    pub fn alloc_list<T>(&self, nodes: Vec<T>) -> NodeList<'a, T> {
        self.arena.alloc_vec(nodes)
    }

    // ========================================================================
    // Names
    // ========================================================================

    pub fn identifier(&self, text: &str, range: TextRange) -> Identifier {
        Identifier {
            data: NodeData::new(SyntaxKind::Identifier, range),
            text: self.arena.intern(text),
        }
    }

    pub fn string_literal(&self, text: &str, range: TextRange) -> StringLiteral {
        StringLiteral {
            data: NodeData::new(SyntaxKind::StringLiteral, range),
            text: self.arena.intern(text),
            is_single_quote: false,
        }
    }

    /// `a.b.c` becomes a chain of qualified names; anything else, including
    /// names with empty dotted segments, stays a single identifier.
    pub fn entity_name(&self, name: &str, range: TextRange) -> EntityName<'a> {
        let mut segments = name.split('.');
        let first = segments.next().unwrap_or_default();
        if !name.contains('.') || name.split('.').any(str::is_empty) {
            return EntityName::Identifier(self.identifier(name, range));
        }

        let mut entity = EntityName::Identifier(self.identifier(first, range));
        for segment in segments {
            let qualified = QualifiedName {
                data: NodeData::new(SyntaxKind::QualifiedName, range),
                left: entity,
                right: self.identifier(segment, range),
            };
            entity = EntityName::QualifiedName(self.arena.alloc(qualified));
        }
        entity
    }

    /// An identifier when `name` is a valid identifier, otherwise a quoted
    /// string literal.
    pub fn property_name(&self, name: &str, range: TextRange) -> PropertyName {
        if is_identifier_text(name) {
            PropertyName::Identifier(self.identifier(name, range))
        } else {
            PropertyName::StringLiteral(self.string_literal(name, range))
        }
    }

    // ========================================================================
    // Type nodes
    // ========================================================================

    pub fn keyword(&self, kind: SyntaxKind, range: TextRange) -> TypeNode<'a> {
        debug_assert!(kind.is_keyword_type());
        TypeNode::KeywordType(KeywordTypeNode {
            data: NodeData::new(kind, range),
        })
    }

    /// An `any` that stands in for input which could not be resolved.
    pub fn recovered_any(&self, range: TextRange) -> TypeNode<'a> {
        TypeNode::KeywordType(KeywordTypeNode {
            data: NodeData::synthesized(SyntaxKind::AnyKeyword, range).with_flags(NodeFlags::RECOVERED),
        })
    }

    pub fn type_reference(
        &self,
        name: &str,
        type_arguments: Option<Vec<TypeNode<'a>>>,
        range: TextRange,
    ) -> TypeNode<'a> {
        TypeNode::TypeReference(TypeReferenceNode {
            data: NodeData::new(SyntaxKind::TypeReference, range),
            type_name: self.entity_name(name, range),
            type_arguments: type_arguments.map(|args| self.alloc_list(args)),
        })
    }

    /// `typeof name`.
    pub fn type_query(&self, name: &str, range: TextRange) -> TypeNode<'a> {
        TypeNode::TypeQuery(TypeQueryNode {
            data: NodeData::new(SyntaxKind::TypeQuery, range),
            expr_name: self.entity_name(name, range),
        })
    }

    pub fn parenthesized(&self, node: TypeNode<'a>) -> TypeNode<'a> {
        let range = node.data().range;
        TypeNode::ParenthesizedType(ParenthesizedTypeNode {
            data: NodeData::synthesized(SyntaxKind::ParenthesizedType, range),
            type_node: self.alloc(node),
        })
    }

    pub fn array_type(&self, element: TypeNode<'a>, range: TextRange) -> TypeNode<'a> {
        let element = if needs_parentheses_in_array(element.kind()) {
            self.parenthesized(element)
        } else {
            element
        };
        TypeNode::ArrayType(ArrayTypeNode {
            data: NodeData::new(SyntaxKind::ArrayType, range),
            element_type: self.alloc(element),
        })
    }

    pub fn union_type(&self, members: Vec<TypeNode<'a>>, range: TextRange) -> TypeNode<'a> {
        let members = members
            .into_iter()
            .map(|member| {
                if needs_parentheses_in_union(member.kind()) {
                    self.parenthesized(member)
                } else {
                    member
                }
            })
            .collect();
        TypeNode::UnionType(UnionTypeNode {
            data: NodeData::new(SyntaxKind::UnionType, range),
            types: self.alloc_list(members),
        })
    }

    pub fn tuple_type(&self, elements: Vec<TypeNode<'a>>, range: TextRange) -> TypeNode<'a> {
        TypeNode::TupleType(TupleTypeNode {
            data: NodeData::new(SyntaxKind::TupleType, range),
            elements: self.alloc_list(elements),
        })
    }

    pub fn function_type(
        &self,
        parameters: Vec<ParameterDeclaration<'a>>,
        return_type: TypeNode<'a>,
        range: TextRange,
    ) -> TypeNode<'a> {
        TypeNode::FunctionType(FunctionTypeNode {
            data: NodeData::new(SyntaxKind::FunctionType, range),
            parameters: self.alloc_list(parameters),
            return_type: Some(self.alloc(return_type)),
        })
    }

    pub fn type_literal(&self, members: Vec<TypeElement<'a>>, single_line: bool, range: TextRange) -> TypeNode<'a> {
        let mut data = NodeData::new(SyntaxKind::TypeLiteral, range);
        if single_line {
            data = data.with_emit_flags(EmitFlags::SINGLE_LINE);
        }
        TypeNode::TypeLiteral(TypeLiteralNode {
            data,
            members: self.alloc_list(members),
        })
    }

    pub fn literal_type(&self, text: &str, range: TextRange) -> TypeNode<'a> {
        TypeNode::LiteralType(LiteralTypeNode {
            data: NodeData::new(SyntaxKind::LiteralType, range),
            literal: self.string_literal(text, range),
        })
    }

    /// `import("path").qualifier<type_arguments>`.
    pub fn import_type(
        &self,
        path: &str,
        qualifier: &str,
        type_arguments: Option<Vec<TypeNode<'a>>>,
        range: TextRange,
    ) -> TypeNode<'a> {
        TypeNode::ImportType(ImportTypeNode {
            data: NodeData::new(SyntaxKind::ImportType, range),
            argument: self.alloc(self.literal_type(path, range)),
            qualifier: Some(self.entity_name(qualifier, range)),
            type_arguments: type_arguments.map(|args| self.alloc_list(args)),
        })
    }

    // ========================================================================
    // Signature elements
    // ========================================================================

    pub fn parameter(&self, name: &str, ty: TypeNode<'a>, range: TextRange) -> ParameterDeclaration<'a> {
        ParameterDeclaration {
            data: NodeData::new(SyntaxKind::Parameter, range),
            dot_dot_dot_token: None,
            name: self.identifier(name, range),
            question_token: None,
            type_annotation: Some(self.alloc(ty)),
        }
    }

    /// `name?: ty`.
    pub fn optional_parameter(&self, name: &str, ty: TypeNode<'a>, range: TextRange) -> ParameterDeclaration<'a> {
        ParameterDeclaration {
            question_token: Some(Token::new(SyntaxKind::QuestionToken, range)),
            ..self.parameter(name, ty, range)
        }
    }

    /// `...name: element[]`.
    pub fn rest_parameter(&self, name: &str, element: TypeNode<'a>, range: TextRange) -> ParameterDeclaration<'a> {
        ParameterDeclaration {
            dot_dot_dot_token: Some(Token::new(SyntaxKind::DotDotDotToken, range)),
            ..self.parameter(name, self.array_type(element, range), range)
        }
    }

    pub fn property_signature(
        &self,
        name: &str,
        ty: TypeNode<'a>,
        optional: bool,
        range: TextRange,
    ) -> TypeElement<'a> {
        TypeElement::PropertySignature(PropertySignatureNode {
            data: NodeData::new(SyntaxKind::PropertySignature, range),
            name: self.property_name(name, range),
            question_token: optional.then(|| Token::new(SyntaxKind::QuestionToken, range)),
            type_annotation: Some(self.alloc(ty)),
        })
    }

    /// `[key_name: key_type]: value_type`.
    pub fn index_signature(
        &self,
        key_name: &str,
        key_type: TypeNode<'a>,
        value_type: TypeNode<'a>,
        range: TextRange,
    ) -> TypeElement<'a> {
        let parameter = self.parameter(key_name, key_type, range);
        TypeElement::IndexSignature(IndexSignatureNode {
            data: NodeData::new(SyntaxKind::IndexSignature, range),
            parameters: self.alloc_list(vec![parameter]),
            type_annotation: Some(self.alloc(value_type)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_name_qualifies_dotted_names() {
        let arena = ResolutionArena::new();
        let factory = NodeFactory::new(&arena);
        let range = TextRange::default();

        match factory.entity_name("ns.inner.Type", range) {
            EntityName::QualifiedName(q) => {
                assert_eq!(arena.resolve(q.right.text), "Type");
                assert!(matches!(q.left, EntityName::QualifiedName(_)));
            }
            EntityName::Identifier(_) => panic!("expected a qualified name"),
        }
        assert!(matches!(factory.entity_name("Type", range), EntityName::Identifier(_)));
        assert!(matches!(factory.entity_name("a..b", range), EntityName::Identifier(_)));
    }

    #[test]
    fn test_array_of_union_is_parenthesized() {
        let arena = ResolutionArena::new();
        let factory = NodeFactory::new(&arena);
        let range = TextRange::default();
        let union = factory.union_type(
            vec![factory.keyword(SyntaxKind::NumberKeyword, range), factory.keyword(SyntaxKind::StringKeyword, range)],
            range,
        );
        match factory.array_type(union, range) {
            TypeNode::ArrayType(array) => assert_eq!(array.element_type.kind(), SyntaxKind::ParenthesizedType),
            other => panic!("expected an array type, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_property_name_quotes_non_identifiers() {
        let arena = ResolutionArena::new();
        let factory = NodeFactory::new(&arena);
        let range = TextRange::default();
        assert!(matches!(factory.property_name("valid_name", range), PropertyName::Identifier(_)));
        assert!(matches!(factory.property_name("data-id", range), PropertyName::StringLiteral(_)));
    }

    #[test]
    fn test_recovered_any_is_flagged() {
        let arena = ResolutionArena::new();
        let factory = NodeFactory::new(&arena);
        let any = factory.recovered_any(TextRange::default());
        assert!(any.is_keyword(SyntaxKind::AnyKeyword));
        assert!(any.data().flags.contains(NodeFlags::RECOVERED | NodeFlags::SYNTHESIZED));
    }
}
