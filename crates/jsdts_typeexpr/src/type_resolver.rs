//! Resolution of documented types, with the help of doclet hints.

use crate::builder::TreeBuilder;
use crate::doclet::{DocletHints, PropertyHint};
use crate::factory::NodeFactory;
use crate::keywords::resolve_keyword_type;
use crate::options::ResolveOptions;
use crate::tree::TypeTree;
use crate::tree_resolver::TreeResolver;
use jsdts_ast::node::{ParameterDeclaration, TypeNode};
use jsdts_ast::syntax_kind::SyntaxKind;
use jsdts_core::text::TextRange;
use jsdts_core::ResolutionArena;
use jsdts_diagnostics::{messages, Diagnostic, DiagnosticSink};

/// Resolves the type names of a documented symbol to type nodes.
///
/// Never fails. Anything that cannot be resolved becomes `any`, and the
/// reason is reported to the sink.
///
/// # Example
/// ```
/// use jsdts_core::ResolutionArena;
/// use jsdts_diagnostics::DiagnosticCollection;
/// use jsdts_typeexpr::TypeResolver;
///
/// let arena = ResolutionArena::new();
/// let mut diagnostics = DiagnosticCollection::new();
/// let mut resolver = TypeResolver::new(&arena, &mut diagnostics);
/// let ty = resolver.resolve_complex_type_name("Array.<string>");
/// assert_eq!(jsdts_printer::print_type(ty, arena.interner()), "string[]");
/// ```
pub struct TypeResolver<'a, 'd> {
    factory: NodeFactory<'a>,
    sink: &'d mut dyn DiagnosticSink,
    options: ResolveOptions,
}

impl<'a, 'd> TypeResolver<'a, 'd> {
    pub fn new(arena: &'a ResolutionArena, sink: &'d mut dyn DiagnosticSink) -> Self {
        Self::with_options(arena, sink, ResolveOptions::default())
    }

    pub fn with_options(arena: &'a ResolutionArena, sink: &'d mut dyn DiagnosticSink, options: ResolveOptions) -> Self {
        Self {
            factory: NodeFactory::new(arena),
            sink,
            options,
        }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolve the list of type names documented for one symbol.
    ///
    /// Several names form a union. An untyped symbol with documented
    /// properties becomes a type literal; without properties it is `any`.
    pub fn resolve_type<S: AsRef<str>>(&mut self, names: &[S], hints: Option<&DocletHints>) -> &'a TypeNode<'a> {
        let node = self.type_node(names, hints);
        self.factory.alloc(node)
    }

    /// Resolve a single type name. Keywords resolve directly; a bare
    /// `Object` or `function` is made concrete from `hints` when they allow.
    pub fn resolve_type_name(&mut self, name: &str, hints: Option<&DocletHints>) -> &'a TypeNode<'a> {
        let node = self.type_name_node(name, hints);
        self.factory.alloc(node)
    }

    /// Resolve an arbitrary type expression through the type tree.
    pub fn resolve_complex_type_name(&mut self, name: &str) -> &'a TypeNode<'a> {
        let node = self.complex_type_node(name);
        self.factory.alloc(node)
    }

    /// Build the intermediate tree of a type expression without resolving it.
    pub fn build_tree(&mut self, name: &str) -> Option<TypeTree> {
        TreeBuilder::new(name, &mut *self.sink)
            .with_options(&self.options)
            .build()
    }

    /// A multi-line type literal with one property per hint.
    pub fn resolve_type_literal(&mut self, properties: &[PropertyHint]) -> &'a TypeNode<'a> {
        let node = self.type_literal_node(properties);
        self.factory.alloc(node)
    }

    /// Parameter declarations for the documented `@this` and `@param` entries.
    pub fn create_function_params(&mut self, hints: &DocletHints) -> Vec<ParameterDeclaration<'a>> {
        let range = TextRange::default();
        let mut params = Vec::with_capacity(hints.params.len() + 1);

        if let Some(this_type) = hints.this_type.as_deref() {
            let ty = self.type_name_node(this_type, None);
            params.push(self.factory.parameter("this", ty, range));
        }

        for (index, param) in hints.params.iter().enumerate() {
            let name = if param.name.trim().is_empty() {
                let name = self.options.positional_name(index);
                let index = index.to_string();
                self.sink
                    .report(Diagnostic::new(&messages::PARAMETER_WITHOUT_NAME, &[&index, &name]));
                name
            } else {
                param.name.clone()
            };

            let ty = self.property_type_node(param);
            let declaration = if param.variadic {
                self.factory.rest_parameter(&name, ty, range)
            } else if param.is_optional() {
                self.factory.optional_parameter(&name, ty, range)
            } else {
                self.factory.parameter(&name, ty, range)
            };
            params.push(declaration);
        }
        params
    }

    /// The signature documented by `@param` and `@returns`.
    pub fn resolve_function_type(&mut self, hints: &DocletHints) -> &'a TypeNode<'a> {
        let node = self.function_type_node(hints);
        self.factory.alloc(node)
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    fn type_node<S: AsRef<str>>(&mut self, names: &[S], hints: Option<&DocletHints>) -> TypeNode<'a> {
        match names {
            [] => match hints.filter(|hints| hints.has_properties()) {
                Some(hints) => self.type_literal_node(&hints.properties),
                None => self.factory.keyword(SyntaxKind::AnyKeyword, TextRange::default()),
            },
            [name] => self.type_name_node(name.as_ref(), hints),
            _ => {
                let members = names
                    .iter()
                    .map(|name| self.type_name_node(name.as_ref(), hints))
                    .collect();
                self.factory.union_type(members, TextRange::default())
            }
        }
    }

    fn type_name_node(&mut self, name: &str, hints: Option<&DocletHints>) -> TypeNode<'a> {
        let trimmed = name.trim();
        let range = TextRange::new(0, name.len() as u32);
        if trimmed.is_empty() {
            self.sink.report(Diagnostic::new(&messages::EMPTY_TYPE_NAME, &[]));
            return self.factory.recovered_any(range);
        }

        if let Some(keyword) = resolve_keyword_type(trimmed, range) {
            if keyword.kind() == SyntaxKind::ObjectKeyword {
                if let Some(hints) = hints.filter(|hints| hints.has_properties()) {
                    return self.type_literal_node(&hints.properties);
                }
            }
            return keyword;
        }

        if trimmed.eq_ignore_ascii_case("function") {
            if let Some(hints) = hints.filter(|hints| hints.is_callable()) {
                return self.function_type_node(hints);
            }
        }

        self.complex_type_node(trimmed)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn complex_type_node(&mut self, name: &str) -> TypeNode<'a> {
        let Some(tree) = self.build_tree(name) else {
            self.sink.report(Diagnostic::new(&messages::TREE_GENERATION_FAILED, &[name]));
            return self.factory.recovered_any(TextRange::new(0, name.len() as u32));
        };

        let mut out = Vec::with_capacity(1);
        TreeResolver::new(self.factory.arena(), &mut *self.sink)
            .with_options(&self.options)
            .resolve_into(&tree, tree.root(), &mut out);
        match out.pop() {
            Some(node) => node,
            None => self.factory.recovered_any(tree.root_node().range()),
        }
    }

    fn type_literal_node(&mut self, properties: &[PropertyHint]) -> TypeNode<'a> {
        let range = TextRange::default();
        let members = properties
            .iter()
            .map(|property| {
                let ty = self.property_type_node(property);
                self.factory
                    .property_signature(&property.name, ty, property.is_optional(), range)
            })
            .collect();
        self.factory.type_literal(members, false, range)
    }

    /// The type of a documented property or parameter. Nested properties
    /// replace the documented type with a literal.
    fn property_type_node(&mut self, property: &PropertyHint) -> TypeNode<'a> {
        let range = TextRange::default();
        let ty = if property.children.is_empty() {
            self.type_node(&property.type_names, None)
        } else {
            let literal = self.type_literal_node(&property.children);
            if is_array_type_name(&property.type_names) {
                self.factory.array_type(literal, range)
            } else {
                literal
            }
        };

        if property.nullable {
            let null = self.factory.keyword(SyntaxKind::NullKeyword, range);
            self.factory.union_type(vec![ty, null], range)
        } else {
            ty
        }
    }

    fn function_type_node(&mut self, hints: &DocletHints) -> TypeNode<'a> {
        let range = TextRange::default();
        let params = self.create_function_params(hints);
        let return_type = if hints.returns.is_empty() {
            self.factory.keyword(SyntaxKind::VoidKeyword, range)
        } else {
            self.type_node(&hints.returns, None)
        };
        self.factory.function_type(params, return_type, range)
    }
}

/// Whether the documented type of a property with nested properties is an
/// array of objects, e.g. `Object[]` or `Array.<Object>`.
fn is_array_type_name(names: &[String]) -> bool {
    let [name] = names else {
        return false;
    };
    let name = name.trim();
    name.ends_with("[]")
        || name.eq_ignore_ascii_case("array")
        || name.get(..6).is_some_and(|prefix| prefix.eq_ignore_ascii_case("array<"))
        || name.get(..7).is_some_and(|prefix| prefix.eq_ignore_ascii_case("array.<"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_array_type_name() {
        assert!(is_array_type_name(&["Object[]".to_string()]));
        assert!(is_array_type_name(&["Array.<Object>".to_string()]));
        assert!(is_array_type_name(&["array".to_string()]));
        assert!(!is_array_type_name(&["Object".to_string()]));
        assert!(!is_array_type_name(&["Object[]".to_string(), "null".to_string()]));
        assert!(!is_array_type_name(&[]));
    }
}
