//! Tree resolver integration tests.
//!
//! Builds and resolves type expressions, then checks the printed
//! TypeScript type and the repairs reported along the way.

use jsdts_ast::{NodeFlags, SyntaxKind};
use jsdts_core::ResolutionArena;
use jsdts_diagnostics::{messages, DiagnosticCollection, DiagnosticMessage};
use jsdts_printer::print_type;
use jsdts_typeexpr::{build_tree, ResolveOptions, TreeResolver};

/// Helper: resolve an expression and print the result.
fn resolve(source: &str) -> (String, DiagnosticCollection) {
    resolve_with(source, DiagnosticCollection::new(), &ResolveOptions::default())
}

fn resolve_with(source: &str, mut diagnostics: DiagnosticCollection, options: &ResolveOptions) -> (String, DiagnosticCollection) {
    let arena = ResolutionArena::new();
    let tree = build_tree(source, &mut diagnostics).expect("tree");
    let ty = TreeResolver::new(&arena, &mut diagnostics)
        .with_options(options)
        .resolve_tree(&tree);
    (print_type(ty, arena.interner()), diagnostics)
}

/// Helper: assert that a well-formed expression prints as expected.
fn assert_resolves(source: &str, expected: &str) {
    let (printed, diagnostics) = resolve(source);
    assert_eq!(printed, expected, "source: {}", source);
    assert!(diagnostics.is_empty(), "unexpected diagnostics for {}: {:?}", source, diagnostics.diagnostics());
}

/// Helper: assert the printed repair and the warning that reports it.
fn assert_repairs(source: &str, expected: &str, warning: &DiagnosticMessage) {
    let (printed, diagnostics) = resolve(source);
    assert_eq!(printed, expected, "source: {}", source);
    assert!(diagnostics.contains_code(warning), "missing warning {} for {}", warning.code, source);
}

// ============================================================================
// Leaves
// ============================================================================

#[test]
fn test_resolve_leaf_names() {
    assert_resolves("string", "string");
    assert_resolves("Foo", "Foo");
    assert_resolves("*", "any");
    assert_resolves("Array", "any[]");
    assert_resolves("function", "Function");
}

#[test]
fn test_resolve_leaf_is_verbatim_reference() {
    let arena = ResolutionArena::new();
    let mut diagnostics = DiagnosticCollection::new();
    let tree = build_tree("string", &mut diagnostics).unwrap();
    let ty = TreeResolver::new(&arena, &mut diagnostics).resolve_tree(&tree);
    assert_eq!(ty.kind(), SyntaxKind::TypeReference);
}

#[test]
fn test_resolve_dotted_name() {
    assert_resolves("ns.inner.Type", "ns.inner.Type");
    assert_resolves("ns.Type.<string>", "ns.Type<string>");
}

// ============================================================================
// Generics
// ============================================================================

#[test]
fn test_resolve_array() {
    assert_resolves("Array.<string>", "string[]");
    assert_resolves("Array.<Array.<number>>", "number[][]");
}

#[test]
fn test_resolve_array_parenthesizes_elements() {
    assert_resolves("Array.<(number|string)>", "(number | string)[]");
    assert_resolves("Array.<function(string): void>", "((arg0: string) => void)[]");
}

#[test]
fn test_resolve_map() {
    assert_resolves("Object.<string, number>", "{ [key: string]: number; }");
    assert_resolves("Object.<number, Foo>", "{ [key: number]: Foo; }");
}

#[test]
fn test_resolve_map_with_invalid_key() {
    assert_repairs("Object.<Foo, Bar>", "{ [key: string]: Bar; }", &messages::MAP_KEY_INVALID);
}

#[test]
fn test_resolve_map_with_one_argument() {
    let (printed, diagnostics) = resolve("Object.<string>");
    assert_eq!(printed, "{ [key: string]: any; }");
    assert!(diagnostics.contains_code(&messages::MAP_ARGUMENT_COUNT));
    assert!(diagnostics.contains_code(&messages::MAP_VALUE_MISSING));
}

#[test]
fn test_resolve_class() {
    assert_resolves("Class.<Foo>", "typeof Foo");
    assert_resolves("Class.<ns.Foo>", "typeof ns.Foo");
}

#[test]
fn test_resolve_generic_reference() {
    assert_resolves("Map.<string, Array.<number>>", "Map<string, number[]>");
}

#[test]
fn test_resolve_promise_keeps_first_argument() {
    assert_resolves("Promise.<number, Error>", "Promise<number>");
}

#[test]
fn test_resolve_empty_generics() {
    assert_repairs("Foo.<>", "Foo<any>", &messages::GENERIC_WITHOUT_ARGUMENTS);
    assert_repairs("Array.<>", "any[]", &messages::ARRAY_ELEMENT_MISSING);
    assert_repairs("Class.<>", "any", &messages::CLASS_ARGUMENT_MISSING);
}

// ============================================================================
// Unions and functions
// ============================================================================

#[test]
fn test_resolve_union() {
    assert_resolves("(number|string)", "number | string");
    assert_resolves("string|null", "string | null");
}

#[test]
fn test_resolve_union_parenthesizes_functions() {
    assert_resolves("(function(): void|string)", "((...args: any[]) => void) | string");
}

#[test]
fn test_resolve_empty_union() {
    let arena = ResolutionArena::new();
    let mut diagnostics = DiagnosticCollection::new();
    let tree = build_tree("()", &mut diagnostics).unwrap();
    let ty = TreeResolver::new(&arena, &mut diagnostics).resolve_tree(&tree);
    assert_eq!(print_type(ty, arena.interner()), "any");
    assert!(diagnostics.contains_code(&messages::UNION_WITHOUT_MEMBERS));
    match ty {
        jsdts_ast::TypeNode::UnionType(union) => {
            assert!(union.types[0].data().flags.contains(NodeFlags::RECOVERED));
        }
        other => panic!("expected a union, got {:?}", other.kind()),
    }
}

#[test]
fn test_resolve_function() {
    assert_resolves("function(string, number): boolean", "(arg0: string, arg1: number) => boolean");
}

#[test]
fn test_resolve_function_without_parameters() {
    assert_resolves("function()", "(...args: any[]) => void");
    assert_resolves("function(): string", "(...args: any[]) => string");
}

#[test]
fn test_resolve_function_with_options() {
    let options = ResolveOptions {
        positional_prefix: "p".to_string(),
        rest_parameter_name: "rest".to_string(),
        ..ResolveOptions::default()
    };
    let (printed, _) = resolve_with("function(string, number): void", DiagnosticCollection::new(), &options);
    assert_eq!(printed, "(p0: string, p1: number) => void");
    let (printed, _) = resolve_with("function()", DiagnosticCollection::new(), &options);
    assert_eq!(printed, "(...rest: any[]) => void");
}

// ============================================================================
// Objects and modules
// ============================================================================

#[test]
fn test_resolve_object() {
    assert_resolves(
        "{a: string, b: Object.<string, number>}",
        "{ a: string; b: { [key: string]: number; }; }",
    );
}

#[test]
fn test_resolve_empty_object() {
    assert_resolves("{}", "{}");
}

#[test]
fn test_resolve_object_quotes_keys() {
    assert_resolves("{data-id: string}", "{ \"data-id\": string; }");
}

#[test]
fn test_resolve_object_member_without_key() {
    assert_repairs("{: x}", "{}", &messages::OBJECT_MEMBER_WITHOUT_KEY);
    assert_repairs("{a: string, : x}", "{ a: string; }", &messages::OBJECT_MEMBER_WITHOUT_KEY);
}

#[test]
fn test_resolve_module() {
    assert_resolves("module:foo/bar~Baz", "import(\"foo/bar\").Baz");
    assert_resolves("module:foo/bar", "import(\"foo/bar\").default");
    assert_resolves("module:foo~Bar.<string>", "import(\"foo\").Bar<string>");
}

// ============================================================================
// Failure policy
// ============================================================================

#[test]
fn test_resolve_unbalanced_expression() {
    assert_repairs("Array.<string", "any", &messages::UNBALANCED_BRACKET);
}

#[test]
fn test_resolve_long_function_chain() {
    let source = format!("{}string", "function(): ".repeat(30_000));
    let (printed, diagnostics) = resolve(&source);
    assert!(printed.starts_with("(...args: any[]) => (...args: any[]) => "));
    assert!(printed.ends_with(" => any"));
    assert!(diagnostics.contains_code(&messages::NESTING_TOO_DEEP));
}

#[test]
fn test_resolve_is_deterministic() {
    for source in ["Object.<string, Array.<(a|b)>>", "function(string): {x: number}", "module:a~B.<c>"] {
        assert_eq!(resolve(source).0, resolve(source).0);
    }
}

#[test]
fn test_verbose_warnings_carry_tree_context() {
    let (_, diagnostics) = resolve_with("Array.<>", DiagnosticCollection::verbose(), &ResolveOptions::default());
    let diagnostic = &diagnostics.diagnostics()[0];
    assert_eq!(diagnostic.code, messages::ARRAY_ELEMENT_MISSING.code);
    assert!(diagnostic.context.as_deref().unwrap_or_default().contains("Array (GENERIC)"));
    assert_eq!(diagnostic.source.as_deref(), Some("Array.<>"));
}
