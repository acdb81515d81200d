use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsdts_core::ResolutionArena;
use jsdts_diagnostics::DiagnosticCollection;
use jsdts_typeexpr::{build_tree, TypeResolver};

// Type expressions of the kinds found in documented JavaScript libraries
const EXPRESSIONS: &[&str] = &[
    "string",
    "Array.<string>",
    "(number|string|null)",
    "Object.<string, Array.<number>>",
    "function(string, number): boolean",
    "{id: number, name: string, tags: Array.<string>, meta: Object.<string, *>}",
    "module:lib/events~EventEmitter.<string>",
    "Promise.<Array.<{key: string, value: (number|function(Error): void)}>>",
    "Array.<string",
];

fn bench_build_tree(c: &mut Criterion) {
    c.bench_function("build_tree", |b| {
        b.iter(|| {
            let mut diagnostics = DiagnosticCollection::new();
            for expr in EXPRESSIONS {
                black_box(build_tree(black_box(expr), &mut diagnostics));
            }
        });
    });
}

fn bench_resolve(c: &mut Criterion) {
    c.bench_function("resolve_complex_type_name", |b| {
        b.iter(|| {
            let arena = ResolutionArena::new();
            let mut diagnostics = DiagnosticCollection::new();
            let mut resolver = TypeResolver::new(&arena, &mut diagnostics);
            for expr in EXPRESSIONS {
                black_box(resolver.resolve_complex_type_name(black_box(expr)));
            }
        });
    });
}

fn bench_deeply_nested(c: &mut Criterion) {
    let expr = format!("{}string{}", "Array.<".repeat(150), ">".repeat(150));
    c.bench_function("resolve_deeply_nested", |b| {
        b.iter(|| {
            let arena = ResolutionArena::new();
            let mut diagnostics = DiagnosticCollection::new();
            let mut resolver = TypeResolver::new(&arena, &mut diagnostics);
            black_box(resolver.resolve_complex_type_name(black_box(&expr)));
        });
    });
}

criterion_group!(benches, bench_build_tree, bench_resolve, bench_deeply_nested);
criterion_main!(benches);
