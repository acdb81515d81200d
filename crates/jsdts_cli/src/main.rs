//! jsdts: Resolve JSDoc type expressions to TypeScript types.
//!
//! Usage:
//!   jsdts [options] [EXPR...]
//!
//! Each expression is resolved independently and printed on its own line,
//! in input order. Warnings are logged to stderr.

mod error;

use clap::Parser as ClapParser;
use error::CliError;
use jsdts_core::ResolutionArena;
use jsdts_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticSink, TracingSink};
use jsdts_printer::Printer;
use jsdts_typeexpr::options::DEFAULT_MAX_NESTING_DEPTH;
use jsdts_typeexpr::{DocletHints, ResolveOptions, TypeResolver};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(ClapParser, Debug)]
#[command(name = "jsdts", version, about = "Resolve JSDoc type expressions to TypeScript types")]
struct Cli {
    /// Type expressions to resolve.
    #[arg(value_name = "EXPR")]
    exprs: Vec<String>,

    /// Read expressions from a file, one per line ("-" for stdin).
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    file: Option<PathBuf>,

    /// JSON doclet hints applied to every expression.
    #[arg(long, value_name = "FILE")]
    hints: Option<PathBuf>,

    /// Print the intermediate type tree instead of the resolved type.
    #[arg(long)]
    tree: bool,

    /// Print each result as `type NAME = ...;`.
    #[arg(long, value_name = "NAME")]
    alias: Option<String>,

    /// Deepest bracket nesting to resolve.
    #[arg(long = "max-depth", value_name = "N", default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
    max_depth: u32,

    /// Attach context to warnings and log progress.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Exit with an error if any warning was reported.
    #[arg(long = "deny-warnings")]
    deny_warnings: bool,
}

/// What to print for each expression.
#[derive(Debug, Clone)]
enum OutputMode {
    Type,
    Alias(String),
    Tree,
}

/// Settings shared by every expression of one run.
struct Request {
    mode: OutputMode,
    hints: Option<DocletHints>,
    options: ResolveOptions,
    verbose: bool,
}

/// The printed result of one expression and the warnings it produced.
struct Resolved {
    output: String,
    diagnostics: Vec<Diagnostic>,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .try_init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let start = Instant::now();

    let exprs = collect_expressions(cli)?;
    if exprs.is_empty() {
        return Err(CliError::NoInput);
    }

    let request = Request {
        mode: match (&cli.alias, cli.tree) {
            (_, true) => OutputMode::Tree,
            (Some(name), false) => OutputMode::Alias(name.clone()),
            (None, false) => OutputMode::Type,
        },
        hints: cli.hints.as_deref().map(load_hints).transpose()?,
        options: ResolveOptions::default().with_max_nesting_depth(cli.max_depth),
        verbose: cli.verbose,
    };

    let results: Vec<Resolved> = exprs
        .par_iter()
        .map(|expr| resolve_expression(expr, &request))
        .collect();

    let mut sink = TracingSink::new(cli.verbose);
    for result in results {
        for diagnostic in result.diagnostics {
            sink.report(diagnostic);
        }
        println!("{}", result.output);
    }

    tracing::info!(
        expressions = exprs.len(),
        warnings = sink.warning_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "resolution completed"
    );

    if cli.deny_warnings && sink.warning_count() > 0 {
        return Err(CliError::WarningsDenied {
            count: sink.warning_count(),
        });
    }
    Ok(())
}

/// Expressions from the command line followed by those read from `--file`.
/// Blank lines in the file are skipped.
fn collect_expressions(cli: &Cli) -> Result<Vec<String>, CliError> {
    let mut exprs = cli.exprs.clone();
    if let Some(path) = &cli.file {
        let text = read_input(path)?;
        exprs.extend(parse_expression_lines(&text));
    }
    Ok(exprs)
}

fn parse_expression_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
}

fn read_input(path: &Path) -> Result<String, CliError> {
    let result = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(path)
    };
    result.map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_hints(path: &Path) -> Result<DocletHints, CliError> {
    let text = read_input(path)?;
    parse_hints(&text).map_err(|source| CliError::Hints {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_hints(text: &str) -> Result<DocletHints, serde_json::Error> {
    serde_json::from_str(text)
}

/// Resolve one expression in its own arena.
fn resolve_expression(expr: &str, request: &Request) -> Resolved {
    let arena = ResolutionArena::new();
    let mut diagnostics = if request.verbose {
        DiagnosticCollection::verbose()
    } else {
        DiagnosticCollection::new()
    };

    let output = {
        let mut resolver = TypeResolver::with_options(&arena, &mut diagnostics, request.options.clone());
        match &request.mode {
            OutputMode::Tree => resolver.build_tree(expr).map(|tree| tree.to_string().trim_end().to_string()),
            OutputMode::Type => {
                let ty = resolver.resolve_type(&[expr], request.hints.as_ref());
                Some(Printer::new(arena.interner()).print_type(ty))
            }
            OutputMode::Alias(name) => {
                let ty = resolver.resolve_type(&[expr], request.hints.as_ref());
                Some(Printer::new(arena.interner()).print_type_alias(name, ty))
            }
        }
    };

    let output = output.unwrap_or_else(|| {
        diagnostics.add(Diagnostic::new(&messages::TREE_GENERATION_FAILED, &[expr]));
        String::new()
    });
    Resolved {
        output,
        diagnostics: diagnostics.into_diagnostics(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(mode: OutputMode) -> Request {
        Request {
            mode,
            hints: None,
            options: ResolveOptions::default(),
            verbose: false,
        }
    }

    #[test]
    fn test_resolve_expression_type() {
        let resolved = resolve_expression("Array.<string>", &request(OutputMode::Type));
        assert_eq!(resolved.output, "string[]");
        assert!(resolved.diagnostics.is_empty());
    }

    #[test]
    fn test_resolve_expression_alias() {
        let resolved = resolve_expression("(number|string)", &request(OutputMode::Alias("Value".to_string())));
        assert_eq!(resolved.output, "type Value = number | string;");
    }

    #[test]
    fn test_resolve_expression_tree() {
        let resolved = resolve_expression("Array.<string>", &request(OutputMode::Tree));
        assert_eq!(resolved.output, "Array (GENERIC)\n  string (TYPE)");

        let resolved = resolve_expression("|", &request(OutputMode::Tree));
        assert_eq!(resolved.output, "");
        assert_eq!(resolved.diagnostics[0].code, messages::TREE_GENERATION_FAILED.code);
    }

    #[test]
    fn test_resolve_expression_reports_warnings() {
        let resolved = resolve_expression("Array.<string", &request(OutputMode::Type));
        assert_eq!(resolved.output, "any");
        assert_eq!(resolved.diagnostics.len(), 1);
    }

    #[test]
    fn test_resolve_expression_with_hints() {
        let mut request = request(OutputMode::Type);
        request.hints = Some(parse_hints(r#"{"kind": "callback", "returns": ["boolean"]}"#).unwrap());
        let resolved = resolve_expression("function", &request);
        assert_eq!(resolved.output, "() => boolean");
    }

    #[test]
    fn test_parse_expression_lines() {
        let exprs: Vec<String> = parse_expression_lines("string\n\n  Array.<number>  \n").collect();
        assert_eq!(exprs, vec!["string".to_string(), "Array.<number>".to_string()]);
    }

    #[test]
    fn test_parse_hints_rejects_malformed_json() {
        assert!(parse_hints("{ kind: callback }").is_err());
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from(["jsdts", "--alias", "T", "-v", "--max-depth", "10", "string"]);
        assert_eq!(cli.exprs, vec!["string".to_string()]);
        assert_eq!(cli.alias.as_deref(), Some("T"));
        assert!(cli.verbose);
        assert_eq!(cli.max_depth, 10);
        assert!(!cli.deny_warnings);
    }
}
