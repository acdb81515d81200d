use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the command-line driver. Resolution itself never fails;
/// these cover input handling and `--deny-warnings`.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("failed to read {}", path.display())]
    #[diagnostic(code(jsdts::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid doclet hints in {}", path.display())]
    #[diagnostic(
        code(jsdts::hints),
        help("hints are a JSON object with optional kind, properties, params, returns and thisType fields")
    )]
    Hints {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no type expressions given")]
    #[diagnostic(code(jsdts::no_input), help("pass expressions as arguments or read them with --file"))]
    NoInput,

    #[error("{count} warning(s) reported and --deny-warnings is set")]
    #[diagnostic(code(jsdts::warnings_denied))]
    WarningsDenied { count: usize },
}
