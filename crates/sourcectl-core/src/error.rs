//! Error types for sourcectl-core.

use miette::Diagnostic;
use sourcectl_config::error::ConfigError;
use sourcectl_utils::error::PathError;
use thiserror::Error;

/// Boxed cause carried by [`SourceError::ActionFailed`].
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Reasons a `source list` table could not be turned into records.
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum TableParseError {
    #[error("Source table output is empty")]
    #[diagnostic(
        code(sourcectl::table::empty),
        help("The package manager printed nothing; run it manually to inspect its output")
    )]
    Empty,

    #[error("Source table has no separator row")]
    #[diagnostic(
        code(sourcectl::table::missing_separator),
        help("Expected a line of dashes between the column labels and the data rows")
    )]
    MissingSeparator,

    #[error("Source table separator on line {line} has no header row above it")]
    #[diagnostic(code(sourcectl::table::missing_header))]
    MissingHeader { line: usize },

    #[error("Source table header `{header}` has no second column")]
    #[diagnostic(
        code(sourcectl::table::missing_url_column),
        help("Expected two left-aligned columns: name followed by argument/URL")
    )]
    MissingUrlColumn { header: String },
}

/// Core error type for source management operations.
#[derive(Error, Diagnostic, Debug)]
pub enum SourceError {
    #[error("Package manager `{program}` is not installed or could not be started")]
    #[diagnostic(
        code(sourcectl::tool_not_installed),
        help("Install the package manager or point `executable` in the config at it")
    )]
    ToolNotInstalled { program: String },

    #[error("{message}")]
    #[diagnostic(code(sourcectl::action_failed))]
    ActionFailed {
        message: String,
        #[source]
        source: BoxedCause,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] TableParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to serialize sources as JSON: {0}")]
    #[diagnostic(code(sourcectl::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    PathError(#[from] PathError),

    #[error("Thread lock poison error")]
    #[diagnostic(
        code(sourcectl::poison),
        help("This is an internal error, please report it")
    )]
    PoisonError,
}

impl SourceError {
    pub fn action_failed<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxedCause>,
    {
        Self::ActionFailed {
            message: message.into(),
            source: source.into(),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for SourceError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Self::PoisonError
    }
}
