//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors reported by the `tfgen` binary.
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Reading or writing a file failed.
    #[error("{operation} {path} failed: {source}")]
    #[diagnostic(
        code(tfgen::cli::io),
        help("Check file permissions and ensure the path exists")
    )]
    Io {
        /// What was being done, e.g. "reading".
        operation: &'static str,
        /// The file involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The model file is not valid JSON.
    #[error("failed to parse model file {path}")]
    #[diagnostic(code(tfgen::cli::parse_json))]
    Json {
        /// The model file.
        path: PathBuf,
        /// Parser error, with line and column.
        #[source]
        source: serde_json::Error,
    },

    /// The model file is not valid YAML.
    #[error("failed to parse model file {path}")]
    #[diagnostic(code(tfgen::cli::parse_yaml))]
    Yaml {
        /// The model file.
        path: PathBuf,
        /// Parser error, with location.
        #[source]
        source: serde_yaml::Error,
    },

    /// The model parsed but is inconsistent.
    #[error("invalid model: {message}")]
    #[diagnostic(code(tfgen::cli::invalid_model))]
    InvalidModel {
        /// What is wrong.
        message: String,
        /// How to fix it.
        #[help]
        help: Option<String>,
    },

    /// Document generation failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Emit(#[from] tfgen_emitter::Error),

    /// Check mode found generated files that differ from the model.
    #[error("{} generated file(s) are out of date: {}", paths.len(), paths.join(", "))]
    #[diagnostic(
        code(tfgen::cli::out_of_date),
        help("Run 'tfgen generate' without --check to update them")
    )]
    OutOfDate {
        /// Paths that would be created or updated.
        paths: Vec<String>,
    },

    /// The tracing subscriber could not be installed.
    #[error("failed to initialize tracing: {message}")]
    #[diagnostic(
        code(tfgen::cli::tracing),
        help("Check the RUST_LOG environment variable")
    )]
    Tracing {
        /// Underlying error message.
        message: String,
    },
}

impl CliError {
    /// Create an I/O error for the given operation and path.
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Create an invalid-model error.
    pub fn invalid_model(message: impl Into<String>) -> Self {
        Self::InvalidModel {
            message: message.into(),
            help: None,
        }
    }

    /// Create an invalid-model error with a hint.
    pub fn invalid_model_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::InvalidModel {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_display() {
        let err = CliError::io(
            "reading",
            "/tmp/model.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.to_string(), "reading /tmp/model.json failed: not found");
    }

    #[test]
    fn test_out_of_date_display() {
        let err = CliError::OutOfDate {
            paths: vec!["kubernetes.tf".to_string(), "data/x".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "2 generated file(s) are out of date: kubernetes.tf, data/x"
        );
    }

    #[test]
    fn test_emit_error_is_transparent() {
        let err: CliError = tfgen_emitter::Error::OutputShapeConflict {
            key: "ids".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "variable `ids` is both an array and a scalar");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("tfgen::output_shape_conflict"));
    }

    #[test]
    fn test_invalid_model_help() {
        let err = CliError::invalid_model_with_help("bad", "fix it");
        let help = err.help().map(|h| h.to_string());
        assert_eq!(help.as_deref(), Some("fix it"));
    }
}
