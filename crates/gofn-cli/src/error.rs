//! Error types for the gofn CLI
//!
//! User-facing errors with a hint on how to fix the problem. Failures of
//! the ontology engine pass through unchanged.

use gofn_core::OntologyError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// Ontology, annotation or classification failure
    #[error(transparent)]
    Ontology(#[from] OntologyError),

    /// Required file is missing
    #[error("File not found: '{0}'. Verify the file path exists and you have read permissions.")]
    FileNotFound(String),

    /// Input table lacks the requested column
    #[error("Column '{column}' not found in '{file}'. Available columns: {available}.")]
    ColumnNotFound {
        column: String,
        file: String,
        available: String,
    },

    /// Class-definition file is malformed
    #[error("Invalid class file '{file}': {reason}. Expected a list of classes with 'name', 'required' and 'excluded'.")]
    InvalidClassFile { file: String, reason: String },

    /// Graph snapshot could not be used
    #[error("Graph cache error: {0}. Delete the cache file to start from an empty hierarchy.")]
    Cache(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your GOFN_* environment variables.")]
    Config(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be set up
    #[error("Network request failed: {0}. Check your internet connection and the QuickGO URL.")]
    Http(#[from] reqwest::Error),

    /// Delimited table could not be read or written
    #[error("Failed to process table: {0}. Check the separator and the file encoding.")]
    Csv(#[from] csv::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}. Check the file syntax.")]
    JsonParse(#[from] serde_json::Error),

    /// YAML parsing failed
    #[error("Failed to parse YAML: {0}. Check the file syntax at the indicated line/column.")]
    YamlParse(#[from] serde_yaml::Error),

    /// TOML parsing failed
    #[error("Failed to parse TOML: {0}. Check the file syntax.")]
    TomlParse(#[from] toml::de::Error),

    /// Failure from an anyhow-based helper, such as an invalid `GOFN_LOG_*` value
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }

    pub fn invalid_class_file(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidClassFile {
            file: file.into(),
            reason: reason.into(),
        }
    }

    pub fn column_not_found(
        column: impl Into<String>,
        file: impl Into<String>,
        available: &[String],
    ) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
            file: file.into(),
            available: available.join(", "),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ontology_errors_pass_through() {
        let err: CliError = OntologyError::NotFound("GO:0000000".into()).into();
        assert_eq!(err.to_string(), "GO term not found: GO:0000000");
    }

    #[test]
    fn test_log_settings_pass_through() {
        let cause = "loud".parse::<gofn_common::logging::LogLevel>().unwrap_err();
        let err: CliError = cause.into();
        assert!(matches!(err, CliError::Other(_)));
        assert_eq!(err.to_string(), "Invalid log level: loud");
    }

    #[test]
    fn test_column_not_found_lists_columns() {
        let err = CliError::column_not_found(
            "uniprot",
            "proteins.tsv",
            &["Entry".to_string(), "Gene".to_string()],
        );
        let message = err.to_string();
        assert!(message.contains("'uniprot'"));
        assert!(message.contains("Entry, Gene"));
    }
}
