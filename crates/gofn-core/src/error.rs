//! Error types for the ontology engine

use std::collections::BTreeSet;
use thiserror::Error;

/// Result type alias for ontology operations
pub type Result<T> = std::result::Result<T, OntologyError>;

/// Fatal outcomes of ontology and classification operations.
///
/// Recoverable conditions (renamed ids, obsolete terms, orphans) are not
/// errors; they travel as [`crate::Advisory`] values next to the result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OntologyError {
    #[error("Invalid GO identifier '{0}': expected 'GO:' followed by seven digits")]
    InvalidIdentifier(String),

    #[error("GO term not found: {0}")]
    NotFound(String),

    #[error("GO term lookup for {id} was ambiguous ({hits} results)")]
    Ambiguous { id: String, hits: usize },

    #[error("{id} is a {aspect} term, only molecular_function terms can be admitted")]
    AspectMismatch { id: String, aspect: String },

    #[error("Unsupported relation '{relationship}' on edge {child} -> {parent}; only is_a is supported")]
    UnsupportedRelation {
        child: String,
        parent: String,
        relationship: String,
    },

    #[error("Path list from {start} to {end} spans {pages} pages; paginated paths are not supported")]
    Paginated { start: String, end: String, pages: u32 },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Pagination for {what} exceeded the limit of {limit} pages")]
    PageLimitExceeded { what: String, limit: u32 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("GO term {0} is not part of the hierarchy; add it before querying")]
    UnknownTerm(String),

    #[error("Class '{0}' is already defined")]
    DuplicateRule(String),

    #[error("Class '{rule}' overlaps '{existing}' on {}", format_ids(.ids))]
    RuleOverlap {
        rule: String,
        existing: String,
        ids: BTreeSet<String>,
    },
}

impl OntologyError {
    /// Whether the failure is transient and the request may be repeated.
    pub fn is_retryable(&self) -> bool {
        matches!(self, OntologyError::Network(_) | OntologyError::Timeout(_))
    }
}

fn format_ids(ids: &BTreeSet<String>) -> String {
    ids.iter().cloned().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_message_lists_ids() {
        let err = OntologyError::RuleOverlap {
            rule: "Kinase".to_string(),
            existing: "Transferase".to_string(),
            ids: ["GO:0016301".to_string(), "GO:0004672".to_string()]
                .into_iter()
                .collect(),
        };
        assert_eq!(
            err.to_string(),
            "Class 'Kinase' overlaps 'Transferase' on GO:0004672, GO:0016301"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(OntologyError::Network("reset".into()).is_retryable());
        assert!(OntologyError::Timeout("30s".into()).is_retryable());
        assert!(!OntologyError::InvalidIdentifier("GO:1".into()).is_retryable());
        assert!(!OntologyError::NotFound("GO:0000001".into()).is_retryable());
    }
}
