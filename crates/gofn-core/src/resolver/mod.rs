//! Collaborator interfaces the engine consumes
//!
//! The engine never talks to the network itself. A term resolver
//! ([`TermLookup`] + [`PathLookup`]) feeds the hierarchy and an
//! [`AnnotationLookup`] feeds protein resolution. The CLI crate binds these
//! to QuickGO; [`memory::InMemoryResolver`] serves tests and offline use.

pub mod memory;

use crate::error::Result;
use crate::term::{Aspect, Term};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use memory::InMemoryResolver;

/// Term metadata lookup.
#[async_trait]
pub trait TermLookup: Send + Sync {
    /// Look up a term; the returned [`Term::id`] is the canonical id, which
    /// differs from `go_id` when the ontology renamed or merged the term.
    async fn lookup_term(&self, go_id: &str) -> Result<Term>;
}

/// Edge-chain lookup between two terms.
#[async_trait]
pub trait PathLookup: Send + Sync {
    /// All chains from `start` up to `end`. Each chain is ordered from
    /// `start` towards `end`; an empty list means no path exists.
    async fn lookup_paths(&self, start: &str, end: &str) -> Result<Vec<Vec<PathEdge>>>;
}

/// Everything the hierarchy needs to grow itself.
pub trait TermResolver: TermLookup + PathLookup {}

impl<T: TermLookup + PathLookup> TermResolver for T {}

/// Raw annotation search for one gene product.
#[async_trait]
pub trait AnnotationLookup: Send + Sync {
    async fn lookup_annotations(&self, protein_id: &str) -> Result<Vec<AnnotationRecord>>;
}

/// Relationship label of a path edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Relationship {
    IsA,
    PartOf,
    HasPart,
    Regulates,
    PositivelyRegulates,
    NegativelyRegulates,
    Other(String),
}

impl Relationship {
    pub fn as_str(&self) -> &str {
        match self {
            Relationship::IsA => "is_a",
            Relationship::PartOf => "part_of",
            Relationship::HasPart => "has_part",
            Relationship::Regulates => "regulates",
            Relationship::PositivelyRegulates => "positively_regulates",
            Relationship::NegativelyRegulates => "negatively_regulates",
            Relationship::Other(label) => label,
        }
    }

    pub fn is_is_a(&self) -> bool {
        matches!(self, Relationship::IsA)
    }
}

impl From<&str> for Relationship {
    fn from(label: &str) -> Self {
        match label {
            "is_a" => Relationship::IsA,
            "part_of" => Relationship::PartOf,
            "has_part" => Relationship::HasPart,
            "regulates" => Relationship::Regulates,
            "positively_regulates" => Relationship::PositivelyRegulates,
            "negatively_regulates" => Relationship::NegativelyRegulates,
            other => Relationship::Other(other.to_string()),
        }
    }
}

impl From<String> for Relationship {
    fn from(label: String) -> Self {
        Relationship::from(label.as_str())
    }
}

impl From<Relationship> for String {
    fn from(relationship: Relationship) -> Self {
        relationship.as_str().to_string()
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `child -> parent` step of a path chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEdge {
    pub child: String,
    pub parent: String,
    pub relationship: Relationship,
}

impl PathEdge {
    pub fn is_a(child: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            child: child.into(),
            parent: parent.into(),
            relationship: Relationship::IsA,
        }
    }
}

/// One row of an annotation search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Database-qualified gene product, e.g. `UniProtKB:P30085`
    pub gene_product_id: String,
    pub go_id: String,
    /// Aspect label as reported upstream
    pub aspect: String,
    pub qualifier: String,
}

impl AnnotationRecord {
    /// A molecular_function record with the `enables` qualifier.
    pub fn enables(gene_product_id: impl Into<String>, go_id: impl Into<String>) -> Self {
        Self {
            gene_product_id: gene_product_id.into(),
            go_id: go_id.into(),
            aspect: Aspect::MolecularFunction.as_str().to_string(),
            qualifier: "enables".to_string(),
        }
    }

    /// Whether the record states a molecular function the product enables.
    pub fn is_enabled_function(&self) -> bool {
        self.aspect == Aspect::MolecularFunction.as_str() && self.qualifier == "enables"
    }

    /// Whether the record belongs to `protein_id`, ignoring the database
    /// prefix and accepting isoform suffixes (`P30085-2`).
    pub fn belongs_to(&self, protein_id: &str) -> bool {
        let accession = self
            .gene_product_id
            .rsplit_once(':')
            .map(|(_, accession)| accession)
            .unwrap_or(&self.gene_product_id);
        accession == protein_id
            || accession
                .strip_prefix(protein_id)
                .is_some_and(|rest| rest.starts_with('-'))
    }
}
