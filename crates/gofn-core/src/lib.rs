//! gofn Core Library
//!
//! GO molecular-function hierarchy cache, closure and protein
//! classification engine.
//!
//! # Overview
//!
//! - **Hierarchy**: [`Ontology`] grows an is_a graph of molecular-function
//!   terms on demand from a [`TermResolver`], following renamed ids and
//!   answering ancestor/descendant closures.
//! - **Proteins**: [`ProteinFunctionResolver`] turns annotations into the
//!   closed set of functions a protein has.
//! - **Classes**: [`ClassificationEngine`] matches proteins against named
//!   required/excluded rules and refuses overlapping definitions.
//!
//! The engine performs no I/O itself; network access lives behind the
//! traits in [`resolver`].
//!
//! # Example
//!
//! ```
//! use gofn_core::{ClassificationEngine, InMemoryResolver, Ontology, ProteinFunctionResolver};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let resolver = Arc::new(
//!     InMemoryResolver::new()
//!         .with_function("GO:0003674", "molecular_function")
//!         .with_function("GO:0005215", "transporter activity")
//!         .with_edge("GO:0005215", "GO:0003674"),
//! );
//! let ontology = Arc::new(Ontology::new(resolver.clone()));
//! let proteins = ProteinFunctionResolver::new(ontology.clone(), resolver);
//!
//! let mut engine = ClassificationEngine::new(ontology);
//! engine.define_class("Transporter", ["GO:0005215"], [], true).await.unwrap();
//!
//! let protein = proteins.resolve("P1", ["GO:0005215"]).await.unwrap().into_value();
//! assert_eq!(engine.classify(&protein).label(), "Transporter");
//! # }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod advisory;
pub mod annotation;
pub mod batch;
pub mod classification;
pub mod error;
pub mod graph;
pub mod ontology;
pub mod protein;
pub mod resolver;
pub mod term;

pub use advisory::{Advised, Advisory};
pub use annotation::{FunctionAnnotator, FunctionRow};
pub use classification::{
    ClassAssignment, ClassDefinition, ClassRule, ClassificationEngine, RuleOverlapReport,
};
pub use error::{OntologyError, Result};
pub use graph::HierarchyGraph;
pub use ontology::Ontology;
pub use protein::{Protein, ProteinFunctionResolver};
pub use resolver::{AnnotationLookup, AnnotationRecord, InMemoryResolver, PathLookup, TermLookup, TermResolver};
pub use term::{validate_go_id, Aspect, Term, MOLECULAR_FUNCTION_ROOT};
