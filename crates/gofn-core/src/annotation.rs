//! Per-protein function listings
//!
//! Turns a resolved [`Protein`] into `(protein, function)` rows, one per
//! closed function except the molecular_function root.

use crate::ontology::Ontology;
use crate::protein::Protein;
use crate::term::MOLECULAR_FUNCTION_ROOT;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Function name written for proteins without any listed function.
pub const NO_FUNCTION: &str = "no_function";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRow {
    pub protein_id: String,
    /// `None` on the placeholder row of a protein without functions
    pub go_id: Option<String>,
    pub function: String,
}

#[derive(Debug, Clone, Default)]
pub struct FunctionAnnotator {
    full_names: bool,
    alternative_names: HashMap<String, String>,
    selection: Option<BTreeSet<String>>,
}

impl FunctionAnnotator {
    /// Short names (" activity" stripped), every function listed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the term names exactly as the ontology spells them.
    pub fn full_names(mut self, full_names: bool) -> Self {
        self.full_names = full_names;
        self
    }

    /// Use `name` for `go_id` instead of the ontology's term name.
    pub fn with_alternative_name(mut self, go_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.alternative_names.insert(go_id.into(), name.into());
        self
    }

    /// Only list functions in `ids`. Ids must be canonical to match.
    pub fn only<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Rows for `protein`, sorted by GO id.
    pub async fn annotate(&self, ontology: &Ontology, protein: &Protein) -> Vec<FunctionRow> {
        let mut rows = Vec::new();

        for go_id in &protein.closed_function_ids {
            if go_id == MOLECULAR_FUNCTION_ROOT {
                continue;
            }
            if let Some(selection) = &self.selection {
                if !selection.contains(go_id) {
                    continue;
                }
            }

            let function = match self.alternative_names.get(go_id) {
                Some(name) => name.clone(),
                None => match ontology.term(go_id).await {
                    Some(term) if self.full_names => term.name,
                    Some(term) => term.short_name().to_string(),
                    None => go_id.clone(),
                },
            };

            rows.push(FunctionRow {
                protein_id: protein.id.clone(),
                go_id: Some(go_id.clone()),
                function,
            });
        }

        if rows.is_empty() {
            rows.push(FunctionRow {
                protein_id: protein.id.clone(),
                go_id: None,
                function: NO_FUNCTION.to_string(),
            });
        }

        rows
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::protein::ProteinFunctionResolver;
    use crate::resolver::{InMemoryResolver, TermResolver};
    use std::sync::Arc;

    async fn kinase() -> (Arc<Ontology>, Protein) {
        let resolver = Arc::new(
            InMemoryResolver::new()
                .with_function(MOLECULAR_FUNCTION_ROOT, "molecular_function")
                .with_function("GO:0003824", "catalytic activity")
                .with_function("GO:0016301", "kinase activity")
                .with_edge("GO:0003824", MOLECULAR_FUNCTION_ROOT)
                .with_edge("GO:0016301", "GO:0003824"),
        );
        let ontology = Arc::new(Ontology::new(resolver.clone() as Arc<dyn TermResolver>));
        let functions = ProteinFunctionResolver::new(ontology.clone(), resolver);
        let protein = functions
            .resolve("P1", ["GO:0016301"])
            .await
            .unwrap()
            .into_value();
        (ontology, protein)
    }

    fn names(rows: &[FunctionRow]) -> Vec<&str> {
        rows.iter().map(|row| row.function.as_str()).collect()
    }

    #[tokio::test]
    async fn test_rows_skip_root_and_shorten_names() {
        let (ontology, protein) = kinase().await;
        let rows = FunctionAnnotator::new().annotate(&ontology, &protein).await;

        assert_eq!(names(&rows), vec!["catalytic", "kinase"]);
        assert!(rows.iter().all(|row| row.protein_id == "P1"));
    }

    #[tokio::test]
    async fn test_full_and_alternative_names() {
        let (ontology, protein) = kinase().await;
        let rows = FunctionAnnotator::new()
            .full_names(true)
            .with_alternative_name("GO:0003824", "enzyme")
            .annotate(&ontology, &protein)
            .await;

        assert_eq!(names(&rows), vec!["enzyme", "kinase activity"]);
    }

    #[tokio::test]
    async fn test_selection_and_placeholder_row() {
        let (ontology, protein) = kinase().await;

        let rows = FunctionAnnotator::new()
            .only(["GO:0016301"])
            .annotate(&ontology, &protein)
            .await;
        assert_eq!(names(&rows), vec!["kinase"]);

        let rows = FunctionAnnotator::new()
            .only(["GO:0005215"])
            .annotate(&ontology, &protein)
            .await;
        assert_eq!(
            rows,
            vec![FunctionRow {
                protein_id: "P1".to_string(),
                go_id: None,
                function: NO_FUNCTION.to_string(),
            }]
        );
    }
}
