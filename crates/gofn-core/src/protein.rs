//! Proteins and their closed function sets
//!
//! A [`Protein`] carries the molecular functions it is annotated with
//! (`explicit_function_ids`, canonicalized) and their upward closure in the
//! hierarchy (`closed_function_ids`). [`ProteinFunctionResolver`] builds
//! proteins from caller-supplied ids or from an annotation source, and caches
//! what it fetched.

use crate::advisory::Advised;
use crate::error::Result;
use crate::ontology::Ontology;
use crate::resolver::{AnnotationLookup, AnnotationRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protein {
    pub id: String,
    /// Canonical ids of the annotated functions
    pub explicit_function_ids: BTreeSet<String>,
    /// Explicit functions plus all their ancestors
    pub closed_function_ids: BTreeSet<String>,
}

impl Protein {
    /// Whether the protein has `go_id` after closure.
    pub fn has_function(&self, go_id: &str) -> bool {
        self.closed_function_ids.contains(go_id)
    }

    /// Whether no molecular function is known for the protein.
    pub fn is_unannotated(&self) -> bool {
        self.explicit_function_ids.is_empty()
    }
}

/// Function ids in `records` that `protein_id` enables as molecular functions.
pub fn enabled_function_ids(protein_id: &str, records: &[AnnotationRecord]) -> BTreeSet<String> {
    records
        .iter()
        .filter(|record| record.is_enabled_function())
        .filter(|record| {
            let own = record.belongs_to(protein_id);
            if !own {
                warn!(
                    protein_id = %protein_id,
                    gene_product_id = %record.gene_product_id,
                    go_id = %record.go_id,
                    "Skipping annotation of another gene product"
                );
            }
            own
        })
        .map(|record| record.go_id.clone())
        .collect()
}

pub struct ProteinFunctionResolver {
    ontology: Arc<Ontology>,
    annotations: Arc<dyn AnnotationLookup>,
    cache: RwLock<HashMap<String, Protein>>,
}

impl std::fmt::Debug for ProteinFunctionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProteinFunctionResolver")
            .field("ontology", &self.ontology)
            .finish_non_exhaustive()
    }
}

impl ProteinFunctionResolver {
    pub fn new(ontology: Arc<Ontology>, annotations: Arc<dyn AnnotationLookup>) -> Self {
        Self {
            ontology,
            annotations,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn ontology(&self) -> &Arc<Ontology> {
        &self.ontology
    }

    /// Build a protein from explicitly given function ids.
    ///
    /// Every id is added to the hierarchy first; the first failure aborts
    /// the whole resolution. Advisories from all ids are merged.
    pub async fn resolve<I, S>(&self, protein_id: &str, function_ids: I) -> Result<Advised<Protein>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut advisories = Vec::new();
        let mut explicit = BTreeSet::new();

        for id in function_ids {
            let canonical = self
                .ontology
                .add_function(id.as_ref())
                .await?
                .collect_into(&mut advisories);
            explicit.insert(canonical);
        }

        let closed = self.ontology.closure_of(&explicit).await?;
        debug!(
            protein_id = %protein_id,
            explicit = explicit.len(),
            closed = closed.len(),
            "Resolved protein functions"
        );

        Ok(Advised::new(
            Protein {
                id: protein_id.to_string(),
                explicit_function_ids: explicit,
                closed_function_ids: closed,
            },
            advisories,
        ))
    }

    /// Resolve a protein from its annotations, served from cache when seen before.
    pub async fn lookup(&self, protein_id: &str) -> Result<Advised<Protein>> {
        if let Some(protein) = self.cached(protein_id).await {
            return Ok(Advised::clean(protein));
        }
        self.refresh(protein_id).await
    }

    /// Fetch the annotations of `protein_id` again and replace the cached entry.
    pub async fn refresh(&self, protein_id: &str) -> Result<Advised<Protein>> {
        let records = self.annotations.lookup_annotations(protein_id).await?;
        let function_ids = enabled_function_ids(protein_id, &records);
        info!(
            protein_id = %protein_id,
            records = records.len(),
            functions = function_ids.len(),
            "Fetched protein annotations"
        );

        let resolved = self.resolve(protein_id, &function_ids).await?;
        self.cache
            .write()
            .await
            .insert(protein_id.to_string(), resolved.value.clone());
        Ok(resolved)
    }

    pub async fn cached(&self, protein_id: &str) -> Option<Protein> {
        self.cache.read().await.get(protein_id).cloned()
    }

    pub async fn cached_count(&self) -> usize {
        self.cache.read().await.len()
    }
}
