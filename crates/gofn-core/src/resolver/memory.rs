//! In-memory resolver
//!
//! Serves a fixed set of terms, is_a edges and annotations. Used by the test
//! suites and for working from a locally prepared ontology fragment. Call
//! counters make the caching behaviour of the engine observable.

use crate::error::{OntologyError, Result};
use crate::resolver::{AnnotationLookup, AnnotationRecord, PathEdge, PathLookup, Relationship, TermLookup};
use crate::term::{Aspect, Term};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct InMemoryResolver {
    /// Keyed by requested id; aliases map an old id to the renamed term.
    terms: HashMap<String, Term>,
    parents: HashMap<String, Vec<(String, Relationship)>>,
    annotations: HashMap<String, Vec<AnnotationRecord>>,
    failures: HashMap<String, OntologyError>,
    term_lookups: AtomicUsize,
    path_lookups: AtomicUsize,
    annotation_lookups: AtomicUsize,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a molecular_function term.
    pub fn with_function(self, go_id: &str, name: &str) -> Self {
        self.with_term(Term::new(go_id, name, Aspect::MolecularFunction))
    }

    pub fn with_term(mut self, term: Term) -> Self {
        self.terms.insert(term.id.clone(), term);
        self
    }

    /// Make lookups of `old_id` answer with the term stored under `new_id`.
    ///
    /// `new_id` must already be registered.
    pub fn with_alias(mut self, old_id: &str, new_id: &str) -> Self {
        if let Some(term) = self.terms.get(new_id).cloned() {
            self.terms.insert(old_id.to_string(), term);
        }
        self
    }

    /// Add an is_a edge `child -> parent`.
    pub fn with_edge(self, child: &str, parent: &str) -> Self {
        self.with_relation(child, parent, Relationship::IsA)
    }

    pub fn with_relation(mut self, child: &str, parent: &str, relationship: Relationship) -> Self {
        self.parents
            .entry(child.to_string())
            .or_default()
            .push((parent.to_string(), relationship));
        self
    }

    /// Annotate `protein_id` with an enabled molecular function.
    pub fn with_annotation(self, protein_id: &str, go_id: &str) -> Self {
        let record = AnnotationRecord::enables(format!("UniProtKB:{}", protein_id), go_id);
        self.with_record(protein_id, record)
    }

    pub fn with_record(mut self, protein_id: &str, record: AnnotationRecord) -> Self {
        self.annotations
            .entry(protein_id.to_string())
            .or_default()
            .push(record);
        self
    }

    /// Fail every lookup (term, path or annotation) keyed by `id`.
    pub fn with_failure(mut self, id: &str, error: OntologyError) -> Self {
        self.failures.insert(id.to_string(), error);
        self
    }

    pub fn term_lookups(&self) -> usize {
        self.term_lookups.load(Ordering::SeqCst)
    }

    pub fn path_lookups(&self) -> usize {
        self.path_lookups.load(Ordering::SeqCst)
    }

    pub fn annotation_lookups(&self) -> usize {
        self.annotation_lookups.load(Ordering::SeqCst)
    }

    fn check_failure(&self, id: &str) -> Result<()> {
        match self.failures.get(id) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// Depth-first enumeration of every simple chain from `node` to `end`.
    fn collect_paths(
        &self,
        node: &str,
        end: &str,
        chain: &mut Vec<PathEdge>,
        paths: &mut Vec<Vec<PathEdge>>,
    ) {
        let Some(parents) = self.parents.get(node) else {
            return;
        };

        for (parent, relationship) in parents {
            if chain.iter().any(|edge| edge.child == *parent) {
                continue;
            }
            chain.push(PathEdge {
                child: node.to_string(),
                parent: parent.clone(),
                relationship: relationship.clone(),
            });
            if parent == end {
                paths.push(chain.clone());
            } else {
                self.collect_paths(parent, end, chain, paths);
            }
            chain.pop();
        }
    }
}

#[async_trait]
impl TermLookup for InMemoryResolver {
    async fn lookup_term(&self, go_id: &str) -> Result<Term> {
        self.term_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_failure(go_id)?;
        self.terms
            .get(go_id)
            .cloned()
            .ok_or_else(|| OntologyError::NotFound(go_id.to_string()))
    }
}

#[async_trait]
impl PathLookup for InMemoryResolver {
    async fn lookup_paths(&self, start: &str, end: &str) -> Result<Vec<Vec<PathEdge>>> {
        self.path_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_failure(start)?;

        let mut paths = Vec::new();
        self.collect_paths(start, end, &mut Vec::new(), &mut paths);
        Ok(paths)
    }
}

#[async_trait]
impl AnnotationLookup for InMemoryResolver {
    async fn lookup_annotations(&self, protein_id: &str) -> Result<Vec<AnnotationRecord>> {
        self.annotation_lookups.fetch_add(1, Ordering::SeqCst);
        self.check_failure(protein_id)?;
        Ok(self.annotations.get(protein_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn diamond() -> InMemoryResolver {
        // d -> b -> a, d -> c -> a
        InMemoryResolver::new()
            .with_function("GO:0000001", "a")
            .with_function("GO:0000002", "b")
            .with_function("GO:0000003", "c")
            .with_function("GO:0000004", "d")
            .with_edge("GO:0000002", "GO:0000001")
            .with_edge("GO:0000003", "GO:0000001")
            .with_edge("GO:0000004", "GO:0000002")
            .with_edge("GO:0000004", "GO:0000003")
    }

    #[tokio::test]
    async fn test_paths_enumerate_every_chain() {
        let resolver = diamond();
        let paths = resolver
            .lookup_paths("GO:0000004", "GO:0000001")
            .await
            .unwrap();

        assert_eq!(paths.len(), 2);
        for path in &paths {
            assert_eq!(path.len(), 2);
            assert_eq!(path[0].child, "GO:0000004");
            assert_eq!(path[1].parent, "GO:0000001");
        }
        assert_eq!(resolver.path_lookups(), 1);
    }

    #[tokio::test]
    async fn test_alias_returns_renamed_term() {
        let resolver = diamond().with_alias("GO:0000099", "GO:0000004");
        let term = resolver.lookup_term("GO:0000099").await.unwrap();
        assert_eq!(term.id, "GO:0000004");
    }

    #[tokio::test]
    async fn test_missing_term_and_injected_failure() {
        let resolver = diamond().with_failure("GO:0000002", OntologyError::Network("down".into()));

        assert_eq!(
            resolver.lookup_term("GO:0000042").await,
            Err(OntologyError::NotFound("GO:0000042".to_string()))
        );
        assert!(resolver.lookup_term("GO:0000002").await.unwrap_err().is_retryable());
        assert_eq!(resolver.term_lookups(), 2);
    }
}
