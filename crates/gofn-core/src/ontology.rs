//! Lazily grown molecular-function hierarchy
//!
//! [`Ontology`] owns a [`HierarchyGraph`] and a [`TermResolver`]. Terms enter
//! the graph on first use: [`Ontology::add_function`] admits a term and
//! imports every is_a chain from it up to the molecular_function root.
//!
//! Concurrency: readers take a shared lock on the graph and never wait on the
//! network. Growth is serialized by a separate mutation lock which is held
//! across resolver calls, while the graph itself is only write-locked for the
//! short insertion at the end of each step. Two workers asking for the same
//! unknown id therefore cause a single lookup.

use crate::advisory::{Advised, Advisory};
use crate::error::{OntologyError, Result};
use crate::graph::HierarchyGraph;
use crate::resolver::{PathEdge, TermResolver};
use crate::term::{require_go_id, Term, MOLECULAR_FUNCTION_ROOT};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument};

pub struct Ontology {
    resolver: Arc<dyn TermResolver>,
    graph: RwLock<HierarchyGraph>,
    mutation: Mutex<()>,
}

impl std::fmt::Debug for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ontology").finish_non_exhaustive()
    }
}

impl Ontology {
    /// Start from an empty hierarchy.
    pub fn new(resolver: Arc<dyn TermResolver>) -> Self {
        Self::with_graph(resolver, HierarchyGraph::new())
    }

    /// Resume from a previously saved hierarchy.
    pub fn with_graph(resolver: Arc<dyn TermResolver>, graph: HierarchyGraph) -> Self {
        Self {
            resolver,
            graph: RwLock::new(graph),
            mutation: Mutex::new(()),
        }
    }

    /// A copy of the current hierarchy, e.g. for persisting it.
    pub async fn snapshot(&self) -> HierarchyGraph {
        self.graph.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.graph.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.graph.read().await.is_empty()
    }

    /// Whether `id` is known, directly or as a rerouted alias.
    pub async fn contains(&self, id: &str) -> bool {
        self.graph.read().await.is_managed(id)
    }

    pub async fn canonical_id(&self, id: &str) -> Option<String> {
        self.graph.read().await.canonical_id(id).map(str::to_string)
    }

    pub async fn term(&self, id: &str) -> Option<Term> {
        self.graph.read().await.term(id).cloned()
    }

    pub async fn parents(&self, id: &str) -> Result<Vec<Term>> {
        Ok(owned(self.graph.read().await.parents(id)?))
    }

    pub async fn children(&self, id: &str) -> Result<Vec<Term>> {
        Ok(owned(self.graph.read().await.children(id)?))
    }

    /// Every term reachable upwards from `id`, including `id` itself.
    pub async fn ancestors(&self, id: &str) -> Result<Vec<Term>> {
        Ok(owned(self.graph.read().await.ancestors(id)?))
    }

    /// Every term reachable downwards from `id`, including `id` itself.
    ///
    /// Only terms admitted so far are visible.
    pub async fn descendants(&self, id: &str) -> Result<Vec<Term>> {
        Ok(owned(self.graph.read().await.descendants(id)?))
    }

    pub async fn ancestor_ids(&self, id: &str) -> Result<BTreeSet<String>> {
        self.graph.read().await.ancestor_ids(id)
    }

    pub async fn descendant_ids(&self, id: &str) -> Result<BTreeSet<String>> {
        self.graph.read().await.descendant_ids(id)
    }

    /// Union of the upward closures of `ids`, all of which must be known.
    pub async fn closure_of<I, S>(&self, ids: I) -> Result<BTreeSet<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let graph = self.graph.read().await;
        let mut closed = BTreeSet::new();
        for id in ids {
            closed.extend(graph.ancestor_ids(id.as_ref())?);
        }
        Ok(closed)
    }

    /// Make sure the term behind `id` is a node, without importing its paths.
    ///
    /// Returns the canonical id. Nothing is fetched when `id` is already
    /// known; the identifier format is checked before any lookup.
    pub async fn ensure_term(&self, id: &str) -> Result<Advised<String>> {
        require_go_id(id)?;
        if let Some(canonical) = self.canonical_id(id).await {
            return Ok(Advised::clean(canonical));
        }

        let _guard = self.mutation.lock().await;
        self.ensure_term_locked(id).await
    }

    /// Import every is_a chain from the known term `id` to the root.
    pub async fn link_to_root(&self, id: &str) -> Result<Advised<()>> {
        let canonical = self
            .canonical_id(id)
            .await
            .ok_or_else(|| OntologyError::UnknownTerm(id.to_string()))?;

        let _guard = self.mutation.lock().await;
        self.link_to_root_locked(&canonical).await
    }

    /// Admit `id` and connect it to the root.
    ///
    /// A no-op for ids that are already known and linked. Idempotent; the
    /// returned canonical id is the one to use for every later query.
    #[instrument(skip(self), level = "debug")]
    pub async fn add_function(&self, id: &str) -> Result<Advised<String>> {
        require_go_id(id)?;
        if let Some(canonical) = self.linked_canonical_id(id).await {
            return Ok(Advised::clean(canonical));
        }

        let _guard = self.mutation.lock().await;
        // Another task may have finished the work while we waited.
        if let Some(canonical) = self.linked_canonical_id(id).await {
            return Ok(Advised::clean(canonical));
        }

        let mut advisories = Vec::new();
        let canonical = self.ensure_term_locked(id).await?.collect_into(&mut advisories);
        self.link_to_root_locked(&canonical)
            .await?
            .collect_into(&mut advisories);

        Ok(Advised::new(canonical, advisories))
    }

    async fn linked_canonical_id(&self, id: &str) -> Option<String> {
        let graph = self.graph.read().await;
        if graph.is_linked(id) {
            graph.canonical_id(id).map(str::to_string)
        } else {
            None
        }
    }

    /// Caller holds the mutation lock.
    async fn ensure_term_locked(&self, id: &str) -> Result<Advised<String>> {
        if let Some(canonical) = self.canonical_id(id).await {
            return Ok(Advised::clean(canonical));
        }

        debug!(go_id = %id, "Looking up GO term");
        let term = self.resolver.lookup_term(id).await?;
        let canonical = term.id.clone();

        let advisories = self.graph.write().await.admit(id, term)?;
        for advisory in &advisories {
            advisory.log();
        }
        Ok(Advised::new(canonical, advisories))
    }

    /// Caller holds the mutation lock.
    ///
    /// The import is all-or-nothing for edges: relations are checked and
    /// every chain endpoint admitted before the first edge is inserted.
    async fn link_to_root_locked(&self, canonical: &str) -> Result<Advised<()>> {
        if canonical == MOLECULAR_FUNCTION_ROOT {
            self.graph.write().await.mark_linked(canonical);
            return Ok(Advised::clean(()));
        }

        debug!(go_id = %canonical, "Importing is_a paths to molecular_function");
        let chains = self
            .resolver
            .lookup_paths(canonical, MOLECULAR_FUNCTION_ROOT)
            .await?;

        if chains.is_empty() {
            let advisory = Advisory::NoPathToRoot {
                id: canonical.to_string(),
            };
            advisory.log();
            self.graph.write().await.mark_linked(canonical);
            return Ok(Advised::new((), vec![advisory]));
        }

        let edges: Vec<&PathEdge> = chains.iter().flatten().collect();
        if let Some(edge) = edges.iter().find(|edge| !edge.relationship.is_is_a()) {
            return Err(OntologyError::UnsupportedRelation {
                child: edge.child.clone(),
                parent: edge.parent.clone(),
                relationship: edge.relationship.to_string(),
            });
        }

        let endpoints: BTreeSet<&str> = edges
            .iter()
            .flat_map(|edge| [edge.child.as_str(), edge.parent.as_str()])
            .collect();

        let mut advisories = Vec::new();
        for endpoint in &endpoints {
            self.ensure_term_locked(endpoint)
                .await?
                .collect_into(&mut advisories);
        }

        let mut graph = self.graph.write().await;
        let mut inserted = 0usize;
        for edge in &edges {
            if graph.insert_edge(&edge.child, &edge.parent)? {
                inserted += 1;
            }
        }
        graph.mark_linked(canonical);
        for endpoint in &endpoints {
            graph.mark_linked(endpoint);
        }

        info!(
            go_id = %canonical,
            chains = chains.len(),
            new_edges = inserted,
            total_terms = graph.len(),
            "Linked GO term to molecular_function"
        );

        Ok(Advised::new((), advisories))
    }
}

fn owned(terms: Vec<&Term>) -> Vec<Term> {
    terms.into_iter().cloned().collect()
}
