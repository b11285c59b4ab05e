//! The is_a hierarchy of admitted molecular functions
//!
//! [`HierarchyGraph`] is plain data: terms keyed by canonical id, child ->
//! parent edges, and the rerouting table for renamed ids. It performs no I/O;
//! [`crate::Ontology`] grows it from a resolver and guards it with locks.
//!
//! Invariants maintained by every mutation:
//! - nodes are canonical ids of molecular_function terms;
//! - rerouting sources are never canonical node ids;
//! - edges only connect existing nodes;
//! - nothing is ever removed.

use crate::advisory::Advisory;
use crate::error::{OntologyError, Result};
use crate::term::Term;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "GraphSnapshot", try_from = "GraphSnapshot")]
pub struct HierarchyGraph {
    terms: BTreeMap<String, Term>,
    parents: BTreeMap<String, BTreeSet<String>>,
    children: BTreeMap<String, BTreeSet<String>>,
    reroutes: BTreeMap<String, String>,
    /// Admitted terms whose path-to-root import has not completed yet.
    unlinked: BTreeSet<String>,
}

impl HierarchyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of canonical terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.parents.values().map(BTreeSet::len).sum()
    }

    /// Resolve `id` through the rerouting table to a known canonical id.
    pub fn canonical_id<'a>(&'a self, id: &'a str) -> Option<&'a str> {
        if self.terms.contains_key(id) {
            return Some(id);
        }
        self.reroutes.get(id).map(String::as_str)
    }

    /// Whether `id` is a canonical node or a rerouted alias of one.
    pub fn is_managed(&self, id: &str) -> bool {
        self.canonical_id(id).is_some()
    }

    /// Whether the term behind `id` is known and its path to the root imported.
    pub fn is_linked(&self, id: &str) -> bool {
        self.canonical_id(id)
            .is_some_and(|canonical| !self.unlinked.contains(canonical))
    }

    pub fn term(&self, id: &str) -> Option<&Term> {
        self.canonical_id(id).and_then(|canonical| self.terms.get(canonical))
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }

    /// Requested id -> canonical id for every renamed term seen so far.
    pub fn reroutes(&self) -> &BTreeMap<String, String> {
        &self.reroutes
    }

    /// Admit a resolved term requested as `requested`.
    ///
    /// Validates the aspect, records a reroute when the resolver answered
    /// with a different id, and inserts the node unless it already exists
    /// (two stale ids may be merged into the same term).
    pub fn admit(&mut self, requested: &str, term: Term) -> Result<Vec<Advisory>> {
        term.check_admissible()?;

        let mut advisories = Vec::new();
        if term.obsolete {
            advisories.push(Advisory::Obsolete {
                id: term.id.clone(),
            });
        }

        if requested != term.id {
            if self.terms.contains_key(requested) {
                return Err(OntologyError::MalformedResponse(format!(
                    "{} is a known term but was reported as renamed to {}",
                    requested, term.id
                )));
            }
            self.reroutes
                .insert(requested.to_string(), term.id.clone());
            advisories.push(Advisory::Rerouted {
                requested: requested.to_string(),
                canonical: term.id.clone(),
            });
        }

        if !self.terms.contains_key(&term.id) {
            debug!(go_id = %term.id, name = %term.name, "Admitting GO term");
            self.unlinked.insert(term.id.clone());
            self.terms.insert(term.id.clone(), term);
        }

        Ok(advisories)
    }

    /// Insert the is_a edge `child -> parent`. Both ends may be aliases.
    ///
    /// Returns `false` when the edge already existed.
    pub fn insert_edge(&mut self, child: &str, parent: &str) -> Result<bool> {
        let child = self.require_canonical(child)?.to_string();
        let parent = self.require_canonical(parent)?.to_string();

        if child == parent {
            warn!(go_id = %child, "Ignoring self-referencing is_a edge");
            return Ok(false);
        }

        let inserted = self
            .parents
            .entry(child.clone())
            .or_default()
            .insert(parent.clone());
        self.children.entry(parent).or_default().insert(child);
        Ok(inserted)
    }

    pub(crate) fn mark_linked(&mut self, id: &str) {
        if let Some(canonical) = self.canonical_id(id).map(str::to_string) {
            self.unlinked.remove(&canonical);
        }
    }

    /// Direct parents of `id`.
    pub fn parents(&self, id: &str) -> Result<Vec<&Term>> {
        let canonical = self.require_canonical(id)?;
        Ok(self.neighbours(&self.parents, canonical))
    }

    /// Direct children of `id`.
    pub fn children(&self, id: &str) -> Result<Vec<&Term>> {
        let canonical = self.require_canonical(id)?;
        Ok(self.neighbours(&self.children, canonical))
    }

    /// Upward closure of `id`, including the term itself.
    pub fn ancestor_ids(&self, id: &str) -> Result<BTreeSet<String>> {
        let canonical = self.require_canonical(id)?;
        Ok(closure(&self.parents, canonical))
    }

    /// Downward closure of `id`, including the term itself.
    pub fn descendant_ids(&self, id: &str) -> Result<BTreeSet<String>> {
        let canonical = self.require_canonical(id)?;
        Ok(closure(&self.children, canonical))
    }

    pub fn ancestors(&self, id: &str) -> Result<Vec<&Term>> {
        Ok(self.lookup_all(self.ancestor_ids(id)?))
    }

    pub fn descendants(&self, id: &str) -> Result<Vec<&Term>> {
        Ok(self.lookup_all(self.descendant_ids(id)?))
    }

    /// Terms without any parent, apart from the root itself.
    pub fn orphans(&self) -> impl Iterator<Item = &Term> {
        self.terms
            .values()
            .filter(|term| !term.is_root() && !self.parents.contains_key(&term.id))
    }

    fn require_canonical<'a>(&'a self, id: &'a str) -> Result<&'a str> {
        self.canonical_id(id)
            .ok_or_else(|| OntologyError::UnknownTerm(id.to_string()))
    }

    fn neighbours(&self, edges: &BTreeMap<String, BTreeSet<String>>, id: &str) -> Vec<&Term> {
        edges
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(|next| self.terms.get(next))
            .collect()
    }

    fn lookup_all(&self, ids: BTreeSet<String>) -> Vec<&Term> {
        ids.iter().filter_map(|id| self.terms.get(id)).collect()
    }
}

/// Iterative traversal with a visited set, so malformed (cyclic) data
/// still terminates.
fn closure(edges: &BTreeMap<String, BTreeSet<String>>, start: &str) -> BTreeSet<String> {
    let mut visited = BTreeSet::new();
    let mut stack = vec![start.to_string()];

    while let Some(node) = stack.pop() {
        if !visited.insert(node.clone()) {
            continue;
        }
        if let Some(next) = edges.get(&node) {
            stack.extend(next.iter().filter(|id| !visited.contains(*id)).cloned());
        }
    }

    visited
}

/// Serialized form; `children` is rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphSnapshot {
    terms: Vec<Term>,
    edges: Vec<(String, String)>,
    #[serde(default)]
    reroutes: BTreeMap<String, String>,
    #[serde(default)]
    unlinked: BTreeSet<String>,
}

impl From<HierarchyGraph> for GraphSnapshot {
    fn from(graph: HierarchyGraph) -> Self {
        let edges = graph
            .parents
            .iter()
            .flat_map(|(child, parents)| {
                parents
                    .iter()
                    .map(move |parent| (child.clone(), parent.clone()))
            })
            .collect();

        GraphSnapshot {
            terms: graph.terms.into_values().collect(),
            edges,
            reroutes: graph.reroutes,
            unlinked: graph.unlinked,
        }
    }
}

impl TryFrom<GraphSnapshot> for HierarchyGraph {
    type Error = OntologyError;

    fn try_from(snapshot: GraphSnapshot) -> Result<Self> {
        let mut graph = HierarchyGraph::default();

        for term in snapshot.terms {
            term.check_admissible()?;
            graph.terms.insert(term.id.clone(), term);
        }

        for (requested, canonical) in snapshot.reroutes {
            if graph.terms.contains_key(&requested) || !graph.terms.contains_key(&canonical) {
                return Err(OntologyError::MalformedResponse(format!(
                    "invalid reroute {} -> {} in snapshot",
                    requested, canonical
                )));
            }
            graph.reroutes.insert(requested, canonical);
        }

        for (child, parent) in snapshot.edges {
            graph.insert_edge(&child, &parent)?;
        }

        graph.unlinked = snapshot
            .unlinked
            .into_iter()
            .filter(|id| graph.terms.contains_key(id))
            .collect();

        Ok(graph)
    }
}
