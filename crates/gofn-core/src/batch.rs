//! Concurrent resolution of many proteins

use crate::advisory::Advised;
use crate::error::Result;
use crate::protein::{Protein, ProteinFunctionResolver};
use futures::stream::{self, Stream, StreamExt};
use std::collections::HashSet;

/// Result of resolving one protein in a batch.
#[derive(Debug)]
pub struct ProteinOutcome {
    pub protein_id: String,
    pub result: Result<Advised<Protein>>,
}

/// Resolve `protein_ids` through the annotation source, at most
/// `concurrency` at a time.
///
/// Outcomes arrive in completion order. A failing protein yields an error
/// outcome and the stream carries on with the rest.
pub fn resolve_all<'a>(
    resolver: &'a ProteinFunctionResolver,
    protein_ids: Vec<String>,
    concurrency: usize,
) -> impl Stream<Item = ProteinOutcome> + 'a {
    stream::iter(protein_ids)
        .map(move |protein_id| async move {
            let result = resolver.lookup(&protein_id).await;
            ProteinOutcome { protein_id, result }
        })
        .buffer_unordered(concurrency.max(1))
}

/// Drop blanks and repeats, keeping first-seen order.
pub fn unique_ids<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    ids.into_iter()
        .map(|id| id.as_ref().trim().to_string())
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect()
}
