//! Per-invocation state shared by the commands
//!
//! A [`Session`] owns the hierarchy being grown during one run, the protein
//! resolver on top of it, and the optional on-disk snapshot the hierarchy
//! was restored from.

use crate::cache::GraphCache;
use crate::class_file;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::progress::{create_progress_bar, create_spinner};
use crate::quickgo::QuickGoClient;
use futures::StreamExt;
use gofn_core::batch::resolve_all;
use gofn_core::classification::presets::default_classes;
use gofn_core::resolver::{AnnotationLookup, TermResolver};
use gofn_core::{ClassificationEngine, Ontology, OntologyError, Protein, ProteinFunctionResolver};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Proteins of one batch, in input order, plus the ones that failed.
#[derive(Debug, Default)]
pub struct ResolvedBatch {
    pub proteins: Vec<Protein>,
    pub failures: Vec<(String, OntologyError)>,
}

pub struct Session {
    config: Config,
    ontology: Arc<Ontology>,
    proteins: ProteinFunctionResolver,
    cache: Option<GraphCache>,
}

impl Session {
    /// Session backed by QuickGO, restoring the hierarchy from `graph_cache`
    /// when that file exists.
    pub fn open(config: &Config, graph_cache: Option<PathBuf>) -> Result<Self> {
        let client = Arc::new(QuickGoClient::new(config.quickgo.clone())?);
        Self::with_sources(config, client.clone(), client, graph_cache)
    }

    /// Session over arbitrary term and annotation sources.
    pub fn with_sources(
        config: &Config,
        terms: Arc<dyn TermResolver>,
        annotations: Arc<dyn AnnotationLookup>,
        graph_cache: Option<PathBuf>,
    ) -> Result<Self> {
        let cache = graph_cache.map(GraphCache::new);
        let graph = match &cache {
            Some(cache) => cache.load(&config.quickgo.base_url)?,
            None => None,
        };

        let ontology = Arc::new(match graph {
            Some(graph) => Ontology::with_graph(terms, graph),
            None => Ontology::new(terms),
        });
        let proteins = ProteinFunctionResolver::new(ontology.clone(), annotations);

        Ok(Self {
            config: config.clone(),
            ontology,
            proteins,
            cache,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ontology(&self) -> &Arc<Ontology> {
        &self.ontology
    }

    pub fn proteins(&self) -> &ProteinFunctionResolver {
        &self.proteins
    }

    /// Register the built-in classes (unless `no_presets`) followed by the
    /// classes of `class_file`.
    pub async fn build_engine(
        &self,
        class_file: Option<&Path>,
        no_presets: bool,
    ) -> Result<ClassificationEngine> {
        let mut definitions = if no_presets { Vec::new() } else { default_classes() };
        if let Some(path) = class_file {
            definitions.extend(class_file::load(path)?);
        }
        if definitions.is_empty() {
            return Err(CliError::config(
                "No classes to apply: pass --classes or drop --no-presets",
            ));
        }

        let spinner = create_spinner("Importing class terms...");
        let mut engine = ClassificationEngine::new(self.ontology.clone());
        for definition in &definitions {
            spinner.set_message(format!("Importing terms of '{}'", definition.name));
            if let Err(e) = engine.define(definition).await {
                spinner.finish_and_clear();
                return Err(e.into());
            }
        }
        spinner.finish_and_clear();

        info!(classes = engine.len(), terms = self.ontology.len().await, "Class rules ready");
        Ok(engine)
    }

    /// Resolve every protein, reporting and skipping the ones that fail.
    pub async fn resolve_proteins(&self, protein_ids: Vec<String>) -> ResolvedBatch {
        let order: HashMap<String, usize> = protein_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        let pb = create_progress_bar(protein_ids.len() as u64, "Resolving protein functions");
        let mut batch = ResolvedBatch::default();
        let mut outcomes = std::pin::pin!(resolve_all(&self.proteins, protein_ids, self.config.concurrency));

        while let Some(outcome) = outcomes.next().await {
            pb.inc(1);
            match outcome.result {
                Ok(advised) => batch.proteins.push(advised.into_value()),
                Err(e) => {
                    warn!(protein_id = %outcome.protein_id, error = %e, "Skipping protein");
                    batch.failures.push((outcome.protein_id, e));
                },
            }
        }
        pb.finish_and_clear();

        batch
            .proteins
            .sort_by_key(|p| order.get(&p.id).copied().unwrap_or(usize::MAX));
        batch
            .failures
            .sort_by_key(|(id, _)| order.get(id).copied().unwrap_or(usize::MAX));
        batch
    }

    /// Write the hierarchy back to the snapshot file, if one is in use.
    pub async fn save(&self) -> Result<()> {
        if let Some(cache) = &self.cache {
            let graph = self.ontology.snapshot().await;
            cache.save(&graph, &self.config.quickgo.base_url)?;
        }
        Ok(())
    }
}
