//! On-disk snapshots of the imported GO hierarchy
//!
//! A snapshot stores the graph together with when and from where it was
//! built. Writes go to a temporary file in the same directory that is then
//! renamed over the target, so a crashed run never leaves a torn snapshot.

use crate::error::{CliError, Result};
use chrono::{DateTime, Utc};
use gofn_core::HierarchyGraph;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

#[derive(Debug, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub saved_at: DateTime<Utc>,
    /// QuickGO URL the terms were fetched from
    pub source: String,
    pub graph: HierarchyGraph,
}

#[derive(Debug, Clone)]
pub struct GraphCache {
    path: PathBuf,
}

impl GraphCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored graph, or `None` when no snapshot exists yet.
    ///
    /// A snapshot built from another QuickGO URL is still used, with a
    /// warning.
    pub fn load(&self, source: &str) -> Result<Option<HierarchyGraph>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let snapshot: GraphSnapshot = serde_json::from_str(&contents).map_err(|e| {
            CliError::cache(format!("'{}' is not a valid snapshot: {}", self.path.display(), e))
        })?;

        if snapshot.source != source {
            warn!(
                path = %self.path.display(),
                snapshot_source = %snapshot.source,
                source = %source,
                "Graph snapshot was built from a different QuickGO URL"
            );
        }

        info!(
            path = %self.path.display(),
            terms = snapshot.graph.len(),
            saved_at = %snapshot.saved_at,
            "Loaded graph snapshot"
        );
        Ok(Some(snapshot.graph))
    }

    /// Atomically replace the snapshot with `graph`.
    pub fn save(&self, graph: &HierarchyGraph, source: &str) -> Result<()> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let snapshot = GraphSnapshot {
            saved_at: Utc::now(),
            source: source.to_string(),
            graph: graph.clone(),
        };

        let mut tmp = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer(&mut tmp, &snapshot)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| CliError::Io(e.error))?;

        info!(path = %self.path.display(), terms = graph.len(), "Saved graph snapshot");
        Ok(())
    }
}
