//! QuickGO response payloads
//!
//! Only the fields gofn reads are modelled; everything else is ignored.

use gofn_core::resolver::{AnnotationRecord, PathEdge};
use gofn_core::{Aspect, OntologyError, Term};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub results_per_page: Option<u32>,
    pub current: u32,
    pub total: u32,
}

/// `GET /ontology/go/terms/{ids}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermResponse {
    #[serde(default)]
    pub number_of_hits: Option<u64>,
    #[serde(default)]
    pub results: Vec<TermResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermResult {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub definition: Option<Definition>,
    pub aspect: String,
    #[serde(default)]
    pub is_obsolete: bool,
}

#[derive(Debug, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub text: String,
}

impl TryFrom<TermResult> for Term {
    type Error = OntologyError;

    fn try_from(result: TermResult) -> Result<Self, Self::Error> {
        let aspect: Aspect = result.aspect.parse()?;
        let mut term = Term::new(result.id, result.name, aspect);
        if let Some(definition) = result.definition {
            term = term.with_definition(definition.text);
        }
        if result.is_obsolete {
            term = term.obsolete();
        }
        Ok(term)
    }
}

/// `GET /ontology/go/terms/{start}/paths/{end}`
///
/// `results` is kept raw so a non-list payload can be reported as malformed
/// instead of failing deserialization of the whole body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResponse {
    #[serde(default)]
    pub page_info: Option<PageInfo>,
    #[serde(default)]
    pub results: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct PathEdgeResult {
    pub child: String,
    pub parent: String,
    pub relationship: String,
}

impl From<PathEdgeResult> for PathEdge {
    fn from(edge: PathEdgeResult) -> Self {
        PathEdge {
            child: edge.child,
            parent: edge.parent,
            relationship: edge.relationship.into(),
        }
    }
}

/// `GET /annotation/search`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationResponse {
    #[serde(default)]
    pub number_of_hits: u64,
    #[serde(default)]
    pub page_info: Option<PageInfo>,
    #[serde(default)]
    pub results: Vec<AnnotationResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationResult {
    pub gene_product_id: String,
    pub go_id: String,
    #[serde(default)]
    pub go_aspect: String,
    #[serde(default)]
    pub qualifier: String,
}

impl From<AnnotationResult> for AnnotationRecord {
    fn from(result: AnnotationResult) -> Self {
        AnnotationRecord {
            gene_product_id: result.gene_product_id,
            go_id: result.go_id,
            aspect: result.go_aspect,
            qualifier: result.qualifier,
        }
    }
}
