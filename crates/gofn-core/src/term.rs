//! GO term model

use crate::error::{OntologyError, Result};
use serde::{Deserialize, Serialize};

/// GO id of the "molecular_function" root term.
pub const MOLECULAR_FUNCTION_ROOT: &str = "GO:0003674";

/// Check the `GO:nnnnnnn` identifier pattern.
pub fn validate_go_id(go_id: &str) -> bool {
    go_id.len() == 10
        && go_id.starts_with("GO:")
        && go_id[3..].chars().all(|c| c.is_ascii_digit())
}

/// Like [`validate_go_id`] but as a `Result`, for use with `?`.
pub fn require_go_id(go_id: &str) -> Result<()> {
    if validate_go_id(go_id) {
        Ok(())
    } else {
        Err(OntologyError::InvalidIdentifier(go_id.to_string()))
    }
}

/// The three GO sub-ontologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    MolecularFunction,
    BiologicalProcess,
    CellularComponent,
}

impl Aspect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aspect::MolecularFunction => "molecular_function",
            Aspect::BiologicalProcess => "biological_process",
            Aspect::CellularComponent => "cellular_component",
        }
    }
}

impl std::str::FromStr for Aspect {
    type Err = OntologyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "molecular_function" => Ok(Aspect::MolecularFunction),
            "biological_process" => Ok(Aspect::BiologicalProcess),
            "cellular_component" => Ok(Aspect::CellularComponent),
            other => Err(OntologyError::MalformedResponse(format!(
                "unknown GO aspect '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Aspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A GO term as reported by the term resolver.
///
/// `id` is always the canonical identifier; a lookup for a renamed or merged
/// id yields the term under its current id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub definition: String,
    pub aspect: Aspect,
    #[serde(default)]
    pub obsolete: bool,
}

impl Term {
    pub fn new(id: impl Into<String>, name: impl Into<String>, aspect: Aspect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            definition: String::new(),
            aspect,
            obsolete: false,
        }
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    pub fn obsolete(mut self) -> Self {
        self.obsolete = true;
        self
    }

    pub fn is_root(&self) -> bool {
        self.id == MOLECULAR_FUNCTION_ROOT
    }

    /// Validated admission as a functional node of the hierarchy.
    pub fn check_admissible(&self) -> Result<()> {
        require_go_id(&self.id)?;
        if self.aspect != Aspect::MolecularFunction {
            return Err(OntologyError::AspectMismatch {
                id: self.id.clone(),
                aspect: self.aspect.to_string(),
            });
        }
        Ok(())
    }

    /// Display name without the trailing " activity" most function terms carry.
    pub fn short_name(&self) -> &str {
        self.name.strip_suffix(" activity").unwrap_or(&self.name)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
