//! Non-fatal findings attached to successful results

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A recoverable condition met while growing the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// The ontology renamed or merged `requested` into `canonical`.
    Rerouted { requested: String, canonical: String },
    /// The term is marked obsolete upstream but was admitted anyway.
    Obsolete { id: String },
    /// No is_a path to the molecular_function root; the term is an orphan.
    NoPathToRoot { id: String },
}

impl Advisory {
    /// Emit the advisory as a structured warning.
    pub fn log(&self) {
        match self {
            Advisory::Rerouted {
                requested,
                canonical,
            } => warn!(requested = %requested, canonical = %canonical, "GO term rerouted"),
            Advisory::Obsolete { id } => warn!(go_id = %id, "GO term is obsolete"),
            Advisory::NoPathToRoot { id } => {
                warn!(go_id = %id, "No path to molecular_function, term remains unconnected")
            },
        }
    }
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advisory::Rerouted {
                requested,
                canonical,
            } => write!(f, "{} is updated to {}", requested, canonical),
            Advisory::Obsolete { id } => write!(f, "{} is obsolete", id),
            Advisory::NoPathToRoot { id } => {
                write!(f, "{} has no path to molecular_function", id)
            },
        }
    }
}

/// A value together with the advisories raised while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advised<T> {
    pub value: T,
    pub advisories: Vec<Advisory>,
}

impl<T> Advised<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            advisories: Vec::new(),
        }
    }

    pub fn new(value: T, advisories: Vec<Advisory>) -> Self {
        Self { value, advisories }
    }

    pub fn is_clean(&self) -> bool {
        self.advisories.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Advised<U> {
        Advised {
            value: f(self.value),
            advisories: self.advisories,
        }
    }

    /// Move the advisories into `sink` and return the bare value.
    pub fn collect_into(self, sink: &mut Vec<Advisory>) -> T {
        for advisory in self.advisories {
            if !sink.contains(&advisory) {
                sink.push(advisory);
            }
        }
        self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
