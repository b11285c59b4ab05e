//! Rule-based protein classes
//!
//! A [`ClassRule`] matches a protein when its closed function set contains
//! every required id and none of the excluded ones. The
//! [`ClassificationEngine`] keeps an ordered list of rules and, on request,
//! refuses new rules whose coverage overlaps an existing rule.
//!
//! Coverage of a rule is the union of the descendant closures of its
//! required ids minus the union of the descendant closures of its excluded
//! ids. It is computed against the hierarchy as it stands at check time, so
//! terms admitted later are not retroactively checked.

pub mod presets;

use crate::advisory::{Advised, Advisory};
use crate::error::{OntologyError, Result};
use crate::ontology::Ontology;
use crate::protein::Protein;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Label used for proteins that match more than one class.
pub const MULTICLASS: &str = "Multiclass";

/// Label used for proteins that match no class.
pub const UNCLASSIFIED: &str = "Unclassified";

/// A named class, stored with canonical ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRule {
    pub name: String,
    pub required: BTreeSet<String>,
    #[serde(default)]
    pub excluded: BTreeSet<String>,
}

impl ClassRule {
    pub fn matches(&self, protein: &Protein) -> bool {
        self.required
            .iter()
            .all(|id| protein.closed_function_ids.contains(id))
            && !self
                .excluded
                .iter()
                .any(|id| protein.closed_function_ids.contains(id))
    }
}

/// A class as written by a user, before its ids are canonicalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub name: String,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub excluded: Vec<String>,
    /// Refuse the class when it overlaps an existing one
    #[serde(default = "default_check_overlap", alias = "check_clash")]
    pub check_overlap: bool,
}

fn default_check_overlap() -> bool {
    true
}

impl ClassDefinition {
    pub fn new<R, E, S>(name: impl Into<String>, required: R, excluded: E) -> Self
    where
        R: IntoIterator<Item = S>,
        E: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            required: required.into_iter().map(Into::into).collect(),
            excluded: excluded.into_iter().map(Into::into).collect(),
            check_overlap: true,
        }
    }

    /// Accept the class even when it overlaps existing ones.
    pub fn allow_overlap(mut self) -> Self {
        self.check_overlap = false;
        self
    }
}

/// Outcome of classifying a single protein.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "classes", rename_all = "snake_case")]
pub enum ClassAssignment {
    Unclassified,
    Single(String),
    Multiple(BTreeSet<String>),
}

impl ClassAssignment {
    fn from_matches(mut matches: BTreeSet<String>) -> Self {
        match matches.len() {
            0 => ClassAssignment::Unclassified,
            1 => match matches.pop_first() {
                Some(name) => ClassAssignment::Single(name),
                None => ClassAssignment::Unclassified,
            },
            _ => ClassAssignment::Multiple(matches),
        }
    }

    /// `Unclassified`, the class name, or `Multiclass_(a, b)`.
    pub fn label(&self) -> String {
        match self {
            ClassAssignment::Unclassified => UNCLASSIFIED.to_string(),
            ClassAssignment::Single(name) => name.clone(),
            ClassAssignment::Multiple(names) => format!(
                "{}_({})",
                MULTICLASS,
                names.iter().cloned().collect::<Vec<_>>().join(", ")
            ),
        }
    }

    pub fn classes(&self) -> Vec<&str> {
        match self {
            ClassAssignment::Unclassified => Vec::new(),
            ClassAssignment::Single(name) => vec![name.as_str()],
            ClassAssignment::Multiple(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

impl std::fmt::Display for ClassAssignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// A pair of registered rules whose coverage intersects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOverlapReport {
    pub first: String,
    pub second: String,
    pub ids: BTreeSet<String>,
}

#[derive(Debug)]
pub struct ClassificationEngine {
    ontology: Arc<Ontology>,
    rules: Vec<ClassRule>,
}

impl ClassificationEngine {
    pub fn new(ontology: Arc<Ontology>) -> Self {
        Self {
            ontology,
            rules: Vec::new(),
        }
    }

    pub fn ontology(&self) -> &Arc<Ontology> {
        &self.ontology
    }

    /// Registered rules in definition order.
    pub fn rules(&self) -> &[ClassRule] {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&ClassRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Register a class.
    ///
    /// Referenced ids are added to the hierarchy and stored canonicalized.
    /// With `check_overlap`, the class is refused when its coverage shares
    /// any id with an existing rule. Nothing is registered on error.
    pub async fn define_class<R, E, S>(
        &mut self,
        name: &str,
        required: R,
        excluded: E,
        check_overlap: bool,
    ) -> Result<Advised<()>>
    where
        R: IntoIterator<Item = S>,
        E: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.rule(name).is_some() {
            return Err(OntologyError::DuplicateRule(name.to_string()));
        }

        let mut advisories = Vec::new();
        let required = self.canonicalize(required, &mut advisories).await?;
        let excluded = self.canonicalize(excluded, &mut advisories).await?;

        let rule = ClassRule {
            name: name.to_string(),
            required,
            excluded,
        };

        if check_overlap {
            let coverage = self.coverage(&rule).await?;
            for existing in &self.rules {
                let ids: BTreeSet<String> = coverage
                    .intersection(&self.coverage(existing).await?)
                    .cloned()
                    .collect();
                if !ids.is_empty() {
                    return Err(OntologyError::RuleOverlap {
                        rule: rule.name,
                        existing: existing.name.clone(),
                        ids,
                    });
                }
            }
        }

        info!(
            class = %rule.name,
            required = rule.required.len(),
            excluded = rule.excluded.len(),
            "Defined protein class"
        );
        self.rules.push(rule);
        Ok(Advised::new((), advisories))
    }

    /// Register a [`ClassDefinition`].
    pub async fn define(&mut self, definition: &ClassDefinition) -> Result<Advised<()>> {
        self.define_class(
            &definition.name,
            &definition.required,
            &definition.excluded,
            definition.check_overlap,
        )
        .await
    }

    /// Descendant coverage of `rule` in the current hierarchy.
    pub async fn coverage(&self, rule: &ClassRule) -> Result<BTreeSet<String>> {
        let mut covered = BTreeSet::new();
        for id in &rule.required {
            covered.extend(self.ontology.descendant_ids(id).await?);
        }
        for id in &rule.excluded {
            for removed in self.ontology.descendant_ids(id).await? {
                covered.remove(&removed);
            }
        }
        Ok(covered)
    }

    /// Every overlapping pair among the registered rules.
    ///
    /// Rules registered without the overlap check show up here.
    pub async fn check_overlap_report(&self) -> Result<Vec<RuleOverlapReport>> {
        let mut coverages = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            coverages.push(self.coverage(rule).await?);
        }

        let mut reports = Vec::new();
        for (i, first) in self.rules.iter().enumerate() {
            for (j, second) in self.rules.iter().enumerate().skip(i + 1) {
                let ids: BTreeSet<String> =
                    coverages[i].intersection(&coverages[j]).cloned().collect();
                if !ids.is_empty() {
                    reports.push(RuleOverlapReport {
                        first: first.name.clone(),
                        second: second.name.clone(),
                        ids,
                    });
                }
            }
        }
        Ok(reports)
    }

    /// Names of every rule the protein satisfies.
    pub fn matching_classes(&self, protein: &Protein) -> BTreeSet<String> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(protein))
            .map(|rule| rule.name.clone())
            .collect()
    }

    pub fn classify(&self, protein: &Protein) -> ClassAssignment {
        ClassAssignment::from_matches(self.matching_classes(protein))
    }

    /// Group protein ids by class.
    ///
    /// Every rule has an entry, possibly empty. With `avoid_duplicates`,
    /// proteins matching several rules are listed only under
    /// [`MULTICLASS`]; otherwise they appear under each matching rule.
    /// Proteins matching nothing are left out.
    pub fn assign_classes<'a, I>(&self, proteins: I, avoid_duplicates: bool) -> BTreeMap<String, BTreeSet<String>>
    where
        I: IntoIterator<Item = &'a Protein>,
    {
        let mut groups: BTreeMap<String, BTreeSet<String>> = self
            .rules
            .iter()
            .map(|rule| (rule.name.clone(), BTreeSet::new()))
            .collect();
        if avoid_duplicates {
            groups.insert(MULTICLASS.to_string(), BTreeSet::new());
        }

        for protein in proteins {
            let matches = self.matching_classes(protein);
            if avoid_duplicates && matches.len() > 1 {
                groups
                    .entry(MULTICLASS.to_string())
                    .or_default()
                    .insert(protein.id.clone());
                continue;
            }
            for name in matches {
                groups.entry(name).or_default().insert(protein.id.clone());
            }
        }

        debug!(classes = groups.len(), "Assigned proteins to classes");
        groups
    }

    async fn canonicalize<I, S>(&self, ids: I, advisories: &mut Vec<Advisory>) -> Result<BTreeSet<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut canonical = BTreeSet::new();
        for id in ids {
            canonical.insert(
                self.ontology
                    .add_function(id.as_ref())
                    .await?
                    .collect_into(advisories),
            );
        }
        Ok(canonical)
    }
}
