//! Built-in class set
//!
//! A coarse functional classification of proteins, mostly along the
//! enzyme commission top levels, receptor families and a few ligand
//! bindings. Order matters: overlap checks only see rules defined earlier.

use super::ClassDefinition;

/// Catch-all for proteins with none of the functions the other classes key on.
pub const OTHER_CLASS: &str = "Other/Unclassified";

fn class(name: &str, required: &[&str], excluded: &[&str]) -> ClassDefinition {
    ClassDefinition::new(name, required.iter().copied(), excluded.iter().copied())
}

/// The default protein classes, in definition order.
pub fn default_classes() -> Vec<ClassDefinition> {
    vec![
        class("Enzyme regulator", &["GO:0030234"], &[]),
        // Hydrolases
        class("Peptidase", &["GO:0008233"], &[]),
        class("Hydrolase (C-N bonds, no peptides)", &["GO:0016810"], &[]),
        class("Hydrolase (acid anhydrides)", &["GO:0016817"], &[]),
        class("Hydrolase (ester bonds)", &["GO:0016788"], &[]),
        class("Hydrolase (glycosyl bonds)", &["GO:0016798"], &[]),
        class(
            "Hydrolase (other)",
            &["GO:0016787"],
            &["GO:0008233", "GO:0016810", "GO:0016817", "GO:0016788", "GO:0016798"],
        ),
        class("Isomerase", &["GO:0016853"], &[]),
        class("Ligase", &["GO:0016874"], &[]),
        class("Lyase", &["GO:0016829"], &[]),
        class("Oxidoreductase", &["GO:0016491"], &[]),
        // Receptors
        class("Signaling receptor (not transmembrane)", &["GO:0038023"], &["GO:0004888"]),
        class("G protein-coupled receptor", &["GO:0004930"], &[]),
        class("Transmembrane receptor protein kinase", &["GO:0019199"], &[]),
        class(
            "Transmembrane signaling receptors (other)",
            &["GO:0004888"],
            &["GO:0019199", "GO:0004930"],
        ),
        class("Transcription regulator", &["GO:0140110"], &[]),
        // Ligand binding
        class("Serotonin binding", &["GO:0051378"], &[]),
        class("Dopamine binding", &["GO:0035240"], &[]),
        class("Acetylcholine binding", &["GO:0042166"], &[]),
        class("Epinephrine binding", &["GO:0051379"], &[]),
        class("Folic acid binding", &["GO:0005542"], &[]),
        // Transferases
        class("Transferase (acyl groups)", &["GO:0016746"], &[]),
        class("Transferase (alkyl or aryl groups, no methyl)", &["GO:0016765"], &[]),
        class("Transferase (glycosyl groups)", &["GO:0016757"], &[]),
        class("Transferase (one-carbon groups)", &["GO:0016741"], &[]),
        // Receptor kinases are kinases too; those proteins end up Multiclass.
        class("Kinase", &["GO:0016301"], &[]).allow_overlap(),
        class(
            "Transferase (phosphorus-containing groups, non-kinase)",
            &["GO:0016772"],
            &["GO:0016301"],
        ),
        class(
            "Transferase (other)",
            &["GO:0016740"],
            &["GO:0016746", "GO:0016765", "GO:0016757", "GO:0016741", "GO:0016772"],
        ),
        class("Transporter", &["GO:0005215"], &[]),
        class("DNA binding", &["GO:0003677"], &[]),
        class(
            OTHER_CLASS,
            &[],
            &[
                "GO:0030234", "GO:0016787", "GO:0016853", "GO:0016874", "GO:0016829", "GO:0016491",
                "GO:0038023", "GO:0140110", "GO:0051378", "GO:0035240", "GO:0042166", "GO:0051379",
                "GO:0005542", "GO:0016740", "GO:0005215", "GO:0003677",
            ],
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::term::validate_go_id;
    use std::collections::HashSet;

    #[test]
    fn test_presets_are_well_formed() {
        let classes = default_classes();

        let names: HashSet<_> = classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), classes.len(), "class names must be unique");

        for class in &classes {
            for id in class.required.iter().chain(&class.excluded) {
                assert!(validate_go_id(id), "{} in '{}'", id, class.name);
            }
        }
    }

    #[test]
    fn test_only_kinase_skips_overlap_check() {
        let unchecked: Vec<_> = default_classes()
            .into_iter()
            .filter(|c| !c.check_overlap)
            .map(|c| c.name)
            .collect();
        assert_eq!(unchecked, vec!["Kinase".to_string()]);
    }

    #[test]
    fn test_catch_all_is_last() {
        let classes = default_classes();
        let last = classes.last().map(|c| c.name.as_str());
        assert_eq!(last, Some(OTHER_CLASS));
        assert!(classes.last().is_some_and(|c| c.required.is_empty()));
    }

    #[test]
    fn test_labels_match_reference_output() {
        let classes = default_classes();
        let find = |name: &str| classes.iter().find(|c| c.name == name);

        let receptors = find("Transmembrane signaling receptors (other)").unwrap();
        assert_eq!(receptors.required, vec!["GO:0004888".to_string()]);
        assert!(find("Transferase (phosphorus-containing groups, non-kinase)").is_some());
    }
}
