//! `gofn term` command implementation

use crate::config::Config;
use crate::error::Result;
use crate::session::Session;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use gofn_core::{Ontology, OntologyError, Term};
use std::path::PathBuf;

/// Run the term command
pub async fn run(
    config: &Config,
    go_id: &str,
    ancestors: bool,
    descendants: bool,
    graph_cache: Option<PathBuf>,
) -> Result<()> {
    let session = Session::open(config, graph_cache)?;
    let ontology = session.ontology();

    let advised = ontology.add_function(go_id.trim()).await?;
    for advisory in &advised.advisories {
        println!("{} {}", "⚠".yellow(), advisory);
    }
    let canonical = advised.into_value();
    let term = ontology
        .term(&canonical)
        .await
        .ok_or_else(|| OntologyError::UnknownTerm(canonical.clone()))?;

    println!("{}", term_details(ontology, &term).await?);

    if ancestors {
        let related = without(ontology.ancestors(&canonical).await?, &canonical);
        println!();
        println!("{}", format!("Ancestors ({})", related.len()).cyan().bold());
        println!("{}", term_table(&related));
    }

    if descendants {
        let related = without(ontology.descendants(&canonical).await?, &canonical);
        println!();
        println!(
            "{}",
            format!("Descendants imported so far ({})", related.len()).cyan().bold()
        );
        println!("{}", term_table(&related));
    }

    session.save().await?;
    Ok(())
}

async fn term_details(ontology: &Ontology, term: &Term) -> Result<Table> {
    let parents = ontology
        .parents(&term.id)
        .await?
        .into_iter()
        .map(|parent| format!("{} {}", parent.id, parent.name))
        .collect::<Vec<_>>();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);

    table.add_row(vec!["ID", term.id.as_str()]);
    table.add_row(vec!["Name", term.name.as_str()]);
    let aspect = term.aspect.to_string();
    table.add_row(vec!["Aspect", aspect.as_str()]);
    if !term.definition.is_empty() {
        table.add_row(vec!["Definition", term.definition.as_str()]);
    }
    if term.obsolete {
        table.add_row(vec!["Obsolete", "yes"]);
    }
    let parents = if parents.is_empty() { "-".to_string() } else { parents.join("\n") };
    table.add_row(vec!["Parents", parents.as_str()]);
    Ok(table)
}

fn without(terms: Vec<Term>, id: &str) -> Vec<Term> {
    terms.into_iter().filter(|term| term.id != id).collect()
}

fn term_table(terms: &[Term]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["ID", "Name"]);

    for term in terms {
        table.add_row(vec![term.id.as_str(), term.name.as_str()]);
    }
    table
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use gofn_core::{InMemoryResolver, MOLECULAR_FUNCTION_ROOT};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_term_details_list_parents() {
        let resolver = Arc::new(
            InMemoryResolver::new()
                .with_function(MOLECULAR_FUNCTION_ROOT, "molecular_function")
                .with_function("GO:0003824", "catalytic activity")
                .with_edge("GO:0003824", MOLECULAR_FUNCTION_ROOT),
        );
        let ontology = Ontology::new(resolver);
        ontology.add_function("GO:0003824").await.unwrap();
        let term = ontology.term("GO:0003824").await.unwrap();

        let rendered = term_details(&ontology, &term).await.unwrap().to_string();
        assert!(rendered.contains("catalytic activity"));
        assert!(rendered.contains("GO:0003674 molecular_function"));
        assert!(!rendered.contains("Obsolete"));
    }

    #[test]
    fn test_without_drops_the_term_itself() {
        let terms = vec![
            Term::new("GO:0003674", "molecular_function", gofn_core::Aspect::MolecularFunction),
            Term::new("GO:0003824", "catalytic activity", gofn_core::Aspect::MolecularFunction),
        ];
        let rest = without(terms, "GO:0003824");
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].id, "GO:0003674");
    }
}
