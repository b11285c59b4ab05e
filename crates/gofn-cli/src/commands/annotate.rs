//! `gofn annotate` command implementation
//!
//! Writes one `uniprot_id\tgo_id\tprotein_function` row per protein and
//! closed molecular function.

use crate::commands::report_failures;
use crate::config::Config;
use crate::error::Result;
use crate::session::Session;
use crate::table::{output_writer, parse_separator, read_column, TsvWriter};
use crate::TableArgs;
use colored::Colorize;
use gofn_core::{FunctionAnnotator, FunctionRow, Ontology, Protein};
use std::collections::BTreeSet;
use std::path::PathBuf;

pub const HEADER: [&str; 3] = ["uniprot_id", "go_id", "protein_function"];

/// Run the annotate command
pub async fn run(
    config: &Config,
    table: &TableArgs,
    full_names: bool,
    only: &[String],
    graph_cache: Option<PathBuf>,
) -> Result<()> {
    let separator = parse_separator(&table.separator)?;
    let protein_ids = read_column(&table.input, &table.column, separator)?;

    let session = Session::open(config, graph_cache)?;
    let annotator = build_annotator(session.ontology(), full_names, only).await?;
    let batch = session.resolve_proteins(protein_ids).await;
    let rows = function_rows(&annotator, session.ontology(), &batch.proteins).await;

    let mut writer = TsvWriter::new(output_writer(table.output.as_deref())?, &HEADER)?;
    for row in &rows {
        writer.write_row(&[
            row.protein_id.as_str(),
            row.go_id.as_deref().unwrap_or(""),
            row.function.as_str(),
        ])?;
    }
    writer.finish()?;

    report_failures(&batch);
    session.save().await?;

    eprintln!(
        "{} Wrote {} function row(s) for {} protein(s)",
        "✓".green(),
        rows.len(),
        batch.proteins.len()
    );
    Ok(())
}

/// Annotator for the command flags. `only` ids are imported and
/// canonicalized so renamed ids still select their function.
pub async fn build_annotator(
    ontology: &Ontology,
    full_names: bool,
    only: &[String],
) -> Result<FunctionAnnotator> {
    let annotator = FunctionAnnotator::new().full_names(full_names);
    if only.is_empty() {
        return Ok(annotator);
    }

    let mut selection = BTreeSet::new();
    for id in only {
        selection.insert(ontology.add_function(id.trim()).await?.into_value());
    }
    Ok(annotator.only(selection))
}

pub async fn function_rows(
    annotator: &FunctionAnnotator,
    ontology: &Ontology,
    proteins: &[Protein],
) -> Vec<FunctionRow> {
    let mut rows = Vec::new();
    for protein in proteins {
        rows.extend(annotator.annotate(ontology, protein).await);
    }
    rows
}
