//! `gofn classify` command implementation
//!
//! Reads protein ids from a table, resolves their molecular functions
//! through QuickGO and writes `uniprot_id\tprotein_class` rows.

use crate::commands::{format_overlap_report, report_failures};
use crate::config::Config;
use crate::error::Result;
use crate::session::Session;
use crate::table::{output_writer, parse_separator, read_column, TsvWriter};
use crate::TableArgs;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use gofn_core::classification::UNCLASSIFIED;
use gofn_core::{ClassificationEngine, Protein};
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 2] = ["uniprot_id", "protein_class"];

/// Run the classify command
pub async fn run(
    config: &Config,
    table: &TableArgs,
    classes: Option<&Path>,
    no_presets: bool,
    collapse: bool,
    omit_unclassified: bool,
    graph_cache: Option<PathBuf>,
) -> Result<()> {
    let separator = parse_separator(&table.separator)?;
    let protein_ids = read_column(&table.input, &table.column, separator)?;

    let session = Session::open(config, graph_cache)?;
    let engine = session.build_engine(classes, no_presets).await?;
    let batch = session.resolve_proteins(protein_ids).await;

    let rows = class_rows(&engine, &batch.proteins, collapse, omit_unclassified);
    let mut writer = TsvWriter::new(output_writer(table.output.as_deref())?, &HEADER)?;
    for (protein_id, class) in &rows {
        writer.write_row(&[protein_id.as_str(), class.as_str()])?;
    }
    writer.finish()?;

    eprintln!("{}", summary_table(&engine, &batch.proteins, collapse));
    let overlaps = engine.check_overlap_report().await?;
    if !overlaps.is_empty() {
        eprintln!("{}", format_overlap_report(&overlaps).yellow());
    }
    report_failures(&batch);

    session.save().await?;

    eprintln!(
        "{} Classified {} protein(s) into {} class(es)",
        "✓".green(),
        batch.proteins.len(),
        engine.len()
    );
    Ok(())
}

/// Output rows in protein order.
///
/// Collapsed: one row per protein carrying its assignment label.
/// Otherwise: one row per matching class.
///
/// A protein matching no class gets an `Unclassified` row in both modes, so
/// every input protein appears in the output. With `omit_unclassified` it
/// gets no row at all.
pub fn class_rows(
    engine: &ClassificationEngine,
    proteins: &[Protein],
    collapse: bool,
    omit_unclassified: bool,
) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    for protein in proteins {
        let matches = engine.matching_classes(protein);
        if matches.is_empty() {
            if !omit_unclassified {
                rows.push((protein.id.clone(), UNCLASSIFIED.to_string()));
            }
            continue;
        }

        if collapse {
            rows.push((protein.id.clone(), engine.classify(protein).label()));
            continue;
        }

        for class in matches {
            rows.push((protein.id.clone(), class));
        }
    }
    rows
}

fn summary_table(engine: &ClassificationEngine, proteins: &[Protein], collapse: bool) -> Table {
    let groups = engine.assign_classes(proteins, collapse);
    let unclassified = proteins
        .iter()
        .filter(|p| engine.matching_classes(p).is_empty())
        .count();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Class", "Proteins"]);

    for (class, members) in groups.iter().filter(|(_, members)| !members.is_empty()) {
        table.add_row(vec![class.clone(), members.len().to_string()]);
    }
    if unclassified > 0 {
        table.add_row(vec![UNCLASSIFIED.to_string(), unclassified.to_string()]);
    }
    table
}
