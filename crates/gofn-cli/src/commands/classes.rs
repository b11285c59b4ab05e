//! `gofn classes` command implementation
//!
//! Lists the class rules in registration order with their canonical ids
//! and reports every overlapping pair.

use crate::commands::format_overlap_report;
use crate::config::Config;
use crate::error::Result;
use crate::session::Session;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use gofn_core::ClassRule;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Run the classes command
pub async fn run(
    config: &Config,
    classes: Option<&Path>,
    no_presets: bool,
    graph_cache: Option<PathBuf>,
) -> Result<()> {
    let session = Session::open(config, graph_cache)?;
    let engine = session.build_engine(classes, no_presets).await?;

    println!("{}", format!("{} class(es)", engine.len()).cyan().bold());
    println!("{}", rules_table(engine.rules()));
    println!();
    println!("{}", format_overlap_report(&engine.check_overlap_report().await?));

    session.save().await?;
    Ok(())
}

pub fn rules_table(rules: &[ClassRule]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Class", "Required", "Excluded"]);

    for rule in rules {
        table.add_row(vec![rule.name.clone(), id_list(&rule.required), id_list(&rule.excluded)]);
    }
    table
}

fn id_list(ids: &BTreeSet<String>) -> String {
    if ids.is_empty() {
        "-".to_string()
    } else {
        ids.iter().cloned().collect::<Vec<_>>().join("\n")
    }
}
