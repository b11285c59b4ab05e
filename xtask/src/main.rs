//! Build automation tasks for gofn
//!
//! - Generating the CLI reference from the clap definitions

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for gofn", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference in markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    let markdown = clap_markdown::help_markdown::<gofn_cli::Cli>();

    let content = format!(
        r#"# gofn CLI Reference

This documentation is generated from the CLI source code. Last updated: {}.

## Overview

gofn classifies proteins by their GO molecular functions. Annotations and
the is_a hierarchy are fetched from QuickGO on demand; only the part of the
hierarchy a run touches is imported.

## Quick Start

```bash
# Classify the proteins of the "Entry" column with the built-in classes
gofn classify -i proteins.tsv -c Entry -o classes.tsv

# Use your own classes and keep the imported hierarchy between runs
gofn classify -i proteins.tsv -c Entry --classes classes.toml --no-presets --graph-cache

# One row per protein and molecular function
gofn annotate -i proteins.csv -c uniprot -s comma --only GO:0016301

# Inspect a term
gofn term GO:0016301 --ancestors
```

## Class Files

```toml
[[class]]
name = "Kinase"
required = ["GO:0016301"]
check_overlap = false

[[class]]
name = "Transporter"
required = ["GO:0005215"]
excluded = ["GO:0015075"]
```

## Commands

{}

## Environment Variables

- `GOFN_QUICKGO_URL` - QuickGO services URL (default: `https://www.ebi.ac.uk/QuickGO/services`)
- `GOFN_TIMEOUT_SECS`, `GOFN_MAX_RETRIES`, `GOFN_RETRY_BACKOFF_MS` - HTTP behaviour
- `GOFN_PAGE_SIZE`, `GOFN_MAX_PAGES` - Annotation paging
- `GOFN_CONCURRENCY` - Proteins resolved concurrently
- `GOFN_CACHE_DIR` - Default graph snapshot directory
- `GOFN_LOG_LEVEL`, `GOFN_LOG_OUTPUT`, `GOFN_LOG_FORMAT`, `GOFN_LOG_FILTER` - Logging

---

*To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    let file_path = output_path.join("cli-reference.md");
    fs::write(&file_path, content)?;

    println!("✅ Generated CLI documentation at: {}", file_path.display());

    Ok(())
}
