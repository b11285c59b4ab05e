//! gofn CLI Library
//!
//! Command-line interface for classifying proteins by their GO molecular
//! functions.
//!
//! # Overview
//!
//! - **Classification**: Assign protein classes from QuickGO annotations (`gofn classify`)
//! - **Function listing**: One row per protein and function (`gofn annotate`)
//! - **Term inspection**: Show a GO term with its ancestors or descendants (`gofn term`)
//! - **Class inspection**: List class rules and their overlaps (`gofn classes`)
//! - **Configuration**: Show effective settings (`gofn config show`)
//!
//! The imported part of the hierarchy can be kept between runs with
//! `--graph-cache`.

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod cache;
pub mod class_file;
pub mod commands;
pub mod config;
pub mod error;
pub mod progress;
pub mod quickgo;
pub mod session;
pub mod table;

// Re-export commonly used types
pub use config::Config;
pub use error::{CliError, Result};
pub use quickgo::QuickGoClient;
pub use session::Session;

use clap::{Args, Parser, Subcommand};
use gofn_common::logging::{LogConfig, LogLevel, LogOutput};
use std::path::PathBuf;

/// gofn - GO molecular function classifier
#[derive(Parser, Debug)]
#[command(name = "gofn")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// QuickGO services URL
    #[arg(long, env = "GOFN_QUICKGO_URL", global = true)]
    pub quickgo_url: Option<String>,

    /// Proteins resolved concurrently
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    /// Print the command reference as markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify the proteins of a table
    Classify {
        #[command(flatten)]
        table: TableArgs,

        /// Class definitions (TOML or YAML)
        #[arg(long)]
        classes: Option<PathBuf>,

        /// Do not load the built-in classes
        #[arg(long)]
        no_presets: bool,

        /// One row per protein; several matches become a Multiclass label
        #[arg(long)]
        collapse: bool,

        /// Write no row for proteins that match no class (default: an Unclassified row)
        #[arg(long)]
        omit_unclassified: bool,

        #[command(flatten)]
        cache: CacheArgs,
    },

    /// List the molecular functions of the proteins of a table
    Annotate {
        #[command(flatten)]
        table: TableArgs,

        /// Keep full term names instead of dropping " activity"
        #[arg(long)]
        full_names: bool,

        /// Only list these functions (repeatable)
        #[arg(long = "only", value_name = "GO_ID")]
        only: Vec<String>,

        #[command(flatten)]
        cache: CacheArgs,
    },

    /// Show a GO molecular function term
    Term {
        /// GO identifier (e.g., "GO:0016301")
        go_id: String,

        /// List all ancestors
        #[arg(short, long)]
        ancestors: bool,

        /// List the known descendants
        #[arg(short, long)]
        descendants: bool,

        #[command(flatten)]
        cache: CacheArgs,
    },

    /// Show the class rules and their overlaps
    Classes {
        /// Class definitions (TOML or YAML)
        #[arg(long)]
        classes: Option<PathBuf>,

        /// Do not load the built-in classes
        #[arg(long)]
        no_presets: bool,

        #[command(flatten)]
        cache: CacheArgs,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Input and output tables
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Input table with one protein per row
    #[arg(short, long)]
    pub input: PathBuf,

    /// Column holding UniProt accessions
    #[arg(short, long)]
    pub column: String,

    /// Column separator ("tab", "comma" or a single character)
    #[arg(short, long, default_value = "tab")]
    pub separator: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Graph snapshot reuse
#[derive(Args, Debug, Clone, Default)]
pub struct CacheArgs {
    /// Load and save the GO hierarchy here (default location when no file is given)
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    pub graph_cache: Option<Option<PathBuf>>,
}

impl CacheArgs {
    /// Snapshot path to use, if any.
    pub fn resolve(&self, config: &Config) -> Option<PathBuf> {
        match &self.graph_cache {
            None => None,
            Some(Some(path)) => Some(path.clone()),
            Some(None) => Some(config.default_graph_cache()),
        }
    }
}

impl Cli {
    /// Console logging for this invocation.
    ///
    /// `GOFN_LOG_*` variables override the `--verbose` level; an invalid
    /// value is an error rather than being ignored.
    pub fn log_config(&self) -> Result<LogConfig> {
        let level = if self.verbose { LogLevel::Debug } else { LogLevel::Warn };
        let config = LogConfig::builder()
            .level(level)
            .output(LogOutput::Console)
            .log_file_prefix("gofn")
            .build()
            .merge_env()?;
        Ok(config)
    }
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show all configuration
    Show,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_classify() {
        let cli = Cli::try_parse_from([
            "gofn", "classify", "-i", "proteins.tsv", "-c", "Entry", "--collapse", "--graph-cache",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Classify {
                table,
                collapse,
                no_presets,
                omit_unclassified,
                cache,
                ..
            }) => {
                assert_eq!(table.input, PathBuf::from("proteins.tsv"));
                assert_eq!(table.separator, "tab");
                assert!(collapse);
                assert!(!omit_unclassified);
                assert!(!no_presets);

                let config = Config::default();
                assert_eq!(cache.resolve(&config), Some(config.default_graph_cache()));
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cache_args_resolution() {
        let config = Config::default();
        assert_eq!(CacheArgs::default().resolve(&config), None);

        let explicit = CacheArgs {
            graph_cache: Some(Some(PathBuf::from("graph.json"))),
        };
        assert_eq!(explicit.resolve(&config), Some(PathBuf::from("graph.json")));
    }

    #[test]
    fn test_annotate_only_is_repeatable() {
        let cli = Cli::try_parse_from([
            "gofn", "annotate", "-i", "p.csv", "-c", "id", "-s", "comma", "--only", "GO:0016301",
            "--only", "GO:0005215",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Annotate { only, .. }) => {
                assert_eq!(only, vec!["GO:0016301", "GO:0005215"]);
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
