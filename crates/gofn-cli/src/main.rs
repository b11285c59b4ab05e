//! gofn CLI - Main entry point

use clap::Parser;
use gofn_cli::{Cli, Commands, Config, ConfigCommand};
use gofn_common::logging::init_logging;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Variables from a local .env are visible to clap's `env` attributes too
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    if cli.command.is_none() {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    }

    let log_config = match cli.log_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        },
    };

    // The CLI works without logging
    let _guard = init_logging(&log_config).ok();

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> gofn_cli::Result<()> {
    let Some(ref command) = cli.command else {
        unreachable!("Command should have been validated in main");
    };

    let config = Config::from_env()?.with_overrides(cli.quickgo_url.as_deref(), cli.concurrency)?;

    match command {
        Commands::Classify {
            table,
            classes,
            no_presets,
            collapse,
            omit_unclassified,
            cache,
        } => {
            gofn_cli::commands::classify::run(
                &config,
                table,
                classes.as_deref(),
                *no_presets,
                *collapse,
                *omit_unclassified,
                cache.resolve(&config),
            )
            .await
        },

        Commands::Annotate {
            table,
            full_names,
            only,
            cache,
        } => {
            gofn_cli::commands::annotate::run(&config, table, *full_names, only, cache.resolve(&config))
                .await
        },

        Commands::Term {
            go_id,
            ancestors,
            descendants,
            cache,
        } => {
            gofn_cli::commands::term::run(&config, go_id, *ancestors, *descendants, cache.resolve(&config))
                .await
        },

        Commands::Classes {
            classes,
            no_presets,
            cache,
        } => {
            gofn_cli::commands::classes::run(&config, classes.as_deref(), *no_presets, cache.resolve(&config))
                .await
        },

        Commands::Config { command } => match command {
            ConfigCommand::Show => gofn_cli::commands::config::show(&config).await,
        },
    }
}
