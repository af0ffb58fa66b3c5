//! Taxotree CLI - Main entry point

use clap::Parser;
use std::process;
use taxotree_cli::{Cli, Commands};
use taxotree_common::logging::{init_logging, LogConfig, LogLevel};
use tracing::error;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Ensure a command is provided
    if cli.command.is_none() {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    }

    // Initialize logging based on verbose flag, letting environment
    // variables override
    let mut log_config = LogConfig::builder()
        .level(if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        })
        .build();
    if let Err(e) = log_config.apply_env() {
        eprintln!("Error: {e}");
        process::exit(2);
    }

    // Initialize logging (ignore errors as the CLI works without logging)
    let _ = init_logging(&log_config);

    // Execute command
    if let Err(e) = execute_command(&cli) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> taxotree_cli::Result<()> {
    // Command is guaranteed to exist at this point (checked in main)
    let Some(ref command) = cli.command else {
        unreachable!("Command should have been validated in main");
    };

    match command {
        Commands::Lca { ids } => taxotree_cli::commands::lca::run(&cli.db, ids),

        Commands::Lineage { id, names } => {
            taxotree_cli::commands::lineage::run(&cli.db, *id, *names)
        },

        Commands::Ranks { id, ranks } => taxotree_cli::commands::ranks::run(&cli.db, *id, ranks),

        Commands::CladeCounts { input, format } => {
            taxotree_cli::commands::clade_counts::run(&cli.db, input.as_deref(), *format)
        },

        Commands::Classify {
            input,
            vote_mode,
            majority,
            format,
        } => taxotree_cli::commands::classify::run(
            &cli.db,
            input.as_deref(),
            *vote_mode,
            *majority,
            *format,
        ),

        Commands::Info { format } => taxotree_cli::commands::info::run(&cli.db, *format),
    }
}
