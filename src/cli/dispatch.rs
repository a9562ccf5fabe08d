// src/cli/dispatch.rs
//! Command dispatch logic extracted from binary to reduce main function size.

use super::args::{Cli, Commands};
use super::handlers;
use crate::config::Config;
use crate::exit::OntoRankExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if config loading or the command handler fails.
pub fn execute(cli: Cli) -> Result<OntoRankExit> {
    let Some(command) = cli.command else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        return Ok(OntoRankExit::Success);
    };

    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load(),
    };
    config.verbose = cli.verbose;

    match command {
        Commands::Segment { graph, vocab, text } => {
            handlers::handle_segment(&config, &graph, vocab.as_deref(), &text)
        }
        Commands::Expand {
            graph,
            rules,
            seeds,
        } => handlers::handle_expand(&config, &graph, &rules, &seeds),
        Commands::Rank {
            graph,
            featured,
            conditional,
            top,
        } => handlers::handle_rank(&config, &graph, &featured, &conditional, top),
        Commands::Similarity {
            graph,
            sets,
            expand,
        } => handlers::handle_similarity(&config, &graph, &sets, expand),
        Commands::Config { init } => handlers::handle_config(&config, init),
    }
}
