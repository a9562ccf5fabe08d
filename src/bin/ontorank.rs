// src/bin/ontorank.rs
use clap::Parser;
use colored::Colorize;
use ontorank_core::cli::{self, Cli};
use ontorank_core::exit::OntoRankExit;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// `--verbose` wins over `RUST_LOG`.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("ontorank_core=debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ontorank_core=warn"))
}

fn init_logging(verbose: bool) {
    let filter = log_filter(verbose);
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> OntoRankExit {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli::dispatch::execute(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red());
            OntoRankExit::from(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_overrides_env() {
        std::env::set_var("RUST_LOG", "off");
        assert_eq!(log_filter(true).to_string(), "ontorank_core=debug");
        assert_eq!(log_filter(false).to_string(), "off");
    }
}
