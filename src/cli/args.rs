// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ontorank",
    version,
    about = "Term segmentation, ontology expansion and PageRank over a legal term graph"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Read settings from this file instead of ./ontorank.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Log each admitted term and iteration detail
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split raw text into vocabulary terms
    Segment {
        /// Ontology graph (JSON)
        #[arg(long, short)]
        graph: PathBuf,
        /// Vocabulary file; defaults to the graph's nodes
        #[arg(long, value_name = "FILE")]
        vocab: Option<PathBuf>,
        /// Text to segment
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Grow a seed term set over the ontology
    Expand {
        #[arg(long, short)]
        graph: PathBuf,
        /// Rule names in pass order; defaults to the configured list
        #[arg(long, value_delimiter = ',')]
        rules: Vec<String>,
        /// Seed terms
        #[arg(required = true)]
        seeds: Vec<String>,
    },
    /// Rank graph nodes, optionally biased toward featured terms
    Rank {
        #[arg(long, short)]
        graph: PathBuf,
        /// Terms to amplify in the teleport vector
        #[arg(long, short, value_delimiter = ',')]
        featured: Vec<String>,
        /// Labels whose edges rank conditionally (overrides config)
        #[arg(long, value_delimiter = ',')]
        conditional: Vec<String>,
        /// Show only the first N nodes
        #[arg(long, default_value = "20")]
        top: usize,
    },
    /// Cosine similarity between the distributions of named term sets
    Similarity {
        #[arg(long, short)]
        graph: PathBuf,
        /// JSON object mapping set names to term lists
        #[arg(long, short)]
        sets: PathBuf,
        /// Expand each set before ranking
        #[arg(long)]
        expand: bool,
    },
    /// Show the effective configuration
    Config {
        /// Write it to ./ontorank.toml
        #[arg(long)]
        init: bool,
    },
}
