// src/cli/handlers.rs
use crate::config::{Config, CONFIG_FILE};
use crate::exit::OntoRankExit;
use crate::expand::{expand_with, Expander, Rule};
use crate::graph::{load_graph, OntologyGraph};
use crate::rank::{
    personalization_map, ranked, ConditionalOptions, Distribution, PageRank, RankDistribution,
};
use crate::segment::{parse_term_list, Segmenter};
use crate::similarity::pairwise_similarities;
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::info;

fn read_term_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read term list {}", path.display()))?;
    Ok(parse_term_list(&content))
}

fn resolve_rules(config: &Config, names: &[String]) -> Result<Vec<Rule>> {
    if names.is_empty() {
        return Ok(config.expand.rules.clone());
    }
    names
        .iter()
        .map(|n| Rule::from_name(n).ok_or_else(|| anyhow!("Unknown rule: {n}")))
        .collect()
}

/// Handles the segment command.
///
/// # Errors
/// Returns error if the graph or a term list cannot be read.
pub fn handle_segment(
    config: &Config,
    graph: &Path,
    vocab: Option<&Path>,
    text: &[String],
) -> Result<OntoRankExit> {
    let vocabulary = match vocab.or(config.segment.vocabulary.as_deref().map(Path::new)) {
        Some(path) => read_term_list(path)?,
        None => load_graph(graph)?.nodes().map(str::to_string).collect(),
    };
    let priority_lists = config
        .segment
        .priority_lists
        .iter()
        .map(|p| read_term_list(Path::new(p)).map(|terms| terms.into_iter().collect()))
        .collect::<Result<Vec<HashSet<String>>>>()?;

    let segmenter = Segmenter::new(&vocabulary, &config.segment.stopwords, &priority_lists);
    for sentence in text {
        let tokens = segmenter.segment(sentence);
        println!("{} {}", "→".cyan(), tokens.join(","));
    }
    Ok(OntoRankExit::Success)
}

/// Handles the expand command.
///
/// # Errors
/// Returns error if the graph cannot be loaded or a rule name is unknown.
pub fn handle_expand(
    config: &Config,
    graph: &Path,
    rules: &[String],
    seeds: &[String],
) -> Result<OntoRankExit> {
    let graph = load_graph(graph)?;
    let expander = Expander::new(&graph, resolve_rules(config, rules)?);
    let result = expander.expand(seeds);

    let seed_set: HashSet<&str> = seeds.iter().map(String::as_str).collect();
    for term in &result.terms {
        let score = result.scores.get(term).copied().unwrap_or_default();
        if seed_set.contains(term.as_str()) {
            println!("  {term} {}", format!("{score:.1}").dimmed());
        } else {
            println!("{} {} {}", "+".green(), term.green(), format!("{score:.1}").dimmed());
        }
    }
    println!(
        "{}",
        format!("{} seeds → {} terms", seed_set.len(), result.terms.len()).bold()
    );
    Ok(OntoRankExit::Success)
}

/// Handles the rank command.
///
/// # Errors
/// Returns error if the graph cannot be loaded or ranking fails.
pub fn handle_rank(
    config: &Config,
    graph: &Path,
    featured: &[String],
    conditional: &[String],
    top: usize,
) -> Result<OntoRankExit> {
    let graph = load_graph(graph)?;
    let conditional = if conditional.is_empty() {
        config.rank.conditional()
    } else {
        Some(ConditionalOptions {
            labels: conditional.iter().cloned().collect(),
            in_degree: config.rank.in_degree,
            out_degree: config.rank.out_degree,
            through: config.rank.through,
        })
    };

    let mut ranker = RankDistribution::new(&graph, config.rank.preprocess(), config.rank.options())
        .with_amplify(config.rank.amplify);
    if let Some(conditional) = conditional {
        ranker = ranker.with_conditional(conditional);
    }
    let distribution = ranker.distribution(featured)?;

    let featured: HashSet<&str> = featured.iter().map(String::as_str).collect();
    for (i, (node, score)) in ranked(distribution).into_iter().take(top).enumerate() {
        let line = format!("{:>4}. {score:.6}  {node}", i + 1);
        if featured.contains(node.as_str()) {
            println!("{}", line.yellow());
        } else {
            println!("{line}");
        }
    }
    Ok(OntoRankExit::Success)
}

/// Handles the similarity command.
///
/// # Errors
/// Returns error if the inputs cannot be read or a ranking fails.
pub fn handle_similarity(
    config: &Config,
    graph: &Path,
    sets: &Path,
    expand: bool,
) -> Result<OntoRankExit> {
    let graph = load_graph(graph)?;
    let content = fs::read_to_string(sets)
        .with_context(|| format!("Failed to read term sets {}", sets.display()))?;
    let term_sets: BTreeMap<String, Vec<String>> =
        serde_json::from_str(&content).context("Term sets must map names to term lists")?;

    let ranking_graph = config.rank.preprocess().apply(&graph);
    let dimensions: Vec<String> = ranking_graph.nodes().map(str::to_string).collect();
    let ranker = PageRank::new(config.rank.options());
    let conditional = config.rank.conditional();
    let rules = &config.expand.rules;

    let sims = pairwise_similarities(&term_sets, &dimensions, |key, terms| {
        let terms = if expand {
            expand_with(terms, &graph, rules).terms
        } else {
            terms.to_vec()
        };
        info!("{key}: {} featured terms", terms.len());
        let personalization =
            personalization_map(&terms, ranking_graph.nodes(), config.rank.amplify);
        rank_once(&ranker, &ranking_graph, conditional.as_ref(), &personalization)
    })?;

    let mut pairs: Vec<_> = sims.into_iter().collect();
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
    for ((a, b), sim) in pairs {
        println!("{a}: {b} {} {sim:.6}", "→".cyan());
    }
    Ok(OntoRankExit::Success)
}

fn rank_once(
    ranker: &PageRank,
    graph: &OntologyGraph,
    conditional: Option<&ConditionalOptions>,
    personalization: &HashMap<String, f64>,
) -> crate::error::Result<Distribution> {
    match conditional {
        Some(c) => ranker.rank_conditional(graph, c, Some(personalization), None),
        None => ranker.rank(graph, Some(personalization), None),
    }
}

/// Handles the config command.
///
/// # Errors
/// Returns error if serialization or the write fails.
pub fn handle_config(config: &Config, init: bool) -> Result<OntoRankExit> {
    if init {
        config.save()?;
        println!("{} wrote {CONFIG_FILE}", "✓".green());
        return Ok(OntoRankExit::Success);
    }
    print!("{}", config.to_toml_string()?);
    Ok(OntoRankExit::Success)
}
