//! motifrank CLI - motif-aware centrality from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Score with default parameters (theta = 1, every lambda = 1)
//! motifrank score ppi.edgelist --base dc -o out/
//!
//! # Tune parameters against known key nodes, then score with the best ones
//! motifrank optimize ppi.edgelist --base dc --key-nodes essential.txt --trials 50 -o out/
//!
//! # Synthetic network with fitness-ranked key nodes
//! motifrank generate -o data/ --nodes 1000 --avg-degree 10 --top 100 --top 200
//!
//! # Top-N statistics for several score files
//! motifrank report out/cdr.json out/csr.json --key-nodes essential.txt --top 500
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use motifrank::evaluate::check_disjoint;
use motifrank::generate::{generate, FitnessNetworkConfig};
use motifrank::io;
use motifrank::optimize::SamplerKind;
use motifrank::stats::{report_all, top_n};
use motifrank::{
    score, BaseScores, CentralityKind, Graph, Metric, NodeId, OptimizerConfig, ParameterOptimizer,
    ParameterVector, RankType,
};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "motifrank")]
#[command(about = "Motif-aware centrality ranking", long_about = None)]
struct Cli {
    /// Log progress (repeat for debug output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute CDR and CSR scores
    Score {
        /// Edge list file
        input: PathBuf,

        /// Base centrality tag (dc, bc, cc, ec, pr) or a JSON score file
        #[arg(short, long, default_value = "dc")]
        base: String,

        /// Largest clique size considered (default: largest clique in the graph)
        #[arg(short, long)]
        max_clique: Option<usize>,

        /// JSON parameter file (default: theta = 1, every lambda = 1)
        #[arg(short, long)]
        params: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Number of top nodes to print
        #[arg(short, long, default_value = "10")]
        top: usize,
    },

    /// Tune theta and lambda against key nodes, then score
    Optimize {
        /// Edge list file
        input: PathBuf,

        /// Base centrality tag (dc, bc, cc, ec, pr) or a JSON score file
        #[arg(short, long, default_value = "dc")]
        base: String,

        /// Key nodes: comma-separated ids or a file
        #[arg(short, long)]
        key_nodes: String,

        /// Non-key nodes: comma-separated ids or a file (default: every other node)
        #[arg(short, long)]
        non_key_nodes: Option<String>,

        /// Largest clique size considered
        #[arg(short, long)]
        max_clique: Option<usize>,

        /// Distribution to tune (cdr or csr)
        #[arg(short, long)]
        rank_type: Option<RankType>,

        /// Objective metric (auc, ap, f1)
        #[arg(long)]
        metric: Option<Metric>,

        /// F1 threshold (default: best over all observed scores)
        #[arg(long)]
        threshold: Option<f64>,

        /// Number of trials
        #[arg(long)]
        trials: Option<usize>,

        /// Sampler seed
        #[arg(long)]
        seed: Option<u64>,

        /// Proposal strategy (tpe, random)
        #[arg(long)]
        sampler: Option<SamplerKind>,

        /// JSON optimizer config; flags override its fields
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Generate a synthetic fitness network
    Generate {
        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Number of nodes
        #[arg(long, default_value = "1000")]
        nodes: usize,

        /// Target mean degree
        #[arg(long, default_value = "10")]
        avg_degree: usize,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Key-node set sizes to write (repeatable)
        #[arg(long, default_values_t = [100])]
        top: Vec<usize>,
    },

    /// Top-N classification statistics for score files
    Report {
        /// JSON score files
        #[arg(required = true)]
        scores: Vec<PathBuf>,

        /// Key nodes: comma-separated ids or a file
        #[arg(short, long)]
        key_nodes: String,

        /// Non-key nodes (default: every scored node not in the key set)
        #[arg(short, long)]
        non_key_nodes: Option<String>,

        /// Cut-off N
        #[arg(short, long, default_value = "500")]
        top: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    match cli.command {
        Commands::Score {
            input,
            base,
            max_clique,
            params,
            output,
            top,
        } => cmd_score(&input, &base, max_clique, params.as_deref(), &output, top),
        Commands::Optimize {
            input,
            base,
            key_nodes,
            non_key_nodes,
            max_clique,
            rank_type,
            metric,
            threshold,
            trials,
            seed,
            sampler,
            config,
            output,
        } => {
            let mut cfg = match config {
                Some(path) => io::load_json(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => OptimizerConfig::default(),
            };
            cfg.max_clique = max_clique.or(cfg.max_clique);
            cfg.rank_type = rank_type.unwrap_or(cfg.rank_type);
            cfg.metric = metric.unwrap_or(cfg.metric);
            cfg.threshold = threshold.or(cfg.threshold);
            cfg.n_trials = trials.unwrap_or(cfg.n_trials);
            cfg.seed = seed.or(cfg.seed);
            cfg.sampler = sampler.unwrap_or(cfg.sampler);
            cmd_optimize(&input, &base, &key_nodes, non_key_nodes.as_deref(), cfg, &output)
        }
        Commands::Generate {
            output,
            nodes,
            avg_degree,
            seed,
            top,
        } => cmd_generate(&output, nodes, avg_degree, seed, &top),
        Commands::Report {
            scores,
            key_nodes,
            non_key_nodes,
            top,
        } => cmd_report(&scores, &key_nodes, non_key_nodes.as_deref(), top),
    }
}

fn load_graph(path: &Path) -> Result<Graph> {
    let start = Instant::now();
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Loading {}...", path.display()));

    let graph = io::read_edgelist(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    pb.finish_with_message(format!("Loaded in {:.2?}", start.elapsed()));
    let stats = graph.stats();
    info!(
        nodes = stats.node_count,
        edges = stats.edge_count,
        isolated = stats.isolated_count,
        "graph loaded"
    );
    Ok(graph)
}

/// A centrality tag, or else a JSON score file.
fn load_base(arg: &str) -> Result<BaseScores> {
    if let Ok(kind) = arg.parse::<CentralityKind>() {
        return Ok(BaseScores::Kind(kind));
    }
    let path = Path::new(arg);
    if !path.exists() {
        bail!("base '{arg}' is neither a centrality tag (dc, bc, cc, ec, pr) nor a score file");
    }
    let scores = io::load_scores(path)
        .with_context(|| format!("Failed to load base scores {}", path.display()))?;
    Ok(BaseScores::Custom(scores))
}

/// A node list file, or else a comma-separated list.
fn load_nodes(arg: &str) -> Result<Vec<NodeId>> {
    let path = Path::new(arg);
    if path.is_file() {
        io::read_node_list(path).with_context(|| format!("Failed to read {}", path.display()))
    } else {
        Ok(io::parse_node_list(arg))
    }
}

fn write_scores(dir: &Path, cdr: &HashMap<NodeId, f64>, csr: &HashMap<NodeId, f64>) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    for (name, scores) in [("cdr.json", cdr), ("csr.json", csr)] {
        let path = dir.join(name);
        io::save_scores(scores, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

fn print_top(label: &str, scores: &HashMap<NodeId, f64>, n: usize) {
    println!("Top {} nodes by {}:", n, label);
    for (i, id) in top_n(scores, n).iter().enumerate() {
        println!("{}. {} ({:.6})", i + 1, id, scores[id]);
    }
}

fn cmd_score(
    input: &Path,
    base: &str,
    max_clique: Option<usize>,
    params: Option<&Path>,
    output: &Path,
    top: usize,
) -> Result<()> {
    let graph = load_graph(input)?;
    let base = load_base(base)?;
    let params: Option<ParameterVector> = params
        .map(|p| io::load_json(p).with_context(|| format!("Failed to load params {}", p.display())))
        .transpose()?;

    let start = Instant::now();
    let scores = score(&graph, &base, max_clique, params.as_ref())
        .context("Failed to compute scores")?;
    println!("Scored {} nodes in {:.2?}", graph.node_count(), start.elapsed());

    write_scores(output, &scores.cdr, &scores.csr)?;
    print_top("CSR", &scores.csr, top);
    println!("Wrote cdr.json and csr.json to {}", output.display());
    Ok(())
}

fn cmd_optimize(
    input: &Path,
    base: &str,
    key_nodes: &str,
    non_key_nodes: Option<&str>,
    config: OptimizerConfig,
    output: &Path,
) -> Result<()> {
    let graph = load_graph(input)?;
    let base = load_base(base)?;
    let key = load_nodes(key_nodes)?;
    let non_key = non_key_nodes.map(load_nodes).transpose()?;
    if let Some(non_key) = &non_key {
        check_disjoint(&key, non_key).context("Invalid labels")?;
    }

    println!(
        "Optimizing {} over {} trials ({} sampler, metric {})...",
        config.rank_type, config.n_trials, config.sampler, config.metric
    );
    let start = Instant::now();
    let pb = ProgressBar::new_spinner();
    pb.set_message("Searching parameters...");

    let max_clique = config.max_clique;
    let rank_type = config.rank_type;
    let mut optimizer = ParameterOptimizer::new(config);
    let outcome = optimizer
        .optimize(&graph, &base, &key, non_key.as_deref())
        .context("Optimization failed")?;
    pb.finish_with_message(format!("Finished in {:.2?}", start.elapsed()));

    println!(
        "Best trial {}: value {:.6} with {}",
        outcome.best_trial, outcome.best_value, outcome.best_params
    );

    let scores = score(&graph, &base, max_clique, Some(&outcome.best_params))
        .context("Failed to compute tuned scores")?;
    write_scores(output, &scores.cdr, &scores.csr)?;

    let params_path = output.join("best_params.json");
    io::save_json(&outcome.best_params, &params_path)
        .with_context(|| format!("Failed to write {}", params_path.display()))?;
    let outcome_path = output.join("optimization.json");
    io::save_json(&outcome, &outcome_path)
        .with_context(|| format!("Failed to write {}", outcome_path.display()))?;

    print_top(&rank_type.to_string().to_uppercase(), scores.get(rank_type), 10);
    println!("Wrote results to {}", output.display());
    Ok(())
}

fn cmd_generate(
    output: &Path,
    nodes: usize,
    avg_degree: usize,
    seed: Option<u64>,
    top: &[usize],
) -> Result<()> {
    let config = FitnessNetworkConfig {
        nodes,
        avg_degree,
        seed,
        ..Default::default()
    };

    let start = Instant::now();
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Generating {} nodes...", nodes));
    let network = generate(&config).context("Failed to generate network")?;
    pb.finish_with_message(format!("Generated in {:.2?}", start.elapsed()));

    fs::create_dir_all(output).with_context(|| format!("Failed to create {}", output.display()))?;
    io::write_edgelist(&network.graph, output.join("graph.edgelist"))
        .context("Failed to write edge list")?;
    io::save_scores(&network.fitness_map(), output.join("fitness.json"))
        .context("Failed to write fitness")?;
    for &n in top {
        let path = output.join(format!("key_nodes_{n}.txt"));
        fs::write(&path, network.key_nodes(n).join(","))
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    println!(
        "Generated {} nodes, {} edges in {}",
        network.graph.node_count(),
        network.graph.edge_count(),
        output.display()
    );
    Ok(())
}

fn cmd_report(
    files: &[PathBuf],
    key_nodes: &str,
    non_key_nodes: Option<&str>,
    top: usize,
) -> Result<()> {
    let mut rankings = BTreeMap::new();
    for path in files {
        let name = path
            .file_stem()
            .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());
        let scores = io::load_scores(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        rankings.insert(name, scores);
    }

    let key = load_nodes(key_nodes)?;
    let non_key = match non_key_nodes {
        Some(arg) => load_nodes(arg)?,
        None => {
            let key_set: std::collections::HashSet<&str> = key.iter().map(String::as_str).collect();
            let mut all: Vec<NodeId> = rankings
                .values()
                .flat_map(|s| s.keys())
                .filter(|id| !key_set.contains(id.as_str()))
                .cloned()
                .collect();
            all.sort();
            all.dedup();
            all
        }
    };
    check_disjoint(&key, &non_key).context("Invalid labels")?;

    let reports = report_all(&rankings, &key, &non_key, top);
    println!(
        "{:<16} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "method", "SN", "SP", "PPV", "NPV", "F", "ACC"
    );
    for (name, r) in &reports {
        println!(
            "{:<16} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>8.4}",
            name, r.sensitivity, r.specificity, r.ppv, r.npv, r.f_measure, r.accuracy
        );
    }
    Ok(())
}
