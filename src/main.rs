use std::fs::File;
use std::io::{self, BufReader};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eulertrail::{read_edge_list, CostPolicy, Graph, NodeId};

mod report;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Mode {
    /// Exhaustive search over all trails; small graphs only
    #[value(aliases = ["b", "0"])]
    Brute,
    /// Reduction to minimum-cost perfect matching
    #[value(aliases = ["f", "1"])]
    Fast,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Problem {
    /// An edge I/J costs I + J
    #[value(name = "1", alias = "strength")]
    Strength,
    /// Every edge is worth more than any strength difference
    #[value(name = "2", alias = "length")]
    Length,
}

impl Problem {
    fn policy(self) -> CostPolicy {
        match self {
            Problem::Strength => CostPolicy::Strength,
            Problem::Length => CostPolicy::LengthThenStrength,
        }
    }
}

/// Heaviest trail from a source node of an undirected weighted multigraph.
///
/// Input lines are edges `I/J`, optionally with an explicit cost `I/J@C`;
/// reading stops at the first line that is not an edge.
#[derive(Parser, Debug)]
#[command(name = "longtrail")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Solver to use
    #[arg(value_enum)]
    mode: Mode,

    /// Cost of edges without an explicit cost
    #[arg(value_enum, default_value = "1")]
    problem: Problem,

    /// Edge list to read, `-` for standard input
    #[arg(default_value = "-")]
    input: String,

    /// Node every trail starts from
    #[arg(short, long, default_value_t = 0, env = "LONGTRAIL_SOURCE")]
    source: u32,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Include the result for every target node in the JSON report
    #[arg(long, requires = "json")]
    all: bool,
}

fn load(input: &str, policy: CostPolicy) -> anyhow::Result<Graph> {
    if input == "-" {
        read_edge_list(io::stdin().lock(), policy).context("reading standard input")
    } else {
        let file = File::open(input).with_context(|| format!("opening {}", input))?;
        read_edge_list(BufReader::new(file), policy).with_context(|| format!("reading {}", input))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let policy = args.problem.policy();
    let graph = load(&args.input, policy)?;
    let report = report::run(&graph, args.mode, policy, NodeId(args.source), args.all)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}
