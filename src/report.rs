use serde::Serialize;
use tracing::{info, warn};

use eulertrail::{longest_trails_brute, Cost, CostPolicy, Graph, NodeId, TrailSolver};

use crate::Mode;

#[derive(Serialize, Debug, PartialEq, Eq)]
pub(crate) struct TargetResult {
    target: u32,
    length: Option<Cost>,
    /// Weight the reduction cut off from the source; fast mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    stranded: Option<Cost>,
}

#[derive(Serialize, Debug)]
pub(crate) struct Report {
    program_version: &'static str,
    mode: Mode,
    policy: CostPolicy,
    nodes: usize,
    edges: usize,
    source: u32,
    longest: Cost,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    targets: Vec<TargetResult>,
}

impl std::fmt::Display for Report {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(formatter, "{} nodes", self.nodes)?;
        writeln!(formatter, "longest path length: {}", self.longest)
    }
}

/// Solves every target from `source` and summarizes the result. The
/// per-target table is only kept when `all` is set.
pub(crate) fn run(
    graph: &Graph,
    mode: Mode,
    policy: CostPolicy,
    source: NodeId,
    all: bool,
) -> eulertrail::Result<Report> {
    let targets = if graph.contains(source) {
        match mode {
            Mode::Fast => fast_targets(graph, source)?,
            Mode::Brute => brute_targets(graph, source)?,
        }
    } else {
        warn!(%source, "source node is not in the graph");
        Vec::new()
    };

    let longest = targets.iter().filter_map(|t| t.length).max().unwrap_or(0);
    let cut_off = targets.iter().filter(|t| t.stranded.unwrap_or(0) > 0).count();
    info!(?mode, %source, longest, cut_off, "solved");

    Ok(Report {
        program_version: env!("CARGO_PKG_VERSION"),
        mode,
        policy,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        source: source.0,
        longest,
        targets: if all { targets } else { Vec::new() },
    })
}

fn fast_targets(graph: &Graph, source: NodeId) -> eulertrail::Result<Vec<TargetResult>> {
    let mut solver = TrailSolver::new(graph);
    graph
        .nodes()
        .map(|(target, _)| {
            let assembly = solver.assemble(source, target)?;
            Ok(TargetResult {
                target: target.0,
                length: assembly.map(|a| a.weight),
                stranded: assembly.map(|a| a.stranded),
            })
        })
        .collect()
}

fn brute_targets(graph: &Graph, source: NodeId) -> eulertrail::Result<Vec<TargetResult>> {
    let best = longest_trails_brute(graph, source)?;
    Ok(graph
        .nodes()
        .map(|(target, _)| TargetResult {
            target: target.0,
            length: best.get(&target).copied(),
            stranded: None,
        })
        .collect())
}
