//! Line-oriented edge lists: `I/J`, optionally followed by `@C`.
//!
//! Reading stops quietly at the first line that is neither blank nor an edge.

use std::io::BufRead;

use serde::Serialize;
use tracing::debug;

use crate::graph::{Graph, NodeId};
use crate::Cost;

/// Cost of an edge whose line carries no explicit `@C`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostPolicy {
    /// Sum of both endpoint keys.
    Strength,
    /// A large constant per edge plus the strength, so that a trail with more
    /// edges always wins and strength only breaks ties.
    LengthThenStrength,
}

impl Default for CostPolicy {
    fn default() -> Self {
        CostPolicy::Strength
    }
}

/// Largest total edge cost a graph read from an edge list may have. Trail
/// and path sums count an edge at most twice, so they stay far from overflow.
pub const MAX_TOTAL_COST: Cost = Cost::MAX / 4;

impl CostPolicy {
    pub const LENGTH_BONUS: Cost = 10_000_000;

    /// ```
    /// use eulertrail::{CostPolicy, NodeId};
    /// assert_eq!(CostPolicy::Strength.cost(NodeId(3), NodeId(4)), 7);
    /// assert_eq!(CostPolicy::LengthThenStrength.cost(NodeId(3), NodeId(4)), 10_000_007);
    /// ```
    pub fn cost(self, i: NodeId, j: NodeId) -> Cost {
        let strength = Cost::from(i.0) + Cost::from(j.0);
        match self {
            CostPolicy::Strength => strength,
            CostPolicy::LengthThenStrength => Self::LENGTH_BONUS + strength,
        }
    }
}

/// One parsed edge line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EdgeLine {
    pub from: NodeId,
    pub to: NodeId,
    pub cost: Option<Cost>,
}

/// Parses `I/J` or `I/J@C`. Keys and costs must be non-negative integers.
pub fn parse_edge_line(line: &str) -> Option<EdgeLine> {
    let line = line.trim();
    let (ends, cost) = match line.split_once('@') {
        Some((ends, cost)) => (ends, Some(cost)),
        None => (line, None),
    };
    let (from, to) = ends.split_once('/')?;
    let cost = match cost {
        Some(cost) => Some(cost.trim().parse::<Cost>().ok().filter(|&c| c >= 0)?),
        None => None,
    };
    Some(EdgeLine {
        from: from.parse().ok()?,
        to: to.parse().ok()?,
        cost,
    })
}

/// Adds the edge on `line` to `graph`. Returns false when the line is not an
/// edge, or its cost would push the total past [`MAX_TOTAL_COST`], and
/// reading should stop; blank lines are skipped.
fn add_line(graph: &mut Graph, line: &str, policy: CostPolicy) -> bool {
    if line.trim().is_empty() {
        return true;
    }
    let edge = match parse_edge_line(line) {
        Some(edge) => edge,
        None => return false,
    };
    let cost = edge.cost.unwrap_or_else(|| policy.cost(edge.from, edge.to));
    match graph.total_cost().checked_add(cost) {
        Some(total) if total <= MAX_TOTAL_COST => {
            graph.add_edge(edge.from, edge.to, cost);
            true
        }
        _ => {
            debug!(cost, total = graph.total_cost(), "edge cost too large");
            false
        }
    }
}

/// Reads edges into a new graph until end of input or the first line that
/// does not parse. Only I/O failures are errors.
pub fn read_edge_list<R: BufRead>(reader: R, policy: CostPolicy) -> std::io::Result<Graph> {
    let mut graph = Graph::new();
    for (number, line) in reader.lines().enumerate() {
        if !add_line(&mut graph, &line?, policy) {
            debug!(line = number + 1, "stopped reading at a line that is not an edge");
            break;
        }
    }
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "read edge list"
    );
    Ok(graph)
}

pub fn parse_edge_list(text: &str, policy: CostPolicy) -> Graph {
    let mut graph = Graph::new();
    for line in text.lines() {
        if !add_line(&mut graph, line, policy) {
            break;
        }
    }
    graph
}
