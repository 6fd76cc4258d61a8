//! Turns a matching of exposed nodes into a trail weight.
//!
//! Removing the shortest path between every matched pair leaves each node
//! with even degree once the virtual source-target edge is counted, so the
//! remaining edges around the source form a single trail from source to
//! target. Its weight is the answer for that target. Where two paths share an
//! edge (only possible through zero-cost edges) the removals cancel and the
//! edge stays, which keeps every degree even.
//!
//! The weight only covers the source's remaining component. When the removed
//! paths cut off a part of that component, a heavier trail that removes
//! different edges may exist; such a query under-counts. The cut-off weight is
//! reported as [`Assembly::stranded`] and left uncorrected.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{debug, trace};

use crate::exposure::exposed_nodes;
use crate::graph::{EdgeMarks, Graph, NodeId};
use crate::pairing::match_exposed;
use crate::shortest_path::{PathCache, PathTree};
use crate::{Cost, Error, Result};

/// Outcome of one (source, target) query.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Assembly {
    /// Weight of the trail: every unmarked edge reachable from the source.
    pub weight: Cost,
    /// Weight of the edges removed along matched paths.
    pub removed: Cost,
    /// Unmarked weight that was reachable from the source before the removal
    /// and is not afterwards.
    pub stranded: Cost,
    /// Number of exposed nodes that were matched.
    pub exposed: usize,
}

/// Flips the mark of every edge on the shortest path from the root of `tree`
/// to `target`: unmarked edges are marked, edges an earlier path already
/// marked are unmarked again.
///
/// Every step must be an edge of `graph` between the nodes it joins;
/// otherwise `tree` was not built from `graph` and
/// [`Error::NoUnmarkedEdge`](crate::Error::NoUnmarkedEdge) is returned.
pub fn mark_path(
    graph: &Graph,
    tree: &PathTree,
    target: NodeId,
    marks: &mut EdgeMarks,
) -> Result<()> {
    for hop in tree.hops(target) {
        if !graph
            .edges(hop.from)
            .iter()
            .any(|edge| edge.id == hop.via && edge.to == hop.to)
        {
            return Err(Error::NoUnmarkedEdge {
                from: hop.from,
                to: hop.to,
            });
        }
        if marks.is_marked(hop.via) {
            trace!(from = %hop.from, to = %hop.to, "unmark shared edge");
            marks.unmark(hop.via);
        } else {
            trace!(from = %hop.from, to = %hop.to, "mark");
            marks.mark(hop.via);
        }
    }
    Ok(())
}

/// Total cost of the unmarked edges reachable from `source` over unmarked
/// edges, and the nodes reached.
pub fn component_weight(
    graph: &Graph,
    source: NodeId,
    marks: &EdgeMarks,
) -> (Cost, HashSet<NodeId>) {
    let mut total = 0;
    let mut seen = HashSet::new();
    let mut stack = vec![source];
    while let Some(node) = stack.pop() {
        if !seen.insert(node) {
            continue;
        }
        for edge in graph.edges(node) {
            if marks.is_marked(edge.id) {
                continue;
            }
            total += edge.cost;
            stack.push(edge.to);
        }
    }
    // Every edge was counted from both of its records.
    (total / 2, seen)
}

/// Answers trail queries on one graph, reusing shortest-path trees across
/// queries.
pub struct TrailSolver<'g> {
    graph: &'g Graph,
    paths: PathCache,
}

impl<'g> TrailSolver<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        TrailSolver {
            graph,
            paths: PathCache::new(),
        }
    }

    /// Runs the matching reduction for one target.
    ///
    /// `Ok(None)` means there is no trail: `target` is unreachable from
    /// `source` or the exposed nodes cannot be paired.
    pub fn assemble(&mut self, source: NodeId, target: NodeId) -> Result<Option<Assembly>> {
        let graph = self.graph;
        if !self.paths.tree(graph, source)?.contains(target) {
            trace!(%source, %target, "target unreachable");
            return Ok(None);
        }

        let exposed = exposed_nodes(graph, source, target);
        let matching = match match_exposed(graph, &exposed, &mut self.paths)? {
            Some(matching) => matching,
            None => return Ok(None),
        };
        debug!(%source, %target, exposed = exposed.len(), "matched exposed nodes");

        let mut marks = graph.new_marks();
        for (i, j) in matching.pairs() {
            let (from, to) = (exposed.node(i), exposed.node(j));
            let tree = self.paths.tree(graph, from)?;
            trace!(%from, %to, cost = ?tree.cost_to(to), "removing path");
            mark_path(graph, tree, to, &mut marks)?;
        }

        let (weight, reached) = component_weight(graph, source, &marks);
        let removed = graph
            .nodes()
            .flat_map(|(_, node)| node.edges())
            .filter(|edge| marks.is_marked(edge.id))
            .map(|edge| edge.cost)
            .sum::<Cost>()
            / 2;
        let stranded = self
            .paths
            .tree(graph, source)?
            .reachable()
            .filter(|node| !reached.contains(node))
            .flat_map(|node| graph.edges(node))
            .filter(|edge| !marks.is_marked(edge.id))
            .map(|edge| edge.cost)
            .sum::<Cost>()
            / 2;
        if stranded > 0 {
            debug!(%source, %target, weight, stranded, "removal cut off part of the component");
        }

        Ok(Some(Assembly {
            weight,
            removed,
            stranded,
            exposed: exposed.len(),
        }))
    }

    /// Weight of the heaviest trail from `source` to `target` found by the
    /// reduction, `None` if there is no trail.
    pub fn longest_trail_to(&mut self, source: NodeId, target: NodeId) -> Result<Option<Cost>> {
        Ok(self.assemble(source, target)?.map(|a| a.weight))
    }

    /// Trail weights from `source` to every node of the graph.
    pub fn longest_trails(&mut self, source: NodeId) -> Result<BTreeMap<NodeId, Option<Cost>>> {
        self.graph.node(source)?;
        let graph = self.graph;
        graph
            .nodes()
            .map(|(target, _)| Ok((target, self.longest_trail_to(source, target)?)))
            .collect()
    }

    /// The heaviest trail weight over all targets, 0 if there is none.
    pub fn longest_trail(&mut self, source: NodeId) -> Result<Cost> {
        Ok(self
            .longest_trails(source)?
            .values()
            .filter_map(|&weight| weight)
            .max()
            .unwrap_or(0))
    }
}
