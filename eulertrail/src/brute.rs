//! Exhaustive reference solver. Exponential in the number of edges; only
//! meant for graphs small enough to enumerate every trail.

use std::collections::BTreeMap;

use crate::graph::{EdgeMarks, Graph, NodeId};
use crate::{Cost, Result};

/// The heaviest trail from `source` to every node it can reach, found by
/// trying every trail.
pub fn longest_trails_brute(graph: &Graph, source: NodeId) -> Result<BTreeMap<NodeId, Cost>> {
    graph.node(source)?;
    let mut best = BTreeMap::new();
    let mut marks = graph.new_marks();
    explore(graph, source, 0, &mut marks, &mut best);
    Ok(best)
}

/// The heaviest trail from `source` over all end nodes.
pub fn longest_trail_brute(graph: &Graph, source: NodeId) -> Result<Cost> {
    Ok(longest_trails_brute(graph, source)?
        .values()
        .copied()
        .max()
        .unwrap_or(0))
}

fn explore(
    graph: &Graph,
    node: NodeId,
    cost: Cost,
    marks: &mut EdgeMarks,
    best: &mut BTreeMap<NodeId, Cost>,
) {
    let known = best.entry(node).or_insert(cost);
    if *known < cost {
        *known = cost;
    }
    for edge in graph.edges(node) {
        if marks.is_marked(edge.id) {
            continue;
        }
        marks.mark(edge.id);
        explore(graph, edge.to, cost + edge.cost, marks, best);
        marks.unmark(edge.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn n(i: u32) -> NodeId {
        NodeId(i)
    }

    fn graph(edges: &[(u32, u32, Cost)]) -> Graph {
        let mut g = Graph::new();
        for &(i, j, c) in edges {
            g.add_edge(n(i), n(j), c);
        }
        g
    }

    #[test]
    fn test_triangle() {
        let g = graph(&[(0, 1, 1), (1, 2, 1), (2, 0, 1)]);
        let best = longest_trails_brute(&g, n(0)).unwrap();
        assert_eq!(best[&n(0)], 3);
        assert_eq!(best[&n(1)], 2);
        assert_eq!(best[&n(2)], 2);
    }

    #[test]
    fn test_edges_used_once() {
        // A pendant edge can be walked out but never back.
        let g = graph(&[(0, 1, 7), (1, 2, 1)]);
        let best = longest_trails_brute(&g, n(0)).unwrap();
        assert_eq!(best[&n(0)], 0);
        assert_eq!(best[&n(2)], 8);
    }

    #[test]
    fn test_self_loop_walked_once() {
        let g = graph(&[(0, 0, 4), (0, 1, 1)]);
        let best = longest_trails_brute(&g, n(0)).unwrap();
        assert_eq!(best[&n(0)], 4);
        assert_eq!(best[&n(1)], 5);
    }

    #[test]
    fn test_unreachable_absent() {
        let g = graph(&[(0, 1, 1), (2, 3, 1)]);
        let best = longest_trails_brute(&g, n(0)).unwrap();
        assert!(!best.contains_key(&n(2)));
        assert_eq!(longest_trail_brute(&g, n(0)).unwrap(), 1);
        assert_eq!(
            longest_trail_brute(&g, n(9)).unwrap_err(),
            Error::UnknownNode(n(9))
        );
    }

    #[test]
    fn test_marks_restored() {
        let g = graph(&[(0, 1, 2), (1, 2, 2), (2, 0, 2), (2, 2, 1)]);
        let first = longest_trails_brute(&g, n(0)).unwrap();
        let second = longest_trails_brute(&g, n(0)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[&n(0)], 7);
    }
}
