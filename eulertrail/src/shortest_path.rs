//! Single-source shortest paths, memoized per source node.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

use tracing::trace;

use crate::graph::{EdgeId, Graph, NodeId};
use crate::{Cost, Result};

/// One node's entry in a shortest-path tree.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Path {
    /// Previous node on the shortest path, `None` at the root.
    pub prev: Option<NodeId>,
    /// Total cost from the root.
    pub cost: Cost,
    /// Edge taken from `prev`, `None` at the root.
    pub via: Option<EdgeId>,
}

/// One step of a predecessor chain, walked towards the root.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Hop {
    pub from: NodeId,
    pub to: NodeId,
    pub via: EdgeId,
}

/// Shortest paths from `root` to every node reachable from it.
#[derive(Debug, Clone)]
pub struct PathTree {
    root: NodeId,
    paths: BTreeMap<NodeId, Path>,
}

impl PathTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, node: NodeId) -> Option<&Path> {
        self.paths.get(&node)
    }

    pub fn cost_to(&self, node: NodeId) -> Option<Cost> {
        self.paths.get(&node).map(|p| p.cost)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.paths.contains_key(&node)
    }

    /// Reachable nodes in ascending key order, the root included.
    pub fn reachable(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.paths.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// The hops of the shortest path to `target`, from `target` back to the
    /// root. Empty if `target` is the root or unreachable.
    pub fn hops(&self, target: NodeId) -> Hops<'_> {
        Hops {
            tree: self,
            at: Some(target),
        }
    }
}

pub struct Hops<'a> {
    tree: &'a PathTree,
    at: Option<NodeId>,
}

impl Iterator for Hops<'_> {
    type Item = Hop;

    fn next(&mut self) -> Option<Hop> {
        let node = self.at.take()?;
        let path = self.tree.paths.get(&node)?;
        let (from, via) = (path.prev?, path.via?);
        self.at = Some(from);
        Some(Hop {
            from,
            to: node,
            via,
        })
    }
}

/// Dijkstra from `source` with a lazily pruned frontier.
pub fn shortest_paths(graph: &Graph, source: NodeId) -> Result<PathTree> {
    graph.node(source)?;

    let mut paths: BTreeMap<NodeId, Path> = BTreeMap::new();
    let mut frontier: BinaryHeap<Reverse<(Cost, NodeId, Option<(NodeId, EdgeId)>)>> =
        BinaryHeap::new();
    frontier.push(Reverse((0, source, None)));

    while let Some(Reverse((cost, node, step))) = frontier.pop() {
        if let Some(known) = paths.get(&node) {
            if known.cost <= cost {
                continue;
            }
        }
        paths.insert(
            node,
            Path {
                prev: step.map(|(prev, _)| prev),
                cost,
                via: step.map(|(_, via)| via),
            },
        );
        for edge in graph.edges(node) {
            if !paths.contains_key(&edge.to) {
                frontier.push(Reverse((cost + edge.cost, edge.to, Some((node, edge.id)))));
            }
        }
    }

    trace!(%source, reachable = paths.len(), "computed shortest paths");
    Ok(PathTree {
        root: source,
        paths,
    })
}

/// Shortest-path trees keyed by root, each computed on first use.
///
/// Trees are never invalidated: a [`Graph`] does not change structurally
/// once built. A cache must only be used with the graph it was filled from.
#[derive(Debug, Default)]
pub struct PathCache {
    trees: HashMap<NodeId, PathTree>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&mut self, graph: &Graph, root: NodeId) -> Result<&PathTree> {
        if !self.trees.contains_key(&root) {
            let tree = shortest_paths(graph, root)?;
            self.trees.insert(root, tree);
        }
        Ok(&self.trees[&root])
    }

    /// Number of trees computed so far.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
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

    fn assert_optimal(g: &Graph, tree: &PathTree) {
        for node in tree.reachable() {
            let chain: Cost = tree.hops(node).map(|hop| g.cost(hop.via)).sum();
            assert_eq!(Some(chain), tree.cost_to(node), "chain to {}", node);
            let last = tree.hops(node).last().map_or(node, |hop| hop.from);
            assert_eq!(last, tree.root());
            for edge in g.edges(node) {
                let via = tree.cost_to(edge.to).unwrap();
                assert!(via <= tree.cost_to(node).unwrap() + edge.cost);
            }
        }
    }

    #[test]
    fn test_prefers_cheaper_detour() {
        let g = graph(&[(0, 1, 10), (0, 2, 3), (2, 1, 4), (1, 3, 1)]);
        let tree = shortest_paths(&g, n(0)).unwrap();
        assert_eq!(tree.cost_to(n(1)), Some(7));
        assert_eq!(tree.cost_to(n(3)), Some(8));
        assert_eq!(tree.get(n(1)).unwrap().prev, Some(n(2)));
        assert_eq!(tree.get(n(0)).unwrap().prev, None);
        assert_optimal(&g, &tree);
    }

    #[test]
    fn test_parallel_edges_take_cheapest() {
        let g = graph(&[(0, 1, 9), (0, 1, 2), (1, 0, 5)]);
        let tree = shortest_paths(&g, n(0)).unwrap();
        assert_eq!(tree.cost_to(n(1)), Some(2));
        let hops: Vec<Hop> = tree.hops(n(1)).collect();
        assert_eq!(hops.len(), 1);
        assert_eq!(g.cost(hops[0].via), 2);
    }

    #[test]
    fn test_unreachable_nodes_are_absent() {
        let g = graph(&[(0, 1, 1), (2, 3, 1), (4, 4, 1)]);
        let tree = shortest_paths(&g, n(0)).unwrap();
        assert_eq!(tree.reachable().collect::<Vec<_>>(), vec![n(0), n(1)]);
        assert_eq!(tree.cost_to(n(2)), None);
        assert_eq!(tree.hops(n(3)).count(), 0);
        assert_eq!(tree.hops(n(0)).count(), 0);
    }

    #[test]
    fn test_self_loop_is_never_a_hop() {
        let g = graph(&[(0, 0, 0), (0, 1, 2), (1, 1, 0)]);
        let tree = shortest_paths(&g, n(1)).unwrap();
        assert_eq!(tree.cost_to(n(1)), Some(0));
        assert_eq!(tree.hops(n(0)).count(), 1);
        assert_optimal(&g, &tree);
    }

    #[test]
    fn test_grid_is_optimal() {
        let mut edges = Vec::new();
        for r in 0..4u32 {
            for c in 0..4u32 {
                let v = r * 4 + c;
                if c < 3 {
                    edges.push((v, v + 1, Cost::from((v * 7) % 5 + 1)));
                }
                if r < 3 {
                    edges.push((v, v + 4, Cost::from((v * 3) % 4 + 1)));
                }
            }
        }
        let g = graph(&edges);
        for root in 0..16 {
            assert_optimal(&g, &shortest_paths(&g, n(root)).unwrap());
        }
    }

    #[test]
    fn test_cache_computes_once() {
        let g = graph(&[(0, 1, 1), (1, 2, 1)]);
        let mut cache = PathCache::new();
        assert_eq!(cache.tree(&g, n(0)).unwrap().len(), 3);
        cache.tree(&g, n(0)).unwrap();
        cache.tree(&g, n(2)).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(
            cache.tree(&g, n(9)).unwrap_err(),
            Error::UnknownNode(n(9))
        );
    }
}
