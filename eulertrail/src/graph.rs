use std::collections::BTreeMap;

use crate::{Cost, Error, Result};

/// Key of a node in the graph.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(formatter)
    }
}

impl std::str::FromStr for NodeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(NodeId)
    }
}

/// Stable identifier of one undirected edge, shared by both of its records.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

/// One endpoint's view of an undirected edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub to: NodeId,
    pub cost: Cost,
    pub id: EdgeId,
}

/// Incidence list of a node. A self-loop contributes two records.
#[derive(Debug, Default, Clone)]
pub struct Node {
    edges: Vec<EdgeRecord>,
}

impl Node {
    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

/// The "used" flag of every edge for one computation.
///
/// Flags are indexed by [`EdgeId`], so the two records of an edge can never
/// disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMarks {
    used: Vec<bool>,
}

impl EdgeMarks {
    #[inline]
    pub fn is_marked(&self, id: EdgeId) -> bool {
        self.used[id.0]
    }

    #[inline]
    pub fn mark(&mut self, id: EdgeId) {
        self.used[id.0] = true;
    }

    #[inline]
    pub fn unmark(&mut self, id: EdgeId) {
        self.used[id.0] = false;
    }

    pub fn reset(&mut self) {
        self.used.iter_mut().for_each(|used| *used = false);
    }

    pub fn count(&self) -> usize {
        self.used.iter().filter(|&&used| used).count()
    }
}

/// Undirected weighted multigraph.
///
/// Nodes are created on demand by [`Graph::add_edge`]; after construction the
/// structure never changes, only per-computation [`EdgeMarks`].
#[derive(Debug, Default, Clone)]
pub struct Graph {
    nodes: BTreeMap<NodeId, Node>,
    costs: Vec<Cost>,
    total: Cost,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an undirected edge between `i` and `j`.
    /// ```
    /// use eulertrail::{Graph, NodeId};
    /// let mut g = Graph::new();
    /// g.add_edge(NodeId(0), NodeId(1), 5);
    /// g.add_edge(NodeId(1), NodeId(1), 2);
    /// assert_eq!(g.degree(NodeId(1)), 3);
    /// assert_eq!(g.total_cost(), 7);
    /// ```
    pub fn add_edge(&mut self, i: NodeId, j: NodeId, cost: Cost) -> EdgeId {
        debug_assert!(cost >= 0, "edge costs must be non-negative");
        let id = EdgeId(self.costs.len());
        self.costs.push(cost);
        self.total = self.total.saturating_add(cost);
        self.nodes
            .entry(i)
            .or_default()
            .edges
            .push(EdgeRecord { to: j, cost, id });
        self.nodes
            .entry(j)
            .or_default()
            .edges
            .push(EdgeRecord { to: i, cost, id });
        id
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn node(&self, node: NodeId) -> Result<&Node> {
        self.nodes.get(&node).ok_or(Error::UnknownNode(node))
    }

    /// Nodes in ascending key order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().map(|(&id, node)| (id, node))
    }

    /// Incident records of `node`; empty for an unknown node.
    pub fn edges(&self, node: NodeId) -> &[EdgeRecord] {
        self.nodes.get(&node).map(Node::edges).unwrap_or(&[])
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.edges(node).len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.costs.len()
    }

    pub fn cost(&self, id: EdgeId) -> Cost {
        self.costs[id.0]
    }

    /// Sum of all edge costs, saturating at `Cost::MAX`.
    pub fn total_cost(&self) -> Cost {
        self.total
    }

    /// A mark set with every edge unmarked.
    pub fn new_marks(&self) -> EdgeMarks {
        EdgeMarks {
            used: vec![false; self.costs.len()],
        }
    }

    /// The first unmarked record at `from` that leads to `to`.
    ///
    /// Failing means the marks disagree with the path being walked, which is
    /// an internal error rather than bad input.
    pub fn find_unmarked_edge(
        &self,
        from: NodeId,
        to: NodeId,
        marks: &EdgeMarks,
    ) -> Result<&EdgeRecord> {
        self.node(from)?
            .edges
            .iter()
            .find(|e| e.to == to && !marks.is_marked(e.id))
            .ok_or(Error::NoUnmarkedEdge { from, to })
    }

    /// Marks the first unmarked edge between `from` and `to`, both records.
    pub fn mark_edge(&self, from: NodeId, to: NodeId, marks: &mut EdgeMarks) -> Result<EdgeId> {
        let id = self.find_unmarked_edge(from, to, marks)?.id;
        marks.mark(id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: u32) -> NodeId {
        NodeId(i)
    }

    #[test]
    fn test_add_edge_creates_both_records() {
        let mut g = Graph::new();
        let id = g.add_edge(n(0), n(1), 4);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edges(n(0)), &[EdgeRecord { to: n(1), cost: 4, id }]);
        assert_eq!(g.edges(n(1)), &[EdgeRecord { to: n(0), cost: 4, id }]);
    }

    #[test]
    fn test_self_loop_counts_twice() {
        let mut g = Graph::new();
        let id = g.add_edge(n(3), n(3), 1);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.degree(n(3)), 2);
        assert!(g.edges(n(3)).iter().all(|e| e.id == id && e.to == n(3)));
    }

    #[test]
    fn test_parallel_edges_stay_distinct() {
        let mut g = Graph::new();
        let a = g.add_edge(n(0), n(1), 1);
        let b = g.add_edge(n(1), n(0), 9);
        assert_ne!(a, b);
        let mut marks = g.new_marks();
        assert_eq!(g.mark_edge(n(0), n(1), &mut marks).unwrap(), a);
        assert_eq!(g.mark_edge(n(1), n(0), &mut marks).unwrap(), b);
        assert_eq!(
            g.find_unmarked_edge(n(0), n(1), &marks).unwrap_err(),
            Error::NoUnmarkedEdge {
                from: n(0),
                to: n(1)
            }
        );
    }

    #[test]
    fn test_marking_is_symmetric() {
        let mut g = Graph::new();
        g.add_edge(n(0), n(1), 1);
        g.add_edge(n(1), n(2), 1);
        g.add_edge(n(2), n(2), 1);
        let mut marks = g.new_marks();
        g.mark_edge(n(2), n(1), &mut marks).unwrap();
        g.mark_edge(n(2), n(2), &mut marks).unwrap();
        for (_, node) in g.nodes() {
            for record in node.edges() {
                let mirrored = g
                    .edges(record.to)
                    .iter()
                    .filter(|e| e.id == record.id)
                    .all(|e| marks.is_marked(e.id) == marks.is_marked(record.id));
                assert!(mirrored);
            }
        }
        assert_eq!(marks.count(), 2);
        assert!(g.find_unmarked_edge(n(2), n(2), &marks).is_err());
        marks.reset();
        assert_eq!(marks.count(), 0);
    }

    #[test]
    fn test_unknown_node() {
        let g = Graph::new();
        assert!(g.edges(n(7)).is_empty());
        assert_eq!(g.node(n(7)).unwrap_err(), Error::UnknownNode(n(7)));
    }

    #[test]
    fn test_node_id_from_str() {
        assert_eq!(" 17 ".parse::<NodeId>().unwrap(), n(17));
        assert!("-1".parse::<NodeId>().is_err());
        assert_eq!(n(5).to_string(), "5");
    }
}
