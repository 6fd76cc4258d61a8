use std::collections::HashMap;

use crate::graph::{Graph, NodeId};

/// Nodes of odd degree for one (source, target) query, with dense indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExposedSet {
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
}

impl ExposedSet {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node with dense index `i`.
    pub fn node(&self, i: usize) -> NodeId {
        self.nodes[i]
    }

    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.index.get(&node).copied()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    fn push(&mut self, node: NodeId) {
        self.index.insert(node, self.nodes.len());
        self.nodes.push(node);
    }
}

/// Nodes that need one incident edge removed for a trail from `source` to
/// `target` to use every remaining edge of its component.
///
/// The degree of `source` and of `target` is raised by one each (by two for a
/// closed trail), as if an edge joined them; nodes whose degree is then odd
/// are exposed. They are listed in ascending key order.
pub fn exposed_nodes(graph: &Graph, source: NodeId, target: NodeId) -> ExposedSet {
    let mut exposed = ExposedSet::default();
    for (id, node) in graph.nodes() {
        let mut degree = node.degree();
        if id == source {
            degree += 1;
        }
        if id == target {
            degree += 1;
        }
        if degree % 2 == 1 {
            exposed.push(id);
        }
    }
    exposed
}
