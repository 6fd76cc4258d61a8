//! Pairs up exposed nodes through the minimum-cost perfect matching oracle.

use tracing::debug;
use weightedmatch::MatchError;

use crate::exposure::ExposedSet;
use crate::graph::Graph;
use crate::shortest_path::PathCache;
use crate::Result;

/// A perfect matching over the indices of an [`ExposedSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    mates: Vec<usize>,
}

impl Matching {
    pub fn partner(&self, i: usize) -> usize {
        self.mates[i]
    }

    pub fn len(&self) -> usize {
        self.mates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mates.is_empty()
    }

    /// Each matched pair once, lower index first.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mates
            .iter()
            .enumerate()
            .filter(|&(i, &j)| i < j)
            .map(|(i, &j)| (i, j))
    }
}

/// Matches every exposed node with another one, minimizing the summed
/// shortest-path cost between partners.
///
/// Only pairs joined by some path are candidates. Returns `None` when no
/// perfect matching exists: an odd exposed count, or exposed nodes that can
/// only be paired across disconnected parts of the graph.
pub fn match_exposed(
    graph: &Graph,
    exposed: &ExposedSet,
    paths: &mut PathCache,
) -> Result<Option<Matching>> {
    if exposed.len() % 2 != 0 {
        debug!(exposed = exposed.len(), "odd exposed count, no matching");
        return Ok(None);
    }

    let mut candidates = Vec::new();
    for i in 0..exposed.len() {
        let tree = paths.tree(graph, exposed.node(i))?;
        for j in i + 1..exposed.len() {
            if let Some(cost) = tree.cost_to(exposed.node(j)) {
                candidates.push((i, j, cost));
            }
        }
    }

    match weightedmatch::min_cost_perfect_matching(exposed.len(), &candidates) {
        Ok(mates) => Ok(Some(Matching { mates })),
        Err(MatchError::NoPerfectMatching) => {
            debug!(
                exposed = exposed.len(),
                candidates = candidates.len(),
                "no perfect matching"
            );
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
