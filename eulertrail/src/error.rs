use thiserror::Error;

use crate::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("node {0} is not in the graph")]
    UnknownNode(NodeId),

    /// No usable edge joins two nodes of a path being marked or walked: the
    /// marks or the path tree do not match this graph.
    #[error("no unmarked edge from {from} to {to}")]
    NoUnmarkedEdge { from: NodeId, to: NodeId },

    #[error("matching oracle: {0}")]
    Matching(#[from] weightedmatch::MatchError),
}

pub type Result<T> = std::result::Result<T, Error>;
