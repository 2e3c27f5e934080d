//! Error type shared by every pipeline stage.
//!
//! All variants are precondition violations: invalid construction parameters
//! or a broken structural invariant reaching a later stage. None of them are
//! retryable, since every stage is deterministic given its inputs.

/// Errors returned by graph construction, distance computation and solving.
#[derive(Debug, Clone, PartialEq)]
pub enum InfluenceError {
    /// A network must contain at least one node.
    InvalidNodeCount(usize),
    /// Edge probability is NaN or outside [0, 1].
    InvalidEdgeProbability(f64),
    /// The solver needs at least one period.
    InvalidIterations(u64),
    /// Breadth-first search from `source` could not reach `unreachable`.
    Disconnected {
        /// BFS source node.
        source: usize,
        /// Number of nodes left undiscovered.
        unreachable: usize,
    },
    /// An explicit edge references a node outside `0..nodes` or is a self-loop.
    InvalidEdge {
        /// First endpoint.
        from: usize,
        /// Second endpoint.
        to: usize,
        /// Node count of the graph being built.
        nodes: usize,
    },
    /// A vector or matrix does not match the game dimension.
    DimensionMismatch {
        /// Dimension required by the receiver.
        expected: usize,
        /// Dimension actually supplied.
        actual: usize,
    },
    /// Probabilities are empty, negative, non-finite or do not sum to 1.
    InvalidDistribution,
}

impl std::fmt::Display for InfluenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNodeCount(n) => {
                write!(f, "Invalid node count: {} (must be at least 1)", n)
            }
            Self::InvalidEdgeProbability(p) => {
                write!(f, "Edge probability {} is out of range [0, 1]", p)
            }
            Self::InvalidIterations(t) => {
                write!(f, "Invalid iteration budget: {} (must be at least 1)", t)
            }
            Self::Disconnected { source, unreachable } => write!(
                f,
                "Graph is disconnected: {} node(s) unreachable from node {}",
                unreachable, source
            ),
            Self::InvalidEdge { from, to, nodes } => {
                write!(f, "Invalid edge ({}, {}) in a graph of {} nodes", from, to, nodes)
            }
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {}, got {}", expected, actual)
            }
            Self::InvalidDistribution => {
                write!(f, "Strategy is not a probability distribution")
            }
        }
    }
}

impl std::error::Error for InfluenceError {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, InfluenceError>;
