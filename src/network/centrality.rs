//! Degree and closeness centrality.

use crate::network::distance::DistanceMatrix;
use crate::network::graph::Graph;

/// `(n - 1) / sum_k d(i, k)` for every node.
///
/// A single-node network has no distances to sum; its closeness is 0.
pub fn closeness_centrality(distances: &DistanceMatrix) -> Vec<f64> {
    let n = distances.len();
    (0..n)
        .map(|i| match distances.row_sum(i) {
            0 => 0.0,
            total => (n - 1) as f64 / total as f64,
        })
        .collect()
}

/// Number of neighbors of every node.
pub fn degree_centrality(graph: &Graph) -> Vec<usize> {
    (0..graph.len()).map(|i| graph.degree(i)).collect()
}
