//! All-pairs shortest paths by repeated breadth-first search.

use std::collections::VecDeque;

use serde::Serialize;

use crate::error::{InfluenceError, Result};
use crate::network::graph::Graph;

/// Hop counts between every pair of nodes.
///
/// Symmetric, zero on the diagonal, and satisfies the triangle inequality.
/// Holds no reference to the graph it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistanceMatrix {
    n: usize,
    /// Row-major distances, `dist[i * n + j]`.
    dist: Vec<usize>,
}

impl DistanceMatrix {
    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.n
    }

    /// True for a matrix with no nodes.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Shortest-path length from `i` to `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> usize {
        self.dist[i * self.n + j]
    }

    /// Distances from `i` to every node.
    pub fn row(&self, i: usize) -> &[usize] {
        &self.dist[i * self.n..(i + 1) * self.n]
    }

    /// Sum of distances from `i` to every node.
    pub fn row_sum(&self, i: usize) -> usize {
        self.row(i).iter().sum()
    }

    /// Distances as nested rows, for display and serialization.
    pub fn rows(&self) -> Vec<Vec<usize>> {
        (0..self.n).map(|i| self.row(i).to_vec()).collect()
    }
}

impl std::fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.n {
            let cells: Vec<String> = self.row(i).iter().map(|d| format!("{:>3}", d)).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Hop counts from `source`, or `None` for nodes BFS never discovered.
fn bfs(graph: &Graph, source: usize) -> Vec<Option<usize>> {
    let mut distances = vec![None; graph.len()];
    let mut queue = VecDeque::with_capacity(graph.len());

    distances[source] = Some(0);
    queue.push_back(source);

    while let Some(cur) = queue.pop_front() {
        let next_hop = distances[cur].map_or(0, |d| d + 1);
        for next in graph.neighbors(cur) {
            if distances[next].is_none() {
                distances[next] = Some(next_hop);
                queue.push_back(next);
            }
        }
    }

    distances
}

/// Compute shortest-path distances between every pair of nodes.
///
/// # Errors
/// Returns [`InfluenceError::Disconnected`] if some node cannot be reached,
/// since distances would otherwise be undefined.
pub fn compute_distances(graph: &Graph) -> Result<DistanceMatrix> {
    let n = graph.len();
    if n == 0 {
        return Err(InfluenceError::InvalidNodeCount(n));
    }

    let mut dist = Vec::with_capacity(n * n);
    for source in 0..n {
        let row = bfs(graph, source);
        let unreachable = row.iter().filter(|d| d.is_none()).count();
        if unreachable > 0 {
            return Err(InfluenceError::Disconnected { source, unreachable });
        }
        dist.extend(row.into_iter().flatten());
    }

    log::debug!("computed {}x{} distance matrix", n, n);
    Ok(DistanceMatrix { n, dist })
}
