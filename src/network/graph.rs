//! Undirected, unweighted, simple graph stored as a dense adjacency matrix.

use serde::Serialize;

use crate::error::{InfluenceError, Result};

/// Symmetric adjacency matrix over nodes `0..n`.
///
/// Edges can only be inserted from inside the crate; once a `Graph` is handed
/// to a caller it is read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    /// Number of nodes.
    n: usize,
    /// Row-major adjacency, `adj[i * n + j]`.
    adj: Vec<bool>,
}

impl Graph {
    /// Create a graph with `n` nodes and no edges.
    pub(crate) fn empty(n: usize) -> Self {
        Self {
            n,
            adj: vec![false; n * n],
        }
    }

    /// Create the complete graph on `n` nodes.
    pub fn complete(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(InfluenceError::InvalidNodeCount(n));
        }
        let mut graph = Self::empty(n);
        for i in 0..n {
            for j in (i + 1)..n {
                graph.set_edge(i, j, true);
            }
        }
        Ok(graph)
    }

    /// Build a graph from an explicit edge list.
    ///
    /// Duplicate edges are ignored. Self-loops and out-of-range endpoints are
    /// rejected. The result is not required to be connected; use
    /// [`Graph::is_connected`] to check.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        if n == 0 {
            return Err(InfluenceError::InvalidNodeCount(n));
        }
        let mut graph = Self::empty(n);
        for &(from, to) in edges {
            if from >= n || to >= n || from == to {
                return Err(InfluenceError::InvalidEdge { from, to, nodes: n });
            }
            graph.set_edge(from, to, true);
        }
        Ok(graph)
    }

    /// Set or clear the undirected edge `{i, j}`.
    pub(crate) fn set_edge(&mut self, i: usize, j: usize, present: bool) {
        debug_assert!(i != j, "self-loop at node {}", i);
        self.adj[i * self.n + j] = present;
        self.adj[j * self.n + i] = present;
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.n
    }

    /// True when the graph has no nodes (never the case for built graphs).
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Whether `i` and `j` are adjacent.
    #[inline]
    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.adj[i * self.n + j]
    }

    /// Iterate over the neighbors of `node` in increasing order.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.adj[node * self.n..(node + 1) * self.n]
            .iter()
            .enumerate()
            .filter_map(|(j, &present)| present.then_some(j))
    }

    /// Number of neighbors of `node`.
    pub fn degree(&self, node: usize) -> usize {
        self.neighbors(node).count()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adj.iter().filter(|&&present| present).count() / 2
    }

    /// Adjacency as 0/1 rows, for display and serialization.
    pub fn adjacency_rows(&self) -> Vec<Vec<u8>> {
        self.adj
            .chunks(self.n.max(1))
            .take(self.n)
            .map(|row| row.iter().map(|&present| present as u8).collect())
            .collect()
    }

    /// Nodes reachable from `start`, in depth-first discovery order.
    pub fn reachable_from(&self, start: usize) -> Vec<usize> {
        let mut visited = vec![false; self.n];
        let mut order = Vec::with_capacity(self.n);
        let mut stack = vec![start];

        while let Some(cur) = stack.pop() {
            if visited[cur] {
                continue;
            }
            visited[cur] = true;
            order.push(cur);

            for next in self.neighbors(cur) {
                if !visited[next] {
                    stack.push(next);
                }
            }
        }

        order
    }

    /// Whether every node can reach every other node.
    pub fn is_connected(&self) -> bool {
        self.n > 0 && self.reachable_from(0).len() == self.n
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.adjacency_rows() {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
