//! Random connected network generation.
//!
//! Generation runs in two passes:
//!
//! 1. **Edge sampling**: every unordered pair is an independent draw with the
//!    configured probability.
//! 2. **Connectivity repair**: a stack-based DFS from a random start node finds
//!    the reachable set; every node outside it is wired to a uniformly chosen
//!    node of the (growing) reachable set.
//!
//! Reachability only grows during repair, so the result is always connected.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{InfluenceError, Result};
use crate::network::graph::Graph;

/// How an edge probability is turned into a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSampling {
    /// Probability quantized to whole percentage points: an edge exists when a
    /// draw in `0..100` falls below `round(100 * p)`.
    #[default]
    Percent,
    /// Full-precision Bernoulli draw.
    Exact,
}

/// Builder for random connected graphs.
///
/// # Example
/// ```
/// use influence_game::network::{EdgeSampling, GraphBuilder};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let graph = GraphBuilder::new(20, 0.1)
///     .with_sampling(EdgeSampling::Exact)
///     .build(&mut rng)
///     .unwrap();
/// assert!(graph.is_connected());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphBuilder {
    /// Number of nodes (at least 1).
    pub nodes: usize,
    /// Independent edge probability in [0, 1].
    pub edge_probability: f64,
    /// Draw mode for edges.
    pub sampling: EdgeSampling,
}

impl GraphBuilder {
    /// Create a builder using percentage-quantized sampling.
    pub fn new(nodes: usize, edge_probability: f64) -> Self {
        Self {
            nodes,
            edge_probability,
            sampling: EdgeSampling::default(),
        }
    }

    /// Builder method: set the sampling mode.
    pub fn with_sampling(mut self, sampling: EdgeSampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Check the construction parameters.
    pub fn validate(&self) -> Result<()> {
        if self.nodes == 0 {
            return Err(InfluenceError::InvalidNodeCount(self.nodes));
        }
        if !(0.0..=1.0).contains(&self.edge_probability) {
            return Err(InfluenceError::InvalidEdgeProbability(self.edge_probability));
        }
        Ok(())
    }

    /// Sample edges, then repair connectivity.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Graph> {
        self.validate()?;

        let mut graph = Graph::empty(self.nodes);
        self.sample_edges(&mut graph, rng);
        let sampled = graph.edge_count();
        let repaired = connect(&mut graph, rng);

        debug_assert!(graph.is_connected(), "repair left the graph disconnected");
        log::debug!(
            "built network: {} nodes, {} sampled edges, {} repair edges",
            self.nodes,
            sampled,
            repaired
        );

        Ok(graph)
    }

    fn sample_edges<R: Rng + ?Sized>(&self, graph: &mut Graph, rng: &mut R) {
        let n = self.nodes;
        match self.sampling {
            EdgeSampling::Percent => {
                let cutoff = (self.edge_probability * 100.0).round() as u32;
                for i in 0..n {
                    for j in (i + 1)..n {
                        let draw: u32 = rng.gen_range(0..100);
                        graph.set_edge(i, j, draw < cutoff);
                    }
                }
            }
            EdgeSampling::Exact => {
                for i in 0..n {
                    for j in (i + 1)..n {
                        graph.set_edge(i, j, rng.gen_bool(self.edge_probability));
                    }
                }
            }
        }
    }
}

/// Wire every node unreachable from a random start into the reachable set.
///
/// Returns the number of edges added.
fn connect<R: Rng + ?Sized>(graph: &mut Graph, rng: &mut R) -> usize {
    let n = graph.len();
    let start = rng.gen_range(0..n);

    let mut reached = graph.reachable_from(start);
    let mut visited = vec![false; n];
    for &node in &reached {
        visited[node] = true;
    }

    let mut added = 0;
    for node in 0..n {
        if visited[node] {
            continue;
        }
        let anchor = reached[rng.gen_range(0..reached.len())];
        graph.set_edge(node, anchor, true);
        visited[node] = true;
        reached.push(node);
        added += 1;
    }

    added
}

/// Build a connected random graph with percentage-quantized edge sampling.
pub fn build_random_connected_graph<R: Rng + ?Sized>(
    nodes: usize,
    edge_probability: f64,
    rng: &mut R,
) -> Result<Graph> {
    GraphBuilder::new(nodes, edge_probability).build(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::distance::compute_distances;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_always_connected_and_symmetric() {
        for seed in 0..40u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let n = 1 + (seed as usize % 25);
            let p = (seed % 11) as f64 / 10.0;
            let graph = build_random_connected_graph(n, p, &mut rng).unwrap();

            assert_eq!(graph.len(), n);
            assert!(graph.is_connected(), "seed {} n {} p {}", seed, n, p);
            assert!(compute_distances(&graph).is_ok(), "seed {} n {} p {}", seed, n, p);
            for i in 0..n {
                assert!(!graph.has_edge(i, i));
                for j in 0..n {
                    assert_eq!(graph.has_edge(i, j), graph.has_edge(j, i));
                }
            }
        }
    }

    #[test]
    fn test_zero_probability_gives_tree() {
        for sampling in [EdgeSampling::Percent, EdgeSampling::Exact] {
            let mut rng = StdRng::seed_from_u64(11);
            let graph = GraphBuilder::new(30, 0.0)
                .with_sampling(sampling)
                .build(&mut rng)
                .unwrap();
            assert!(graph.is_connected());
            assert_eq!(graph.edge_count(), 29);
        }
    }

    #[test]
    fn test_quantized_probability_rounds_to_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        let graph = build_random_connected_graph(40, 0.004, &mut rng).unwrap();
        assert_eq!(graph.edge_count(), 39);
    }

    #[test]
    fn test_full_probability_gives_complete_graph() {
        let mut rng = StdRng::seed_from_u64(5);
        let graph = build_random_connected_graph(12, 1.0, &mut rng).unwrap();
        assert_eq!(graph, Graph::complete(12).unwrap());

        let graph = GraphBuilder::new(12, 1.0)
            .with_sampling(EdgeSampling::Exact)
            .build(&mut rng)
            .unwrap();
        assert_eq!(graph.edge_count(), 66);
    }

    #[test]
    fn test_single_node_has_no_edges() {
        let mut rng = StdRng::seed_from_u64(0);
        for p in [0.0, 0.5, 1.0] {
            let graph = build_random_connected_graph(1, p, &mut rng).unwrap();
            assert_eq!(graph.len(), 1);
            assert_eq!(graph.edge_count(), 0);
            assert!(graph.is_connected());
        }
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            build_random_connected_graph(0, 0.5, &mut rng),
            Err(InfluenceError::InvalidNodeCount(0))
        );
        assert_eq!(
            build_random_connected_graph(5, 1.2, &mut rng),
            Err(InfluenceError::InvalidEdgeProbability(1.2))
        );
        assert_eq!(
            build_random_connected_graph(5, -0.1, &mut rng),
            Err(InfluenceError::InvalidEdgeProbability(-0.1))
        );
        assert!(build_random_connected_graph(5, f64::NAN, &mut rng).is_err());
    }

    #[test]
    fn test_same_seed_same_graph() {
        let a = build_random_connected_graph(25, 0.15, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = build_random_connected_graph(25, 0.15, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }
}
