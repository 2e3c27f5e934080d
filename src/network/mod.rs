//! Network generation and shortest-path distances.
//!
//! # Pipeline
//!
//! ```text
//! GraphBuilder::build(rng) ──► Graph ──► compute_distances ──► DistanceMatrix
//!                                │                                  │
//!                                ▼                                  ▼
//!                        degree_centrality               closeness_centrality
//! ```
//!
//! Only undirected, unweighted, simple graphs are supported, sized for
//! experiments with tens to low hundreds of nodes. Adjacency is stored densely.

pub mod builder;
pub mod centrality;
pub mod distance;
pub mod graph;

pub use builder::{build_random_connected_graph, EdgeSampling, GraphBuilder};
pub use centrality::{closeness_centrality, degree_centrality};
pub use distance::{compute_distances, DistanceMatrix};
pub use graph::Graph;
