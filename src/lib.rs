//! # Influence Game
//!
//! A two-player zero-sum "influence game" on random connected networks.
//! Each player seeds one node; every node goes to the closer seed. The game's
//! mixed equilibrium is approximated with multiplicative weights (Hedge).
//!
//! ## Features
//!
//! - **Connected Random Networks**: Erdős–Rényi sampling plus connectivity repair
//! - **All-Pairs Distances**: one breadth-first search per node
//! - **Exact Zero-Sum Payoffs**: `payoff(i, j) + payoff(j, i) == n` bit-for-bit
//! - **Hedge Solver**: time-averaged multiplicative weights with a fixed budget
//! - **Reproducible Batches**: explicit seeded RNGs, parallel independent runs
//!
//! ## Quick Start
//!
//! ```
//! use influence_game::network::{build_random_connected_graph, compute_distances};
//! use influence_game::game::{build_payoff_matrix, solve_equilibrium};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let graph = build_random_connected_graph(10, 0.2, &mut rng).unwrap();
//! let distances = compute_distances(&graph).unwrap();
//! let payoffs = build_payoff_matrix(&distances);
//! let eq = solve_equilibrium(&payoffs, 5_000).unwrap();
//!
//! assert!(eq.row.is_distribution(1e-9));
//! ```
//!
//! ## Modules
//!
//! - [`network`]: graph generation, distances and centrality
//! - [`game`]: payoff matrix and equilibrium solver
//! - [`simulation`]: end-to-end runs, batches and reports
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ GraphBuilder │──►│ compute_distances│──►│ PayoffMatrix │──►│ HedgeSolver  │
//! │  (rng)       │   │  (BFS per node)  │   │  (zero-sum)  │   │ (avg. Hedge) │
//! └──────────────┘   └──────────────────┘   └──────────────┘   └──────────────┘
//!        │                    │                                        │
//!        ▼                    ▼                                        ▼
//!    degree             closeness                              Equilibrium
//! ```

#![warn(missing_docs)]

/// Error type shared by all stages.
pub mod error;

/// Network generation and shortest-path distances.
pub mod network;

/// Payoff matrix and Hedge equilibrium solver.
pub mod game;

/// End-to-end simulation runs and reports.
pub mod simulation;

// Re-export commonly used types at crate root for convenience
pub use error::InfluenceError;
pub use game::{build_payoff_matrix, solve_equilibrium, Equilibrium, HedgeConfig, HedgeSolver, MixedStrategy, PayoffMatrix};
pub use network::{
    build_random_connected_graph, closeness_centrality, compute_distances, degree_centrality,
    DistanceMatrix, EdgeSampling, Graph, GraphBuilder,
};
pub use simulation::{InfluenceGame, SimulationConfig, SimulationReport};
