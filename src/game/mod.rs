//! The zero-sum influence game and its equilibrium solver.
//!
//! # Overview
//!
//! Each player picks one node to seed. Every node of the network is won by
//! the closer seed (ties split evenly), so the row player's payoff counts the
//! nodes it wins and the column player receives the rest. This makes the game
//! constant-sum with total `n`; subtracting `n/2` gives a zero-sum game with
//! the same equilibria.
//!
//! Equilibria are approximated by multiplicative-weights self-play:
//!
//! ```text
//! w_{t}(a) = w_{t-1}(a) * exp(eta * signal_t(a))      eta = sqrt(ln n / 2T)
//! strategy = (1/T) * sum_t normalize(w_t)
//! ```
//!
//! Each player's average regret after `T` periods is O(sqrt(ln(n) / T)), so
//! the averaged pair is an O(sqrt(ln(n) / T))-equilibrium.
//!
//! # Usage
//!
//! ```
//! use influence_game::game::{build_payoff_matrix, solve_equilibrium};
//! use influence_game::network::{compute_distances, Graph};
//!
//! let graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
//! let payoffs = build_payoff_matrix(&compute_distances(&graph).unwrap());
//! let eq = solve_equilibrium(&payoffs, 50_000).unwrap();
//! assert_eq!(eq.row.argmax(), 1);
//! ```
//!
//! # References
//!
//! - Freund, Y., Schapire, R. "Adaptive game playing using multiplicative weights" (1999)
//! - Arora, S., Hazan, E., Kale, S. "The Multiplicative Weights Update Method" (2012)

pub mod config;
pub mod payoff;
pub mod solver;
pub mod strategy;

pub use config::{HedgeConfig, SolverStats, DEFAULT_ITERATIONS};
pub use payoff::{build_payoff_matrix, PayoffMatrix};
pub use solver::{solve_equilibrium, HedgeSolver, SolverProgress};
pub use strategy::{Equilibrium, MixedStrategy};
