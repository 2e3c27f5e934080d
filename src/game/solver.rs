//! Multiplicative-weights (Hedge) self-play for zero-sum matrix games.
//!
//! Both players start uniform. Each period, every action's weight is scaled
//! by `exp(eta * signal)` and the weights are renormalized, where the signal
//! is the action's expected payoff against the opponent's previous strategy:
//!
//! ```text
//! row:    l_x = A   * y_{t-1}      (row player maximizes A)
//! column: l_y = -A^T * x_{t-1}     (column player maximizes -A)
//! ```
//!
//! The time average of the per-period strategies converges to an approximate
//! Nash equilibrium at rate O(sqrt(ln(n) / T)). The last iterate need not.

use std::time::Instant;

use crate::error::{InfluenceError, Result};
use crate::game::config::{HedgeConfig, SolverStats};
use crate::game::payoff::PayoffMatrix;
use crate::game::strategy::{Equilibrium, MixedStrategy};

/// Progress snapshot passed to solver callbacks.
#[derive(Debug, Clone)]
pub struct SolverProgress {
    /// Periods completed so far.
    pub iteration: u64,
    /// Total periods in the budget.
    pub total: u64,
    /// Elapsed time in seconds.
    pub elapsed_seconds: f64,
    /// Current solve speed.
    pub iterations_per_second: f64,
}

/// Hedge solver over a borrowed payoff matrix.
///
/// # Example
/// ```
/// use influence_game::game::{build_payoff_matrix, HedgeConfig, HedgeSolver};
/// use influence_game::network::{compute_distances, Graph};
///
/// let graph = Graph::complete(3).unwrap();
/// let payoffs = build_payoff_matrix(&compute_distances(&graph).unwrap());
///
/// let mut solver = HedgeSolver::new(&payoffs, HedgeConfig::default().with_iterations(1_000));
/// let eq = solver.solve().unwrap();
/// assert!((eq.row.get(0) - 1.0 / 3.0).abs() < 1e-9);
/// ```
pub struct HedgeSolver<'a> {
    /// The game being solved.
    payoffs: &'a PayoffMatrix,

    /// Configuration for the solver.
    config: HedgeConfig,

    /// Statistics from the last solve.
    stats: SolverStats,
}

impl<'a> HedgeSolver<'a> {
    /// Create a solver for `payoffs`.
    pub fn new(payoffs: &'a PayoffMatrix, config: HedgeConfig) -> Self {
        Self {
            payoffs,
            config,
            stats: SolverStats::new(),
        }
    }

    /// Run the full iteration budget and return the averaged strategies.
    pub fn solve(&mut self) -> Result<Equilibrium> {
        self.solve_with_callback(0, |_: &SolverProgress| {})
    }

    /// Solve, calling `callback` every `callback_interval` periods.
    ///
    /// An interval of 0 disables the callback.
    pub fn solve_with_callback<F>(
        &mut self,
        callback_interval: u64,
        mut callback: F,
    ) -> Result<Equilibrium>
    where
        F: FnMut(&SolverProgress),
    {
        self.config.validate()?;
        let n = self.payoffs.len();
        if n == 0 {
            return Err(InfluenceError::InvalidNodeCount(n));
        }

        let start_time = Instant::now();
        let total = self.config.iterations;

        if n == 1 {
            // ln(1) = 0 leaves nothing to learn
            self.stats = SolverStats {
                iterations: total,
                duality_gap: Some(0.0),
                ..SolverStats::new()
            };
            return Ok(Equilibrium::trivial());
        }

        let eta = self.config.step_size(n);
        log::info!(
            "solving {}x{} game for {} periods (eta = {:.6})",
            n,
            n,
            total,
            eta
        );

        let mut x = vec![1.0 / n as f64; n];
        let mut y = vec![1.0 / n as f64; n];
        let mut x_sum = x.clone();
        let mut y_sum = y.clone();

        for t in 1..total {
            let row_signal = self.row_signal(&y);
            let column_signal = self.column_signal(&x);

            reweight(&mut x, &row_signal, eta);
            reweight(&mut y, &column_signal, eta);

            accumulate(&mut x_sum, &x);
            accumulate(&mut y_sum, &y);

            if callback_interval > 0 && t % callback_interval == 0 {
                let elapsed = start_time.elapsed().as_secs_f64();
                callback(&SolverProgress {
                    iteration: t,
                    total,
                    elapsed_seconds: elapsed,
                    iterations_per_second: if elapsed > 0.0 { t as f64 / elapsed } else { 0.0 },
                });
            }
        }

        let periods = total as f64;
        let equilibrium = Equilibrium {
            row: MixedStrategy::from_sum(x_sum, periods),
            column: MixedStrategy::from_sum(y_sum, periods),
        };

        self.stats.iterations = total;
        self.stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
        self.stats.duality_gap = Some(equilibrium.duality_gap(self.payoffs)?);
        self.stats.update_rate();

        log::info!(
            "solved in {:.2}s ({:.0} it/s), duality gap {:.6}",
            self.stats.elapsed_seconds,
            self.stats.iterations_per_second,
            self.stats.duality_gap.unwrap_or(f64::NAN)
        );

        Ok(equilibrium)
    }

    /// `A * y`
    fn row_signal(&self, y: &[f64]) -> Vec<f64> {
        if self.config.parallel {
            self.payoffs.par_mul_vec(y)
        } else {
            self.payoffs.mul_vec(y)
        }
    }

    /// `-A^T * x`
    fn column_signal(&self, x: &[f64]) -> Vec<f64> {
        let mut signal = if self.config.parallel {
            self.payoffs.par_transpose_mul_vec(x)
        } else {
            self.payoffs.transpose_mul_vec(x)
        };
        signal.iter_mut().for_each(|v| *v = -*v);
        signal
    }

    /// Get statistics from the last solve.
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &HedgeConfig {
        &self.config
    }
}

/// `w(a) <- w(a) * exp(eta * signal(a))`, then normalize.
///
/// The exponent is shifted by the largest signal; the shift cancels in the
/// normalization and keeps `exp` finite.
fn reweight(weights: &mut [f64], signal: &[f64], eta: f64) {
    let peak = signal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    for (w, &s) in weights.iter_mut().zip(signal) {
        *w *= (eta * (s - peak)).exp();
    }
    let total: f64 = weights.iter().sum();
    weights.iter_mut().for_each(|w| *w /= total);
}

fn accumulate(sum: &mut [f64], values: &[f64]) {
    for (s, &v) in sum.iter_mut().zip(values) {
        *s += v;
    }
}

/// Approximate a mixed equilibrium of `payoffs` with `iterations` Hedge periods.
pub fn solve_equilibrium(payoffs: &PayoffMatrix, iterations: u64) -> Result<Equilibrium> {
    HedgeSolver::new(payoffs, HedgeConfig::default().with_iterations(iterations)).solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::payoff::build_payoff_matrix;
    use crate::network::{build_random_connected_graph, compute_distances, Graph};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn payoffs_for(graph: &Graph) -> PayoffMatrix {
        build_payoff_matrix(&compute_distances(graph).unwrap())
    }

    #[test]
    fn test_complete_graph_stays_uniform() {
        let payoffs = payoffs_for(&Graph::complete(3).unwrap());
        let eq = solve_equilibrium(&payoffs, 20_000).unwrap();

        for i in 0..3 {
            assert!((eq.row.get(i) - 1.0 / 3.0).abs() < 1e-6);
            assert!((eq.column.get(i) - 1.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_single_node_is_degenerate() {
        let payoffs = payoffs_for(&Graph::complete(1).unwrap());
        let mut solver = HedgeSolver::new(&payoffs, HedgeConfig::default().with_iterations(10));
        let eq = solver.solve().unwrap();

        assert_eq!(eq.row.probabilities(), &[1.0]);
        assert_eq!(eq.column.probabilities(), &[1.0]);
        assert_eq!(solver.stats().duality_gap, Some(0.0));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let payoffs = payoffs_for(&Graph::complete(3).unwrap());
        assert_eq!(
            solve_equilibrium(&payoffs, 0),
            Err(InfluenceError::InvalidIterations(0))
        );
    }

    #[test]
    fn test_single_period_returns_uniform() {
        let payoffs = payoffs_for(&Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap());
        let eq = solve_equilibrium(&payoffs, 1).unwrap();
        assert_eq!(eq.row, MixedStrategy::uniform(3));
        assert_eq!(eq.column, MixedStrategy::uniform(3));
    }

    #[test]
    fn test_path_center_dominates() {
        let payoffs = payoffs_for(&Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap());
        let eq = solve_equilibrium(&payoffs, 50_000).unwrap();

        assert!(eq.row.get(1) > 0.9, "row center mass {}", eq.row.get(1));
        assert!(eq.column.get(1) > 0.9, "column center mass {}", eq.column.get(1));
        assert!((eq.row_payoff(&payoffs).unwrap() - 1.5).abs() < 0.05);
    }

    #[test]
    fn test_random_network_strategies_are_distributions() {
        for seed in 0..5u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = build_random_connected_graph(20, 0.1, &mut rng).unwrap();
            let payoffs = payoffs_for(&graph);

            let mut solver = HedgeSolver::new(&payoffs, HedgeConfig::default().with_iterations(2_000));
            let eq = solver.solve().unwrap();

            assert!(eq.row.is_distribution(1e-9));
            assert!(eq.column.is_distribution(1e-9));
            assert!(solver.stats().duality_gap.unwrap() >= -1e-9);
            assert_eq!(solver.stats().iterations, 2_000);
        }
    }

    #[test]
    fn test_gap_within_regret_bound() {
        // each player's average regret is at most ln(n)/(eta T) + eta n^2 / 8
        let mut rng = StdRng::seed_from_u64(8);
        let graph = build_random_connected_graph(15, 0.15, &mut rng).unwrap();
        let payoffs = payoffs_for(&graph);

        let eq = solve_equilibrium(&payoffs, 20_000).unwrap();
        assert!(eq.duality_gap(&payoffs).unwrap() < 0.6);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(21);
        let graph = build_random_connected_graph(30, 0.08, &mut rng).unwrap();
        let payoffs = payoffs_for(&graph);
        let config = HedgeConfig::default().with_iterations(500);

        let sequential = HedgeSolver::new(&payoffs, config).solve().unwrap();
        let parallel = HedgeSolver::new(&payoffs, config.with_parallel(true)).solve().unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_large_step_stays_finite() {
        // eta is largest for tiny budgets; n = 200 drives exponents past f64 range
        let mut rng = StdRng::seed_from_u64(2);
        let graph = build_random_connected_graph(200, 0.01, &mut rng).unwrap();
        let payoffs = payoffs_for(&graph);
        let eq = solve_equilibrium(&payoffs, 2).unwrap();
        assert!(eq.row.is_distribution(1e-9));
        assert!(eq.column.is_distribution(1e-9));
    }

    #[test]
    fn test_callback_interval() {
        let payoffs = payoffs_for(&Graph::complete(4).unwrap());
        let mut solver = HedgeSolver::new(&payoffs, HedgeConfig::default().with_iterations(1_000));
        let mut seen = Vec::new();
        solver
            .solve_with_callback(250, |p| seen.push((p.iteration, p.total)))
            .unwrap();
        assert_eq!(seen, vec![(250, 1_000), (500, 1_000), (750, 1_000)]);
    }
}
