//! Configuration options for the Hedge equilibrium solver.

use serde::{Deserialize, Serialize};

use crate::error::{InfluenceError, Result};

/// Iteration budget used when none is given.
pub const DEFAULT_ITERATIONS: u64 = 500_000;

/// Configuration for the Hedge solver.
///
/// The solver always runs the full iteration budget; there is no
/// convergence-based early stopping.
///
/// # Example
/// ```
/// use influence_game::game::HedgeConfig;
///
/// let config = HedgeConfig::default().with_iterations(10_000);
/// assert_eq!(config.iterations, 10_000);
/// assert!(!config.parallel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HedgeConfig {
    /// Number of periods T, including the uniform period 0.
    ///
    /// Also fixes the step size `eta = sqrt(ln(n) / (2T))`.
    pub iterations: u64,

    /// Compute per-period matrix-vector products across actions with rayon.
    ///
    /// Only pays off for large networks. Results are identical either way.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for HedgeConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            parallel: false,
        }
    }
}

impl HedgeConfig {
    /// Create a new HedgeConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the iteration budget.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Builder method: set whether to parallelize matrix-vector products.
    pub fn with_parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(InfluenceError::InvalidIterations(self.iterations));
        }
        Ok(())
    }

    /// Step size for a game with `actions` actions.
    pub fn step_size(&self, actions: usize) -> f64 {
        ((actions as f64).ln() / (2.0 * self.iterations as f64)).sqrt()
    }
}

/// Statistics recorded by the last solve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverStats {
    /// Periods completed.
    pub iterations: u64,

    /// Time spent solving (in seconds).
    pub elapsed_seconds: f64,

    /// Periods per second.
    pub iterations_per_second: f64,

    /// Duality gap of the averaged strategies.
    pub duality_gap: Option<f64>,
}

impl SolverStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update iterations per second based on elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.iterations_per_second = self.iterations as f64 / self.elapsed_seconds;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget() {
        let config = HedgeConfig::new();
        assert_eq!(config.iterations, 500_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = HedgeConfig::default().with_iterations(0);
        assert_eq!(config.validate(), Err(InfluenceError::InvalidIterations(0)));
    }

    #[test]
    fn test_step_size() {
        let config = HedgeConfig::default().with_iterations(50);
        let eta = config.step_size(100);
        assert!((eta - (100f64.ln() / 100.0).sqrt()).abs() < 1e-15);
        assert_eq!(config.step_size(1), 0.0);
    }

    #[test]
    fn test_parallel_flag_defaults_off_in_json() {
        let config: HedgeConfig = serde_json::from_str(r#"{"iterations": 42}"#).unwrap();
        assert_eq!(config, HedgeConfig::default().with_iterations(42));
    }
}
