//! Mixed strategies and equilibrium quality measures.

use serde::{Deserialize, Serialize};

use crate::error::{InfluenceError, Result};
use crate::game::payoff::PayoffMatrix;

/// Sum tolerance for strategies read back from JSON.
const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Probability distribution over seed nodes.
///
/// Serialized as a plain array; deserialization rejects arrays that are not
/// a distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct MixedStrategy(Vec<f64>);

impl MixedStrategy {
    /// Uniform distribution over `n` actions.
    pub fn uniform(n: usize) -> Self {
        Self(vec![1.0 / n as f64; n])
    }

    /// Wrap raw weights, normalizing them to sum to 1.
    ///
    /// Returns `None` if any weight is negative or non-finite, or if the
    /// weights sum to zero.
    pub fn from_weights(weights: Vec<f64>) -> Option<Self> {
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return None;
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return None;
        }
        Some(Self(weights.into_iter().map(|w| w / total).collect()))
    }

    /// Time average of per-period strategies, given their running sum.
    pub(crate) fn from_sum(sum: Vec<f64>, periods: f64) -> Self {
        Self(sum.into_iter().map(|s| s / periods).collect())
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no actions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Probability of action `i`.
    pub fn get(&self, i: usize) -> f64 {
        self.0[i]
    }

    /// Probabilities in node order.
    pub fn probabilities(&self) -> &[f64] {
        &self.0
    }

    /// Actions played with probability above `threshold`.
    pub fn support(&self, threshold: f64) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, &p)| (p > threshold).then_some(i))
            .collect()
    }

    /// Most likely action (lowest index on ties).
    pub fn argmax(&self) -> usize {
        self.0
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, &p)| if p > best.1 { (i, p) } else { best })
            .0
    }

    /// Non-negative and summing to 1 within `tolerance`.
    pub fn is_distribution(&self, tolerance: f64) -> bool {
        let total: f64 = self.0.iter().sum();
        self.0.iter().all(|&p| p >= 0.0) && (total - 1.0).abs() <= tolerance
    }
}

impl TryFrom<Vec<f64>> for MixedStrategy {
    type Error = InfluenceError;

    fn try_from(probabilities: Vec<f64>) -> Result<Self> {
        let strategy = Self(probabilities);
        if strategy.is_empty()
            || strategy.0.iter().any(|p| !p.is_finite())
            || !strategy.is_distribution(DISTRIBUTION_TOLERANCE)
        {
            return Err(InfluenceError::InvalidDistribution);
        }
        Ok(strategy)
    }
}

impl From<MixedStrategy> for Vec<f64> {
    fn from(strategy: MixedStrategy) -> Self {
        strategy.0
    }
}

impl std::fmt::Display for MixedStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells: Vec<String> = self.0.iter().map(|p| format!("{:.4}", p)).collect();
        write!(f, "[{}]", cells.join(", "))
    }
}

/// Row and column strategies produced by a solver run.
///
/// The row player maximizes the payoff matrix; the column player minimizes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equilibrium {
    /// Row player's time-averaged strategy.
    pub row: MixedStrategy,
    /// Column player's time-averaged strategy.
    pub column: MixedStrategy,
}

impl Equilibrium {
    /// Both players seed the only node of a single-node network.
    pub(crate) fn trivial() -> Self {
        Self {
            row: MixedStrategy(vec![1.0]),
            column: MixedStrategy(vec![1.0]),
        }
    }

    fn check(&self, payoffs: &PayoffMatrix) -> Result<()> {
        for actual in [self.row.len(), self.column.len()] {
            if actual != payoffs.len() {
                return Err(InfluenceError::DimensionMismatch {
                    expected: payoffs.len(),
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Expected payoff to the row player, `x^T A y`.
    pub fn row_payoff(&self, payoffs: &PayoffMatrix) -> Result<f64> {
        self.check(payoffs)?;
        Ok(payoffs.bilinear(self.row.probabilities(), self.column.probabilities()))
    }

    /// Expected payoff to the column player, `-x^T A y`.
    pub fn column_payoff(&self, payoffs: &PayoffMatrix) -> Result<f64> {
        Ok(-self.row_payoff(payoffs)?)
    }

    /// `max_i (A y)_i - min_j (x^T A)_j`.
    ///
    /// Total gain available to the two players from unilateral best responses.
    /// Never negative, and zero exactly at a Nash equilibrium.
    pub fn duality_gap(&self, payoffs: &PayoffMatrix) -> Result<f64> {
        self.check(payoffs)?;
        let best_row = payoffs
            .mul_vec(self.column.probabilities())
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max);
        let best_column = payoffs
            .transpose_mul_vec(self.row.probabilities())
            .into_iter()
            .fold(f64::INFINITY, f64::min);
        Ok(best_row - best_column)
    }
}
