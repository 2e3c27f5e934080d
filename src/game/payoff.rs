//! Zero-sum payoff matrix derived from shortest-path distances.
//!
//! When the row player seeds node `i` and the column player seeds node `j`,
//! every node `k` goes to whichever seed is closer, and is split evenly on a
//! tie. The row player's payoff is the number of nodes it wins:
//!
//! ```text
//! payoff(i, j) = |{k : d(i,k) < d(j,k)}| + 0.5 * |{k : d(i,k) = d(j,k)}|
//! payoff(j, i) = n - payoff(i, j)
//! payoff(i, i) = n / 2
//! ```

use rayon::prelude::*;
use serde::Serialize;

use crate::network::DistanceMatrix;

/// Row player's payoff for every pair of seed nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoffMatrix {
    n: usize,
    /// Row-major payoffs, `values[i * n + j]`.
    values: Vec<f64>,
}

impl PayoffMatrix {
    /// Number of actions (nodes) per player.
    pub fn len(&self) -> usize {
        self.n
    }

    /// True for a matrix with no actions.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Payoff to the row player for row action `i` against column action `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    /// Payoffs of row action `i` against every column action.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    /// Payoffs as nested rows, for display and serialization.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        (0..self.n).map(|i| self.row(i).to_vec()).collect()
    }

    /// `A * y`: expected row payoff of each row action against `y`.
    pub fn mul_vec(&self, y: &[f64]) -> Vec<f64> {
        debug_assert_eq!(y.len(), self.n);
        (0..self.n).map(|i| dot(self.row(i), y)).collect()
    }

    /// `A^T * x`: expected row payoff of each column action against `x`.
    pub fn transpose_mul_vec(&self, x: &[f64]) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.n);
        (0..self.n).map(|j| self.column_dot(j, x)).collect()
    }

    /// Parallel `A * y`; identical to [`PayoffMatrix::mul_vec`].
    pub fn par_mul_vec(&self, y: &[f64]) -> Vec<f64> {
        debug_assert_eq!(y.len(), self.n);
        (0..self.n).into_par_iter().map(|i| dot(self.row(i), y)).collect()
    }

    /// Parallel `A^T * x`; identical to [`PayoffMatrix::transpose_mul_vec`].
    pub fn par_transpose_mul_vec(&self, x: &[f64]) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.n);
        (0..self.n)
            .into_par_iter()
            .map(|j| self.column_dot(j, x))
            .collect()
    }

    /// `x^T * A * y`: expected row payoff when both players mix.
    pub fn bilinear(&self, x: &[f64], y: &[f64]) -> f64 {
        dot(x, &self.mul_vec(y))
    }

    fn column_dot(&self, j: usize, x: &[f64]) -> f64 {
        x.iter()
            .enumerate()
            .map(|(i, &xi)| self.get(i, j) * xi)
            .sum()
    }
}

impl std::fmt::Display for PayoffMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.n {
            let cells: Vec<String> = self.row(i).iter().map(|v| format!("{:>6.1}", v)).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Build the payoff matrix for the influence game on `distances`.
pub fn build_payoff_matrix(distances: &DistanceMatrix) -> PayoffMatrix {
    let n = distances.len();
    let total = n as f64;
    let mut values = vec![0.0; n * n];

    for i in 0..n {
        values[i * n + i] = 0.5 * total;

        for j in (i + 1)..n {
            let payoff: f64 = distances
                .row(i)
                .iter()
                .zip(distances.row(j))
                .map(|(di, dj)| match di.cmp(dj) {
                    std::cmp::Ordering::Less => 1.0,
                    std::cmp::Ordering::Equal => 0.5,
                    std::cmp::Ordering::Greater => 0.0,
                })
                .sum();

            values[i * n + j] = payoff;
            values[j * n + i] = total - payoff;
        }
    }

    PayoffMatrix { n, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{build_random_connected_graph, compute_distances, Graph};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn payoffs_for(graph: &Graph) -> PayoffMatrix {
        build_payoff_matrix(&compute_distances(graph).unwrap())
    }

    #[test]
    fn test_path_of_three() {
        let graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let payoffs = payoffs_for(&graph);

        assert_eq!(payoffs.rows(), vec![
            vec![1.5, 1.0, 1.5],
            vec![2.0, 1.5, 2.0],
            vec![1.5, 1.0, 1.5],
        ]);
    }

    #[test]
    fn test_complete_graph_is_all_ties() {
        let payoffs = payoffs_for(&Graph::complete(3).unwrap());
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(payoffs.get(i, j), 1.5);
            }
        }
    }

    #[test]
    fn test_single_node() {
        let payoffs = payoffs_for(&Graph::complete(1).unwrap());
        assert_eq!(payoffs.rows(), vec![vec![0.5]]);
    }

    #[test]
    fn test_zero_sum_holds_exactly() {
        for seed in 0..8u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = build_random_connected_graph(21, 0.1, &mut rng).unwrap();
            let payoffs = payoffs_for(&graph);
            let n = payoffs.len() as f64;

            for i in 0..payoffs.len() {
                assert_eq!(payoffs.get(i, i), n / 2.0);
                for j in 0..payoffs.len() {
                    if i != j {
                        assert_eq!(payoffs.get(i, j) + payoffs.get(j, i), n);
                    }
                }
            }
        }
    }

    #[test]
    fn test_products_agree() {
        let mut rng = StdRng::seed_from_u64(17);
        let graph = build_random_connected_graph(15, 0.2, &mut rng).unwrap();
        let payoffs = payoffs_for(&graph);
        let x: Vec<f64> = (0..15).map(|i| (i + 1) as f64 / 120.0).collect();

        assert_eq!(payoffs.mul_vec(&x), payoffs.par_mul_vec(&x));
        assert_eq!(payoffs.transpose_mul_vec(&x), payoffs.par_transpose_mul_vec(&x));

        let via_transpose: f64 = payoffs
            .transpose_mul_vec(&x)
            .iter()
            .zip(&x)
            .map(|(a, b)| a * b)
            .sum();
        assert!((payoffs.bilinear(&x, &x) - via_transpose).abs() < 1e-9);
    }
}
