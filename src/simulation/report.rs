//! Serializable outputs for single runs and batches.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::game::MixedStrategy;
use crate::network::EdgeSampling;

/// Probability above which an action counts as part of a strategy's support.
pub const SUPPORT_THRESHOLD: f64 = 1e-3;

/// Every intermediate and final result of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Seed that reproduces this run.
    pub seed: u64,
    /// Network size.
    pub nodes: usize,
    /// Requested edge probability.
    pub edge_probability: f64,
    /// Edge draw mode.
    pub sampling: EdgeSampling,
    /// Solver periods.
    pub iterations: u64,
    /// Undirected edge count after repair.
    pub edges: usize,
    /// Adjacency matrix rows.
    pub network: Vec<Vec<u8>>,
    /// Shortest-path distance rows.
    pub distances: Vec<Vec<usize>>,
    /// Payoff matrix rows.
    pub payoffs: Vec<Vec<f64>>,
    /// Row player's averaged strategy.
    pub row_strategy: MixedStrategy,
    /// Column player's averaged strategy.
    pub column_strategy: MixedStrategy,
    /// `x^T A y`.
    pub row_payoff: f64,
    /// `-x^T A y`.
    pub column_payoff: f64,
    /// Distance of the strategy pair from equilibrium.
    pub duality_gap: f64,
    /// Closeness centrality per node.
    pub closeness: Vec<f64>,
    /// Degree per node.
    pub degree: Vec<usize>,
    /// Solver wall time (in seconds).
    pub elapsed_seconds: f64,
}

impl SimulationReport {
    /// Save to JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        save_json(self, path)
    }

    /// Short per-run summary used in batch output.
    pub fn summary(&self) -> RunSummary {
        let most_central = self
            .closeness
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, &c)| if c > best.1 { (i, c) } else { best })
            .0;
        let favourite = self.row_strategy.argmax();

        RunSummary {
            seed: self.seed,
            edges: self.edges,
            row_payoff: self.row_payoff,
            duality_gap: self.duality_gap,
            row_support: self.row_strategy.support(SUPPORT_THRESHOLD).len(),
            favourite_node: favourite,
            favourite_is_most_central: self.closeness[favourite] >= self.closeness[most_central],
        }
    }
}

/// Headline numbers of one run inside a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Seed that reproduces this run.
    pub seed: u64,
    /// Undirected edge count after repair.
    pub edges: usize,
    /// `x^T A y`.
    pub row_payoff: f64,
    /// Distance of the strategy pair from equilibrium.
    pub duality_gap: f64,
    /// Number of nodes the row player seeds with non-negligible probability.
    pub row_support: usize,
    /// Row player's most likely seed.
    pub favourite_node: usize,
    /// Whether that seed has maximal closeness centrality.
    pub favourite_is_most_central: bool,
}

/// Aggregate over independent runs sharing one configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Seed of run 0; run `i` uses `base_seed + i`.
    pub base_seed: u64,
    /// Number of runs.
    pub runs: usize,
    /// Mean row payoff across runs.
    pub mean_row_payoff: f64,
    /// Mean duality gap across runs.
    pub mean_duality_gap: f64,
    /// Fraction of runs whose favourite seed has maximal closeness.
    pub most_central_rate: f64,
    /// Row support size -> number of runs.
    pub support_histogram: FxHashMap<usize, usize>,
    /// Per-run summaries in seed order.
    pub runs_detail: Vec<RunSummary>,
}

impl BatchSummary {
    /// Aggregate per-run summaries.
    pub fn from_runs(base_seed: u64, runs_detail: Vec<RunSummary>) -> Self {
        let runs = runs_detail.len();
        let mut support_histogram = FxHashMap::default();
        for run in &runs_detail {
            *support_histogram.entry(run.row_support).or_insert(0) += 1;
        }

        let mean = |f: fn(&RunSummary) -> f64| {
            if runs == 0 {
                0.0
            } else {
                runs_detail.iter().map(f).sum::<f64>() / runs as f64
            }
        };

        Self {
            base_seed,
            runs,
            mean_row_payoff: mean(|r| r.row_payoff),
            mean_duality_gap: mean(|r| r.duality_gap),
            most_central_rate: mean(|r| if r.favourite_is_most_central { 1.0 } else { 0.0 }),
            support_histogram,
            runs_detail,
        }
    }

    /// Save to JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        save_json(self, path)
    }

    /// Seed of the final run. Seeds wrap around at `u64::MAX`.
    pub fn last_seed(&self) -> u64 {
        self.base_seed.wrapping_add(self.runs.saturating_sub(1) as u64)
    }

    /// Print a human-readable summary.
    pub fn print_summary(&self) {
        println!("Runs: {} (seeds {}..={})", self.runs, self.base_seed, self.last_seed());
        println!("Mean row payoff:   {:.4}", self.mean_row_payoff);
        println!("Mean duality gap:  {:.6}", self.mean_duality_gap);
        println!("Favourite seed is most central: {:.1}%", self.most_central_rate * 100.0);

        let mut sizes: Vec<_> = self.support_histogram.iter().collect();
        sizes.sort();
        println!("Row support sizes:");
        for (size, count) in sizes {
            println!("  {:>3} node(s): {} run(s)", size, count);
        }
    }
}

fn save_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())
}
