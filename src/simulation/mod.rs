//! End-to-end simulation runs.
//!
//! [`InfluenceGame`] runs every pipeline stage once and keeps each stage's
//! output. Stages never modify the output of an earlier stage. Independent
//! runs own all their data, so [`run_batch`] executes them in parallel with
//! rayon, each with its own seeded RNG.

pub mod config;
pub mod report;

pub use config::{ConfigError, SimulationConfig};
pub use report::{BatchSummary, RunSummary, SimulationReport, SUPPORT_THRESHOLD};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::Result;
use crate::game::{build_payoff_matrix, Equilibrium, HedgeSolver, PayoffMatrix, SolverProgress, SolverStats};
use crate::network::{closeness_centrality, compute_distances, degree_centrality, DistanceMatrix, Graph};

/// Outputs of one pass through the pipeline.
#[derive(Debug, Clone)]
pub struct InfluenceGame {
    /// Configuration the run was built from.
    pub config: SimulationConfig,
    /// Connected random network.
    pub network: Graph,
    /// Shortest-path distances on `network`.
    pub distances: DistanceMatrix,
    /// Zero-sum payoffs derived from `distances`.
    pub payoffs: PayoffMatrix,
    /// Averaged Hedge strategies for `payoffs`.
    pub equilibrium: Equilibrium,
    /// Solver statistics.
    pub stats: SolverStats,
}

impl InfluenceGame {
    /// Run graph generation, distances, payoffs and the solver.
    pub fn simulate<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Result<Self> {
        Self::simulate_with_callback(config, rng, 0, |_: &SolverProgress| {})
    }

    /// Like [`InfluenceGame::simulate`], reporting solver progress every
    /// `callback_interval` periods.
    pub fn simulate_with_callback<R, F>(
        config: &SimulationConfig,
        rng: &mut R,
        callback_interval: u64,
        callback: F,
    ) -> Result<Self>
    where
        R: Rng + ?Sized,
        F: FnMut(&SolverProgress),
    {
        config.solver.validate()?;

        let network = config.graph_builder().build(rng)?;
        let distances = compute_distances(&network)?;
        let payoffs = build_payoff_matrix(&distances);

        let mut solver = HedgeSolver::new(&payoffs, config.solver);
        let equilibrium = solver.solve_with_callback(callback_interval, callback)?;
        let stats = solver.stats().clone();

        Ok(Self {
            config: config.clone(),
            network,
            distances,
            payoffs,
            equilibrium,
            stats,
        })
    }

    /// Closeness centrality of every node.
    pub fn closeness(&self) -> Vec<f64> {
        closeness_centrality(&self.distances)
    }

    /// Degree of every node.
    pub fn degree(&self) -> Vec<usize> {
        degree_centrality(&self.network)
    }

    /// Expected payoff to the row player.
    pub fn row_payoff(&self) -> Result<f64> {
        self.equilibrium.row_payoff(&self.payoffs)
    }

    /// Expected payoff to the column player.
    pub fn column_payoff(&self) -> Result<f64> {
        self.equilibrium.column_payoff(&self.payoffs)
    }

    /// Collect everything into a serializable report.
    pub fn report(&self, seed: u64) -> Result<SimulationReport> {
        Ok(SimulationReport {
            seed,
            nodes: self.config.nodes,
            edge_probability: self.config.edge_probability,
            sampling: self.config.sampling,
            iterations: self.config.solver.iterations,
            edges: self.network.edge_count(),
            network: self.network.adjacency_rows(),
            distances: self.distances.rows(),
            payoffs: self.payoffs.rows(),
            row_strategy: self.equilibrium.row.clone(),
            column_strategy: self.equilibrium.column.clone(),
            row_payoff: self.row_payoff()?,
            column_payoff: self.column_payoff()?,
            duality_gap: self.equilibrium.duality_gap(&self.payoffs)?,
            closeness: self.closeness(),
            degree: self.degree(),
            elapsed_seconds: self.stats.elapsed_seconds,
        })
    }
}

/// The configured seed, or a fresh one from entropy.
pub fn resolve_seed(config: &SimulationConfig) -> u64 {
    config.seed.unwrap_or_else(|| rand::thread_rng().gen())
}

/// Run the pipeline once with a seeded RNG.
pub fn run(config: &SimulationConfig) -> Result<SimulationReport> {
    let seed = resolve_seed(config);
    let mut rng = StdRng::seed_from_u64(seed);
    InfluenceGame::simulate(config, &mut rng)?.report(seed)
}

/// Run `runs` independent simulations in parallel.
///
/// Run `i` is seeded with `base_seed + i`, so a batch is reproducible from
/// its base seed and any single run can be replayed on its own.
pub fn run_batch(config: &SimulationConfig, runs: usize) -> Result<BatchSummary> {
    config.solver.validate()?;
    config.graph_builder().validate()?;

    let base_seed = resolve_seed(config);
    log::info!(
        "running {} simulations of {} nodes (p = {}), base seed {}",
        runs,
        config.nodes,
        config.edge_probability,
        base_seed
    );

    let summaries = (0..runs)
        .into_par_iter()
        .map(|i| -> Result<RunSummary> {
            let seed = base_seed.wrapping_add(i as u64);
            let mut rng = StdRng::seed_from_u64(seed);
            let game = InfluenceGame::simulate(config, &mut rng)?;
            let summary = game.report(seed)?.summary();
            log::debug!(
                "run {} (seed {}): row payoff {:.4}, gap {:.6}",
                i,
                seed,
                summary.row_payoff,
                summary.duality_gap
            );
            Ok(summary)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(BatchSummary::from_runs(base_seed, summaries))
}
