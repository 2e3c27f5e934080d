//! Simulation configuration and JSON loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InfluenceError;
use crate::game::HedgeConfig;
use crate::network::{EdgeSampling, GraphBuilder};

/// Everything needed to run the pipeline once.
///
/// # Example
/// ```
/// use influence_game::simulation::SimulationConfig;
///
/// let config = SimulationConfig::from_json_str(
///     r#"{ "nodes": 20, "edge_probability": 0.1, "solver": { "iterations": 5000 } }"#,
/// ).unwrap();
/// assert_eq!(config.nodes, 20);
/// assert_eq!(config.seed, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Network size.
    pub nodes: usize,

    /// Independent edge probability before connectivity repair.
    pub edge_probability: f64,

    /// How edge probabilities are drawn.
    #[serde(default)]
    pub sampling: EdgeSampling,

    /// Hedge solver settings.
    #[serde(default)]
    pub solver: HedgeConfig,

    /// Random seed for reproducibility.
    ///
    /// If `None`, a fresh seed is drawn from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            nodes: 20,
            edge_probability: 0.1,
            sampling: EdgeSampling::default(),
            solver: HedgeConfig::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Create a configuration for `nodes` nodes and edge probability `p`.
    pub fn new(nodes: usize, edge_probability: f64) -> Self {
        Self {
            nodes,
            edge_probability,
            ..Default::default()
        }
    }

    /// Builder method: set the solver iteration budget.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.solver.iterations = iterations;
        self
    }

    /// Builder method: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set the edge sampling mode.
    pub fn with_sampling(mut self, sampling: EdgeSampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Builder method: parallelize solver matrix-vector products.
    pub fn with_parallel(mut self, enable: bool) -> Self {
        self.solver.parallel = enable;
        self
    }

    /// Network builder for this configuration.
    pub fn graph_builder(&self) -> GraphBuilder {
        GraphBuilder::new(self.nodes, self.edge_probability).with_sampling(self.sampling)
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.graph_builder().validate()?;
        self.solver.validate()?;
        Ok(())
    }
}

/// Errors that can occur when loading a simulation configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The file could not be read.
    IoError(String),
    /// The file is not valid configuration JSON.
    ParseError(String),
    /// A parameter violates a pipeline precondition.
    Invalid(InfluenceError),
}

impl From<InfluenceError> for ConfigError {
    fn from(e: InfluenceError) -> Self {
        Self::Invalid(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {}", e),
            Self::ParseError(e) => write!(f, "Parse error: {}", e),
            Self::Invalid(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = SimulationConfig::from_json_str(r#"{"nodes": 8, "edge_probability": 0.5}"#).unwrap();
        assert_eq!(config.sampling, EdgeSampling::Percent);
        assert_eq!(config.solver, HedgeConfig::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_sampling_mode_parsed() {
        let config = SimulationConfig::from_json_str(
            r#"{"nodes": 8, "edge_probability": 0.5, "sampling": "exact", "seed": 4}"#,
        )
        .unwrap();
        assert_eq!(config.sampling, EdgeSampling::Exact);
        assert_eq!(config.seed, Some(4));
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimulationConfig::new(30, 0.05)
            .with_iterations(1_000)
            .with_seed(9)
            .with_parallel(true);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SimulationConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = SimulationConfig::from_json_str(r#"{"nodes": 0, "edge_probability": 0.5}"#);
        assert_eq!(err, Err(ConfigError::Invalid(InfluenceError::InvalidNodeCount(0))));

        let err = SimulationConfig::from_json_str(r#"{"nodes": 4, "edge_probability": 2.0}"#);
        assert_eq!(
            err,
            Err(ConfigError::Invalid(InfluenceError::InvalidEdgeProbability(2.0)))
        );

        let err = SimulationConfig::from_json_str(
            r#"{"nodes": 4, "edge_probability": 0.5, "solver": {"iterations": 0}}"#,
        );
        assert_eq!(err, Err(ConfigError::Invalid(InfluenceError::InvalidIterations(0))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SimulationConfig::from_json_str("{nodes: 3"),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            SimulationConfig::from_json_file("/definitely/not/here.json"),
            Err(ConfigError::IoError(_))
        ));
    }
}
