//! Solver configuration.

use serde::{Deserialize, Serialize};

use crate::constructive::NeighborSelection;
use crate::local_search::Neighborhood;

/// Outer driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// One deterministic nearest-neighbor construction.
    Greedy,
    /// Best of several randomized constructions.
    #[default]
    Grasp,
    /// Repeated GRASP plus sequential local search.
    MultiStart,
}

/// Local search applied to the Greedy or GRASP result.
///
/// Multi-start always runs its own [`SequentialSearch`](crate::scheduler::SequentialSearch)
/// and ignores this setting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Improvement {
    /// Keep the constructed routes.
    #[default]
    None,
    /// Run each neighborhood once, in order.
    Sequential(Vec<Neighborhood>),
    /// Randomized variable neighborhood descent over the neighborhoods.
    Rvnd(Vec<Neighborhood>),
}

/// Configuration for [`Solver`](super::Solver).
///
/// # Examples
///
/// ```
/// use swts_routing::local_search::Neighborhood;
/// use swts_routing::solver::{Algorithm, Improvement, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_algorithm(Algorithm::Grasp)
///     .with_grasp_iterations(50)
///     .with_improvement(Improvement::Rvnd(Neighborhood::ALL.to_vec()))
///     .with_seed(7);
/// assert_eq!(config.random_window, 2);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Outer driver. Default: GRASP.
    pub algorithm: Algorithm,
    /// Size of the randomized candidate list. Default: 2.
    pub random_window: usize,
    /// Constructions per GRASP run. Default: 20.
    pub grasp_iterations: usize,
    /// GRASP + local search restarts of multi-start. Default: 20.
    pub restarts: usize,
    /// Local search after Greedy or GRASP. Default: none.
    pub improvement: Improvement,
    /// Random seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            random_window: 2,
            grasp_iterations: 20,
            restarts: 20,
            improvement: Improvement::default(),
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Sets the outer driver.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the randomized candidate list size.
    pub fn with_random_window(mut self, window: usize) -> Self {
        self.random_window = window;
        self
    }

    /// Sets the number of constructions per GRASP run.
    pub fn with_grasp_iterations(mut self, iterations: usize) -> Self {
        self.grasp_iterations = iterations;
        self
    }

    /// Sets the number of multi-start restarts.
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    /// Sets the local search applied after construction.
    pub fn with_improvement(mut self, improvement: Improvement) -> Self {
        self.improvement = improvement;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Neighbor selection used by randomized construction.
    pub fn selection(&self) -> NeighborSelection {
        NeighborSelection::RandomizedTopK {
            window: self.random_window,
        }
    }
}
