//! End-to-end drivers: construction, optional improvement and transport
//! assignment.
//!
//! - [`Greedy`]: one deterministic nearest-neighbor construction
//! - [`Grasp`]: best of several randomized constructions
//! - [`MultiStart`]: repeated GRASP + sequential local search
//! - [`Solver`]: runs the driver selected by a [`SolverConfig`]

mod config;
mod grasp;
mod greedy;
mod multi_start;

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, instrument, warn};

pub use config::{Algorithm, Improvement, SolverConfig};
pub use grasp::Grasp;
pub use greedy::Greedy;
pub use multi_start::MultiStart;

use crate::error::Result;
use crate::evaluation::RouteEvaluator;
use crate::models::{ProblemInstance, RouteSet};
use crate::scheduler::{Rvnd, SequentialSearch};
use crate::transport::TransportPlanner;

/// Re-derives the unload events of `routes` and attaches transport trucks.
pub(crate) fn attach_transport(instance: &ProblemInstance, routes: RouteSet) -> RouteSet {
    let tasks = RouteEvaluator::new(instance).transport_tasks(routes.collection_routes());
    let trucks = TransportPlanner::new(instance).assign(&tasks);
    routes.with_transport(trucks)
}

/// Result of a solver run.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Collection routes and transport trucks.
    pub routes: RouteSet,
    /// Wall time spent in the run.
    pub elapsed: Duration,
}

/// Runs the configured algorithm on an instance.
///
/// # Examples
///
/// ```
/// use swts_routing::models::{InstanceBuilder, Point, TruckProfile};
/// use swts_routing::solver::{Algorithm, Solver, SolverConfig};
///
/// let instance = InstanceBuilder::new(
///     TruckProfile::new(20, 480.0, 60.0),
///     TruckProfile::new(300, 600.0, 60.0),
/// )
/// .with_dumpsite(Point::new(20, 20))
/// .add_transfer_station(Point::new(0, 10))
/// .add_collection_area(Point::new(3, 0), 10, 1.0)
/// .add_collection_area(Point::new(1, 0), 10, 1.0)
/// .add_collection_area(Point::new(2, 5), 10, 1.0)
/// .build()
/// .unwrap();
///
/// let config = SolverConfig::default()
///     .with_algorithm(Algorithm::MultiStart)
///     .with_restarts(3)
///     .with_grasp_iterations(3)
///     .with_seed(42);
/// let outcome = Solver::new(config).solve(&instance).unwrap();
/// assert_eq!(outcome.routes.num_served(), 3);
/// assert!(outcome.routes.num_transport_trucks() >= 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves the instance.
    #[instrument(skip_all, fields(algorithm = ?self.config.algorithm))]
    pub fn solve(&self, instance: &ProblemInstance) -> Result<SolveOutcome> {
        let start = Instant::now();
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let collection = match self.config.algorithm {
            Algorithm::Greedy => {
                let routes = Greedy::new(instance).collection_routes()?;
                self.improve(instance, routes, &mut rng)
            }
            Algorithm::Grasp => {
                let routes = self.grasp(instance).best_construction(&mut rng)?;
                self.improve(instance, routes, &mut rng)
            }
            Algorithm::MultiStart => {
                MultiStart::new(self.grasp(instance), SequentialSearch::default(), self.config.restarts)
                    .collection_routes(&mut rng)?
            }
        };
        let routes = attach_transport(instance, collection);

        let violations = RouteEvaluator::new(instance).evaluate(&routes);
        if !violations.is_empty() {
            warn!(count = violations.len(), first = ?violations[0].kind, "solution violates constraints");
        }

        let elapsed = start.elapsed();
        info!(
            routes = routes.num_collection_routes(),
            trucks = routes.num_transport_trucks(),
            collection_time = routes.collection_time(),
            transport_time = routes.transport_time(),
            elapsed_ms = elapsed.as_millis() as u64,
            "solved"
        );
        Ok(SolveOutcome { routes, elapsed })
    }

    fn grasp<'a>(&self, instance: &'a ProblemInstance) -> Grasp<'a> {
        Grasp::new(instance, self.config.selection(), self.config.grasp_iterations)
    }

    fn improve(&self, instance: &ProblemInstance, routes: RouteSet, rng: &mut StdRng) -> RouteSet {
        match &self.config.improvement {
            Improvement::None => routes,
            Improvement::Sequential(neighborhoods) => {
                SequentialSearch::new(neighborhoods.clone()).search(instance, &routes)
            }
            Improvement::Rvnd(neighborhoods) => {
                Rvnd::new(neighborhoods.clone()).search(instance, &routes, rng)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::Neighborhood;
    use crate::models::{InstanceBuilder, Point, TruckProfile};

    fn instance() -> ProblemInstance {
        let mut builder = InstanceBuilder::new(
            TruckProfile::new(30, 200.0, 60.0),
            TruckProfile::new(90, 600.0, 60.0),
        )
        .with_dumpsite(Point::new(25, 25))
        .add_transfer_station(Point::new(6, 6))
        .add_transfer_station(Point::new(-6, -6));
        for (x, y) in [(2, 3), (-4, 1), (5, -2), (1, 8), (-7, -3), (9, 4), (-2, -9), (4, 4)] {
            builder = builder.add_collection_area(Point::new(x, y), 9, 2.5);
        }
        builder.build().expect("valid")
    }

    #[test]
    fn test_every_algorithm_is_feasible() {
        let inst = instance();
        let eval = RouteEvaluator::new(&inst);
        for algorithm in [Algorithm::Greedy, Algorithm::Grasp, Algorithm::MultiStart] {
            let config = SolverConfig::default()
                .with_algorithm(algorithm)
                .with_grasp_iterations(4)
                .with_restarts(3)
                .with_seed(3);
            let outcome = Solver::new(config).solve(&inst).expect("feasible");
            assert!(eval.evaluate(&outcome.routes).is_empty(), "{algorithm:?}");
            assert_eq!(outcome.routes.num_served(), 8);
        }
    }

    #[test]
    fn test_seed_makes_runs_reproducible() {
        let inst = instance();
        let config = SolverConfig::default()
            .with_improvement(Improvement::Rvnd(Neighborhood::ALL.to_vec()))
            .with_seed(99);
        let a = Solver::new(config.clone()).solve(&inst).expect("feasible");
        let b = Solver::new(config).solve(&inst).expect("feasible");
        assert_eq!(a.routes, b.routes);
    }

    #[test]
    fn test_improvement_never_regresses() {
        let inst = instance();
        let base = SolverConfig::default()
            .with_algorithm(Algorithm::Greedy)
            .with_seed(1);
        let plain = Solver::new(base.clone()).solve(&inst).expect("feasible");
        let improved = Solver::new(
            base.with_improvement(Improvement::Sequential(Neighborhood::ALL.to_vec())),
        )
        .solve(&inst)
        .expect("feasible");
        assert!(improved.routes.collection_time() <= plain.routes.collection_time() + 1e-9);
    }
}
