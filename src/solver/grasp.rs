//! GRASP construction driver.
//!
//! Runs a fixed number of independent randomized constructions and keeps
//! the best one in construction order: fewer collection routes first, then
//! lower total collection time.

use rand::Rng;
use tracing::{debug, info};

use super::attach_transport;
use crate::constructive::{NeighborSelection, RouteConstructor};
use crate::error::Result;
use crate::models::{ProblemInstance, RouteSet};

/// Greedy randomized adaptive search procedure (construction phase).
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use swts_routing::constructive::NeighborSelection;
/// use swts_routing::models::{InstanceBuilder, Point, TruckProfile};
/// use swts_routing::solver::Grasp;
///
/// let instance = InstanceBuilder::new(
///     TruckProfile::new(20, 480.0, 60.0),
///     TruckProfile::new(300, 600.0, 60.0),
/// )
/// .add_transfer_station(Point::new(0, 10))
/// .add_collection_area(Point::new(3, 0), 10, 1.0)
/// .add_collection_area(Point::new(1, 0), 10, 1.0)
/// .add_collection_area(Point::new(2, 5), 10, 1.0)
/// .build()
/// .unwrap();
///
/// let grasp = Grasp::new(&instance, NeighborSelection::RandomizedTopK { window: 2 }, 10);
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let routes = grasp.solve(&mut rng).unwrap();
/// assert_eq!(routes.num_served(), 3);
/// assert!(routes.num_transport_trucks() >= 1);
/// ```
pub struct Grasp<'a> {
    instance: &'a ProblemInstance,
    selection: NeighborSelection,
    iterations: usize,
}

impl<'a> Grasp<'a> {
    /// Creates a GRASP driver. At least one construction always runs.
    pub fn new(instance: &'a ProblemInstance, selection: NeighborSelection, iterations: usize) -> Self {
        Self {
            instance,
            selection,
            iterations: iterations.max(1),
        }
    }

    /// The problem instance.
    pub fn instance(&self) -> &'a ProblemInstance {
        self.instance
    }

    /// Best collection routes over all constructions.
    pub fn best_construction<R: Rng>(&self, rng: &mut R) -> Result<RouteSet> {
        let constructor = RouteConstructor::new(self.instance, self.selection);
        let mut best = constructor.build(rng)?.into_route_set();

        for iteration in 1..self.iterations {
            let candidate = constructor.build(rng)?.into_route_set();
            if candidate.is_better_construction(&best) {
                debug!(
                    iteration,
                    routes = candidate.num_collection_routes(),
                    time = candidate.collection_time(),
                    "new best construction"
                );
                best = candidate;
            }
        }
        Ok(best)
    }

    /// Best construction with transport trucks for its unload events.
    pub fn solve<R: Rng>(&self, rng: &mut R) -> Result<RouteSet> {
        let best = self.best_construction(rng)?;
        let routes = attach_transport(self.instance, best);
        info!(
            routes = routes.num_collection_routes(),
            trucks = routes.num_transport_trucks(),
            time = routes.collection_time(),
            "grasp solution"
        );
        Ok(routes)
    }
}
