//! Randomized variable neighborhood descent.
//!
//! # Algorithm
//!
//! Neighborhoods are drawn uniformly from an active pool and moved to the
//! inactive list once run. An improvement reactivates every inactive
//! neighborhood except the one that just ran; the search stops when the
//! active pool is empty. The pool is fully reset before returning, so the
//! same scheduler can be reused.
//!
//! # Reference
//!
//! Subramanian, A., Drummond, L.M.A., Bentes, C., Ochi, L.S. & Farias, R.
//! (2010). "A parallel heuristic for the Vehicle Routing Problem with
//! Simultaneous Pickup and Delivery", *Computers & Operations Research*
//! 37(11), 1899-1911.

use rand::Rng;
use tracing::{debug, trace};

use crate::local_search::{LocalSearch, Neighborhood, IMPROVEMENT_EPSILON};
use crate::models::{ProblemInstance, RouteSet};

/// Active and inactive neighborhoods of an RVND run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborhoodPool {
    active: Vec<Neighborhood>,
    inactive: Vec<Neighborhood>,
}

impl NeighborhoodPool {
    /// Creates a pool with every neighborhood active.
    pub fn new(neighborhoods: Vec<Neighborhood>) -> Self {
        Self {
            active: neighborhoods,
            inactive: Vec::new(),
        }
    }

    /// Neighborhoods that can still be drawn.
    pub fn active(&self) -> &[Neighborhood] {
        &self.active
    }

    /// Neighborhoods already run since the last reset, oldest first.
    pub fn inactive(&self) -> &[Neighborhood] {
        &self.inactive
    }

    /// Returns `true` when no neighborhood can be drawn.
    pub fn is_exhausted(&self) -> bool {
        self.active.is_empty()
    }

    /// Draws an active neighborhood uniformly and deactivates it.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Option<Neighborhood> {
        if self.active.is_empty() {
            return None;
        }
        let picked = self.active.remove(rng.random_range(0..self.active.len()));
        self.inactive.push(picked);
        Some(picked)
    }

    /// Reactivates every inactive neighborhood except the most recent one.
    pub fn reset(&mut self) {
        let keep = self.inactive.pop();
        self.active.append(&mut self.inactive);
        self.inactive.extend(keep);
    }

    /// Reactivates every neighborhood.
    pub fn reset_all(&mut self) {
        self.active.append(&mut self.inactive);
    }
}

/// Randomized variable neighborhood descent over a neighborhood pool.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use swts_routing::constructive::nearest_neighbor;
/// use swts_routing::local_search::Neighborhood;
/// use swts_routing::models::{InstanceBuilder, Point, TruckProfile};
/// use swts_routing::scheduler::Rvnd;
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
/// let initial = nearest_neighbor(&instance).unwrap().into_route_set();
/// let mut rvnd = Rvnd::new(Neighborhood::ALL.to_vec());
/// let mut rng = rand::rngs::StdRng::seed_from_u64(5);
/// let improved = rvnd.search(&instance, &initial, &mut rng);
/// assert!(improved.collection_time() <= initial.collection_time() + 1e-9);
/// assert_eq!(rvnd.pool().active().len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Rvnd {
    pool: NeighborhoodPool,
}

impl Rvnd {
    /// Creates an RVND scheduler over the given neighborhoods.
    pub fn new(neighborhoods: Vec<Neighborhood>) -> Self {
        Self {
            pool: NeighborhoodPool::new(neighborhoods),
        }
    }

    /// The neighborhood pool.
    pub fn pool(&self) -> &NeighborhoodPool {
        &self.pool
    }

    /// Descends until no active neighborhood improves the best route set.
    pub fn search<R: Rng>(
        &mut self,
        instance: &ProblemInstance,
        routes: &RouteSet,
        rng: &mut R,
    ) -> RouteSet {
        let mut best = RouteSet::new(routes.collection_routes().to_vec());
        let mut draws = 0usize;

        while let Some(neighborhood) = self.pool.draw(rng) {
            draws += 1;
            let candidate = neighborhood.search(instance, &best);
            if candidate.collection_time() < best.collection_time() - IMPROVEMENT_EPSILON {
                trace!(
                    neighborhood = neighborhood.name(),
                    time = candidate.collection_time(),
                    "improved, reactivating"
                );
                best = candidate;
                self.pool.reset();
            }
        }
        self.pool.reset_all();

        debug!(draws, time = best.collection_time(), "rvnd finished");
        best
    }
}
