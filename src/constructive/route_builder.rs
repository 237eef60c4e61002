//! Greedy route construction with a look-ahead feasibility check.
//!
//! # Algorithm
//!
//! Each route starts at the depot with a full truck and a full work-duration
//! budget. The neighbor-selection policy proposes the next area; its
//! *secure time* (travel there, service, travel on to the area's nearest
//! transfer station, then to the depot) must fit the remaining budget.
//!
//! - Demand fits and secure time fits: visit the area.
//! - Only the secure time fits: unload at the station nearest to the truck
//!   and keep going on the same route.
//! - Otherwise: close the route at the nearest station and return to
//!   the depot.
//!
//! Every transfer-station visit records a [`TransportTask`].
//!
//! # Complexity
//!
//! O(n²) for nearest selection, O(n² log n) for randomized top-k.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument, trace};

use super::{Neighbor, NeighborSelection};
use crate::error::{Result, RoutingError};
use crate::models::{CollectionRoute, ProblemInstance, RouteSet, TransportTask};

/// Output of one construction pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Construction {
    /// Collection routes covering every area.
    pub routes: Vec<CollectionRoute>,
    /// Unload events, one per transfer-station visit, in construction order.
    pub tasks: Vec<TransportTask>,
}

impl Construction {
    /// Collection routes as a route set (no transport trucks yet).
    pub fn into_route_set(self) -> RouteSet {
        RouteSet::new(self.routes)
    }
}

/// Builds collection routes for an instance with a given selection policy.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use swts_routing::constructive::{NeighborSelection, RouteConstructor};
/// use swts_routing::models::{InstanceBuilder, Point, TruckProfile};
///
/// let instance = InstanceBuilder::new(
///     TruckProfile::new(20, 480.0, 60.0),
///     TruckProfile::new(300, 600.0, 60.0),
/// )
/// .add_transfer_station(Point::new(0, 10))
/// .add_collection_area(Point::new(1, 0), 10, 1.0)
/// .add_collection_area(Point::new(2, 0), 10, 1.0)
/// .add_collection_area(Point::new(3, 0), 10, 1.0)
/// .build()
/// .unwrap();
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let construction = RouteConstructor::new(&instance, NeighborSelection::Nearest)
///     .build(&mut rng)
///     .unwrap();
/// // Capacity 20 forces one unload mid-route.
/// assert_eq!(construction.routes.len(), 1);
/// assert_eq!(construction.tasks.len(), 2);
/// ```
pub struct RouteConstructor<'a> {
    instance: &'a ProblemInstance,
    selection: NeighborSelection,
}

impl<'a> RouteConstructor<'a> {
    /// Creates a constructor.
    pub fn new(instance: &'a ProblemInstance, selection: NeighborSelection) -> Self {
        Self {
            instance,
            selection,
        }
    }

    /// Runs one construction pass on a fresh area pool.
    #[instrument(skip_all, level = "debug", fields(selection = ?self.selection))]
    pub fn build<R: Rng>(&self, rng: &mut R) -> Result<Construction> {
        let instance = self.instance;
        let truck = instance.collection_truck();
        let depot = instance.depot();
        let mut pool = instance.area_pool();
        let mut routes = Vec::new();
        let mut tasks = Vec::new();

        while !pool.is_empty() {
            let mut stops = vec![depot];
            let mut capacity = truck.capacity();
            let mut budget = truck.work_duration();
            let mut clock = 0.0;
            let mut current = depot;
            let mut collected = 0usize;
            let mut blocked_on = None;

            while !pool.is_empty() {
                let candidate = self.selection.select(instance, current, &pool, rng)?;
                let secure = self.secure_time(&candidate)?;
                let demand = instance.demand(candidate.node);

                if demand <= capacity && secure <= budget {
                    let leg = truck.travel_time(candidate.distance)
                        + instance.service_time(candidate.node);
                    stops.push(candidate.node);
                    capacity -= demand;
                    clock += leg;
                    budget -= leg;
                    pool.remove(candidate.slot);
                    current = candidate.node;
                    collected += 1;
                } else if secure <= budget {
                    let (station, distance) = instance.nearest_station(current)?;
                    let leg = truck.travel_time(distance);
                    stops.push(station);
                    clock += leg;
                    budget -= leg;
                    tasks.push(TransportTask::new(truck.capacity() - capacity, station, clock));
                    trace!(station, load = truck.capacity() - capacity, "unload mid-route");
                    capacity = truck.capacity();
                    current = station;
                } else {
                    blocked_on = Some(candidate.node);
                    break;
                }
            }

            if collected == 0 {
                let area = blocked_on
                    .map(|id| instance.node(id).name().to_string())
                    .unwrap_or_default();
                return Err(RoutingError::UnreachableArea { area });
            }

            if !instance.is_station(current) {
                let (station, distance) = instance.nearest_station(current)?;
                stops.push(station);
                clock += truck.travel_time(distance);
                tasks.push(TransportTask::new(truck.capacity() - capacity, station, clock));
                current = station;
            }
            clock += instance.collection_time(current, depot);
            stops.push(depot);

            debug!(
                route = routes.len(),
                areas = collected,
                time = clock,
                remaining = pool.len(),
                "closed collection route"
            );
            routes.push(CollectionRoute::new(stops, clock, instance));
        }

        Ok(Construction { routes, tasks })
    }

    /// Look-ahead time to visit `candidate` and still unload at its nearest
    /// station and reach the depot.
    fn secure_time(&self, candidate: &Neighbor) -> Result<f64> {
        let instance = self.instance;
        let (station, to_station) = instance.nearest_station(candidate.node)?;
        let distance = candidate.distance + to_station + instance.distance(station, instance.depot());
        Ok(instance.collection_truck().travel_time(distance) + instance.service_time(candidate.node))
    }
}

/// Deterministic nearest-neighbor construction.
pub fn nearest_neighbor(instance: &ProblemInstance) -> Result<Construction> {
    // Nearest selection never draws from the generator.
    let mut rng = StdRng::seed_from_u64(0);
    RouteConstructor::new(instance, NeighborSelection::Nearest).build(&mut rng)
}
