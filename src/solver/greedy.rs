//! Deterministic greedy driver.

use tracing::info;

use super::attach_transport;
use crate::constructive::nearest_neighbor;
use crate::error::Result;
use crate::models::{ProblemInstance, RouteSet};
use crate::transport::TransportPlanner;

/// One nearest-neighbor construction followed by transport assignment.
pub struct Greedy<'a> {
    instance: &'a ProblemInstance,
}

impl<'a> Greedy<'a> {
    /// Creates a greedy driver.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self { instance }
    }

    /// Collection routes of the nearest-neighbor construction.
    pub fn collection_routes(&self) -> Result<RouteSet> {
        Ok(nearest_neighbor(self.instance)?.into_route_set())
    }

    /// Collection routes plus transport trucks, using the unload events
    /// recorded during construction.
    pub fn solve(&self) -> Result<RouteSet> {
        let construction = nearest_neighbor(self.instance)?;
        let trucks = TransportPlanner::new(self.instance).assign(&construction.tasks);
        let routes = construction.into_route_set().with_transport(trucks);
        info!(
            routes = routes.num_collection_routes(),
            trucks = routes.num_transport_trucks(),
            time = routes.collection_time(),
            "greedy solution"
        );
        Ok(routes)
    }

    /// Attaches transport trucks to routes improved after construction.
    pub fn finish(&self, routes: RouteSet) -> RouteSet {
        attach_transport(self.instance, routes)
    }
}
