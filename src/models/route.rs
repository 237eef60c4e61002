//! Collection routes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{NodeId, ProblemInstance};

/// An ordered sequence of stops driven by one collection truck.
///
/// Stops start and end at the depot; the stop before the final depot is
/// always a transfer station. `breakpoints` are the positions of the
/// transfer-station visits that close each sub-route, and `time` is the
/// cached total route time (travel plus service) in minutes.
///
/// # Examples
///
/// ```
/// use swts_routing::models::{CollectionRoute, InstanceBuilder, Point, TruckProfile};
///
/// let instance = InstanceBuilder::new(
///     TruckProfile::new(100, 480.0, 60.0),
///     TruckProfile::new(300, 600.0, 60.0),
/// )
/// .add_transfer_station(Point::new(10, 0))
/// .add_collection_area(Point::new(5, 0), 20, 3.0)
/// .build()
/// .unwrap();
///
/// let (depot, ts, area) = (instance.depot(), 2, 3);
/// let route = CollectionRoute::new(vec![depot, area, ts, depot], 23.0, &instance);
/// assert_eq!(route.breakpoints(), &[2]);
/// assert_eq!(route.areas().collect::<Vec<_>>(), vec![area]);
/// assert_eq!(route.display(&instance).to_string(), "Depot -> Area1 -> TS1 -> Depot");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionRoute {
    stops: Vec<NodeId>,
    breakpoints: Vec<usize>,
    time: f64,
}

impl CollectionRoute {
    /// Creates a route, deriving breakpoints from the node kinds.
    pub fn new(stops: Vec<NodeId>, time: f64, instance: &ProblemInstance) -> Self {
        let breakpoints = stops
            .iter()
            .enumerate()
            .filter(|&(_, &id)| instance.is_station(id))
            .map(|(pos, _)| pos)
            .collect();
        Self {
            stops,
            breakpoints,
            time,
        }
    }

    /// All stops, depot to depot.
    pub fn stops(&self) -> &[NodeId] {
        &self.stops
    }

    /// Positions of transfer-station visits.
    pub fn breakpoints(&self) -> &[usize] {
        &self.breakpoints
    }

    /// Total route time in minutes.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of stops including both depot visits.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the route has no stops at all.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Collection areas visited, in order.
    pub fn areas(&self) -> impl Iterator<Item = NodeId> + '_ {
        let last = self.stops.len().saturating_sub(1);
        self.stops
            .iter()
            .enumerate()
            .filter(move |&(pos, _)| pos != 0 && pos != last && !self.breakpoints.contains(&pos))
            .map(|(_, &id)| id)
    }

    /// Number of collection areas visited.
    pub fn num_areas(&self) -> usize {
        self.stops.len().saturating_sub(2 + self.breakpoints.len())
    }

    /// Adapter that renders stop names with `Display`.
    pub fn display<'a>(&'a self, instance: &'a ProblemInstance) -> RouteDisplay<'a> {
        RouteDisplay {
            route: self,
            instance,
        }
    }
}

/// Renders a route as `Depot -> Area3 -> TS1 -> Depot`.
pub struct RouteDisplay<'a> {
    route: &'a CollectionRoute,
    instance: &'a ProblemInstance,
}

impl fmt::Display for RouteDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &id) in self.route.stops.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(self.instance.node(id).name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InstanceBuilder, Point, TruckProfile};

    fn instance() -> ProblemInstance {
        InstanceBuilder::new(
            TruckProfile::new(100, 480.0, 60.0),
            TruckProfile::new(300, 600.0, 60.0),
        )
        .add_transfer_station(Point::new(10, 0))
        .add_collection_area(Point::new(1, 0), 1, 0.0)
        .add_collection_area(Point::new(2, 0), 1, 0.0)
        .add_collection_area(Point::new(3, 0), 1, 0.0)
        .build()
        .expect("valid")
    }

    #[test]
    fn test_breakpoints_and_areas() {
        let inst = instance();
        // Depot, A1, A2, TS1, A3, TS1, Depot
        let route = CollectionRoute::new(vec![0, 3, 4, 2, 5, 2, 0], 10.0, &inst);
        assert_eq!(route.breakpoints(), &[3, 5]);
        assert_eq!(route.areas().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(route.num_areas(), 3);
        assert_eq!(route.len(), 7);
        assert_eq!(route.time(), 10.0);
    }

    #[test]
    fn test_display() {
        let inst = instance();
        let route = CollectionRoute::new(vec![0, 5, 2, 0], 1.0, &inst);
        assert_eq!(
            route.display(&inst).to_string(),
            "Depot -> Area3 -> TS1 -> Depot"
        );
    }

    #[test]
    fn test_empty_route() {
        let inst = instance();
        let route = CollectionRoute::new(vec![0, 0], 0.0, &inst);
        assert_eq!(route.num_areas(), 0);
        assert_eq!(route.areas().count(), 0);
    }
}
