//! Fixed-order application of neighborhoods.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::local_search::{LocalSearch, Neighborhood};
use crate::models::{ProblemInstance, RouteSet};

/// Applies each neighborhood exactly once, feeding every local optimum into
/// the next neighborhood.
///
/// # Examples
///
/// ```
/// use swts_routing::constructive::nearest_neighbor;
/// use swts_routing::models::{InstanceBuilder, Point, TruckProfile};
/// use swts_routing::scheduler::SequentialSearch;
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
/// let improved = SequentialSearch::default().search(&instance, &initial);
/// assert!(improved.collection_time() <= initial.collection_time() + 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequentialSearch {
    neighborhoods: Vec<Neighborhood>,
}

impl SequentialSearch {
    /// Creates a sequential search over the given order.
    pub fn new(neighborhoods: Vec<Neighborhood>) -> Self {
        Self { neighborhoods }
    }

    /// Neighborhoods in application order.
    pub fn neighborhoods(&self) -> &[Neighborhood] {
        &self.neighborhoods
    }

    /// Runs every neighborhood once, in order.
    pub fn search(&self, instance: &ProblemInstance, routes: &RouteSet) -> RouteSet {
        let mut current = RouteSet::new(routes.collection_routes().to_vec());
        for neighborhood in &self.neighborhoods {
            let before = current.collection_time();
            current = neighborhood.search(instance, &current);
            debug!(
                neighborhood = neighborhood.name(),
                before,
                after = current.collection_time(),
                "sequential step"
            );
        }
        current
    }
}

impl Default for SequentialSearch {
    /// All five neighborhoods in [`Neighborhood::ALL`] order.
    fn default() -> Self {
        Self::new(Neighborhood::ALL.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::RouteEvaluator;
    use crate::models::{InstanceBuilder, Point, TruckProfile};

    fn instance() -> ProblemInstance {
        InstanceBuilder::new(
            TruckProfile::new(100, 200.0, 60.0),
            TruckProfile::new(100, 600.0, 60.0),
        )
        .add_transfer_station(Point::new(0, 1))
        .add_collection_area(Point::new(0, 10), 1, 1.0)
        .add_collection_area(Point::new(10, 10), 1, 1.0)
        .add_collection_area(Point::new(10, 0), 1, 1.0)
        .build()
        .expect("valid")
    }

    #[test]
    fn test_empty_list_is_identity() {
        let inst = instance();
        let eval = RouteEvaluator::new(&inst);
        let input = RouteSet::new(vec![eval.build_route(vec![0, 3, 5, 4, 2, 0])]);
        assert_eq!(SequentialSearch::new(vec![]).search(&inst, &input), input);
    }

    #[test]
    fn test_chains_neighborhoods() {
        let inst = instance();
        let eval = RouteEvaluator::new(&inst);
        let input = RouteSet::new(vec![
            eval.build_route(vec![0, 3, 2, 0]),
            eval.build_route(vec![0, 5, 4, 2, 0]),
        ]);
        let search = SequentialSearch::new(vec![Neighborhood::ReinsertionInter, Neighborhood::TwoOpt]);
        let out = search.search(&inst, &input);
        assert!(out.collection_time() < input.collection_time());
        assert!(eval.evaluate(&out).is_empty());
        // The last neighborhood left its own local optimum.
        assert_eq!(Neighborhood::TwoOpt.search(&inst, &out), out);
    }

    #[test]
    fn test_default_order() {
        assert_eq!(SequentialSearch::default().neighborhoods(), &Neighborhood::ALL);
    }
}
