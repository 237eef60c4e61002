//! Multi-start driver: GRASP construction plus sequential local search,
//! repeated, keeping the lowest total collection time.

use rand::Rng;
use tracing::{debug, info};

use super::{attach_transport, Grasp};
use crate::error::Result;
use crate::models::RouteSet;
use crate::scheduler::SequentialSearch;

/// Repeated GRASP + [`SequentialSearch`], with the transport echelon solved
/// once for the overall winner.
pub struct MultiStart<'a> {
    grasp: Grasp<'a>,
    search: SequentialSearch,
    restarts: usize,
}

impl<'a> MultiStart<'a> {
    /// Creates a multi-start driver. At least one restart always runs.
    pub fn new(grasp: Grasp<'a>, search: SequentialSearch, restarts: usize) -> Self {
        Self {
            grasp,
            search,
            restarts: restarts.max(1),
        }
    }

    /// Best local optimum over all restarts, collection routes only.
    pub fn collection_routes<R: Rng>(&self, rng: &mut R) -> Result<RouteSet> {
        let instance = self.grasp.instance();
        let mut best: Option<RouteSet> = None;

        for restart in 0..self.restarts {
            let constructed = self.grasp.best_construction(rng)?;
            let local = self.search.search(instance, &constructed);
            debug!(
                restart,
                constructed = constructed.collection_time(),
                improved = local.collection_time(),
                "restart finished"
            );
            if best
                .as_ref()
                .is_none_or(|b| local.is_better_time(b))
            {
                best = Some(local);
            }
        }
        Ok(best.unwrap_or_default())
    }

    /// Best local optimum with transport trucks attached.
    pub fn solve<R: Rng>(&self, rng: &mut R) -> Result<RouteSet> {
        let best = self.collection_routes(rng)?;
        let routes = attach_transport(self.grasp.instance(), best);
        info!(
            routes = routes.num_collection_routes(),
            trucks = routes.num_transport_trucks(),
            time = routes.collection_time(),
            "multi-start solution"
        );
        Ok(routes)
    }
}
