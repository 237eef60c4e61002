//! Neighbor-selection policies for route construction.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};
use crate::models::{AreaPool, NodeId, ProblemInstance};

/// A selected candidate area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// The chosen area.
    pub node: NodeId,
    /// Distance from the truck's position.
    pub distance: f64,
    /// Pool slot to remove once the area is committed.
    pub slot: usize,
}

/// How the next collection area is picked from the remaining pool.
///
/// # Examples
///
/// ```
/// use swts_routing::constructive::NeighborSelection;
///
/// let greedy = NeighborSelection::Nearest;
/// let grasp = NeighborSelection::RandomizedTopK { window: 3 };
/// assert!(!greedy.is_randomized());
/// assert!(grasp.is_randomized());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborSelection {
    /// Closest candidate; ties go to the candidate listed first.
    #[default]
    Nearest,
    /// Uniform pick among the `window` closest candidates.
    RandomizedTopK {
        /// Size of the restricted candidate list, clamped to the pool size.
        window: usize,
    },
}

impl NeighborSelection {
    /// Returns `true` if selection consumes randomness.
    pub fn is_randomized(&self) -> bool {
        matches!(self, Self::RandomizedTopK { window } if *window > 1)
    }

    /// Picks the next area to visit from `from`.
    ///
    /// An empty pool is a contract violation and yields
    /// [`RoutingError::NoCandidates`].
    pub fn select<R: Rng>(
        &self,
        instance: &ProblemInstance,
        from: NodeId,
        pool: &AreaPool<'_>,
        rng: &mut R,
    ) -> Result<Neighbor> {
        match *self {
            Self::Nearest => nearest(instance, from, pool),
            Self::RandomizedTopK { window } => randomized(instance, from, pool, window, rng),
        }
    }
}

fn nearest(instance: &ProblemInstance, from: NodeId, pool: &AreaPool<'_>) -> Result<Neighbor> {
    let mut best: Option<Neighbor> = None;
    for (slot, node) in pool.candidates() {
        let distance = instance.distance(from, node);
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(Neighbor {
                node,
                distance,
                slot,
            });
        }
    }
    best.ok_or(RoutingError::NoCandidates)
}

fn randomized<R: Rng>(
    instance: &ProblemInstance,
    from: NodeId,
    pool: &AreaPool<'_>,
    window: usize,
    rng: &mut R,
) -> Result<Neighbor> {
    let mut ranked: Vec<Neighbor> = pool
        .candidates()
        .map(|(slot, node)| Neighbor {
            node,
            distance: instance.distance(from, node),
            slot,
        })
        .collect();
    if ranked.is_empty() {
        return Err(RoutingError::NoCandidates);
    }
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    let k = window.clamp(1, ranked.len());
    Ok(ranked[rng.random_range(0..k)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InstanceBuilder, Point, TruckProfile};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Areas at distance 1, 2, 3, 4 from the depot, listed out of order.
    fn instance() -> ProblemInstance {
        InstanceBuilder::new(
            TruckProfile::new(100, 480.0, 60.0),
            TruckProfile::new(300, 600.0, 60.0),
        )
        .add_transfer_station(Point::new(50, 50))
        .add_collection_area(Point::new(3, 0), 1, 0.0)
        .add_collection_area(Point::new(1, 0), 1, 0.0)
        .add_collection_area(Point::new(4, 0), 1, 0.0)
        .add_collection_area(Point::new(0, 2), 1, 0.0)
        .build()
        .expect("valid")
    }

    #[test]
    fn test_nearest_picks_closest() {
        let inst = instance();
        let pool = inst.area_pool();
        let mut rng = StdRng::seed_from_u64(1);
        let n = NeighborSelection::Nearest
            .select(&inst, inst.depot(), &pool, &mut rng)
            .expect("non-empty");
        assert_eq!(n.node, 4);
        assert_eq!(n.slot, 1);
        assert!((n.distance - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_nearest_tie_prefers_list_order() {
        let inst = InstanceBuilder::new(
            TruckProfile::new(100, 480.0, 60.0),
            TruckProfile::new(300, 600.0, 60.0),
        )
        .add_transfer_station(Point::new(50, 50))
        .add_collection_area(Point::new(0, 5), 1, 0.0)
        .add_collection_area(Point::new(5, 0), 1, 0.0)
        .build()
        .expect("valid");
        let pool = inst.area_pool();
        let mut rng = StdRng::seed_from_u64(1);
        let n = NeighborSelection::Nearest
            .select(&inst, inst.depot(), &pool, &mut rng)
            .expect("non-empty");
        assert_eq!(n.slot, 0);
    }

    #[test]
    fn test_randomized_stays_in_window() {
        let inst = instance();
        let pool = inst.area_pool();
        let mut rng = StdRng::seed_from_u64(7);
        let selection = NeighborSelection::RandomizedTopK { window: 2 };
        for _ in 0..50 {
            let n = selection
                .select(&inst, inst.depot(), &pool, &mut rng)
                .expect("non-empty");
            // The two closest: distance 1 (slot 1) and distance 2 (slot 3).
            assert!(n.slot == 1 || n.slot == 3, "picked slot {}", n.slot);
        }
    }

    #[test]
    fn test_randomized_window_clamped() {
        let inst = instance();
        let mut pool = inst.area_pool();
        pool.remove(0);
        pool.remove(1);
        pool.remove(2);
        let mut rng = StdRng::seed_from_u64(3);
        let n = NeighborSelection::RandomizedTopK { window: 10 }
            .select(&inst, inst.depot(), &pool, &mut rng)
            .expect("non-empty");
        assert_eq!(n.slot, 3);
    }

    #[test]
    fn test_window_one_is_nearest() {
        let inst = instance();
        let pool = inst.area_pool();
        let mut rng = StdRng::seed_from_u64(11);
        let n = NeighborSelection::RandomizedTopK { window: 1 }
            .select(&inst, inst.depot(), &pool, &mut rng)
            .expect("non-empty");
        assert_eq!(n.node, 4);
        assert!(!NeighborSelection::RandomizedTopK { window: 1 }.is_randomized());
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let inst = instance();
        let mut pool = inst.area_pool();
        for slot in 0..4 {
            pool.remove(slot);
        }
        let mut rng = StdRng::seed_from_u64(1);
        for selection in [
            NeighborSelection::Nearest,
            NeighborSelection::RandomizedTopK { window: 2 },
        ] {
            let err = selection
                .select(&inst, inst.depot(), &pool, &mut rng)
                .unwrap_err();
            assert_eq!(err, RoutingError::NoCandidates);
        }
    }
}
