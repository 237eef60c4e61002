//! Building blocks shared by the neighborhood operators: move bookkeeping,
//! transfer-station compaction and feasibility of rebuilt routes.

use tracing::{debug, trace};

use crate::evaluation::RouteEvaluator;
use crate::models::{CollectionRoute, NodeId, ProblemInstance, RouteSet};

/// Minimum decrease in total collection time for a move to count as an
/// improvement.
pub(crate) const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Change to one route of the current set.
#[derive(Debug, Clone)]
pub(crate) enum RouteEdit {
    /// Replace the route at `route` by the given stops and cached time.
    Replace {
        route: usize,
        stops: Vec<NodeId>,
        time: f64,
    },
    /// Drop the route at `route`; it no longer serves any area.
    Drop { route: usize },
}

/// A fully built candidate move.
#[derive(Debug, Clone)]
pub(crate) struct Move {
    /// Change in total collection time.
    pub delta: f64,
    pub edits: Vec<RouteEdit>,
}

/// Best-improvement bookkeeping for one scan over a neighborhood.
///
/// Only strictly improving moves are kept; on equal deltas the move offered
/// first wins.
#[derive(Debug, Default)]
pub(crate) struct BestMove {
    best: Option<Move>,
}

impl BestMove {
    /// Delta a new move has to beat.
    pub fn threshold(&self) -> f64 {
        self.best.as_ref().map_or(-IMPROVEMENT_EPSILON, |m| m.delta)
    }

    pub fn offer(&mut self, candidate: Move) {
        if candidate.delta < self.threshold() {
            self.best = Some(candidate);
        }
    }

    pub fn into_inner(self) -> Option<Move> {
        self.best
    }
}

/// Instance-bound helpers used while scanning a neighborhood.
pub(crate) struct MoveContext<'a> {
    instance: &'a ProblemInstance,
    evaluator: RouteEvaluator<'a>,
}

impl<'a> MoveContext<'a> {
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self {
            instance,
            evaluator: RouteEvaluator::new(instance),
        }
    }

    /// Collection travel time between two nodes.
    #[inline]
    pub fn t(&self, from: NodeId, to: NodeId) -> f64 {
        self.instance.collection_time(from, to)
    }

    #[inline]
    pub fn is_area(&self, id: NodeId) -> bool {
        self.instance.is_area(id)
    }

    #[inline]
    pub fn service(&self, id: NodeId) -> f64 {
        self.instance.service_time(id)
    }

    /// Time change of removing the stop at `pos`, joining its neighbors.
    pub fn removal_delta(&self, stops: &[NodeId], pos: usize) -> f64 {
        let (prev, node, next) = (stops[pos - 1], stops[pos], stops[pos + 1]);
        self.t(prev, next) - self.t(prev, node) - self.t(node, next)
    }

    /// Time change of inserting `node` between `prev` and `next`.
    pub fn insertion_delta(&self, prev: NodeId, node: NodeId, next: NodeId) -> f64 {
        self.t(prev, node) + self.t(node, next) - self.t(prev, next)
    }

    /// Time change of putting `node` where `old` stands, between `prev`
    /// and `next`.
    pub fn replacement_delta(&self, prev: NodeId, old: NodeId, node: NodeId, next: NodeId) -> f64 {
        self.t(prev, node) + self.t(node, next) - self.t(prev, old) - self.t(old, next)
    }

    /// Removes transfer-station visits that no longer close a sub-route,
    /// folding their two edges into one. Returns the adjusted time.
    ///
    /// A station is redundant when the stop before it is not a collection
    /// area: the sub-route it would close is empty.
    pub fn compact(&self, stops: &mut Vec<NodeId>, mut time: f64) -> f64 {
        let mut k = 1;
        while k + 1 < stops.len() {
            if self.instance.is_station(stops[k]) && !self.is_area(stops[k - 1]) {
                time += self.removal_delta(stops, k);
                trace!(station = stops[k], position = k, "dropped empty unload");
                stops.remove(k);
            } else {
                k += 1;
            }
        }
        time
    }

    /// Capacity of every sub-route, duration limit and the closing
    /// transfer-station visit.
    pub fn is_feasible(&self, stops: &[NodeId], time: f64) -> bool {
        let len = stops.len();
        len >= 3
            && self.instance.is_station(stops[len - 2])
            && time <= self.instance.collection_truck().work_duration()
            && self.evaluator.is_capacity_feasible(stops)
    }
}

/// Runs `scan` to a local optimum, committing the best improving move of
/// every pass.
pub(crate) fn descend<F>(instance: &ProblemInstance, routes: &RouteSet, name: &str, mut scan: F) -> RouteSet
where
    F: FnMut(&MoveContext<'_>, &[CollectionRoute]) -> Option<Move>,
{
    let ctx = MoveContext::new(instance);
    let mut current: Vec<CollectionRoute> = routes.collection_routes().to_vec();
    let mut passes = 0usize;

    while let Some(mv) = scan(&ctx, &current) {
        passes += 1;
        trace!(operator = name, delta = mv.delta, "committing move");
        apply(instance, &mut current, mv.edits);
    }

    if passes > 0 {
        debug!(
            operator = name,
            passes,
            routes = current.len(),
            "reached local optimum"
        );
    }
    RouteSet::new(current)
}

fn apply(instance: &ProblemInstance, routes: &mut Vec<CollectionRoute>, edits: Vec<RouteEdit>) {
    let mut dropped = Vec::new();
    for edit in edits {
        match edit {
            RouteEdit::Replace { route, stops, time } => {
                routes[route] = CollectionRoute::new(stops, time, instance);
            }
            RouteEdit::Drop { route } => dropped.push(route),
        }
    }
    dropped.sort_unstable_by(|a, b| b.cmp(a));
    for route in dropped {
        routes.remove(route);
    }
}

/// Positions of the collection areas of a stop sequence.
pub(crate) fn area_positions<'s>(
    ctx: &'s MoveContext<'_>,
    stops: &'s [NodeId],
) -> impl Iterator<Item = usize> + 's {
    (1..stops.len().saturating_sub(1)).filter(move |&pos| ctx.is_area(stops[pos]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InstanceBuilder, Point, TruckProfile};

    // Speed 60: one distance unit per minute. TS1 at (10, 0).
    fn line() -> ProblemInstance {
        InstanceBuilder::new(
            TruckProfile::new(10, 100.0, 60.0),
            TruckProfile::new(100, 600.0, 60.0),
        )
        .add_transfer_station(Point::new(10, 0))
        .add_collection_area(Point::new(2, 0), 5, 1.0)
        .add_collection_area(Point::new(6, 0), 5, 1.0)
        .add_collection_area(Point::new(4, 0), 5, 1.0)
        .build()
        .expect("valid")
    }

    #[test]
    fn test_compact_drops_doubled_station() {
        let inst = line();
        let ctx = MoveContext::new(&inst);
        let eval = RouteEvaluator::new(&inst);
        let mut stops = vec![0, 3, 4, 2, 2, 0];
        let time = ctx.compact(&mut stops, eval.route_time(&[0, 3, 4, 2, 2, 0]));
        assert_eq!(stops, vec![0, 3, 4, 2, 0]);
        assert!((time - eval.route_time(&stops)).abs() < 1e-9);
    }

    #[test]
    fn test_compact_drops_leading_station() {
        let inst = line();
        let ctx = MoveContext::new(&inst);
        let eval = RouteEvaluator::new(&inst);
        let mut stops = vec![0, 2, 3, 2, 0];
        let time = ctx.compact(&mut stops, eval.route_time(&[0, 2, 3, 2, 0]));
        assert_eq!(stops, vec![0, 3, 2, 0]);
        assert!((time - eval.route_time(&stops)).abs() < 1e-9);
    }

    #[test]
    fn test_compact_empties_arealess_route() {
        let inst = line();
        let ctx = MoveContext::new(&inst);
        let mut stops = vec![0, 2, 0];
        ctx.compact(&mut stops, 20.0);
        assert_eq!(stops, vec![0, 0]);
    }

    #[test]
    fn test_feasibility() {
        let inst = line();
        let ctx = MoveContext::new(&inst);
        assert!(ctx.is_feasible(&[0, 3, 4, 2, 0], 22.0));
        // Sub-route load 15 over capacity 10.
        assert!(!ctx.is_feasible(&[0, 3, 4, 5, 2, 0], 22.0));
        // Dangling area before the depot.
        assert!(!ctx.is_feasible(&[0, 3, 2, 4, 0], 22.0));
        assert!(!ctx.is_feasible(&[0, 3, 2, 0], 100.5));
    }

    #[test]
    fn test_best_move_keeps_first_of_equals() {
        let mut best = BestMove::default();
        best.offer(Move {
            delta: 0.0,
            edits: vec![],
        });
        assert!(best.threshold() < 0.0);
        best.offer(Move {
            delta: -2.0,
            edits: vec![RouteEdit::Drop { route: 0 }],
        });
        best.offer(Move {
            delta: -2.0,
            edits: vec![RouteEdit::Drop { route: 1 }],
        });
        let mv = best.into_inner().expect("improving move");
        assert!(matches!(mv.edits[0], RouteEdit::Drop { route: 0 }));
    }
}
