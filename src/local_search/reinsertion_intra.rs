//! Intra-route reinsertion: move one collection area elsewhere in its route.
//!
//! # Algorithm
//!
//! For every area, remove it and try every gap of the shortened route
//! except its original one and the gap before the final depot. The time
//! change is closed-form over the four touched edges, followed by
//! transfer-station compaction. The best feasible move of each pass is
//! committed until none improves.
//!
//! # Complexity
//!
//! O(n²) candidates per route per pass.

use super::moves::{area_positions, descend, BestMove, Move, MoveContext, RouteEdit};
use super::LocalSearch;
use crate::models::{CollectionRoute, ProblemInstance, RouteSet};

/// Relocates one area within the same route.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReinsertionIntra;

impl LocalSearch for ReinsertionIntra {
    fn name(&self) -> &'static str {
        "reinsertion-intra"
    }

    fn search(&self, instance: &ProblemInstance, routes: &RouteSet) -> RouteSet {
        descend(instance, routes, self.name(), best_move)
    }
}

fn best_move(ctx: &MoveContext<'_>, routes: &[CollectionRoute]) -> Option<Move> {
    let mut best = BestMove::default();

    for (r, route) in routes.iter().enumerate() {
        let stops = route.stops();
        for i in area_positions(ctx, stops) {
            let node = stops[i];
            let removal = ctx.removal_delta(stops, i);
            let mut reduced = stops.to_vec();
            reduced.remove(i);

            // Gap `j` sits before `reduced[j]`; the last gap would leave the
            // area dangling before the depot.
            for j in 1..reduced.len() - 1 {
                if j == i {
                    continue;
                }
                let insertion = ctx.insertion_delta(reduced[j - 1], node, reduced[j]);
                let mut candidate = reduced.clone();
                candidate.insert(j, node);
                let time = ctx.compact(&mut candidate, route.time() + removal + insertion);
                if !ctx.is_feasible(&candidate, time) {
                    continue;
                }
                let delta = time - route.time();
                if delta < best.threshold() {
                    best.offer(Move {
                        delta,
                        edits: vec![RouteEdit::Replace {
                            route: r,
                            stops: candidate,
                            time,
                        }],
                    });
                }
            }
        }
    }

    best.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::RouteEvaluator;
    use crate::models::{InstanceBuilder, Point, TruckProfile};

    // Depot (0,0), TS1 (10,0); A1 (2,0), A2 (6,0), A3 (4,0). Speed 60.
    fn line(capacity: i32) -> ProblemInstance {
        InstanceBuilder::new(
            TruckProfile::new(capacity, 100.0, 60.0),
            TruckProfile::new(100, 600.0, 60.0),
        )
        .add_transfer_station(Point::new(10, 0))
        .add_collection_area(Point::new(2, 0), 5, 1.0)
        .add_collection_area(Point::new(6, 0), 5, 1.0)
        .add_collection_area(Point::new(4, 0), 5, 1.0)
        .build()
        .expect("valid")
    }

    fn set(inst: &ProblemInstance, routes: Vec<Vec<usize>>) -> RouteSet {
        let eval = RouteEvaluator::new(inst);
        RouteSet::new(routes.into_iter().map(|s| eval.build_route(s)).collect())
    }

    #[test]
    fn test_fixes_out_of_order_area() {
        let inst = line(100);
        let input = set(&inst, vec![vec![0, 3, 4, 5, 2, 0]]);
        assert!((input.collection_time() - 27.0).abs() < 1e-9);

        let out = ReinsertionIntra.search(&inst, &input);
        let route = &out.collection_routes()[0];
        assert_eq!(route.stops(), &[0, 3, 5, 4, 2, 0]);
        assert!((route.time() - 23.0).abs() < 1e-9);
    }

    #[test]
    fn test_removes_emptied_station() {
        let inst = line(100);
        // Depot, A1, TS1, A2, TS1, Depot: the first unload is unnecessary.
        let input = set(&inst, vec![vec![0, 3, 2, 4, 2, 0]]);
        let out = ReinsertionIntra.search(&inst, &input);
        let route = &out.collection_routes()[0];
        assert_eq!(route.stops(), &[0, 3, 4, 2, 0]);
        assert_eq!(route.breakpoints(), &[3]);
        let eval = RouteEvaluator::new(&inst);
        assert!((route.time() - eval.route_time(route.stops())).abs() < 1e-9);
    }

    #[test]
    fn test_respects_sub_route_capacity() {
        // Capacity 5: every area needs its own unload.
        let inst = line(5);
        let input = set(&inst, vec![vec![0, 3, 2, 4, 2, 0]]);
        let out = ReinsertionIntra.search(&inst, &input);
        assert_eq!(out, input);
    }

    #[test]
    fn test_idempotent_on_local_optimum() {
        let inst = line(100);
        let input = set(&inst, vec![vec![0, 3, 4, 5, 2, 0]]);
        let once = ReinsertionIntra.search(&inst, &input);
        let twice = ReinsertionIntra.search(&inst, &once);
        assert_eq!(once, twice);
    }
}
