//! Intra-route 2-opt: reverse a contiguous segment of a route.
//!
//! # Algorithm
//!
//! For every pair of bounds `l < u`, the segment `stops[l+1..=u]` is
//! reversed. Distances are symmetric, so only the two boundary edges change.
//! Segments may contain transfer stations; a reversal that leaves an area
//! right before the final depot is rejected, and reversed segments are
//! re-validated for capacity and compacted.
//!
//! # Complexity
//!
//! O(n²) candidates per route per pass.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A Method for Solving Traveling-Salesman Problems",
//! *Operations Research* 6(6), 791-812.

use super::moves::{descend, BestMove, Move, MoveContext, RouteEdit};
use super::LocalSearch;
use crate::models::{CollectionRoute, NodeId, ProblemInstance, RouteSet};

/// Reverses route segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOpt;

impl LocalSearch for TwoOpt {
    fn name(&self) -> &'static str {
        "2-opt"
    }

    fn search(&self, instance: &ProblemInstance, routes: &RouteSet) -> RouteSet {
        descend(instance, routes, self.name(), best_move)
    }
}

/// Time change of reversing `stops[l+1..=u]`.
fn reversal_delta(ctx: &MoveContext<'_>, stops: &[NodeId], l: usize, u: usize) -> f64 {
    let (a, b, c, d) = (stops[l], stops[l + 1], stops[u], stops[u + 1]);
    ctx.t(a, c) + ctx.t(b, d) - ctx.t(a, b) - ctx.t(c, d)
}

fn best_move(ctx: &MoveContext<'_>, routes: &[CollectionRoute]) -> Option<Move> {
    let mut best = BestMove::default();

    for (r, route) in routes.iter().enumerate() {
        let stops = route.stops();
        let len = stops.len();
        if len < 4 {
            continue;
        }
        for l in 0..len - 3 {
            for u in l + 2..len - 1 {
                let mut candidate = stops.to_vec();
                candidate[l + 1..=u].reverse();
                if ctx.is_area(candidate[len - 2]) {
                    continue;
                }
                let raw = route.time() + reversal_delta(ctx, stops, l, u);
                let time = ctx.compact(&mut candidate, raw);
                let delta = time - route.time();
                if delta >= best.threshold() || !ctx.is_feasible(&candidate, time) {
                    continue;
                }
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

    best.into_inner()
}
