//! Intra-route swap: exchange the positions of two areas of one route.
//!
//! Adjacent positions share an edge, so their time change is computed over
//! the three edges around the pair; otherwise each position contributes its
//! own two-edge replacement. Station positions never change, but areas can
//! cross into another sub-route, so capacity is re-validated.

use super::moves::{area_positions, descend, BestMove, Move, MoveContext, RouteEdit};
use super::LocalSearch;
use crate::models::{CollectionRoute, NodeId, ProblemInstance, RouteSet};

/// Swaps two areas within the same route.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapIntra;

impl LocalSearch for SwapIntra {
    fn name(&self) -> &'static str {
        "swap-intra"
    }

    fn search(&self, instance: &ProblemInstance, routes: &RouteSet) -> RouteSet {
        descend(instance, routes, self.name(), best_move)
    }
}

/// Time change of swapping the areas at `i < j`.
fn swap_delta(ctx: &MoveContext<'_>, stops: &[NodeId], i: usize, j: usize) -> f64 {
    let (x, y) = (stops[i], stops[j]);
    if j == i + 1 {
        let (prev, next) = (stops[i - 1], stops[j + 1]);
        ctx.t(prev, y) + ctx.t(x, next) - ctx.t(prev, x) - ctx.t(y, next)
    } else {
        ctx.replacement_delta(stops[i - 1], x, y, stops[i + 1])
            + ctx.replacement_delta(stops[j - 1], y, x, stops[j + 1])
    }
}

fn best_move(ctx: &MoveContext<'_>, routes: &[CollectionRoute]) -> Option<Move> {
    let mut best = BestMove::default();

    for (r, route) in routes.iter().enumerate() {
        let stops = route.stops();
        let positions: Vec<usize> = area_positions(ctx, stops).collect();
        for (k, &i) in positions.iter().enumerate() {
            for &j in &positions[k + 1..] {
                let delta = swap_delta(ctx, stops, i, j);
                if delta >= best.threshold() {
                    continue;
                }
                let mut candidate = stops.to_vec();
                candidate.swap(i, j);
                let time = route.time() + delta;
                if !ctx.is_feasible(&candidate, time) {
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
