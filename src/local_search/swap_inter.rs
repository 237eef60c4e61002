//! Inter-route swap: exchange two areas between two distinct routes.
//!
//! Each route's change is an independent two-edge replacement plus the
//! difference in service time of the exchanged areas.

use super::moves::{area_positions, descend, BestMove, Move, MoveContext, RouteEdit};
use super::LocalSearch;
use crate::models::{CollectionRoute, ProblemInstance, RouteSet};

/// Swaps two areas between different routes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapInter;

impl LocalSearch for SwapInter {
    fn name(&self) -> &'static str {
        "swap-inter"
    }

    fn search(&self, instance: &ProblemInstance, routes: &RouteSet) -> RouteSet {
        if routes.num_collection_routes() < 2 {
            return RouteSet::new(routes.collection_routes().to_vec());
        }
        descend(instance, routes, self.name(), best_move)
    }
}

fn best_move(ctx: &MoveContext<'_>, routes: &[CollectionRoute]) -> Option<Move> {
    let mut best = BestMove::default();

    for (a, first) in routes.iter().enumerate() {
        let sa = first.stops();
        for (b, second) in routes.iter().enumerate().skip(a + 1) {
            let sb = second.stops();
            for i in area_positions(ctx, sa) {
                let x = sa[i];
                for j in area_positions(ctx, sb) {
                    let y = sb[j];
                    let service = ctx.service(y) - ctx.service(x);
                    let delta_a = ctx.replacement_delta(sa[i - 1], x, y, sa[i + 1]) + service;
                    let delta_b = ctx.replacement_delta(sb[j - 1], y, x, sb[j + 1]) - service;
                    let delta = delta_a + delta_b;
                    if delta >= best.threshold() {
                        continue;
                    }

                    let mut new_a = sa.to_vec();
                    new_a[i] = y;
                    let time_a = first.time() + delta_a;
                    if !ctx.is_feasible(&new_a, time_a) {
                        continue;
                    }
                    let mut new_b = sb.to_vec();
                    new_b[j] = x;
                    let time_b = second.time() + delta_b;
                    if !ctx.is_feasible(&new_b, time_b) {
                        continue;
                    }

                    best.offer(Move {
                        delta,
                        edits: vec![
                            RouteEdit::Replace {
                                route: a,
                                stops: new_a,
                                time: time_a,
                            },
                            RouteEdit::Replace {
                                route: b,
                                stops: new_b,
                                time: time_b,
                            },
                        ],
                    });
                }
            }
        }
    }

    best.into_inner()
}
