//! Inter-route reinsertion: move one collection area into another route.
//!
//! # Algorithm
//!
//! For every ordered pair of distinct routes (A, B), every area of A and
//! every gap of B before its closing station: remove the area from A
//! (compacting any station left with an empty sub-route) and insert it into
//! B. Service time moves with the area. A donor route left without areas
//! is dropped from the set.
//!
//! # Complexity
//!
//! O(n² × R²) candidates per pass.

use super::moves::{area_positions, descend, BestMove, Move, MoveContext, RouteEdit};
use super::LocalSearch;
use crate::models::{CollectionRoute, ProblemInstance, RouteSet};

/// Relocates one area from one route to another.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReinsertionInter;

impl LocalSearch for ReinsertionInter {
    fn name(&self) -> &'static str {
        "reinsertion-inter"
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

    for (a, donor) in routes.iter().enumerate() {
        let from = donor.stops();
        for i in area_positions(ctx, from) {
            let node = from[i];
            let service = ctx.service(node);

            let mut shortened = from.to_vec();
            shortened.remove(i);
            let shortened_time =
                ctx.compact(&mut shortened, donor.time() + ctx.removal_delta(from, i) - service);
            let donor_edit = if shortened.iter().any(|&id| ctx.is_area(id)) {
                if !ctx.is_feasible(&shortened, shortened_time) {
                    continue;
                }
                Some((shortened, shortened_time))
            } else {
                None
            };
            let donor_delta = donor_edit
                .as_ref()
                .map_or(-donor.time(), |(_, time)| time - donor.time());

            for (b, receiver) in routes.iter().enumerate() {
                if a == b {
                    continue;
                }
                let to = receiver.stops();
                for j in 1..to.len().saturating_sub(1) {
                    let time = receiver.time() + ctx.insertion_delta(to[j - 1], node, to[j]) + service;
                    let delta = donor_delta + time - receiver.time();
                    if delta >= best.threshold() {
                        continue;
                    }
                    let mut grown = to.to_vec();
                    grown.insert(j, node);
                    if !ctx.is_feasible(&grown, time) {
                        continue;
                    }

                    let donor_change = match &donor_edit {
                        Some((stops, time)) => RouteEdit::Replace {
                            route: a,
                            stops: stops.clone(),
                            time: *time,
                        },
                        None => RouteEdit::Drop { route: a },
                    };
                    best.offer(Move {
                        delta,
                        edits: vec![
                            RouteEdit::Replace {
                                route: b,
                                stops: grown,
                                time,
                            },
                            donor_change,
                        ],
                    });
                }
            }
        }
    }

    best.into_inner()
}
