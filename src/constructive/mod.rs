//! Constructive heuristics for building initial collection routes.
//!
//! - [`nearest_neighbor`]: deterministic greedy construction, O(n²)
//! - [`RouteConstructor`] with [`NeighborSelection::RandomizedTopK`]:
//!   randomized top-k construction used by GRASP, O(n² log n)

mod route_builder;
mod strategy;

pub use route_builder::{nearest_neighbor, Construction, RouteConstructor};
pub use strategy::{Neighbor, NeighborSelection};
