//! Neighborhood schedulers that chain local search operators.
//!
//! - [`SequentialSearch`]: each neighborhood once, in a fixed order
//! - [`Rvnd`]: randomized variable neighborhood descent with reactivation

mod rvnd;
mod sequential;

pub use rvnd::{NeighborhoodPool, Rvnd};
pub use sequential::SequentialSearch;
