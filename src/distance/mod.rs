//! Distances between located entities.
//!
//! Provides a dense Euclidean distance matrix over the instance's nodes.

mod matrix;

pub use matrix::DistanceMatrix;
