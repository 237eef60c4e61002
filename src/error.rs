//! Error types for instance validation and fatal construction failures.
//!
//! Only contract violations surface as errors. A candidate move or route
//! extension that breaks capacity or time is ordinary control flow and is
//! represented by an empty result instead.

use thiserror::Error;

/// Fatal errors raised by the routing core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// A neighbor query was made against an empty candidate list.
    #[error("no collection areas left to select from")]
    NoCandidates,
    /// The instance declares no transfer station to unload at.
    #[error("instance has no transfer stations")]
    NoTransferStations,
    /// A truck profile with a non-positive capacity, speed or duration.
    #[error("invalid {truck} truck profile: {reason}")]
    InvalidTruck {
        /// Which echelon the profile belongs to.
        truck: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// An area whose demand can never fit an empty collection truck.
    #[error("collection area {area} demands {demand}, truck capacity is {capacity}")]
    DemandExceedsCapacity {
        /// Area name.
        area: String,
        /// Area demand.
        demand: i32,
        /// Collection truck capacity.
        capacity: i32,
    },
    /// A fresh route starting at the depot could not collect any area
    /// within the work-duration limit.
    #[error("collection area {area} cannot be reached and unloaded within the work duration")]
    UnreachableArea {
        /// Name of the area the construction got stuck on.
        area: String,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RoutingError>;
