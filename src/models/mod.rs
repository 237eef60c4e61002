//! Domain model types for two-echelon waste collection routing.
//!
//! Provides located nodes, truck profiles, the immutable problem instance
//! with its per-attempt area pool, collection routes, transport tasks and
//! trucks, and the route set that ties them together.

mod instance;
mod node;
mod route;
mod solution;
mod transport;
mod truck;

pub use instance::{AreaData, AreaPool, InstanceBuilder, InstanceData, ProblemInstance};
pub use node::{Node, NodeId, NodeKind, Point};
pub use route::{CollectionRoute, RouteDisplay};
pub use solution::{RouteSet, Violation, ViolationType};
pub use transport::{TransportTask, TransportTruck};
pub use truck::TruckProfile;
