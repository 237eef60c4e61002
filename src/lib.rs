//! # swts-routing
//!
//! Two-echelon waste collection routing (VRPT-SWTS): collection trucks visit
//! collection areas and unload at transfer stations, transport trucks ferry
//! the unloaded waste to a dumpsite.
//!
//! ## Modules
//!
//! - [`models`]: Domain model types (nodes, truck profiles, instance, routes, route sets)
//! - [`distance`]: Euclidean distance matrix
//! - [`evaluation`]: Route times, sub-route loads, transport tasks and constraint checks
//! - [`constructive`]: Greedy and randomized top-k route construction
//! - [`local_search`]: Reinsertion, swap and 2-opt neighborhoods
//! - [`scheduler`]: Sequential search and RVND over neighborhoods
//! - [`transport`]: Greedy assignment of unload events to transport trucks
//! - [`solver`]: Greedy, GRASP and multi-start drivers
//! - [`error`]: Error type for invalid instances and fatal construction failures
//!
//! ## Example
//!
//! ```
//! use swts_routing::models::{InstanceBuilder, Point, TruckProfile};
//! use swts_routing::solver::{Solver, SolverConfig};
//!
//! let instance = InstanceBuilder::new(
//!     TruckProfile::new(200, 480.0, 40.0),
//!     TruckProfile::new(600, 600.0, 50.0),
//! )
//! .with_depot(Point::new(0, 0))
//! .with_dumpsite(Point::new(40, 40))
//! .add_transfer_station(Point::new(10, 10))
//! .add_collection_area(Point::new(3, 4), 60, 10.0)
//! .add_collection_area(Point::new(-5, 2), 80, 15.0)
//! .add_collection_area(Point::new(8, -6), 90, 12.0)
//! .build()
//! .unwrap();
//!
//! let outcome = Solver::new(SolverConfig::default().with_seed(1))
//!     .solve(&instance)
//!     .unwrap();
//! assert_eq!(outcome.routes.num_served(), 3);
//! for route in outcome.routes.collection_routes() {
//!     assert!(route.time() <= 480.0);
//! }
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod scheduler;
pub mod solver;
pub mod transport;
