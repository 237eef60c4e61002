//! Second-echelon planning: assigning unload events to transport trucks.

mod assignment;

pub use assignment::TransportPlanner;
