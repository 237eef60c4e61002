//! Route sets and violation types.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{CollectionRoute, NodeId, TransportTruck};

/// A type of constraint violation in a route set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A sub-route collects more than the truck can carry.
    SubRouteCapacityExceeded {
        /// Route index in the route set.
        route_index: usize,
        /// Load of the offending sub-route.
        load: i32,
        /// Collection truck capacity.
        capacity: i32,
    },
    /// A collection route runs past the work-duration limit.
    RouteDurationExceeded {
        /// Route index.
        route_index: usize,
        /// Route time.
        duration: f64,
        /// Work-duration limit.
        max_duration: f64,
    },
    /// A route returns to the depot without unloading first, or does not
    /// start and end at the depot.
    MalformedRoute {
        /// Route index.
        route_index: usize,
    },
    /// A collection area no route visits.
    AreaNotServed {
        /// Area id.
        area: NodeId,
    },
    /// A collection area visited more than once.
    AreaServedTwice {
        /// Area id.
        area: NodeId,
    },
    /// A transport truck carries more than its capacity between dumpsite
    /// visits.
    TransportCapacityExceeded {
        /// Truck index.
        truck_index: usize,
        /// Accumulated load.
        load: i32,
        /// Transport truck capacity.
        capacity: i32,
    },
    /// A transport truck works past its limit.
    TransportDurationExceeded {
        /// Truck index.
        truck_index: usize,
        /// Time worked.
        duration: f64,
        /// Work-duration limit.
        max_duration: f64,
    },
}

/// A constraint violation in a route set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Collection routes plus the transport trucks serving their unloads.
///
/// Each algorithm stage builds a fresh route set; stages never mutate the
/// route set they receive.
///
/// # Examples
///
/// ```
/// use swts_routing::models::RouteSet;
///
/// let routes = RouteSet::default();
/// assert_eq!(routes.num_collection_routes(), 0);
/// assert_eq!(routes.collection_time(), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSet {
    collection_routes: Vec<CollectionRoute>,
    transport_trucks: Vec<TransportTruck>,
}

impl RouteSet {
    /// Creates a route set with collection routes only.
    pub fn new(collection_routes: Vec<CollectionRoute>) -> Self {
        Self {
            collection_routes,
            transport_trucks: Vec::new(),
        }
    }

    /// Returns this set's collection routes together with `trucks`.
    pub fn with_transport(mut self, trucks: Vec<TransportTruck>) -> Self {
        self.transport_trucks = trucks;
        self
    }

    /// Collection routes.
    pub fn collection_routes(&self) -> &[CollectionRoute] {
        &self.collection_routes
    }

    /// Transport trucks (empty until transport assignment ran).
    pub fn transport_trucks(&self) -> &[TransportTruck] {
        &self.transport_trucks
    }

    /// Number of collection routes.
    pub fn num_collection_routes(&self) -> usize {
        self.collection_routes.len()
    }

    /// Number of transport trucks.
    pub fn num_transport_trucks(&self) -> usize {
        self.transport_trucks.len()
    }

    /// Sum of collection route times.
    pub fn collection_time(&self) -> f64 {
        self.collection_routes.iter().map(|r| r.time()).sum()
    }

    /// Sum of transport truck working times.
    pub fn transport_time(&self) -> f64 {
        self.transport_trucks.iter().map(|t| t.time_worked()).sum()
    }

    /// Total number of collection areas served.
    pub fn num_served(&self) -> usize {
        self.collection_routes.iter().map(|r| r.num_areas()).sum()
    }

    /// Every served collection area, route by route in visit order.
    pub fn served_areas(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.collection_routes.iter().flat_map(|r| r.areas())
    }

    /// Construction order: fewer routes first, then lower collection time.
    pub fn cmp_construction(&self, other: &RouteSet) -> Ordering {
        self.num_collection_routes()
            .cmp(&other.num_collection_routes())
            .then_with(|| self.collection_time().total_cmp(&other.collection_time()))
    }

    /// Returns `true` if this set strictly beats `other` in construction order.
    pub fn is_better_construction(&self, other: &RouteSet) -> bool {
        self.cmp_construction(other) == Ordering::Less
    }

    /// Time order: lower collection time first, route count ignored.
    pub fn cmp_time(&self, other: &RouteSet) -> Ordering {
        self.collection_time().total_cmp(&other.collection_time())
    }

    /// Returns `true` if this set strictly beats `other` in time order.
    pub fn is_better_time(&self, other: &RouteSet) -> bool {
        self.cmp_time(other) == Ordering::Less
    }
}
