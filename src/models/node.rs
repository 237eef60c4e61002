//! Located entities: depot, dumpsite, transfer stations and collection areas.

use serde::{Deserialize, Serialize};

/// Index of a node inside a [`ProblemInstance`](super::ProblemInstance) arena.
pub type NodeId = usize;

/// Integer 2D coordinates.
///
/// # Examples
///
/// ```
/// use swts_routing::models::Point;
///
/// let a = Point::new(0, 0);
/// let b = Point::new(3, 4);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// X-coordinate.
    pub x: i32,
    /// Y-coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// What a node is. Route segmentation relies on this tag, never on
/// coordinates or names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Start and end of every collection route.
    Depot,
    /// Final destination of all transported waste.
    Dumpsite,
    /// Intermediate unloading point for collection trucks.
    TransferStation,
    /// A zone with waste to pick up.
    CollectionArea {
        /// Waste quantity to collect.
        demand: i32,
        /// Minutes spent servicing the area.
        service_time: f64,
    },
}

/// A named, located entity of the instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    name: String,
    point: Point,
    kind: NodeKind,
}

impl Node {
    /// Creates a node of the given kind.
    pub fn new(name: impl Into<String>, point: Point, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            point,
            kind,
        }
    }

    /// Creates a collection area.
    pub fn collection_area(
        name: impl Into<String>,
        point: Point,
        demand: i32,
        service_time: f64,
    ) -> Self {
        Self::new(
            name,
            point,
            NodeKind::CollectionArea {
                demand,
                service_time,
            },
        )
    }

    /// Display name, e.g. `Area3` or `TS1`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location.
    pub fn point(&self) -> Point {
        self.point
    }

    /// Kind tag.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Demand (zero for anything but a collection area).
    pub fn demand(&self) -> i32 {
        match self.kind {
            NodeKind::CollectionArea { demand, .. } => demand,
            _ => 0,
        }
    }

    /// Service time (zero for anything but a collection area).
    pub fn service_time(&self) -> f64 {
        match self.kind {
            NodeKind::CollectionArea { service_time, .. } => service_time,
            _ => 0.0,
        }
    }

    /// Returns `true` for collection areas.
    pub fn is_collection_area(&self) -> bool {
        matches!(self.kind, NodeKind::CollectionArea { .. })
    }

    /// Returns `true` for transfer stations.
    pub fn is_transfer_station(&self) -> bool {
        matches!(self.kind, NodeKind::TransferStation)
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        self.point.distance_to(&other.point)
    }
}
