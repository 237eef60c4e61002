//! Problem instance and the per-attempt pool of remaining collection areas.

use fixedbitset::FixedBitSet;
use serde::{Deserialize, Serialize};

use super::{Node, NodeId, NodeKind, Point, TruckProfile};
use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};

/// Immutable description of a VRPT-SWTS instance.
///
/// Nodes live in a single arena: the depot, the dumpsite, the transfer
/// stations and then the collection areas. Routes refer to nodes by
/// [`NodeId`]. Distances are precomputed once.
///
/// # Examples
///
/// ```
/// use swts_routing::models::{InstanceBuilder, Point, TruckProfile};
///
/// let instance = InstanceBuilder::new(
///     TruckProfile::new(100, 480.0, 60.0),
///     TruckProfile::new(300, 600.0, 60.0),
/// )
/// .with_depot(Point::new(0, 0))
/// .with_dumpsite(Point::new(50, 50))
/// .add_transfer_station(Point::new(10, 0))
/// .add_collection_area(Point::new(5, 5), 20, 3.0)
/// .build()
/// .unwrap();
///
/// assert_eq!(instance.collection_areas().len(), 1);
/// assert_eq!(instance.transfer_stations().len(), 1);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "InstanceData")]
pub struct ProblemInstance {
    num_vehicles: usize,
    collection_truck: TruckProfile,
    transport_truck: TruckProfile,
    nodes: Vec<Node>,
    depot: NodeId,
    dumpsite: NodeId,
    stations: Vec<NodeId>,
    areas: Vec<NodeId>,
    distances: DistanceMatrix,
}

impl ProblemInstance {
    /// Number of collection vehicles declared by the instance.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Collection-truck profile (first echelon).
    pub fn collection_truck(&self) -> &TruckProfile {
        &self.collection_truck
    }

    /// Transport-truck profile (second echelon).
    pub fn transport_truck(&self) -> &TruckProfile {
        &self.transport_truck
    }

    /// All nodes, indexed by [`NodeId`].
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Depot id.
    pub fn depot(&self) -> NodeId {
        self.depot
    }

    /// Dumpsite id.
    pub fn dumpsite(&self) -> NodeId {
        self.dumpsite
    }

    /// Transfer station ids.
    pub fn transfer_stations(&self) -> &[NodeId] {
        &self.stations
    }

    /// Collection area ids, in instance order.
    pub fn collection_areas(&self) -> &[NodeId] {
        &self.areas
    }

    /// Euclidean distance between two nodes.
    pub fn distance(&self, from: NodeId, to: NodeId) -> f64 {
        self.distances.get(from, to)
    }

    /// Collection-truck travel time between two nodes, in minutes.
    pub fn collection_time(&self, from: NodeId, to: NodeId) -> f64 {
        self.collection_truck.travel_time(self.distances.get(from, to))
    }

    /// Transport-truck travel time between two nodes, in minutes.
    pub fn transport_time(&self, from: NodeId, to: NodeId) -> f64 {
        self.transport_truck.travel_time(self.distances.get(from, to))
    }

    /// Demand of a node (zero unless it is a collection area).
    pub fn demand(&self, id: NodeId) -> i32 {
        self.nodes[id].demand()
    }

    /// Service time of a node (zero unless it is a collection area).
    pub fn service_time(&self, id: NodeId) -> f64 {
        self.nodes[id].service_time()
    }

    /// Returns `true` if the node is a collection area.
    pub fn is_area(&self, id: NodeId) -> bool {
        self.nodes[id].is_collection_area()
    }

    /// Returns `true` if the node is a transfer station.
    pub fn is_station(&self, id: NodeId) -> bool {
        self.nodes[id].is_transfer_station()
    }

    /// Nearest transfer station to `from` and its distance.
    ///
    /// Ties go to the station listed first.
    pub fn nearest_station(&self, from: NodeId) -> Result<(NodeId, f64)> {
        let station = self
            .distances
            .nearest_neighbor(from, &self.stations)
            .ok_or(RoutingError::NoTransferStations)?;
        Ok((station, self.distances.get(from, station)))
    }

    /// A fresh pool holding every collection area.
    pub fn area_pool(&self) -> AreaPool<'_> {
        AreaPool::new(&self.areas)
    }

    fn validate(&self) -> Result<()> {
        for (truck, profile) in [
            ("collection", &self.collection_truck),
            ("transport", &self.transport_truck),
        ] {
            if let Some(reason) = profile.defect() {
                return Err(RoutingError::InvalidTruck { truck, reason });
            }
        }
        if self.stations.is_empty() {
            return Err(RoutingError::NoTransferStations);
        }
        let capacity = self.collection_truck.capacity();
        for &area in &self.areas {
            let node = &self.nodes[area];
            if node.demand() > capacity {
                return Err(RoutingError::DemandExceedsCapacity {
                    area: node.name().to_string(),
                    demand: node.demand(),
                    capacity,
                });
            }
        }
        Ok(())
    }
}

/// Remaining collection areas of one construction attempt.
///
/// An active-bit view over the instance's area arena: removal flips a bit,
/// iteration follows instance order, and a new attempt simply takes a new
/// pool.
#[derive(Debug, Clone)]
pub struct AreaPool<'a> {
    areas: &'a [NodeId],
    active: FixedBitSet,
    remaining: usize,
}

impl<'a> AreaPool<'a> {
    fn new(areas: &'a [NodeId]) -> Self {
        let mut active = FixedBitSet::with_capacity(areas.len());
        active.insert_range(..);
        Self {
            areas,
            active,
            remaining: areas.len(),
        }
    }

    /// Number of areas not yet routed.
    pub fn len(&self) -> usize {
        self.remaining
    }

    /// Returns `true` once every area has been routed.
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Remaining `(slot, area)` pairs in instance order.
    pub fn candidates(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.active.ones().map(move |slot| (slot, self.areas[slot]))
    }

    /// Returns `true` if the slot is still active.
    pub fn contains(&self, slot: usize) -> bool {
        self.active.contains(slot)
    }

    /// Removes the area at `slot`. Removing an inactive slot is a no-op.
    pub fn remove(&mut self, slot: usize) {
        if self.active.contains(slot) {
            self.active.set(slot, false);
            self.remaining -= 1;
        }
    }
}

/// Plain, serde-friendly description of an instance.
///
/// Stations are named `TS1`, `TS2`, ... and areas `Area1`, `Area2`, ... in
/// list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceData {
    /// Number of collection vehicles.
    #[serde(default)]
    pub num_vehicles: usize,
    /// Collection-truck profile.
    pub collection_truck: TruckProfile,
    /// Transport-truck profile.
    pub transport_truck: TruckProfile,
    /// Depot location.
    pub depot: Point,
    /// Dumpsite location.
    pub dumpsite: Point,
    /// Transfer station locations.
    pub transfer_stations: Vec<Point>,
    /// Collection areas.
    pub collection_areas: Vec<AreaData>,
}

/// One collection area in [`InstanceData`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaData {
    /// X-coordinate.
    pub x: i32,
    /// Y-coordinate.
    pub y: i32,
    /// Waste quantity.
    pub demand: i32,
    /// Service time in minutes.
    pub service_time: f64,
}

impl TryFrom<InstanceData> for ProblemInstance {
    type Error = RoutingError;

    fn try_from(data: InstanceData) -> Result<Self> {
        let mut builder = InstanceBuilder::new(data.collection_truck, data.transport_truck)
            .with_vehicles(data.num_vehicles)
            .with_depot(data.depot)
            .with_dumpsite(data.dumpsite);
        for station in data.transfer_stations {
            builder = builder.add_transfer_station(station);
        }
        for area in data.collection_areas {
            builder =
                builder.add_collection_area(Point::new(area.x, area.y), area.demand, area.service_time);
        }
        builder.build()
    }
}

/// Builder for [`ProblemInstance`].
#[derive(Debug, Clone)]
pub struct InstanceBuilder {
    num_vehicles: usize,
    collection_truck: TruckProfile,
    transport_truck: TruckProfile,
    depot: Point,
    dumpsite: Point,
    stations: Vec<Point>,
    areas: Vec<(Point, i32, f64)>,
}

impl InstanceBuilder {
    /// Starts an instance with the two truck profiles. Depot and dumpsite
    /// default to the origin.
    pub fn new(collection_truck: TruckProfile, transport_truck: TruckProfile) -> Self {
        Self {
            num_vehicles: 0,
            collection_truck,
            transport_truck,
            depot: Point::default(),
            dumpsite: Point::default(),
            stations: Vec::new(),
            areas: Vec::new(),
        }
    }

    /// Sets the declared number of collection vehicles.
    pub fn with_vehicles(mut self, num_vehicles: usize) -> Self {
        self.num_vehicles = num_vehicles;
        self
    }

    /// Sets the depot location.
    pub fn with_depot(mut self, point: Point) -> Self {
        self.depot = point;
        self
    }

    /// Sets the dumpsite location.
    pub fn with_dumpsite(mut self, point: Point) -> Self {
        self.dumpsite = point;
        self
    }

    /// Adds a transfer station.
    pub fn add_transfer_station(mut self, point: Point) -> Self {
        self.stations.push(point);
        self
    }

    /// Adds a collection area.
    pub fn add_collection_area(mut self, point: Point, demand: i32, service_time: f64) -> Self {
        self.areas.push((point, demand, service_time));
        self
    }

    /// Validates and builds the instance.
    pub fn build(self) -> Result<ProblemInstance> {
        let mut nodes = Vec::with_capacity(2 + self.stations.len() + self.areas.len());
        nodes.push(Node::new("Depot", self.depot, NodeKind::Depot));
        nodes.push(Node::new("Dumpsite", self.dumpsite, NodeKind::Dumpsite));

        let first_station = nodes.len();
        for (i, point) in self.stations.into_iter().enumerate() {
            nodes.push(Node::new(format!("TS{}", i + 1), point, NodeKind::TransferStation));
        }
        let first_area = nodes.len();
        for (i, (point, demand, service_time)) in self.areas.into_iter().enumerate() {
            nodes.push(Node::collection_area(
                format!("Area{}", i + 1),
                point,
                demand,
                service_time,
            ));
        }

        let distances = DistanceMatrix::from_nodes(&nodes);
        let instance = ProblemInstance {
            num_vehicles: self.num_vehicles,
            collection_truck: self.collection_truck,
            transport_truck: self.transport_truck,
            depot: 0,
            dumpsite: 1,
            stations: (first_station..first_area).collect(),
            areas: (first_area..nodes.len()).collect(),
            nodes,
            distances,
        };
        instance.validate()?;
        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> InstanceBuilder {
        InstanceBuilder::new(
            TruckProfile::new(50, 480.0, 60.0),
            TruckProfile::new(200, 600.0, 60.0),
        )
        .with_vehicles(2)
        .with_depot(Point::new(0, 0))
        .with_dumpsite(Point::new(100, 0))
        .add_transfer_station(Point::new(10, 0))
        .add_transfer_station(Point::new(-10, 0))
    }

    #[test]
    fn test_arena_layout() {
        let inst = builder()
            .add_collection_area(Point::new(3, 4), 10, 2.0)
            .add_collection_area(Point::new(6, 8), 5, 1.0)
            .build()
            .expect("valid");
        assert_eq!(inst.depot(), 0);
        assert_eq!(inst.dumpsite(), 1);
        assert_eq!(inst.transfer_stations(), &[2, 3]);
        assert_eq!(inst.collection_areas(), &[4, 5]);
        assert_eq!(inst.node(4).name(), "Area1");
        assert_eq!(inst.node(3).name(), "TS2");
        assert!((inst.distance(0, 4) - 5.0).abs() < 1e-10);
        assert_eq!(inst.demand(4), 10);
        assert_eq!(inst.demand(2), 0);
        assert!(inst.is_area(5));
        assert!(inst.is_station(2));
        assert!(!inst.is_station(0));
    }

    #[test]
    fn test_nearest_station() {
        let inst = builder()
            .add_collection_area(Point::new(-8, 1), 10, 2.0)
            .build()
            .expect("valid");
        let (ts, d) = inst.nearest_station(4).expect("has stations");
        assert_eq!(ts, 3);
        assert!((d - 5f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_nearest_station_tie_prefers_first() {
        let inst = builder().build().expect("valid");
        let (ts, _) = inst.nearest_station(inst.depot()).expect("has stations");
        assert_eq!(ts, 2);
    }

    #[test]
    fn test_rejects_missing_stations() {
        let err = InstanceBuilder::new(
            TruckProfile::new(50, 480.0, 60.0),
            TruckProfile::new(200, 600.0, 60.0),
        )
        .add_collection_area(Point::new(1, 1), 1, 0.0)
        .build()
        .unwrap_err();
        assert_eq!(err, RoutingError::NoTransferStations);
    }

    #[test]
    fn test_rejects_oversized_demand() {
        let err = builder()
            .add_collection_area(Point::new(1, 1), 51, 0.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, RoutingError::DemandExceedsCapacity { demand: 51, .. }));
    }

    #[test]
    fn test_rejects_bad_profile() {
        let err = InstanceBuilder::new(
            TruckProfile::new(50, 480.0, 0.0),
            TruckProfile::new(200, 600.0, 60.0),
        )
        .add_transfer_station(Point::new(1, 1))
        .build()
        .unwrap_err();
        assert!(matches!(err, RoutingError::InvalidTruck { truck: "collection", .. }));
    }

    #[test]
    fn test_area_pool_shrinks() {
        let inst = builder()
            .add_collection_area(Point::new(1, 0), 1, 0.0)
            .add_collection_area(Point::new(2, 0), 1, 0.0)
            .add_collection_area(Point::new(3, 0), 1, 0.0)
            .build()
            .expect("valid");
        let mut pool = inst.area_pool();
        assert_eq!(pool.len(), 3);
        pool.remove(1);
        pool.remove(1);
        assert_eq!(pool.len(), 2);
        let ids: Vec<NodeId> = pool.candidates().map(|(_, id)| id).collect();
        assert_eq!(ids, vec![4, 6]);

        // A second pool starts from the full set again.
        assert_eq!(inst.area_pool().len(), 3);
    }

    #[test]
    fn test_from_instance_data() {
        let data = InstanceData {
            num_vehicles: 1,
            collection_truck: TruckProfile::new(50, 480.0, 60.0),
            transport_truck: TruckProfile::new(200, 600.0, 60.0),
            depot: Point::new(0, 0),
            dumpsite: Point::new(9, 9),
            transfer_stations: vec![Point::new(1, 1)],
            collection_areas: vec![AreaData {
                x: 2,
                y: 2,
                demand: 4,
                service_time: 1.5,
            }],
        };
        let inst = ProblemInstance::try_from(data).expect("valid");
        assert_eq!(inst.num_vehicles(), 1);
        assert_eq!(inst.service_time(inst.collection_areas()[0]), 1.5);
    }
}
