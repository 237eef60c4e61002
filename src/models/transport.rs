//! Second-echelon types: unload events and transport trucks.

use serde::{Deserialize, Serialize};

use super::{NodeId, ProblemInstance};

/// An unload event at a transfer station, or a dumpsite leg of a transport
/// truck (quantity zero, station = dumpsite).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportTask {
    /// Waste quantity unloaded.
    pub quantity: i32,
    /// Node where the event happens.
    pub station: NodeId,
    /// Arrival timestamp in minutes since the start of the shift.
    pub arrival: f64,
}

impl TransportTask {
    /// Creates a task.
    pub fn new(quantity: i32, station: NodeId, arrival: f64) -> Self {
        Self {
            quantity,
            station,
            arrival,
        }
    }
}

/// Running state of one transport truck.
///
/// Created empty at the dumpsite when no open truck can take a task,
/// mutated by each accepted task and finalized by routing it back to the
/// dumpsite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportTruck {
    capacity_left: i32,
    time_left: f64,
    stops: Vec<TransportTask>,
    time_worked: f64,
}

impl TransportTruck {
    /// Opens a truck standing at the dumpsite at time zero.
    pub fn new(instance: &ProblemInstance) -> Self {
        let profile = instance.transport_truck();
        Self {
            capacity_left: profile.capacity(),
            time_left: profile.work_duration(),
            stops: vec![TransportTask::new(0, instance.dumpsite(), 0.0)],
            time_worked: 0.0,
        }
    }

    /// Capacity still free since the last dumpsite visit.
    pub fn capacity_left(&self) -> i32 {
        self.capacity_left
    }

    /// Remaining time budget in minutes.
    pub fn time_left(&self) -> f64 {
        self.time_left
    }

    /// Visited tasks, dumpsite legs included.
    pub fn stops(&self) -> &[TransportTask] {
        &self.stops
    }

    /// The most recent stop.
    pub fn last_stop(&self) -> &TransportTask {
        // Every truck is created with its dumpsite stop.
        &self.stops[self.stops.len() - 1]
    }

    /// Total minutes worked, set on finalization.
    pub fn time_worked(&self) -> f64 {
        self.time_worked
    }

    /// Number of transfer-station pickups.
    pub fn num_pickups(&self, instance: &ProblemInstance) -> usize {
        self.stops
            .iter()
            .filter(|s| s.station != instance.dumpsite())
            .count()
    }

    pub(crate) fn load(&mut self, task: TransportTask, time_spent: f64) {
        self.capacity_left -= task.quantity;
        self.time_left -= time_spent;
        self.stops.push(task);
    }

    pub(crate) fn unload(&mut self, dumpsite: TransportTask, capacity: i32, time_spent: f64) {
        self.capacity_left = capacity;
        self.time_left -= time_spent;
        self.stops.push(dumpsite);
    }

    pub(crate) fn set_time_worked(&mut self, time_worked: f64) {
        self.time_worked = time_worked;
    }
}
