//! Greedy assignment of transport tasks to transport trucks.
//!
//! # Algorithm
//!
//! Tasks are processed in arrival order. Each open truck quotes a cost for
//! the next task: infinite if it cannot drive from its last stop to the
//! task's station within the inter-arrival gap, lacks the capacity, or
//! could no longer reach the dumpsite in time afterwards; otherwise the
//! travel time plus the gap. The cheapest truck takes the task (the first
//! one on ties); with no feasible truck a new one leaves the dumpsite. A
//! truck whose free capacity drops below the smallest task quantity drives
//! to the dumpsite right away.
//!
//! # Complexity
//!
//! O(m log m + m × T) for m tasks and T trucks.

use tracing::{debug, trace};

use crate::models::{ProblemInstance, TransportTask, TransportTruck};

/// Plans transport trucks for a set of unload events.
///
/// # Examples
///
/// ```
/// use swts_routing::models::{InstanceBuilder, Point, TransportTask, TruckProfile};
/// use swts_routing::transport::TransportPlanner;
///
/// let instance = InstanceBuilder::new(
///     TruckProfile::new(50, 480.0, 60.0),
///     TruckProfile::new(100, 600.0, 60.0),
/// )
/// .with_dumpsite(Point::new(0, 20))
/// .add_transfer_station(Point::new(0, 10))
/// .build()
/// .unwrap();
///
/// let ts = instance.transfer_stations()[0];
/// let tasks = vec![
///     TransportTask::new(30, ts, 60.0),
///     TransportTask::new(40, ts, 120.0),
/// ];
/// let trucks = TransportPlanner::new(&instance).assign(&tasks);
/// assert_eq!(trucks.len(), 1);
/// assert_eq!(trucks[0].num_pickups(&instance), 2);
/// ```
pub struct TransportPlanner<'a> {
    instance: &'a ProblemInstance,
}

impl<'a> TransportPlanner<'a> {
    /// Creates a planner for the instance.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self { instance }
    }

    /// Assigns every task to a truck and routes every truck back to the
    /// dumpsite. Zero-quantity tasks are assigned like any other.
    pub fn assign(&self, tasks: &[TransportTask]) -> Vec<TransportTruck> {
        let Some(min_quantity) = tasks.iter().map(|t| t.quantity).min() else {
            return Vec::new();
        };

        let mut sorted = tasks.to_vec();
        sorted.sort_by(|a, b| a.arrival.total_cmp(&b.arrival));

        let profile = self.instance.transport_truck();
        let dumpsite = self.instance.dumpsite();
        let mut trucks: Vec<TransportTruck> = Vec::new();

        for task in sorted {
            let chosen = self.cheapest(&trucks, &task);
            let index = match chosen {
                Some(index) => {
                    let truck = &mut trucks[index];
                    let gap = task.arrival - truck.last_stop().arrival;
                    truck.load(task, gap);
                    index
                }
                None => {
                    let mut truck = TransportTruck::new(self.instance);
                    truck.load(task, self.instance.transport_time(dumpsite, task.station));
                    trucks.push(truck);
                    trace!(truck = trucks.len() - 1, station = task.station, "opened transport truck");
                    trucks.len() - 1
                }
            };

            let truck = &mut trucks[index];
            if truck.capacity_left() < min_quantity {
                let to_dump = self.instance.transport_time(task.station, dumpsite);
                let arrival = task.arrival + to_dump;
                truck.unload(TransportTask::new(0, dumpsite, arrival), profile.capacity(), to_dump);
            }
        }

        for truck in &mut trucks {
            let last = *truck.last_stop();
            if last.station != dumpsite {
                let to_dump = self.instance.transport_time(last.station, dumpsite);
                truck.unload(
                    TransportTask::new(0, dumpsite, last.arrival + to_dump),
                    profile.capacity(),
                    to_dump,
                );
            }
            truck.set_time_worked(profile.work_duration() - truck.time_left());
        }

        debug!(tasks = tasks.len(), trucks = trucks.len(), "transport assignment done");
        trucks
    }

    /// Index of the cheapest feasible truck for `task`.
    fn cheapest(&self, trucks: &[TransportTruck], task: &TransportTask) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, truck) in trucks.iter().enumerate() {
            let cost = self.cost(truck, task);
            if cost.is_finite() && best.is_none_or(|(_, c)| cost < c) {
                best = Some((index, cost));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Insertion cost of `task` for `truck`; infinite when infeasible.
    fn cost(&self, truck: &TransportTruck, task: &TransportTask) -> f64 {
        let last = truck.last_stop();
        let travel = self.instance.transport_time(last.station, task.station);
        let gap = task.arrival - last.arrival;
        if travel > gap || truck.capacity_left() < task.quantity {
            return f64::INFINITY;
        }
        let reserve = gap + self.instance.transport_time(task.station, self.instance.dumpsite());
        if truck.time_left() < reserve {
            return f64::INFINITY;
        }
        travel + gap
    }
}
