//! Route evaluator that recomputes times, loads, transport tasks and
//! feasibility from scratch.

use crate::models::{
    CollectionRoute, NodeId, ProblemInstance, RouteSet, TransportTask, Violation, ViolationType,
};

const TIME_TOLERANCE: f64 = 1e-6;

/// Evaluates routes against an instance without trusting cached values.
///
/// # Examples
///
/// ```
/// use swts_routing::models::{InstanceBuilder, Point, TruckProfile};
/// use swts_routing::evaluation::RouteEvaluator;
///
/// let instance = InstanceBuilder::new(
///     TruckProfile::new(100, 480.0, 60.0),
///     TruckProfile::new(300, 600.0, 60.0),
/// )
/// .with_depot(Point::new(0, 0))
/// .add_transfer_station(Point::new(0, 10))
/// .add_collection_area(Point::new(0, 5), 30, 2.0)
/// .build()
/// .unwrap();
///
/// let evaluator = RouteEvaluator::new(&instance);
/// let route = evaluator.build_route(vec![0, 3, 2, 0]);
/// // 5 + 2 + 5 + 10 minutes at 60 units per hour.
/// assert!((route.time() - 22.0).abs() < 1e-10);
/// assert!(evaluator.check_route(0, &route).is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    instance: &'a ProblemInstance,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given instance.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self { instance }
    }

    /// Travel plus service time of a stop sequence, in minutes.
    pub fn route_time(&self, stops: &[NodeId]) -> f64 {
        let travel: f64 = stops
            .windows(2)
            .map(|w| self.instance.collection_time(w[0], w[1]))
            .sum();
        let service: f64 = stops.iter().map(|&id| self.instance.service_time(id)).sum();
        travel + service
    }

    /// Builds a route from a stop sequence, computing its time.
    pub fn build_route(&self, stops: Vec<NodeId>) -> CollectionRoute {
        let time = self.route_time(&stops);
        CollectionRoute::new(stops, time, self.instance)
    }

    /// Load of every sub-route, in order. A sub-route ends at each
    /// non-area stop after the first.
    pub fn sub_route_loads(&self, stops: &[NodeId]) -> Vec<i32> {
        let mut loads = Vec::new();
        let mut load = 0;
        for &id in stops.iter().skip(1) {
            if self.instance.is_area(id) {
                load += self.instance.demand(id);
            } else {
                loads.push(load);
                load = 0;
            }
        }
        if load > 0 {
            loads.push(load);
        }
        loads
    }

    /// Returns `true` if every sub-route fits the collection truck.
    pub fn is_capacity_feasible(&self, stops: &[NodeId]) -> bool {
        let capacity = self.instance.collection_truck().capacity();
        self.sub_route_loads(stops).iter().all(|&l| l <= capacity)
    }

    /// Violations of a single collection route.
    pub fn check_route(&self, route_index: usize, route: &CollectionRoute) -> Vec<Violation> {
        let mut violations = Vec::new();
        let stops = route.stops();
        let depot = self.instance.depot();
        let truck = self.instance.collection_truck();

        let well_formed = stops.len() >= 2
            && stops[0] == depot
            && stops[stops.len() - 1] == depot
            && (stops.len() == 2 || self.instance.is_station(stops[stops.len() - 2]));
        if !well_formed {
            violations.push(Violation::new(ViolationType::MalformedRoute { route_index }));
        }

        for load in self.sub_route_loads(stops) {
            if load > truck.capacity() {
                violations.push(Violation::new(ViolationType::SubRouteCapacityExceeded {
                    route_index,
                    load,
                    capacity: truck.capacity(),
                }));
            }
        }

        let duration = self.route_time(stops);
        if duration > truck.work_duration() + TIME_TOLERANCE {
            violations.push(Violation::new(ViolationType::RouteDurationExceeded {
                route_index,
                duration,
                max_duration: truck.work_duration(),
            }));
        }

        violations
    }

    /// Unload events implied by the routes, one per transfer-station visit,
    /// timestamped from each route's departure.
    pub fn transport_tasks(&self, routes: &[CollectionRoute]) -> Vec<TransportTask> {
        let mut tasks = Vec::new();
        for route in routes {
            let stops = route.stops();
            let mut clock = 0.0;
            let mut waste = 0;
            for w in stops.windows(2) {
                let (current, next) = (w[0], w[1]);
                if self.instance.is_station(current) {
                    tasks.push(TransportTask::new(waste, current, clock));
                    waste = 0;
                }
                if self.instance.is_area(current) {
                    clock += self.instance.service_time(current);
                    waste += self.instance.demand(current);
                }
                clock += self.instance.collection_time(current, next);
            }
        }
        tasks
    }

    /// Every violation in a route set: per-route checks, area coverage and
    /// transport truck capacity and duration.
    pub fn evaluate(&self, routes: &RouteSet) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (idx, route) in routes.collection_routes().iter().enumerate() {
            violations.append(&mut self.check_route(idx, route));
        }

        let mut visits = vec![0usize; self.instance.nodes().len()];
        for area in routes.served_areas() {
            visits[area] += 1;
        }
        for &area in self.instance.collection_areas() {
            match visits[area] {
                0 => violations.push(Violation::new(ViolationType::AreaNotServed { area })),
                1 => {}
                _ => violations.push(Violation::new(ViolationType::AreaServedTwice { area })),
            }
        }

        let profile = self.instance.transport_truck();
        let dumpsite = self.instance.dumpsite();
        for (truck_index, truck) in routes.transport_trucks().iter().enumerate() {
            let mut load = 0;
            for stop in truck.stops() {
                if stop.station == dumpsite {
                    load = 0;
                    continue;
                }
                load += stop.quantity;
                if load > profile.capacity() {
                    violations.push(Violation::new(ViolationType::TransportCapacityExceeded {
                        truck_index,
                        load,
                        capacity: profile.capacity(),
                    }));
                }
            }
            if truck.time_worked() > profile.work_duration() + TIME_TOLERANCE {
                violations.push(Violation::new(ViolationType::TransportDurationExceeded {
                    truck_index,
                    duration: truck.time_worked(),
                    max_duration: profile.work_duration(),
                }));
            }
        }

        violations
    }
}
