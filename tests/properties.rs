//! Randomized properties over generated instances.
//!
//! Shift limits are generous enough that every area is reachable from the
//! depot, so construction never fails.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use swts_routing::constructive::{nearest_neighbor, NeighborSelection, RouteConstructor};
use swts_routing::evaluation::RouteEvaluator;
use swts_routing::local_search::{LocalSearch, Neighborhood};
use swts_routing::models::{InstanceBuilder, Point, ProblemInstance, RouteSet, TruckProfile};
use swts_routing::scheduler::{Rvnd, SequentialSearch};
use swts_routing::solver::{Algorithm, Improvement, Solver, SolverConfig};

const EPS: f64 = 1e-6;

fn point() -> impl Strategy<Value = Point> {
    (-50..=50i32, -50..=50i32).prop_map(|(x, y)| Point::new(x, y))
}

prop_compose! {
    fn instance()(
        capacity in 20..=60i32,
        speed in 30.0..90.0f64,
        work_duration in 2_000.0..5_000.0f64,
        depot in point(),
        dumpsite in point(),
        stations in prop::collection::vec(point(), 1..=3),
        areas in prop::collection::vec((point(), 1..=20i32, 0.0..20.0f64), 0..=12),
    ) -> ProblemInstance {
        let mut builder = InstanceBuilder::new(
            TruckProfile::new(capacity, work_duration, speed),
            TruckProfile::new(capacity * 3, 100_000.0, speed),
        )
        .with_depot(depot)
        .with_dumpsite(dumpsite);
        for station in stations {
            builder = builder.add_transfer_station(station);
        }
        for (point, demand, service) in areas {
            builder = builder.add_collection_area(point, demand, service);
        }
        builder.build().expect("generated instance is valid")
    }
}

fn neighborhoods() -> impl Strategy<Value = Vec<Neighborhood>> {
    prop::sample::subsequence(Neighborhood::ALL.to_vec(), 1..=Neighborhood::ALL.len())
        .prop_shuffle()
}

fn assert_valid(inst: &ProblemInstance, routes: &RouteSet) -> Result<(), TestCaseError> {
    let eval = RouteEvaluator::new(inst);
    let violations = eval.evaluate(routes);
    prop_assert!(violations.is_empty(), "violations: {:?}", violations);
    prop_assert_eq!(routes.num_served(), inst.collection_areas().len());
    for route in routes.collection_routes() {
        prop_assert!((route.time() - eval.route_time(route.stops())).abs() < EPS);
        prop_assert!(eval.is_capacity_feasible(route.stops()));
        prop_assert!(route.time() <= inst.collection_truck().work_duration() + EPS);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn construction_is_feasible(inst in instance(), seed in any::<u64>(), window in 1..=4usize) {
        let greedy = nearest_neighbor(&inst).expect("reachable").into_route_set();
        assert_valid(&inst, &greedy)?;

        let mut rng = StdRng::seed_from_u64(seed);
        let randomized = RouteConstructor::new(&inst, NeighborSelection::RandomizedTopK { window })
            .build(&mut rng)
            .expect("reachable")
            .into_route_set();
        assert_valid(&inst, &randomized)?;
    }

    #[test]
    fn construction_tasks_cover_collected_waste(inst in instance()) {
        let construction = nearest_neighbor(&inst).expect("reachable");
        let collected: i32 = inst.collection_areas().iter().map(|&a| inst.demand(a)).sum();
        let unloaded: i32 = construction.tasks.iter().map(|t| t.quantity).sum();
        prop_assert_eq!(collected, unloaded);
        for task in &construction.tasks {
            prop_assert!(task.quantity <= inst.collection_truck().capacity());
            prop_assert!(inst.is_station(task.station));
        }
    }

    #[test]
    fn every_operator_keeps_feasibility_and_never_worsens(inst in instance()) {
        let start = nearest_neighbor(&inst).expect("reachable").into_route_set();
        for n in Neighborhood::ALL {
            let out = n.search(&inst, &start);
            assert_valid(&inst, &out)?;
            prop_assert!(out.collection_time() <= start.collection_time() + EPS, "{} worsened", n);
            prop_assert_eq!(n.search(&inst, &out), out.clone(), "{} is not at a local optimum", n);
        }
    }

    #[test]
    fn sequential_search_never_worsens(inst in instance(), order in neighborhoods()) {
        let start = nearest_neighbor(&inst).expect("reachable").into_route_set();
        let out = SequentialSearch::new(order).search(&inst, &start);
        assert_valid(&inst, &out)?;
        prop_assert!(out.collection_time() <= start.collection_time() + EPS);
    }

    #[test]
    fn rvnd_never_worsens(inst in instance(), pool in neighborhoods(), seed in any::<u64>()) {
        let start = nearest_neighbor(&inst).expect("reachable").into_route_set();
        let mut rvnd = Rvnd::new(pool.clone());
        let mut rng = StdRng::seed_from_u64(seed);
        let out = rvnd.search(&inst, &start, &mut rng);
        assert_valid(&inst, &out)?;
        prop_assert!(out.collection_time() <= start.collection_time() + EPS);
        prop_assert_eq!(rvnd.pool().active().len(), pool.len());
        prop_assert!(rvnd.pool().inactive().is_empty());
    }

    #[test]
    fn transport_trucks_respect_their_limits(inst in instance(), seed in any::<u64>()) {
        let config = SolverConfig::default()
            .with_algorithm(Algorithm::Grasp)
            .with_grasp_iterations(3)
            .with_improvement(Improvement::Sequential(Neighborhood::ALL.to_vec()))
            .with_seed(seed);
        let outcome = Solver::new(config).solve(&inst).expect("reachable");
        let routes = &outcome.routes;
        assert_valid(&inst, routes)?;

        let transport = inst.transport_truck();
        let mut picked = 0;
        for truck in routes.transport_trucks() {
            prop_assert!(truck.time_worked() <= transport.work_duration() + EPS);
            prop_assert!(truck.capacity_left() >= 0);
            prop_assert_eq!(truck.last_stop().station, inst.dumpsite());
            picked += truck.num_pickups(&inst);
        }
        let tasks = RouteEvaluator::new(&inst).transport_tasks(routes.collection_routes());
        prop_assert_eq!(picked, tasks.len());
    }
}
