//! Route evaluation: from-scratch route times, sub-route loads, transport
//! task derivation and invariant checking.

mod evaluator;

pub use evaluator::RouteEvaluator;
