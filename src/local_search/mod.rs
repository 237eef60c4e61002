//! Local search operators for improving collection routes.
//!
//! Every operator takes a route set and returns a new one at a local
//! optimum of its neighborhood, committing the best improving move of each
//! pass.
//!
//! - [`ReinsertionIntra`]: relocate an area within its route
//! - [`ReinsertionInter`]: relocate an area into another route
//! - [`SwapIntra`]: swap two areas of one route
//! - [`SwapInter`]: swap two areas of different routes
//! - [`TwoOpt`]: reverse a route segment

mod moves;
mod reinsertion_inter;
mod reinsertion_intra;
mod swap_inter;
mod swap_intra;
mod two_opt;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{ProblemInstance, RouteSet};

pub(crate) use moves::IMPROVEMENT_EPSILON;
pub use reinsertion_inter::ReinsertionInter;
pub use reinsertion_intra::ReinsertionIntra;
pub use swap_inter::SwapInter;
pub use swap_intra::SwapIntra;
pub use two_opt::TwoOpt;

/// A neighborhood searched to its local optimum.
///
/// Implementations never mutate their input and never return a set with a
/// greater total collection time.
pub trait LocalSearch {
    /// Short identifier used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Searches `routes` to a local optimum.
    fn search(&self, instance: &ProblemInstance, routes: &RouteSet) -> RouteSet;
}

/// Selectable neighborhood, as used by schedulers and configuration.
///
/// # Examples
///
/// ```
/// use swts_routing::local_search::Neighborhood;
///
/// let n: Neighborhood = "2-opt".parse().unwrap();
/// assert_eq!(n, Neighborhood::TwoOpt);
/// assert_eq!(Neighborhood::SwapInter.to_string(), "swap-inter");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Neighborhood {
    /// Relocate an area within its route.
    #[serde(rename = "reinsertion-intra")]
    ReinsertionIntra,
    /// Relocate an area into another route.
    #[serde(rename = "reinsertion-inter")]
    ReinsertionInter,
    /// Swap two areas of one route.
    #[serde(rename = "swap-intra")]
    SwapIntra,
    /// Swap two areas of different routes.
    #[serde(rename = "swap-inter")]
    SwapInter,
    /// Reverse a route segment.
    #[serde(rename = "2-opt")]
    TwoOpt,
}

impl Neighborhood {
    /// Every neighborhood, in the default sequential order.
    pub const ALL: [Neighborhood; 5] = [
        Neighborhood::ReinsertionIntra,
        Neighborhood::ReinsertionInter,
        Neighborhood::SwapIntra,
        Neighborhood::SwapInter,
        Neighborhood::TwoOpt,
    ];

    fn operator(&self) -> &'static dyn LocalSearch {
        match self {
            Self::ReinsertionIntra => &ReinsertionIntra,
            Self::ReinsertionInter => &ReinsertionInter,
            Self::SwapIntra => &SwapIntra,
            Self::SwapInter => &SwapInter,
            Self::TwoOpt => &TwoOpt,
        }
    }
}

impl LocalSearch for Neighborhood {
    fn name(&self) -> &'static str {
        self.operator().name()
    }

    fn search(&self, instance: &ProblemInstance, routes: &RouteSet) -> RouteSet {
        self.operator().search(instance, routes)
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown neighborhood name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown neighborhood `{0}`")]
pub struct ParseNeighborhoodError(String);

impl FromStr for Neighborhood {
    type Err = ParseNeighborhoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|n| n.name() == s)
            .ok_or_else(|| ParseNeighborhoodError(s.to_string()))
    }
}
