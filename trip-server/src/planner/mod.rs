//! Trip planning on top of the estimators.
//!
//! The calculator produces the footprint of the trip as entered, the ranker
//! compares it against every other mode, and the optimizer proposes routes
//! through intermediate cities.

mod calculator;
mod rank;
mod waypoints;

pub use calculator::CarbonCalculator;
pub use rank::{
    AlternativeRanker, EfficiencyAnalysis, Spread, analyze_efficiency, best_by_cost,
    best_by_emissions, filter_by_modes, rank_by_cost, rank_by_emissions, sort_alternatives,
};
pub use waypoints::{
    AlternateRoute, DEFAULT_MAX_WAYPOINTS, DEFAULT_ROUTE_LIMIT, RouteKind, RouteOptimizer,
};
