//! Estimators over the reference factor tables.
//!
//! Each estimator borrows an [`EstimatorConfig`] and is a pure function of
//! its inputs, so one config can be shared across concurrent requests.

mod config;
mod cost;
mod emissions;
mod route;

pub use config::{
    AccommodationFactors, ConfigError, CostFactor, EmissionFactor, EstimatorConfig, RouteFactor,
};
pub use cost::{CostBreakdown, CostEstimator, FareClass, ServiceClass, fare_class};
pub use emissions::EmissionEstimator;
pub use route::{RouteConstraints, RouteDetails, RoutePredictor, RoutePriority};
