//! City reference data and geodesic distances.
//!
//! The catalogue maps city names to coordinates; the distance estimator
//! measures between catalogue cities or manually entered coordinates.

mod catalog;
mod distance;

pub use catalog::{
    DEFAULT_SUGGESTION_LIMIT, LocationCatalog, LocationCatalogBuilder, india_cities,
};
pub use distance::{GeoDistanceEstimator, geodesic_km};
