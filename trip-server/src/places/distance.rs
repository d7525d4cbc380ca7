//! Geodesic distance between locations.

use std::cmp::Ordering;

use geo::{Distance, Geodesic, Point};

use crate::domain::{DomainError, Location, PlaceQuery};

use super::LocationCatalog;

/// Distance in kilometres along the WGS-84 ellipsoid.
///
/// The result is symmetric bit-for-bit: the two points are put in a fixed
/// order before the geodesic is solved. Identical points give exactly zero.
pub fn geodesic_km(a: &Location, b: &Location) -> f64 {
    let (first, second) = match cmp_coordinates(a, b) {
        Ordering::Equal => return 0.0,
        Ordering::Less => (a, b),
        Ordering::Greater => (b, a),
    };

    let p1 = Point::new(first.longitude(), first.latitude());
    let p2 = Point::new(second.longitude(), second.latitude());

    Geodesic::distance(p1, p2) / 1000.0
}

fn cmp_coordinates(a: &Location, b: &Location) -> Ordering {
    a.latitude()
        .total_cmp(&b.latitude())
        .then_with(|| a.longitude().total_cmp(&b.longitude()))
}

/// Distance lookups against a location catalogue.
#[derive(Debug, Clone, Copy)]
pub struct GeoDistanceEstimator<'a> {
    catalog: &'a LocationCatalog,
}

impl<'a> GeoDistanceEstimator<'a> {
    pub fn new(catalog: &'a LocationCatalog) -> Self {
        Self { catalog }
    }

    /// Geodesic distance between two resolved locations.
    pub fn distance(&self, a: &Location, b: &Location) -> f64 {
        geodesic_km(a, b)
    }

    /// Geodesic distance between two places from the form.
    ///
    /// Fails with `InvalidLocation` when a name is not in the catalogue and
    /// no coordinates were supplied for it.
    pub fn distance_between(
        &self,
        origin: &PlaceQuery,
        destination: &PlaceQuery,
    ) -> Result<f64, DomainError> {
        let origin = self.catalog.resolve(origin)?;
        let destination = self.catalog.resolve(destination)?;
        Ok(geodesic_km(&origin, &destination))
    }

    /// Geodesic distance between two catalogue cities.
    pub fn distance_by_name(&self, origin: &str, destination: &str) -> Result<f64, DomainError> {
        let origin = self.catalog.lookup(origin)?;
        let destination = self.catalog.lookup(destination)?;
        Ok(geodesic_km(origin, destination))
    }
}
