//! Geographic locations.

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A named place with WGS-84 coordinates.
///
/// Coordinates are validated at construction: any `Location` value has
/// finite coordinates with latitude in [-90, 90] and longitude in
/// [-180, 180].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    name: String,
    region: String,
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Create a location, validating its coordinates.
    pub fn new(
        name: impl Into<String>,
        region: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, DomainError> {
        let name = name.into();

        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidLocation(format!(
                "{name}: latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidLocation(format!(
                "{name}: longitude {longitude} is outside [-180, 180]"
            )));
        }

        Ok(Self {
            name,
            region: region.into(),
            latitude,
            longitude,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// `(latitude, longitude)` pair.
    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// How the user identified a place on the form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PlaceQuery {
    /// A named place, with manual coordinates for places outside the
    /// catalogue. Without coordinates the name is looked up.
    Coordinates {
        name: String,
        #[serde(default)]
        latitude: Option<f64>,
        #[serde(default)]
        longitude: Option<f64>,
    },
    /// A city name to look up in the catalogue
    Name(String),
}

impl PlaceQuery {
    /// Query by catalogue name.
    pub fn name(name: impl Into<String>) -> Self {
        PlaceQuery::Name(name.into())
    }

    /// Query with manual coordinates.
    pub fn coordinates(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        PlaceQuery::Coordinates {
            name: name.into(),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// The name the user typed, for messages.
    pub fn label(&self) -> &str {
        match self {
            PlaceQuery::Name(name) => name,
            PlaceQuery::Coordinates { name, .. } => name,
        }
    }
}
