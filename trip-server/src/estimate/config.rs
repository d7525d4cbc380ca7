//! Reference factor tables for the estimators.
//!
//! Every coefficient the calculator uses lives here. The defaults are
//! India-specific figures; a JSON file can override any section.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{HotelClass, PerMode, TravelMode};

/// Errors loading or validating factor tables.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Could not read the factor file
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Factor file is not valid JSON for this schema
    #[error("invalid factor file: {0}")]
    Json(#[from] serde_json::Error),

    /// A factor is outside its allowed range
    #[error("invalid factor {field}: {reason}")]
    Invalid { field: String, reason: String },
}

/// Per-passenger emission factor and its distance adjustment curve.
///
/// The adjustment is `regional * (intercept + slope_per_km * min(d, cap_km))`,
/// clamped to the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    /// kg CO2e per passenger-km
    pub base_kg_per_km: f64,
    pub intercept: f64,
    pub slope_per_km: f64,
    /// Distance beyond which the curve stays flat
    pub cap_km: f64,
    pub regional_multiplier: f64,
}

/// How a mode's route relates to the straight line, and how fast it goes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteFactor {
    /// Route length / geodesic distance (at least 1)
    pub multiplier: f64,
    /// Average speed including stops
    pub speed_kmh: f64,
    /// Fixed overhead: check-in, boarding, breaks
    pub buffer_hours: f64,
}

/// Fare model for a mode, per person.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostFactor {
    pub per_km_inr: f64,
    /// Fees independent of distance
    pub base_inr: f64,
}

/// Hotel emissions per person per night.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccommodationFactors {
    pub per_night_kg: f64,
    pub budget_multiplier: f64,
    pub standard_multiplier: f64,
    pub luxury_multiplier: f64,
}

impl AccommodationFactors {
    /// kg CO2e per person per night for a hotel class.
    pub fn per_night(&self, class: HotelClass) -> f64 {
        let multiplier = match class {
            HotelClass::Budget => self.budget_multiplier,
            HotelClass::Standard => self.standard_multiplier,
            HotelClass::Luxury => self.luxury_multiplier,
        };
        self.per_night_kg * multiplier
    }
}

impl Default for AccommodationFactors {
    fn default() -> Self {
        Self {
            per_night_kg: 30.0,
            budget_multiplier: 0.7,
            standard_multiplier: 1.0,
            luxury_multiplier: 1.5,
        }
    }
}

/// All factor tables used by the estimators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub emissions: PerMode<EmissionFactor>,
    pub routes: PerMode<RouteFactor>,
    pub costs: PerMode<CostFactor>,
    pub accommodation: AccommodationFactors,

    /// Lower clamp for the distance adjustment.
    pub min_adjustment: f64,
    /// Upper clamp for the distance adjustment.
    pub max_adjustment: f64,

    /// Shortest duration ever reported for a trip.
    pub min_duration_hours: f64,

    /// Longest trip distance the calculator accepts.
    pub max_distance_km: f64,
}

impl EstimatorConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON override from disk and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Check every factor is in range.
    ///
    /// Route multipliers below 1 are rejected: a route is never shorter
    /// than the geodesic.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for mode in TravelMode::ALL {
            let e = self.emissions.get(mode);
            non_negative(mode, "base_kg_per_km", e.base_kg_per_km)?;
            non_negative(mode, "cap_km", e.cap_km)?;
            non_negative(mode, "regional_multiplier", e.regional_multiplier)?;
            finite(mode, "intercept", e.intercept)?;
            finite(mode, "slope_per_km", e.slope_per_km)?;

            let r = self.routes.get(mode);
            if !(r.multiplier.is_finite() && r.multiplier >= 1.0) {
                return Err(invalid(mode, "multiplier", "must be at least 1"));
            }
            if !(r.speed_kmh.is_finite() && r.speed_kmh > 0.0) {
                return Err(invalid(mode, "speed_kmh", "must be positive"));
            }
            non_negative(mode, "buffer_hours", r.buffer_hours)?;

            let c = self.costs.get(mode);
            non_negative(mode, "per_km_inr", c.per_km_inr)?;
            non_negative(mode, "base_inr", c.base_inr)?;
        }

        let a = &self.accommodation;
        for (field, value) in [
            ("per_night_kg", a.per_night_kg),
            ("budget_multiplier", a.budget_multiplier),
            ("standard_multiplier", a.standard_multiplier),
            ("luxury_multiplier", a.luxury_multiplier),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field: format!("accommodation.{field}"),
                    reason: "must be a non-negative number".into(),
                });
            }
        }

        if !(self.min_adjustment > 0.0 && self.min_adjustment <= self.max_adjustment)
            || !self.max_adjustment.is_finite()
        {
            return Err(ConfigError::Invalid {
                field: "min_adjustment/max_adjustment".into(),
                reason: "need 0 < min <= max".into(),
            });
        }
        if !(self.min_duration_hours.is_finite() && self.min_duration_hours >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "min_duration_hours".into(),
                reason: "must be a non-negative number".into(),
            });
        }
        if !(self.max_distance_km > 0.0) {
            return Err(ConfigError::Invalid {
                field: "max_distance_km".into(),
                reason: "must be positive".into(),
            });
        }

        Ok(())
    }
}

fn invalid(mode: TravelMode, field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: format!("{}.{field}", mode.as_str().to_lowercase()),
        reason: reason.into(),
    }
}

fn non_negative(mode: TravelMode, field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(mode, field, "must be a non-negative number"))
    }
}

fn finite(mode: TravelMode, field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(mode, field, "must be finite"))
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            emissions: PerMode {
                // Short flights burn a larger share of fuel in take-off
                flight: EmissionFactor {
                    base_kg_per_km: 0.255,
                    intercept: 1.25,
                    slope_per_km: -0.0002,
                    cap_km: 2000.0,
                    regional_multiplier: 1.0,
                },
                train: EmissionFactor {
                    base_kg_per_km: 0.041,
                    intercept: 1.0,
                    slope_per_km: 0.0,
                    cap_km: 2000.0,
                    regional_multiplier: 0.95,
                },
                car: EmissionFactor {
                    base_kg_per_km: 0.171,
                    intercept: 1.0,
                    slope_per_km: -0.00005,
                    cap_km: 2000.0,
                    regional_multiplier: 1.05,
                },
                bus: EmissionFactor {
                    base_kg_per_km: 0.089,
                    intercept: 1.0,
                    slope_per_km: -0.00004,
                    cap_km: 2000.0,
                    regional_multiplier: 1.0,
                },
            },
            routes: PerMode {
                flight: RouteFactor {
                    multiplier: 1.0,
                    speed_kmh: 500.0,
                    buffer_hours: 3.0,
                },
                train: RouteFactor {
                    multiplier: 1.15,
                    speed_kmh: 60.0,
                    buffer_hours: 1.0,
                },
                car: RouteFactor {
                    multiplier: 1.2,
                    speed_kmh: 50.0,
                    buffer_hours: 0.5,
                },
                bus: RouteFactor {
                    multiplier: 1.25,
                    speed_kmh: 45.0,
                    buffer_hours: 1.0,
                },
            },
            costs: PerMode {
                flight: CostFactor {
                    per_km_inr: 8.0,
                    base_inr: 500.0,
                },
                train: CostFactor {
                    per_km_inr: 1.2,
                    base_inr: 50.0,
                },
                car: CostFactor {
                    per_km_inr: 6.0,
                    base_inr: 0.0,
                },
                bus: CostFactor {
                    per_km_inr: 2.5,
                    base_inr: 25.0,
                },
            },
            accommodation: AccommodationFactors::default(),
            min_adjustment: 0.8,
            max_adjustment: 1.3,
            min_duration_hours: 0.5,
            max_distance_km: 50_000.0,
        }
    }
}
