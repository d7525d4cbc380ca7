//! Per-mode emission estimates.

use crate::domain::{DomainError, EmissionEstimate, HotelClass, TravelMode};

use super::EstimatorConfig;

/// Estimates CO2e from the factor tables.
///
/// Stateless: every method is a pure function of its arguments and the
/// borrowed configuration.
#[derive(Debug, Clone, Copy)]
pub struct EmissionEstimator<'a> {
    config: &'a EstimatorConfig,
}

impl<'a> EmissionEstimator<'a> {
    pub fn new(config: &'a EstimatorConfig) -> Self {
        Self { config }
    }

    /// Correction to the base factor for a trip of `distance_km`.
    ///
    /// Always within `[min_adjustment, max_adjustment]`.
    pub fn distance_adjustment(&self, mode: TravelMode, distance_km: f64) -> f64 {
        let f = self.config.emissions.get(mode);
        let d = distance_km.clamp(0.0, f.cap_km);
        let raw = f.regional_multiplier * (f.intercept + f.slope_per_km * d);
        raw.clamp(self.config.min_adjustment, self.config.max_adjustment)
    }

    /// kg CO2e per passenger-km after the distance adjustment.
    pub fn emission_factor(&self, mode: TravelMode, distance_km: f64) -> Result<f64, DomainError> {
        check_distance(distance_km)?;
        Ok(self.factor(mode, distance_km))
    }

    /// kg CO2e for one traveler covering `distance_km` by `mode`.
    ///
    /// Non-negative for every non-negative distance; negative or non-finite
    /// distances fail with `InvalidQuantity`.
    pub fn estimate(&self, mode: TravelMode, distance_km: f64) -> Result<f64, DomainError> {
        check_distance(distance_km)?;
        Ok(self.estimate_checked(mode, distance_km))
    }

    /// Per-person estimate for a distance the caller has already validated,
    /// such as a geodesic between two valid locations.
    pub(crate) fn estimate_checked(&self, mode: TravelMode, distance_km: f64) -> f64 {
        debug_assert!(distance_km.is_finite() && distance_km >= 0.0);
        self.factor(mode, distance_km) * distance_km
    }

    fn factor(&self, mode: TravelMode, distance_km: f64) -> f64 {
        let base = self.config.emissions.get(mode).base_kg_per_km;
        base * self.distance_adjustment(mode, distance_km)
    }

    /// Like [`estimate`](Self::estimate) for a mode given by name.
    ///
    /// Fails with `UnsupportedMode` for names outside the enumeration.
    pub fn estimate_named(&self, mode: &str, distance_km: f64) -> Result<f64, DomainError> {
        self.estimate(TravelMode::parse(mode)?, distance_km)
    }

    /// Estimate for a whole party.
    pub fn estimate_trip(
        &self,
        mode: TravelMode,
        distance_km: f64,
        travelers: u32,
    ) -> Result<EmissionEstimate, DomainError> {
        let per_person = self.estimate(mode, distance_km)?;
        Ok(EmissionEstimate::new(mode, distance_km, per_person, travelers))
    }

    /// kg CO2e for hotel nights, whole party.
    pub fn accommodation(&self, nights: u32, travelers: u32, class: HotelClass) -> f64 {
        self.config.accommodation.per_night(class) * f64::from(nights) * f64::from(travelers)
    }
}

fn check_distance(distance_km: f64) -> Result<(), DomainError> {
    if !distance_km.is_finite() {
        return Err(DomainError::quantity("distance", "must be a finite number"));
    }
    if distance_km < 0.0 {
        return Err(DomainError::quantity("distance", "cannot be negative"));
    }
    Ok(())
}
