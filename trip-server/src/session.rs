//! Per-request calculation state.

use serde::Serialize;

use crate::domain::{AlternativeOption, DomainError, TripEmissions, TripRequest};
use crate::estimate::EstimatorConfig;
use crate::planner::{AlternativeRanker, CarbonCalculator};

/// Outcome of the last calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum CalculationStatus {
    #[default]
    Pending,
    Complete,
    Failed(String),
}

/// Which parts of a context are filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextSummary {
    pub has_trip: bool,
    pub has_emissions: bool,
    pub has_alternatives: bool,
    pub alternative_count: usize,
    pub status: CalculationStatus,
}

/// A trip and everything calculated for it.
///
/// Created for one request and handed back to the caller; nothing is
/// shared between requests.
#[derive(Debug, Clone, Default)]
pub struct TripContext {
    trip: Option<TripRequest>,
    distance_km: Option<f64>,
    emissions: Option<TripEmissions>,
    baseline: Option<AlternativeOption>,
    alternatives: Vec<AlternativeOption>,
    status: CalculationStatus,
}

impl TripContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context holding `trip`, not yet calculated.
    pub fn with_trip(trip: TripRequest) -> Self {
        Self {
            trip: Some(trip),
            ..Self::default()
        }
    }

    /// Replace the trip, dropping any previous results.
    pub fn set_trip(&mut self, trip: TripRequest) {
        self.reset_calculations();
        self.trip = Some(trip);
    }

    /// Calculate emissions and alternatives for the stored trip.
    ///
    /// Alternatives are ranked against the trip's first selected mode over
    /// the same `distance_km`; a hotel-only trip has none. On failure the previous results are
    /// dropped and the status records the error.
    pub fn calculate(
        &mut self,
        config: &EstimatorConfig,
        distance_km: f64,
    ) -> Result<&TripEmissions, DomainError> {
        self.reset_calculations();

        let Some(trip) = self.trip.as_ref() else {
            let err = DomainError::quantity("trip", "no trip to calculate");
            self.status = CalculationStatus::Failed(err.to_string());
            return Err(err);
        };

        let emissions = match CarbonCalculator::new(config).calculate(trip, distance_km) {
            Ok(e) => e,
            Err(err) => {
                self.status = CalculationStatus::Failed(err.to_string());
                return Err(err);
            }
        };

        if let Some(mode) = trip.baseline_mode() {
            let ranker = AlternativeRanker::new(config);
            self.baseline = Some(ranker.baseline_over(trip, mode, distance_km));
            self.alternatives = ranker.rank_over(trip, mode, distance_km);
        }

        self.distance_km = Some(distance_km);
        self.status = CalculationStatus::Complete;
        Ok(self.emissions.insert(emissions))
    }

    pub fn trip(&self) -> Option<&TripRequest> {
        self.trip.as_ref()
    }

    /// Geodesic distance used by the last successful calculation.
    pub fn distance_km(&self) -> Option<f64> {
        self.distance_km
    }

    pub fn emissions(&self) -> Option<&TripEmissions> {
        self.emissions.as_ref()
    }

    /// Figures for the trip's own mode, the reference for savings.
    pub fn baseline(&self) -> Option<&AlternativeOption> {
        self.baseline.as_ref()
    }

    pub fn alternatives(&self) -> &[AlternativeOption] {
        &self.alternatives
    }

    pub fn status(&self) -> &CalculationStatus {
        &self.status
    }

    /// Drop results but keep the trip.
    pub fn reset_calculations(&mut self) {
        self.distance_km = None;
        self.emissions = None;
        self.baseline = None;
        self.alternatives.clear();
        self.status = CalculationStatus::Pending;
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn summary(&self) -> ContextSummary {
        ContextSummary {
            has_trip: self.trip.is_some(),
            has_emissions: self.emissions.is_some(),
            has_alternatives: !self.alternatives.is_empty(),
            alternative_count: self.alternatives.len(),
            status: self.status.clone(),
        }
    }
}
