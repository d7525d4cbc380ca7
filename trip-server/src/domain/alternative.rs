//! Alternative travel options.

use serde::Serialize;

use super::TravelMode;

/// The same trip made with a different travel mode, compared against the
/// baseline mode the user picked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeOption {
    pub mode: TravelMode,
    /// Route length, never shorter than the geodesic distance
    pub distance_km: f64,
    pub duration_hours: f64,
    /// kg CO2e, whole party
    pub co2e_kg: f64,
    /// INR, whole party
    pub cost_inr: f64,
    /// Baseline CO2e minus this option's CO2e; negative means worse
    pub savings_kg: f64,
    /// This option's cost minus the baseline cost; negative means cheaper
    pub cost_delta_inr: f64,
}

impl AlternativeOption {
    /// Savings as a percentage of the baseline emissions.
    ///
    /// Zero when the baseline itself is zero.
    pub fn savings_pct(&self, baseline_kg: f64) -> f64 {
        if baseline_kg == 0.0 {
            return 0.0;
        }
        self.savings_kg / baseline_kg * 100.0
    }

    /// Whether this option emits less than the baseline.
    pub fn is_greener(&self) -> bool {
        self.savings_kg > 0.0
    }
}
