//! Emission results.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::TravelMode;

/// Emissions for one travel mode over one distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionEstimate {
    pub mode: TravelMode,
    pub distance_km: f64,
    /// kg CO2e for one traveler
    pub per_person_kg: f64,
    /// kg CO2e for the whole party
    pub total_kg: f64,
}

impl EmissionEstimate {
    /// Create an estimate, scaling the per-person figure by the party size.
    pub fn new(mode: TravelMode, distance_km: f64, per_person_kg: f64, travelers: u32) -> Self {
        Self {
            mode,
            distance_km,
            per_person_kg,
            total_kg: per_person_kg * f64::from(travelers),
        }
    }
}

/// Share of the total by source, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakdown {
    pub transport_pct: f64,
    pub accommodation_pct: f64,
}

/// Carbon footprint of a whole trip.
///
/// Totals are derived from the parts, so
/// `total_kg() == transport_kg() + accommodation_kg` always holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripEmissions {
    /// One estimate per selected travel mode
    pub transport: Vec<EmissionEstimate>,
    /// kg CO2e for hotel nights, whole party
    pub accommodation_kg: f64,
    pub travelers: u32,
    pub calculated_at: DateTime<Utc>,
    /// Non-fatal issues found while calculating
    pub warnings: Vec<String>,
}

impl TripEmissions {
    /// kg CO2e across all selected modes, whole party.
    pub fn transport_kg(&self) -> f64 {
        self.transport.iter().map(|e| e.total_kg).sum()
    }

    /// kg CO2e for the trip, whole party.
    pub fn total_kg(&self) -> f64 {
        self.transport_kg() + self.accommodation_kg
    }

    /// kg CO2e per traveler.
    pub fn per_person_kg(&self) -> f64 {
        self.total_kg() / f64::from(self.travelers.max(1))
    }

    /// The estimate for one mode, if it was selected.
    pub fn for_mode(&self, mode: TravelMode) -> Option<&EmissionEstimate> {
        self.transport.iter().find(|e| e.mode == mode)
    }

    /// Percentage split between transport and accommodation.
    ///
    /// Both shares are zero for a zero total.
    pub fn breakdown(&self) -> Breakdown {
        let total = self.total_kg();
        if total == 0.0 {
            return Breakdown {
                transport_pct: 0.0,
                accommodation_pct: 0.0,
            };
        }
        Breakdown {
            transport_pct: self.transport_kg() / total * 100.0,
            accommodation_pct: self.accommodation_kg / total * 100.0,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emissions(transport: Vec<EmissionEstimate>, accommodation_kg: f64) -> TripEmissions {
        TripEmissions {
            transport,
            accommodation_kg,
            travelers: 2,
            calculated_at: Utc::now(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn estimate_scales_by_party() {
        let e = EmissionEstimate::new(TravelMode::Car, 100.0, 17.1, 3);
        assert!((e.total_kg - 51.3).abs() < 1e-9);
    }

    #[test]
    fn totals_add_up() {
        let result = emissions(
            vec![
                EmissionEstimate::new(TravelMode::Train, 100.0, 4.0, 2),
                EmissionEstimate::new(TravelMode::Bus, 100.0, 9.0, 2),
            ],
            60.0,
        );
        assert_eq!(result.transport_kg(), 26.0);
        assert_eq!(result.total_kg(), 86.0);
        assert_eq!(result.per_person_kg(), 43.0);
        assert_eq!(result.for_mode(TravelMode::Bus).unwrap().total_kg, 18.0);
        assert!(result.for_mode(TravelMode::Flight).is_none());
    }

    #[test]
    fn breakdown_percentages() {
        let result = emissions(
            vec![EmissionEstimate::new(TravelMode::Car, 10.0, 15.0, 2)],
            10.0,
        );
        let b = result.breakdown();
        assert_eq!(b.transport_pct, 75.0);
        assert_eq!(b.accommodation_pct, 25.0);
    }

    #[test]
    fn breakdown_of_zero_total() {
        let b = emissions(vec![], 0.0).breakdown();
        assert_eq!(b.transport_pct, 0.0);
        assert_eq!(b.accommodation_pct, 0.0);
    }
}
