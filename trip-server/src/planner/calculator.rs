//! Whole-trip carbon footprint.

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, TravelMode, TripEmissions, TripRequest};
use crate::estimate::{EmissionEstimator, EstimatorConfig};

/// Flights shorter than this get a warning suggesting ground transport.
const SHORT_FLIGHT_KM: f64 = 300.0;

/// Turns a validated trip and its distance into a [`TripEmissions`].
#[derive(Debug, Clone, Copy)]
pub struct CarbonCalculator<'a> {
    config: &'a EstimatorConfig,
}

impl<'a> CarbonCalculator<'a> {
    pub fn new(config: &'a EstimatorConfig) -> Self {
        Self { config }
    }

    /// Calculate transport and accommodation emissions for `trip`.
    ///
    /// `distance_km` is the geodesic distance between origin and
    /// destination. It must be finite and within `0..=max_distance_km`.
    pub fn calculate(
        &self,
        trip: &TripRequest,
        distance_km: f64,
    ) -> Result<TripEmissions, DomainError> {
        self.calculate_at(trip, distance_km, Utc::now())
    }

    /// Like [`calculate`](Self::calculate) with a fixed timestamp.
    pub fn calculate_at(
        &self,
        trip: &TripRequest,
        distance_km: f64,
        calculated_at: DateTime<Utc>,
    ) -> Result<TripEmissions, DomainError> {
        self.check_distance(distance_km)?;

        let estimator = EmissionEstimator::new(self.config);
        let transport = trip
            .modes()
            .map(|mode| estimator.estimate_trip(mode, distance_km, trip.travelers()))
            .collect::<Result<Vec<_>, _>>()?;

        let accommodation_kg =
            estimator.accommodation(trip.hotel_nights(), trip.travelers(), trip.hotel_class());

        let warnings = warnings(trip, distance_km);
        for warning in &warnings {
            tracing::debug!(%warning, "calculation warning");
        }

        Ok(TripEmissions {
            transport,
            accommodation_kg,
            travelers: trip.travelers(),
            calculated_at,
            warnings,
        })
    }

    fn check_distance(&self, distance_km: f64) -> Result<(), DomainError> {
        if !distance_km.is_finite() {
            return Err(DomainError::quantity("distance", "must be a finite number"));
        }
        if distance_km < 0.0 {
            return Err(DomainError::quantity("distance", "cannot be negative"));
        }
        if distance_km > self.config.max_distance_km {
            return Err(DomainError::quantity(
                "distance",
                format!("exceeds limit of {} km", self.config.max_distance_km),
            ));
        }
        Ok(())
    }
}

fn warnings(trip: &TripRequest, distance_km: f64) -> Vec<String> {
    let mut warnings = Vec::new();

    if distance_km == 0.0 && trip.modes().next().is_some() {
        warnings.push("origin and destination are the same place".to_string());
    }

    if trip.has_mode(TravelMode::Flight) && distance_km > 0.0 && distance_km < SHORT_FLIGHT_KM {
        warnings.push(format!(
            "flights under {SHORT_FLIGHT_KM} km are rarely worth it; consider train or bus"
        ));
    }

    if let Some(days) = trip.dates().and_then(|d| d.duration_days()) {
        if i64::from(trip.hotel_nights()) > days {
            warnings.push(format!(
                "{} hotel nights booked for a {days}-day trip",
                trip.hotel_nights()
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HotelClass, Location, TripDates};
    use crate::places::{geodesic_km, india_cities};

    fn city(name: &str) -> Location {
        india_cities().lookup(name).unwrap().clone()
    }

    fn salem_chennai(modes: &[TravelMode], travelers: i64, nights: i64) -> TripRequest {
        TripRequest::new(
            city("Salem"),
            city("Chennai"),
            modes.iter().copied(),
            travelers,
            nights,
        )
        .unwrap()
    }

    #[test]
    fn salem_to_chennai_by_car() {
        let config = EstimatorConfig::default();
        let calc = CarbonCalculator::new(&config);
        let trip = salem_chennai(&[TravelMode::Car], 1, 0);
        let d = geodesic_km(trip.origin(), trip.destination());

        let result = calc.calculate(&trip, d).unwrap();

        let adjustment = 1.05 * (1.0 - 0.00005 * d);
        let expected = 0.171 * d * adjustment;
        assert!((result.transport_kg() - expected).abs() < 1e-9);
        assert_eq!(result.accommodation_kg, 0.0);
        assert_eq!(result.total_kg(), result.transport_kg());
        assert!(!result.has_warnings());
    }

    #[test]
    fn four_travelers_is_four_times() {
        let config = EstimatorConfig::default();
        let calc = CarbonCalculator::new(&config);
        let one = salem_chennai(&[TravelMode::Car], 1, 0);
        let four = one.with_travelers(4).unwrap();
        let d = geodesic_km(one.origin(), one.destination());

        let a = calc.calculate(&one, d).unwrap();
        let b = calc.calculate(&four, d).unwrap();
        assert!((b.total_kg() - 4.0 * a.total_kg()).abs() < 1e-9);
        assert!((b.per_person_kg() - a.per_person_kg()).abs() < 1e-9);
    }

    #[test]
    fn accommodation_added_to_total() {
        let config = EstimatorConfig::default();
        let calc = CarbonCalculator::new(&config);
        let trip = salem_chennai(&[TravelMode::Train, TravelMode::Bus], 2, 3)
            .with_hotel_class(HotelClass::Luxury);

        let result = calc.calculate(&trip, 279.0).unwrap();
        assert_eq!(result.transport.len(), 2);
        assert_eq!(result.accommodation_kg, 45.0 * 3.0 * 2.0);
        assert_eq!(
            result.total_kg(),
            result.transport_kg() + result.accommodation_kg
        );
        let b = result.breakdown();
        assert!((b.transport_pct + b.accommodation_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn hotel_only_trip() {
        let config = EstimatorConfig::default();
        let calc = CarbonCalculator::new(&config);
        let trip = salem_chennai(&[], 1, 2);
        let result = calc.calculate(&trip, 279.0).unwrap();
        assert!(result.transport.is_empty());
        assert_eq!(result.total_kg(), 60.0);
    }

    #[test]
    fn rejects_bad_distance() {
        let config = EstimatorConfig::default();
        let calc = CarbonCalculator::new(&config);
        let trip = salem_chennai(&[TravelMode::Car], 1, 0);
        for d in [-1.0, f64::NAN, 60_000.0] {
            assert!(matches!(
                calc.calculate(&trip, d),
                Err(DomainError::InvalidQuantity { field: "distance", .. })
            ));
        }
    }

    #[test]
    fn warns_on_short_flight() {
        let config = EstimatorConfig::default();
        let calc = CarbonCalculator::new(&config);
        let trip = TripRequest::new(city("Mumbai"), city("Pune"), [TravelMode::Flight], 1, 0)
            .unwrap();
        let result = calc.calculate(&trip, 120.0).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("flights under"));
    }

    #[test]
    fn warns_on_too_many_nights() {
        let config = EstimatorConfig::default();
        let calc = CarbonCalculator::new(&config);
        let dates = TripDates::parse("2025-01-10", Some("2025-01-12")).unwrap();
        let trip = salem_chennai(&[TravelMode::Bus], 1, 5).with_dates(dates);
        let result = calc.calculate(&trip, 279.0).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("5 hotel nights")));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::places::india_cities;
    use proptest::prelude::*;

    fn modes_strategy() -> impl Strategy<Value = Vec<TravelMode>> {
        prop::sample::subsequence(TravelMode::ALL.to_vec(), 1..=4)
    }

    proptest! {
        #[test]
        fn transport_scales_with_travelers(
            modes in modes_strategy(),
            n in 1i64..=100,
            nights in 0i64..=30,
            d in 0.0f64..5_000.0,
        ) {
            let catalog = india_cities();
            let config = EstimatorConfig::default();
            let calc = CarbonCalculator::new(&config);
            let origin = catalog.lookup("Delhi").unwrap().clone();
            let destination = catalog.lookup("Goa").unwrap().clone();

            let one = TripRequest::new(origin, destination, modes, 1, nights).unwrap();
            let many = one.with_travelers(n).unwrap();

            let a = calc.calculate(&one, d).unwrap();
            let b = calc.calculate(&many, d).unwrap();

            let expected = n as f64 * a.transport_kg();
            prop_assert!((b.transport_kg() - expected).abs() <= 1e-9 * expected.max(1.0));
            prop_assert_eq!(b.total_kg(), b.transport_kg() + b.accommodation_kg);
        }
    }
}
