//! Alternative ranking for trip results.
//!
//! Compares every supported mode against the mode the user picked and
//! orders the alternatives so the greenest options come first.

use std::cmp::Ordering;

use serde::Serialize;

use crate::domain::{AlternativeOption, DomainError, TravelMode, TripRequest};
use crate::estimate::{CostEstimator, EmissionEstimator, EstimatorConfig, RoutePredictor};
use crate::places::geodesic_km;

/// Builds and ranks alternatives for a trip.
#[derive(Debug, Clone, Copy)]
pub struct AlternativeRanker<'a> {
    config: &'a EstimatorConfig,
}

impl<'a> AlternativeRanker<'a> {
    pub fn new(config: &'a EstimatorConfig) -> Self {
        Self { config }
    }

    /// Figures for the baseline mode itself, with zero deltas.
    pub fn baseline(&self, trip: &TripRequest, mode: TravelMode) -> AlternativeOption {
        let geodesic = geodesic_km(trip.origin(), trip.destination());
        self.baseline_over(trip, mode, geodesic)
    }

    /// Like [`baseline`](Self::baseline) over a given geodesic distance.
    ///
    /// `geodesic` must be finite and non-negative.
    pub fn baseline_over(
        &self,
        trip: &TripRequest,
        mode: TravelMode,
        geodesic: f64,
    ) -> AlternativeOption {
        self.option(mode, geodesic, trip.travelers())
    }

    /// Every supported mode other than `baseline`, ranked.
    ///
    /// Ordering is by savings (descending), then cost (ascending), then
    /// mode order.
    pub fn rank(&self, trip: &TripRequest, baseline: TravelMode) -> Vec<AlternativeOption> {
        let geodesic = geodesic_km(trip.origin(), trip.destination());
        self.rank_over(trip, baseline, geodesic)
    }

    /// Like [`rank`](Self::rank) over a given geodesic distance, so the
    /// alternatives match emissions calculated for that same distance.
    ///
    /// `geodesic` must be finite and non-negative.
    pub fn rank_over(
        &self,
        trip: &TripRequest,
        baseline: TravelMode,
        geodesic: f64,
    ) -> Vec<AlternativeOption> {
        let travelers = trip.travelers();
        let base = self.option(baseline, geodesic, travelers);

        let options = TravelMode::ALL
            .into_iter()
            .filter(|&m| m != baseline)
            .map(|m| {
                let mut option = self.option(m, geodesic, travelers);
                option.savings_kg = base.co2e_kg - option.co2e_kg;
                option.cost_delta_inr = option.cost_inr - base.cost_inr;
                option
            })
            .collect();

        sort_alternatives(options)
    }

    /// Like [`rank`](Self::rank) for a baseline mode given by name.
    pub fn rank_named(
        &self,
        trip: &TripRequest,
        baseline: &str,
    ) -> Result<Vec<AlternativeOption>, DomainError> {
        Ok(self.rank(trip, TravelMode::parse(baseline)?))
    }

    fn option(&self, mode: TravelMode, geodesic: f64, travelers: u32) -> AlternativeOption {
        let routes = RoutePredictor::new(self.config);
        let distance_km = routes.route_distance(mode, geodesic);
        let per_person = EmissionEstimator::new(self.config).estimate_checked(mode, distance_km);

        AlternativeOption {
            mode,
            distance_km,
            duration_hours: routes.duration_hours(mode, distance_km),
            co2e_kg: per_person * f64::from(travelers),
            cost_inr: CostEstimator::new(self.config).estimate(mode, distance_km, travelers),
            savings_kg: 0.0,
            cost_delta_inr: 0.0,
        }
    }
}

fn by_savings(a: &AlternativeOption, b: &AlternativeOption) -> Ordering {
    b.savings_kg
        .total_cmp(&a.savings_kg)
        .then_with(|| a.cost_inr.total_cmp(&b.cost_inr))
        .then_with(|| a.mode.cmp(&b.mode))
}

/// Sort alternatives best-first: most savings, then cheapest, then mode.
pub fn sort_alternatives(mut options: Vec<AlternativeOption>) -> Vec<AlternativeOption> {
    options.sort_by(by_savings);
    options
}

/// Sort by emissions, lowest first.
pub fn rank_by_emissions(mut options: Vec<AlternativeOption>) -> Vec<AlternativeOption> {
    options.sort_by(|a, b| a.co2e_kg.total_cmp(&b.co2e_kg).then(a.mode.cmp(&b.mode)));
    options
}

/// Sort by cost, cheapest first.
pub fn rank_by_cost(mut options: Vec<AlternativeOption>) -> Vec<AlternativeOption> {
    options.sort_by(|a, b| a.cost_inr.total_cmp(&b.cost_inr).then(a.mode.cmp(&b.mode)));
    options
}

/// The option with the lowest emissions.
pub fn best_by_emissions(options: &[AlternativeOption]) -> Option<&AlternativeOption> {
    options
        .iter()
        .min_by(|a, b| a.co2e_kg.total_cmp(&b.co2e_kg).then(a.mode.cmp(&b.mode)))
}

/// The cheapest option.
pub fn best_by_cost(options: &[AlternativeOption]) -> Option<&AlternativeOption> {
    options
        .iter()
        .min_by(|a, b| a.cost_inr.total_cmp(&b.cost_inr).then(a.mode.cmp(&b.mode)))
}

/// Keep only options for the given modes, preserving order.
pub fn filter_by_modes(
    options: Vec<AlternativeOption>,
    modes: &[TravelMode],
) -> Vec<AlternativeOption> {
    options
        .into_iter()
        .filter(|o| modes.contains(&o.mode))
        .collect()
}

/// Minimum, maximum and mean of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spread {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl Spread {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut spread = Spread {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            avg: 0.0,
        };
        for v in values {
            spread.min = spread.min.min(v);
            spread.max = spread.max.max(v);
            spread.avg += v;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        spread.avg /= count as f64;
        Some(spread)
    }
}

/// Summary statistics across a set of alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EfficiencyAnalysis {
    pub emissions: Spread,
    pub cost: Spread,
    pub duration: Spread,
    pub distance: Spread,
}

/// Spread of each metric across `options`. `None` when empty.
pub fn analyze_efficiency(options: &[AlternativeOption]) -> Option<EfficiencyAnalysis> {
    Some(EfficiencyAnalysis {
        emissions: Spread::of(options.iter().map(|o| o.co2e_kg))?,
        cost: Spread::of(options.iter().map(|o| o.cost_inr))?,
        duration: Spread::of(options.iter().map(|o| o.duration_hours))?,
        distance: Spread::of(options.iter().map(|o| o.distance_km))?,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn option_strategy() -> impl Strategy<Value = AlternativeOption> {
        (
            prop::sample::select(TravelMode::ALL.to_vec()),
            0.0f64..1_000.0,
            0.0f64..50_000.0,
            -500.0f64..500.0,
        )
            .prop_map(|(mode, co2e_kg, cost_inr, savings_kg)| AlternativeOption {
                mode,
                distance_km: 100.0,
                duration_hours: 2.0,
                co2e_kg,
                cost_inr,
                savings_kg,
                cost_delta_inr: 0.0,
            })
    }

    proptest! {
        #[test]
        fn ranking_is_sorted(options in prop::collection::vec(option_strategy(), 0..10)) {
            let ranked = sort_alternatives(options);
            for w in ranked.windows(2) {
                prop_assert!(
                    by_savings(&w[0], &w[1]) != Ordering::Greater,
                    "Not sorted: {:?} should come before {:?}",
                    w[1],
                    w[0]
                );
            }
        }

        #[test]
        fn ranking_is_idempotent(options in prop::collection::vec(option_strategy(), 0..10)) {
            let once = sort_alternatives(options);
            let twice = sort_alternatives(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn rank_covers_other_modes(
            travelers in 1i64..=100,
            lat in 8.0f64..30.0,
            lon in 70.0f64..88.0,
            baseline in prop::sample::select(TravelMode::ALL.to_vec()),
        ) {
            let config = EstimatorConfig::default();
            let ranker = AlternativeRanker::new(&config);
            let origin = crate::domain::Location::new("A", "", 13.0827, 80.2707).unwrap();
            let destination = crate::domain::Location::new("B", "", lat, lon).unwrap();
            let trip = TripRequest::new(origin, destination, [baseline], travelers, 0).unwrap();

            let ranked = ranker.rank(&trip, baseline);
            prop_assert_eq!(ranked.len(), 3);
            prop_assert!(ranked.iter().all(|o| o.mode != baseline && o.co2e_kg >= 0.0));
            prop_assert_eq!(sort_alternatives(ranked.clone()), ranked);
        }
    }
}
