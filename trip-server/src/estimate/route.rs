//! Route length, duration and stops per travel mode.

use serde::{Deserialize, Serialize};

use crate::domain::TravelMode;

use super::EstimatorConfig;

/// What to optimise for when recommending a mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutePriority {
    /// Shortest duration first
    #[default]
    Speed,
    /// Shortest route first
    Distance,
    /// Most comfortable mode first
    Comfort,
}

/// Limits applied before recommending.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RouteConstraints {
    pub max_duration_hours: Option<f64>,
    pub max_distance_km: Option<f64>,
}

/// Predicted route for one mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDetails {
    pub mode: TravelMode,
    /// Distance along the route, not the straight line
    pub distance_km: f64,
    pub duration_hours: f64,
    pub stops: u32,
    pub average_speed_kmh: f64,
}

/// Route predictions from the factor tables.
#[derive(Debug, Clone, Copy)]
pub struct RoutePredictor<'a> {
    config: &'a EstimatorConfig,
}

impl<'a> RoutePredictor<'a> {
    pub fn new(config: &'a EstimatorConfig) -> Self {
        Self { config }
    }

    /// Travelled distance for a geodesic distance.
    ///
    /// Never shorter than the geodesic: route multipliers are at least 1.
    pub fn route_distance(&self, mode: TravelMode, geodesic_km: f64) -> f64 {
        geodesic_km * self.config.routes.get(mode).multiplier
    }

    /// Door-to-door hours for a route distance, including fixed overhead.
    pub fn duration_hours(&self, mode: TravelMode, route_km: f64) -> f64 {
        let r = self.config.routes.get(mode);
        let hours = route_km / r.speed_kmh + r.buffer_hours;
        hours.max(self.config.min_duration_hours)
    }

    /// Expected number of intermediate stops.
    pub fn estimated_stops(&self, mode: TravelMode, route_km: f64) -> u32 {
        let per = |km: f64| (route_km / km).floor() as u32;
        match mode {
            TravelMode::Flight => 0,
            TravelMode::Train => per(100.0).max(1),
            TravelMode::Car => per(200.0),
            TravelMode::Bus => per(50.0).max(1),
        }
    }

    /// Full prediction for one mode over a geodesic distance.
    pub fn route(&self, mode: TravelMode, geodesic_km: f64) -> RouteDetails {
        let distance_km = self.route_distance(mode, geodesic_km);
        RouteDetails {
            mode,
            distance_km,
            duration_hours: self.duration_hours(mode, distance_km),
            stops: self.estimated_stops(mode, distance_km),
            average_speed_kmh: self.config.routes.get(mode).speed_kmh,
        }
    }

    /// Predictions for `modes`, fastest first.
    pub fn compare_routes(
        &self,
        geodesic_km: f64,
        modes: impl IntoIterator<Item = TravelMode>,
    ) -> Vec<RouteDetails> {
        let mut routes: Vec<_> = modes
            .into_iter()
            .map(|m| self.route(m, geodesic_km))
            .collect();
        routes.sort_by(|a, b| {
            a.duration_hours
                .total_cmp(&b.duration_hours)
                .then(a.mode.cmp(&b.mode))
        });
        routes
    }

    /// Modes that satisfy `constraints`, best first for `priority`.
    pub fn recommendations(
        &self,
        geodesic_km: f64,
        constraints: RouteConstraints,
        priority: RoutePriority,
    ) -> Vec<RouteDetails> {
        let mut routes: Vec<_> = self
            .compare_routes(geodesic_km, TravelMode::ALL)
            .into_iter()
            .filter(|r| {
                constraints
                    .max_duration_hours
                    .is_none_or(|max| r.duration_hours <= max)
            })
            .filter(|r| {
                constraints
                    .max_distance_km
                    .is_none_or(|max| r.distance_km <= max)
            })
            .collect();

        match priority {
            // Already sorted by duration
            RoutePriority::Speed => {}
            RoutePriority::Distance => routes.sort_by(|a, b| {
                a.distance_km
                    .total_cmp(&b.distance_km)
                    .then(a.mode.cmp(&b.mode))
            }),
            RoutePriority::Comfort => {
                routes.sort_by_key(|r| std::cmp::Reverse(r.mode.comfort_rank()))
            }
        }
        routes
    }
}
