//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AlternativeOption, DomainError, EmissionEstimate, HotelClass, Location, PlaceQuery,
    TravelMode, TripDates, TripEmissions, TripRequest,
};
use crate::places::LocationCatalog;
use crate::planner::{AlternateRoute, RouteKind};
use crate::session::TripContext;

/// Round a mass to grams.
pub fn round_kg(kg: f64) -> f64 {
    (kg * 1000.0).round() / 1000.0
}

/// Round to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn non_blank(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.trim().is_empty())
}

fn default_travelers() -> i64 {
    1
}

/// Trip form as submitted by the browser or an API client.
#[derive(Debug, Deserialize)]
pub struct TripForm {
    /// City name, or `{ name, latitude, longitude }`
    pub origin: PlaceQuery,

    pub destination: PlaceQuery,

    /// Mode names, e.g. `["Train", "bus"]`
    #[serde(default)]
    pub modes: Vec<String>,

    #[serde(default = "default_travelers")]
    pub travelers: i64,

    #[serde(default)]
    pub hotel_nights: i64,

    #[serde(default)]
    pub hotel_class: HotelClass,

    /// Outbound date, `YYYY-MM-DD`
    pub outbound_date: Option<String>,

    /// Return date, `YYYY-MM-DD`
    pub return_date: Option<String>,
}

impl TripForm {
    /// Validate the form against the catalogue.
    ///
    /// Fails on the first problem: unknown places, unknown modes, counts out
    /// of range or bad dates.
    pub fn into_trip(self, catalog: &LocationCatalog) -> Result<TripRequest, DomainError> {
        let origin = catalog.resolve(&self.origin)?;
        let destination = catalog.resolve(&self.destination)?;
        let modes = self
            .modes
            .iter()
            .map(|m| TravelMode::parse(m))
            .collect::<Result<Vec<_>, _>>()?;

        let trip = TripRequest::new(
            origin,
            destination,
            modes,
            self.travelers,
            self.hotel_nights,
        )?
        .with_hotel_class(self.hotel_class);

        match (non_blank(&self.outbound_date), non_blank(&self.return_date)) {
            (Some(outbound), return_date) => {
                let dates = TripDates::parse(outbound, return_date)?;
                Ok(trip.with_dates(dates))
            }
            (None, Some(_)) => Err(DomainError::InvalidDate(
                "return date without outbound date".into(),
            )),
            (None, None) => Ok(trip),
        }
    }
}

/// One mode's transport emissions.
#[derive(Debug, Serialize)]
pub struct ModeEmissionsResult {
    pub mode: TravelMode,
    pub distance_km: f64,
    pub per_person_kg: f64,
    pub total_kg: f64,
}

impl ModeEmissionsResult {
    pub fn from_estimate(e: &EmissionEstimate) -> Self {
        Self {
            mode: e.mode,
            distance_km: round2(e.distance_km),
            per_person_kg: round_kg(e.per_person_kg),
            total_kg: round_kg(e.total_kg),
        }
    }
}

/// Emissions for the whole trip.
#[derive(Debug, Serialize)]
pub struct EmissionsResult {
    pub transport: Vec<ModeEmissionsResult>,
    pub transport_kg: f64,
    pub accommodation_kg: f64,
    pub total_kg: f64,
    pub per_person_kg: f64,
    pub transport_pct: f64,
    pub accommodation_pct: f64,
    pub calculated_at: DateTime<Utc>,
    pub warnings: Vec<String>,
}

impl EmissionsResult {
    pub fn from_emissions(e: &TripEmissions) -> Self {
        let breakdown = e.breakdown();
        Self {
            transport: e
                .transport
                .iter()
                .map(ModeEmissionsResult::from_estimate)
                .collect(),
            transport_kg: round_kg(e.transport_kg()),
            accommodation_kg: round_kg(e.accommodation_kg),
            total_kg: round_kg(e.total_kg()),
            per_person_kg: round_kg(e.per_person_kg()),
            transport_pct: round2(breakdown.transport_pct),
            accommodation_pct: round2(breakdown.accommodation_pct),
            calculated_at: e.calculated_at,
            warnings: e.warnings.clone(),
        }
    }
}

/// One mode compared with the baseline.
#[derive(Debug, Serialize)]
pub struct AlternativeResult {
    pub mode: TravelMode,
    pub distance_km: f64,
    pub duration_hours: f64,
    pub co2e_kg: f64,
    pub cost_inr: f64,
    pub savings_kg: f64,
    pub savings_pct: f64,
    pub cost_delta_inr: f64,
}

impl AlternativeResult {
    pub fn from_option(o: &AlternativeOption, baseline_kg: f64) -> Self {
        Self {
            mode: o.mode,
            distance_km: round2(o.distance_km),
            duration_hours: round2(o.duration_hours),
            co2e_kg: round_kg(o.co2e_kg),
            cost_inr: round2(o.cost_inr),
            savings_kg: round_kg(o.savings_kg),
            savings_pct: round2(o.savings_pct(baseline_kg)),
            cost_delta_inr: round2(o.cost_delta_inr),
        }
    }
}

/// Response to a trip calculation.
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub origin: String,
    pub destination: String,
    /// Straight-line distance
    pub distance_km: f64,
    pub travelers: u32,
    pub emissions: EmissionsResult,
    /// The selected mode's own route figures, if any mode was selected
    pub baseline: Option<AlternativeResult>,
    pub alternatives: Vec<AlternativeResult>,
    /// Routes through intermediate cities, when both ends are catalogue
    /// cities
    pub routes: Vec<AlternateRouteResult>,
}

impl CalculateResponse {
    /// Build from a calculated context. `None` if the context holds no
    /// trip or no results.
    pub fn from_context(ctx: &TripContext) -> Option<Self> {
        let trip = ctx.trip()?;
        let emissions = ctx.emissions()?;
        let baseline_kg = ctx.baseline().map_or(0.0, |b| b.co2e_kg);

        Some(Self {
            origin: trip.origin().name().to_string(),
            destination: trip.destination().name().to_string(),
            distance_km: round2(ctx.distance_km().unwrap_or_default()),
            travelers: trip.travelers(),
            emissions: EmissionsResult::from_emissions(emissions),
            baseline: ctx
                .baseline()
                .map(|b| AlternativeResult::from_option(b, baseline_kg)),
            alternatives: ctx
                .alternatives()
                .iter()
                .map(|o| AlternativeResult::from_option(o, baseline_kg))
                .collect(),
            routes: Vec::new(),
        })
    }

    /// Attach alternate routes.
    pub fn with_routes(mut self, routes: &[AlternateRoute]) -> Self {
        self.routes = routes.iter().map(AlternateRouteResult::from_route).collect();
        self
    }
}

/// Query for city suggestions.
#[derive(Debug, Deserialize)]
pub struct CitySearchRequest {
    /// Partial city name
    pub q: String,

    /// Maximum number of results
    pub limit: Option<usize>,
}

/// A city in search results.
#[derive(Debug, Serialize)]
pub struct CityResult {
    pub name: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityResult {
    pub fn from_location(l: &Location) -> Self {
        Self {
            name: l.name().to_string(),
            region: l.region().to_string(),
            latitude: l.latitude(),
            longitude: l.longitude(),
        }
    }
}

/// City suggestions.
#[derive(Debug, Serialize)]
pub struct CitySearchResponse {
    pub cities: Vec<CityResult>,
}

/// A popular origin/destination pair.
#[derive(Debug, Serialize)]
pub struct PopularRouteResult {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
}

/// All popular pairs.
#[derive(Debug, Serialize)]
pub struct PopularRoutesResponse {
    pub routes: Vec<PopularRouteResult>,
}

/// Query for alternate routes between two catalogue cities.
#[derive(Debug, Deserialize)]
pub struct AlternatesRequest {
    pub origin: String,
    pub destination: String,
    pub limit: Option<usize>,
}

/// An alternate route in the response.
#[derive(Debug, Serialize)]
pub struct AlternateRouteResult {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: RouteKind,
    pub waypoints: Vec<String>,
    pub distance_km: f64,
    /// Direct distance over route distance, in percent
    pub efficiency_pct: f64,
}

impl AlternateRouteResult {
    pub fn from_route(r: &AlternateRoute) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
            description: r.description.clone(),
            kind: r.kind,
            waypoints: r.waypoints.clone(),
            distance_km: round2(r.distance_km),
            efficiency_pct: round2(r.efficiency_pct()),
        }
    }
}

/// Alternate routes, best first.
#[derive(Debug, Serialize)]
pub struct AlternatesResponse {
    pub origin: String,
    pub destination: String,
    pub routes: Vec<AlternateRouteResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::india_cities;

    fn form(json: &str) -> TripForm {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn rounding() {
        assert_eq!(round_kg(1.23456), 1.235);
        assert_eq!(round_kg(0.0004), 0.0);
        assert_eq!(round2(2.345678), 2.35);
    }

    #[test]
    fn minimal_form() {
        let f = form(r#"{ "origin": "Salem", "destination": "Chennai", "modes": ["car"] }"#);
        let trip = f.into_trip(&india_cities()).unwrap();
        assert_eq!(trip.origin().name(), "Salem");
        assert_eq!(trip.travelers(), 1);
        assert_eq!(trip.hotel_nights(), 0);
        assert_eq!(trip.hotel_class(), HotelClass::Standard);
        assert!(trip.has_mode(TravelMode::Car));
        assert!(trip.dates().is_none());
    }

    #[test]
    fn full_form() {
        let f = form(
            r#"{
                "origin": { "name": "Ooty", "latitude": 11.4102, "longitude": 76.6950 },
                "destination": "Kochi",
                "modes": ["Bus", "Train"],
                "travelers": 3,
                "hotel_nights": 2,
                "hotel_class": "budget",
                "outbound_date": "2025-02-01",
                "return_date": "2025-02-03"
            }"#,
        );
        let trip = f.into_trip(&india_cities()).unwrap();
        assert_eq!(trip.origin().name(), "Ooty");
        assert_eq!(trip.travelers(), 3);
        assert_eq!(trip.hotel_class(), HotelClass::Budget);
        assert_eq!(trip.dates().unwrap().duration_days(), Some(2));
        assert_eq!(trip.baseline_mode(), Some(TravelMode::Train));
    }

    #[test]
    fn form_errors() {
        let catalog = india_cities();

        let f = form(r#"{ "origin": "Atlantis", "destination": "Chennai", "modes": ["Car"] }"#);
        assert!(matches!(
            f.into_trip(&catalog),
            Err(DomainError::InvalidLocation(_))
        ));

        let f = form(r#"{ "origin": "Salem", "destination": "Chennai", "modes": ["Boat"] }"#);
        assert_eq!(
            f.into_trip(&catalog).unwrap_err(),
            DomainError::UnsupportedMode("Boat".into())
        );

        let f = form(
            r#"{ "origin": "Salem", "destination": "Chennai", "modes": ["Car"], "travelers": 0 }"#,
        );
        assert!(matches!(
            f.into_trip(&catalog),
            Err(DomainError::InvalidQuantity { field: "travelers", .. })
        ));

        let f = form(
            r#"{ "origin": "Salem", "destination": "Chennai", "modes": ["Car"],
                 "outbound_date": "2025-02-03", "return_date": "2025-02-01" }"#,
        );
        assert!(matches!(
            f.into_trip(&catalog),
            Err(DomainError::InvalidDate(_))
        ));

        let f = form(
            r#"{ "origin": "Salem", "destination": "Chennai", "modes": ["Car"],
                 "return_date": "2025-02-01" }"#,
        );
        assert_eq!(
            f.into_trip(&catalog).unwrap_err(),
            DomainError::InvalidDate("return date without outbound date".into())
        );

        let f = form(
            r#"{ "origin": { "name": "Ooty" }, "destination": "Chennai", "modes": ["Car"] }"#,
        );
        assert!(matches!(
            f.into_trip(&catalog),
            Err(DomainError::InvalidLocation(_))
        ));
    }

    #[test]
    fn named_place_object_uses_catalogue() {
        let f = form(
            r#"{ "origin": { "name": "Salem" }, "destination": "Chennai", "modes": ["Car"],
                 "outbound_date": "2025-02-01", "return_date": "" }"#,
        );
        let trip = f.into_trip(&india_cities()).unwrap();
        assert_eq!(trip.origin().region(), "Tamil Nadu");
        assert_eq!(trip.dates().unwrap().return_date, None);
    }
}
