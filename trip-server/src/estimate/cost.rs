//! Ticket and fuel cost estimates in Indian rupees.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, TravelMode};

use super::EstimatorConfig;

/// Level of service the traveler books.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceClass {
    Budget,
    #[default]
    Standard,
    Premium,
}

impl ServiceClass {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "budget" => Ok(ServiceClass::Budget),
            "standard" => Ok(ServiceClass::Standard),
            "premium" => Ok(ServiceClass::Premium),
            _ => Err(DomainError::quantity(
                "service class",
                format!("unknown class {:?}", s.trim()),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceClass::Budget => "budget",
            ServiceClass::Standard => "standard",
            ServiceClass::Premium => "premium",
        }
    }
}

impl fmt::Display for ServiceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable fare class and its per-km rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareClass {
    pub name: &'static str,
    pub per_km_inr: f64,
}

/// The fare class a service class maps to for a mode.
///
/// Cars have no premium tier, so premium falls back to petrol.
pub fn fare_class(mode: TravelMode, class: ServiceClass) -> FareClass {
    let (name, per_km_inr) = match (mode, class) {
        (TravelMode::Flight, ServiceClass::Budget | ServiceClass::Standard) => ("economy", 6.0),
        (TravelMode::Flight, ServiceClass::Premium) => ("business", 12.0),
        (TravelMode::Train, ServiceClass::Budget) => ("sleeper", 0.8),
        (TravelMode::Train, ServiceClass::Standard) => ("ac_3tier", 1.2),
        (TravelMode::Train, ServiceClass::Premium) => ("ac_1tier", 2.5),
        (TravelMode::Car, ServiceClass::Budget) => ("diesel", 4.8),
        (TravelMode::Car, ServiceClass::Standard | ServiceClass::Premium) => ("petrol", 5.5),
        (TravelMode::Bus, ServiceClass::Budget) => ("ordinary", 1.5),
        (TravelMode::Bus, ServiceClass::Standard) => ("ac", 2.5),
        (TravelMode::Bus, ServiceClass::Premium) => ("volvo", 3.5),
    };
    FareClass { name, per_km_inr }
}

/// Itemised cost for one mode and fare class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub mode: TravelMode,
    pub fare_class: &'static str,
    pub distance_km: f64,
    pub travelers: u32,
    /// Distance-independent fees, whole party
    pub base_cost_inr: f64,
    /// Per-km charges, whole party
    pub distance_cost_inr: f64,
    pub total_inr: f64,
    pub per_person_inr: f64,
}

/// Cost estimates from the factor tables.
#[derive(Debug, Clone, Copy)]
pub struct CostEstimator<'a> {
    config: &'a EstimatorConfig,
}

impl<'a> CostEstimator<'a> {
    pub fn new(config: &'a EstimatorConfig) -> Self {
        Self { config }
    }

    /// Cost for one traveler over a route distance.
    pub fn per_person(&self, mode: TravelMode, route_km: f64) -> f64 {
        let c = self.config.costs.get(mode);
        c.base_inr + c.per_km_inr * route_km
    }

    /// Cost for the whole party over a route distance.
    pub fn estimate(&self, mode: TravelMode, route_km: f64, travelers: u32) -> f64 {
        self.per_person(mode, route_km) * f64::from(travelers)
    }

    /// Itemised cost using the fare table for a service class.
    pub fn detailed(
        &self,
        mode: TravelMode,
        route_km: f64,
        travelers: u32,
        class: ServiceClass,
    ) -> CostBreakdown {
        let fare = fare_class(mode, class);
        let party = f64::from(travelers);
        let base_cost_inr = self.config.costs.get(mode).base_inr * party;
        let distance_cost_inr = fare.per_km_inr * route_km * party;
        let total_inr = base_cost_inr + distance_cost_inr;

        CostBreakdown {
            mode,
            fare_class: fare.name,
            distance_km: route_km,
            travelers,
            base_cost_inr,
            distance_cost_inr,
            total_inr,
            per_person_inr: total_inr / party.max(1.0),
        }
    }
}
