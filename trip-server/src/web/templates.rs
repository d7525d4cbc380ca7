//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::TravelMode;
use crate::estimate::EstimatorConfig;
use crate::places::LocationCatalog;

use super::dto::{AlternativeResult, CalculateResponse};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the trip form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub cities: Vec<String>,
    pub modes: Vec<String>,
    pub popular_routes: Vec<PopularRouteView>,
}

impl IndexTemplate {
    pub fn from_catalog(catalog: &LocationCatalog) -> Self {
        Self {
            cities: catalog.names().into_iter().map(String::from).collect(),
            modes: TravelMode::ALL.iter().map(|m| m.to_string()).collect(),
            popular_routes: catalog
                .popular_routes()
                .iter()
                .map(|(o, d)| PopularRouteView {
                    origin: o.clone(),
                    destination: d.clone(),
                })
                .collect(),
        }
    }
}

/// About page, listing the factors in use.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub factors: Vec<FactorView>,
    pub per_night_kg: String,
}

impl AboutTemplate {
    pub fn from_config(config: &EstimatorConfig) -> Self {
        let factors = TravelMode::ALL
            .into_iter()
            .map(|mode| {
                let e = config.emissions.get(mode);
                let r = config.routes.get(mode);
                let c = config.costs.get(mode);
                FactorView {
                    mode: mode.to_string(),
                    kg_per_km: format!("{:.3}", e.base_kg_per_km),
                    route_multiplier: format!("{:.2}", r.multiplier),
                    speed_kmh: format!("{:.0}", r.speed_kmh),
                    cost_per_km: format!("{:.1}", c.per_km_inr),
                }
            })
            .collect();

        Self {
            factors,
            per_night_kg: format!("{:.1}", config.accommodation.per_night_kg),
        }
    }
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Calculation results fragment.
#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub origin: String,
    pub destination: String,
    pub distance: String,
    pub travelers: u32,
    pub total: String,
    pub per_person: String,
    pub transport: String,
    pub accommodation: String,
    pub transport_pct: String,
    pub accommodation_pct: String,
    pub modes: Vec<ModeEmissionsView>,
    pub baseline_mode: String,
    pub alternatives: Vec<AlternativeView>,
    pub routes: Vec<RouteView>,
    pub warnings: Vec<String>,
}

impl ResultsTemplate {
    pub fn from_response(r: &CalculateResponse) -> Self {
        let e = &r.emissions;
        Self {
            origin: r.origin.clone(),
            destination: r.destination.clone(),
            distance: format!("{:.0}", r.distance_km),
            travelers: r.travelers,
            total: format_kg(e.total_kg),
            per_person: format_kg(e.per_person_kg),
            transport: format_kg(e.transport_kg),
            accommodation: format_kg(e.accommodation_kg),
            transport_pct: format!("{:.1}", e.transport_pct),
            accommodation_pct: format!("{:.1}", e.accommodation_pct),
            modes: e
                .transport
                .iter()
                .map(|m| ModeEmissionsView {
                    mode: m.mode.to_string(),
                    distance: format!("{:.0}", m.distance_km),
                    per_person: format_kg(m.per_person_kg),
                    total: format_kg(m.total_kg),
                })
                .collect(),
            baseline_mode: r
                .baseline
                .as_ref()
                .map(|b| b.mode.to_string())
                .unwrap_or_default(),
            alternatives: r.alternatives.iter().map(AlternativeView::from_result).collect(),
            routes: r
                .routes
                .iter()
                .map(|route| RouteView {
                    name: route.name.clone(),
                    description: route.description.clone(),
                    distance: format!("{:.0}", route.distance_km),
                    efficiency: format!("{:.0}%", route.efficiency_pct),
                })
                .collect(),
            warnings: e.warnings.clone(),
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Popular route link on the form.
#[derive(Debug, Clone)]
pub struct PopularRouteView {
    pub origin: String,
    pub destination: String,
}

/// Row in the factor table.
#[derive(Debug, Clone)]
pub struct FactorView {
    pub mode: String,
    pub kg_per_km: String,
    pub route_multiplier: String,
    pub speed_kmh: String,
    pub cost_per_km: String,
}

/// Row in the per-mode emissions table.
#[derive(Debug, Clone)]
pub struct ModeEmissionsView {
    pub mode: String,
    pub distance: String,
    pub per_person: String,
    pub total: String,
}

/// Row in the alternatives table.
#[derive(Debug, Clone)]
pub struct AlternativeView {
    pub mode: String,
    pub distance: String,
    pub duration: String,
    pub co2e: String,
    pub cost: String,
    pub savings: String,
    pub savings_pct: String,
    pub cost_delta: String,
    pub greener: bool,
}

impl AlternativeView {
    pub fn from_result(a: &AlternativeResult) -> Self {
        Self {
            mode: a.mode.to_string(),
            distance: format!("{:.0}", a.distance_km),
            duration: format_hours(a.duration_hours),
            co2e: format_kg(a.co2e_kg),
            cost: format_inr(a.cost_inr),
            savings: format_kg(a.savings_kg),
            savings_pct: format!("{:.0}%", a.savings_pct),
            cost_delta: format_inr(a.cost_delta_inr),
            greener: a.savings_kg > 0.0,
        }
    }
}

/// Row in the alternate routes table.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub name: String,
    pub description: String,
    pub distance: String,
    pub efficiency: String,
}

/// "12.3 kg", or tonnes above a thousand kilograms.
pub fn format_kg(kg: f64) -> String {
    if kg.abs() >= 1000.0 {
        format!("{:.2} t", kg / 1000.0)
    } else {
        format!("{:.1} kg", kg)
    }
}

/// "5h 30m".
pub fn format_hours(hours: f64) -> String {
    let total_mins = (hours * 60.0).round() as i64;
    let (h, m) = (total_mins / 60, total_mins % 60);
    if h == 0 {
        format!("{m}m")
    } else if m == 0 {
        format!("{h}h")
    } else {
        format!("{h}h {m}m")
    }
}

/// "₹1,250", with a sign for negative amounts.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}
