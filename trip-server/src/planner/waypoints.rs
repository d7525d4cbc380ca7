//! Alternate routes through intermediate cities.
//!
//! Well-known corridors have hand-picked waypoints; for any other pair the
//! optimizer picks catalogue cities that lie roughly along the way.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{DomainError, Location};
use crate::places::{LocationCatalog, geodesic_km};

/// Waypoints considered when building alternates.
pub const DEFAULT_MAX_WAYPOINTS: usize = 3;

/// Routes returned when no limit is given.
pub const DEFAULT_ROUTE_LIMIT: usize = 3;

/// Fraction of the bounding box added on each side when searching for
/// intermediate cities.
const BOUNDING_BOX_BUFFER: f64 = 0.1;

/// A detour through a city may be at most this multiple of the direct distance.
const MAX_DETOUR_RATIO: f64 = 1.5;

/// How an alternate route was constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    Shortcut,
    Direct,
    ViaMiddle,
    ViaFirst,
    ViaLast,
    ViaAll,
}

impl RouteKind {
    /// Sort key when presenting routes; lower comes first.
    pub fn priority(&self) -> u8 {
        match self {
            RouteKind::Shortcut => 1,
            RouteKind::Direct => 2,
            RouteKind::ViaMiddle => 3,
            RouteKind::ViaFirst => 4,
            RouteKind::ViaLast => 5,
            RouteKind::ViaAll => 6,
        }
    }

    fn id(&self) -> &'static str {
        match self {
            RouteKind::Shortcut => "shortcut",
            RouteKind::Direct => "direct",
            RouteKind::ViaMiddle => "via_middle",
            RouteKind::ViaFirst => "via_first",
            RouteKind::ViaLast => "via_last",
            RouteKind::ViaAll => "via_all",
        }
    }
}

/// One way of getting from origin to destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternateRoute {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: RouteKind,
    /// Intermediate cities, in travel order
    pub waypoints: Vec<String>,
    /// Sum of the geodesic legs
    pub distance_km: f64,
    /// Geodesic from origin to destination
    pub direct_km: f64,
}

impl AlternateRoute {
    /// Direct distance as a percentage of this route's length; 100 for
    /// the direct route.
    pub fn efficiency_pct(&self) -> f64 {
        if self.distance_km > 0.0 {
            self.direct_km / self.distance_km * 100.0
        } else {
            100.0
        }
    }

    pub fn is_direct(&self) -> bool {
        self.kind == RouteKind::Direct
    }

    pub fn is_shortcut(&self) -> bool {
        self.kind == RouteKind::Shortcut
    }
}

#[derive(Debug, Clone)]
struct Shortcut {
    id: &'static str,
    waypoints: Vec<String>,
}

type Pair = (String, String);

fn pair_key(origin: &str, destination: &str) -> Pair {
    (origin.to_lowercase(), destination.to_lowercase())
}

/// Finds intermediate cities and builds alternate routes between two
/// catalogue cities.
#[derive(Debug, Clone)]
pub struct RouteOptimizer<'a> {
    catalog: &'a LocationCatalog,
    waypoints: HashMap<Pair, Vec<String>>,
    shortcuts: HashMap<Pair, Vec<Shortcut>>,
}

impl<'a> RouteOptimizer<'a> {
    /// An optimizer with no predefined corridors.
    pub fn empty(catalog: &'a LocationCatalog) -> Self {
        Self {
            catalog,
            waypoints: HashMap::new(),
            shortcuts: HashMap::new(),
        }
    }

    /// An optimizer with the built-in Indian corridors.
    pub fn new(catalog: &'a LocationCatalog) -> Self {
        Self::empty(catalog)
            .with_waypoints("Chennai", "Coimbatore", &["Vellore", "Salem", "Erode", "Tiruppur"])
            .with_waypoints("Bangalore", "Chennai", &["Vellore", "Kanchipuram", "Tiruvallur"])
            .with_waypoints("Delhi", "Mumbai", &["Jaipur", "Ajmer", "Ahmedabad", "Vadodara"])
            .with_waypoints("Chennai", "Madurai", &["Vellore", "Salem", "Tiruchirappalli"])
            .with_waypoints("Salem", "Coimbatore", &["Erode", "Tiruppur"])
            .with_shortcut("Chennai", "Coimbatore", "shortcut_via_salem", &["Salem"])
            .with_shortcut("Chennai", "Coimbatore", "scenic_via_vellore", &["Vellore", "Salem"])
            .with_shortcut("Coimbatore", "Chennai", "shortcut_via_salem", &["Salem"])
            .with_shortcut("Coimbatore", "Chennai", "scenic_via_vellore", &["Salem", "Vellore"])
    }

    /// Register waypoints for a corridor, in travel order from `origin`.
    ///
    /// The reverse direction uses the same cities reversed unless it has
    /// its own entry.
    pub fn with_waypoints(mut self, origin: &str, destination: &str, cities: &[&str]) -> Self {
        let cities = cities.iter().map(|c| c.to_string()).collect();
        self.waypoints.insert(pair_key(origin, destination), cities);
        self
    }

    /// Register a named shortcut for one direction of a corridor.
    pub fn with_shortcut(
        mut self,
        origin: &str,
        destination: &str,
        id: &'static str,
        cities: &[&str],
    ) -> Self {
        let shortcut = Shortcut {
            id,
            waypoints: cities.iter().map(|c| c.to_string()).collect(),
        };
        self.shortcuts
            .entry(pair_key(origin, destination))
            .or_default()
            .push(shortcut);
        self
    }

    /// Up to `max` cities between `origin` and `destination`, in travel order.
    pub fn find_intermediate_cities(
        &self,
        origin: &str,
        destination: &str,
        max: usize,
    ) -> Result<Vec<String>, DomainError> {
        let from = self.catalog.lookup(origin)?;
        let to = self.catalog.lookup(destination)?;

        if let Some(cities) = self.waypoints.get(&pair_key(from.name(), to.name())) {
            return Ok(cities.iter().take(max).cloned().collect());
        }
        if let Some(cities) = self.waypoints.get(&pair_key(to.name(), from.name())) {
            return Ok(cities.iter().rev().take(max).cloned().collect());
        }

        Ok(self.cities_along(from, to, max))
    }

    /// Catalogue cities inside the padded bounding box whose detour stays
    /// within [`MAX_DETOUR_RATIO`], sampled evenly by progress.
    fn cities_along(&self, from: &Location, to: &Location, max: usize) -> Vec<String> {
        if max == 0 {
            return Vec::new();
        }

        let (min_lat, max_lat) = min_max(from.latitude(), to.latitude());
        let (min_lon, max_lon) = min_max(from.longitude(), to.longitude());
        let lat_pad = (max_lat - min_lat) * BOUNDING_BOX_BUFFER;
        let lon_pad = (max_lon - min_lon) * BOUNDING_BOX_BUFFER;
        let direct = geodesic_km(from, to);

        let mut candidates: Vec<(f64, &Location)> = self
            .catalog
            .iter()
            .filter(|c| c.name() != from.name() && c.name() != to.name())
            .filter(|c| {
                (min_lat - lat_pad..=max_lat + lat_pad).contains(&c.latitude())
                    && (min_lon - lon_pad..=max_lon + lon_pad).contains(&c.longitude())
            })
            .filter_map(|c| {
                let to_city = geodesic_km(from, c);
                let via = to_city + geodesic_km(c, to);
                if via > direct * MAX_DETOUR_RATIO {
                    return None;
                }
                let progress = if via > 0.0 { to_city / via } else { 0.0 };
                Some((progress, c))
            })
            .collect();

        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
        tracing::trace!(
            from = from.name(),
            to = to.name(),
            candidates = candidates.len(),
            "intermediate city candidates"
        );

        if candidates.is_empty() {
            return Vec::new();
        }

        let mut picked: Vec<usize> = if max == 1 {
            vec![candidates.len() / 2]
        } else {
            let step = candidates.len() as f64 / (max + 1) as f64;
            (1..=max)
                .map(|i| (i as f64 * step) as usize)
                .filter(|&idx| idx < candidates.len())
                .collect()
        };
        // Few candidates and many slots can land on the same index
        picked.dedup();

        picked
            .into_iter()
            .map(|i| candidates[i].1.name().to_string())
            .collect()
    }

    /// Alternate routes from `origin` to `destination`, best first,
    /// at most `limit` of them.
    ///
    /// The direct route is always generated; routes visiting the same
    /// cities are only listed once.
    pub fn generate_alternate_routes(
        &self,
        origin: &str,
        destination: &str,
        limit: usize,
    ) -> Result<Vec<AlternateRoute>, DomainError> {
        let from = self.catalog.lookup(origin)?;
        let to = self.catalog.lookup(destination)?;

        let mut routes = vec![self.build(from, to, RouteKind::Direct, None, Vec::new())?];

        if let Some(shortcuts) = self.shortcuts.get(&pair_key(from.name(), to.name())) {
            for s in shortcuts.iter().filter(|s| !s.waypoints.is_empty()) {
                let waypoints = s.waypoints.clone();
                routes.push(self.build(from, to, RouteKind::Shortcut, Some(s.id), waypoints)?);
            }
        }

        let cities = self.find_intermediate_cities(from.name(), to.name(), DEFAULT_MAX_WAYPOINTS)?;
        let mut candidates = Vec::new();
        if let Some(first) = cities.first() {
            let middle = &cities[cities.len() / 2];
            candidates.push((RouteKind::ViaMiddle, vec![middle.clone()]));
            candidates.push((RouteKind::ViaFirst, vec![first.clone()]));
        }
        if cities.len() >= 2 {
            if let Some(last) = cities.last() {
                candidates.push((RouteKind::ViaLast, vec![last.clone()]));
            }
            candidates.push((RouteKind::ViaAll, cities.clone()));
        }

        for (kind, waypoints) in candidates {
            if routes.iter().any(|r| r.waypoints == waypoints) {
                continue;
            }
            routes.push(self.build(from, to, kind, None, waypoints)?);
        }

        routes.sort_by_key(|r| r.kind.priority());
        routes.truncate(limit);
        Ok(routes)
    }

    fn build(
        &self,
        from: &Location,
        to: &Location,
        kind: RouteKind,
        id: Option<&str>,
        waypoints: Vec<String>,
    ) -> Result<AlternateRoute, DomainError> {
        let distance_km = self.route_distance(from.name(), to.name(), &waypoints)?;
        let via = waypoints.join(", ");

        let (name, description) = match kind {
            RouteKind::Direct => (
                "Direct Route".to_string(),
                "Shortest direct path between origin and destination".to_string(),
            ),
            RouteKind::Shortcut => (
                format!("Shortcut via {via}"),
                format!("Efficient route via {via}"),
            ),
            RouteKind::ViaMiddle => (
                format!("Via {via}"),
                format!("Balanced route via {via}"),
            ),
            RouteKind::ViaFirst => (
                format!("Via {via}"),
                format!("Route via {via}, near the origin"),
            ),
            RouteKind::ViaLast => (
                format!("Via {via}"),
                format!("Route via {via}, near the destination"),
            ),
            RouteKind::ViaAll => (
                format!("Scenic Route via {via}"),
                format!("Scenic route through {} cities", waypoints.len()),
            ),
        };

        Ok(AlternateRoute {
            id: id.unwrap_or(kind.id()).to_string(),
            name,
            description,
            kind,
            waypoints,
            distance_km,
            direct_km: geodesic_km(from, to),
        })
    }

    /// Total geodesic length of `origin -> waypoints... -> destination`.
    pub fn route_distance(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[String],
    ) -> Result<f64, DomainError> {
        let mut stops = Vec::with_capacity(waypoints.len() + 2);
        stops.push(self.catalog.lookup(origin)?);
        for w in waypoints {
            stops.push(self.catalog.lookup(w)?);
        }
        stops.push(self.catalog.lookup(destination)?);

        Ok(stops.windows(2).map(|w| geodesic_km(w[0], w[1])).sum())
    }

    /// The shortest of the generated alternate routes.
    pub fn optimize_for_distance(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<AlternateRoute, DomainError> {
        let routes = self.generate_alternate_routes(origin, destination, 5)?;
        routes
            .into_iter()
            .min_by(|a, b| a.distance_km.total_cmp(&b.distance_km))
            .ok_or_else(|| {
                DomainError::InvalidLocation(format!("no route from {origin} to {destination}"))
            })
    }
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}
