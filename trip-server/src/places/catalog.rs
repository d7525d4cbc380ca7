//! Static catalogue of known cities.
//!
//! The catalogue is reference data: built once at startup and shared
//! read-only between requests.

use std::collections::HashMap;

use crate::domain::{DomainError, Location, PlaceQuery};

/// Maximum number of suggestions returned for a partial name.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// A collection of named locations with case-insensitive lookup.
#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    /// Locations in insertion order.
    locations: Vec<Location>,
    /// Lowercased name to index into `locations`.
    index: HashMap<String, usize>,
    /// Origin/destination pairs offered for quick selection.
    popular_routes: Vec<(String, String)>,
}

impl LocationCatalog {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location. A later location with the same name replaces the
    /// earlier one.
    pub fn add(&mut self, location: Location) {
        let key = location.name().to_lowercase();
        match self.index.get(&key) {
            Some(&i) => self.locations[i] = location,
            None => {
                self.index.insert(key, self.locations.len());
                self.locations.push(location);
            }
        }
    }

    /// Add a popular route pair. Pairs naming unknown cities are ignored.
    pub fn add_popular_route(&mut self, origin: &str, destination: &str) {
        if let (Some(o), Some(d)) = (self.get(origin), self.get(destination)) {
            let pair = (o.name().to_string(), d.name().to_string());
            self.popular_routes.push(pair);
        }
    }

    /// Look up a location by name, ignoring case and surrounding whitespace.
    pub fn get(&self, name: &str) -> Option<&Location> {
        self.index
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.locations[i])
    }

    /// Look up a location by name, failing with `InvalidLocation`.
    pub fn lookup(&self, name: &str) -> Result<&Location, DomainError> {
        self.get(name)
            .ok_or_else(|| DomainError::InvalidLocation(format!("unknown city {:?}", name.trim())))
    }

    /// Check whether a name is in the catalogue.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Resolve a place from the form into a location.
    ///
    /// A query with both coordinates always uses them. A query without
    /// coordinates is looked up by name; one with only half a pair is
    /// rejected.
    pub fn resolve(&self, query: &PlaceQuery) -> Result<Location, DomainError> {
        match query {
            PlaceQuery::Name(name) => self.lookup(name).cloned(),
            PlaceQuery::Coordinates {
                name,
                latitude: Some(latitude),
                longitude: Some(longitude),
            } => {
                let region = self
                    .get(name)
                    .map(|l| l.region().to_string())
                    .unwrap_or_default();
                Location::new(name.trim(), region, *latitude, *longitude)
            }
            PlaceQuery::Coordinates {
                name,
                latitude: None,
                longitude: None,
            } => self.lookup(name).cloned(),
            PlaceQuery::Coordinates { name, .. } => Err(DomainError::InvalidLocation(format!(
                "{:?}: both latitude and longitude are required",
                name.trim()
            ))),
        }
    }

    /// Names containing `partial` (case-insensitive), in catalogue order.
    pub fn suggestions(&self, partial: &str, limit: usize) -> Vec<&Location> {
        let needle = partial.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.locations
            .iter()
            .filter(|l| l.name().to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    /// Popular origin/destination pairs.
    pub fn popular_routes(&self) -> &[(String, String)] {
        &self.popular_routes
    }

    /// All locations, in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// All location names, in catalogue order.
    pub fn names(&self) -> Vec<&str> {
        self.locations.iter().map(|l| l.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Builder for creating a location catalogue.
///
/// Provides a fluent API; entries with invalid coordinates are skipped.
#[derive(Debug, Default)]
pub struct LocationCatalogBuilder {
    inner: LocationCatalog,
}

impl LocationCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a city.
    pub fn city(mut self, name: &str, region: &str, latitude: f64, longitude: f64) -> Self {
        match Location::new(name, region, latitude, longitude) {
            Ok(location) => self.inner.add(location),
            Err(e) => tracing::warn!(city = name, error = %e, "skipping catalogue entry"),
        }
        self
    }

    /// Add a popular route between two cities already added.
    pub fn popular_route(mut self, origin: &str, destination: &str) -> Self {
        self.inner.add_popular_route(origin, destination);
        self
    }

    pub fn build(self) -> LocationCatalog {
        self.inner
    }
}

/// The default catalogue: major Indian cities, the towns used as route
/// waypoints, and the popular route pairs.
pub fn india_cities() -> LocationCatalog {
    LocationCatalogBuilder::new()
        .city("Salem", "Tamil Nadu", 11.6643, 78.1460)
        .city("Chennai", "Tamil Nadu", 13.0827, 80.2707)
        .city("Delhi", "Delhi", 28.7041, 77.1025)
        .city("Mumbai", "Maharashtra", 19.0760, 72.8777)
        .city("Bangalore", "Karnataka", 12.9716, 77.5946)
        .city("Kolkata", "West Bengal", 22.5726, 88.3639)
        .city("Hyderabad", "Telangana", 17.3850, 78.4867)
        .city("Pune", "Maharashtra", 18.5204, 73.8567)
        .city("Ahmedabad", "Gujarat", 23.0225, 72.5714)
        .city("Jaipur", "Rajasthan", 26.9124, 75.7873)
        .city("Kochi", "Kerala", 9.9312, 76.2673)
        .city("Goa", "Goa", 15.2993, 74.1240)
        .city("Agra", "Uttar Pradesh", 27.1767, 78.0081)
        .city("Varanasi", "Uttar Pradesh", 25.3176, 82.9739)
        .city("Udaipur", "Rajasthan", 24.5854, 73.7125)
        // Waypoint towns
        .city("Coimbatore", "Tamil Nadu", 11.0168, 76.9558)
        .city("Madurai", "Tamil Nadu", 9.9252, 78.1198)
        .city("Vellore", "Tamil Nadu", 12.9165, 79.1325)
        .city("Erode", "Tamil Nadu", 11.3410, 77.7172)
        .city("Tiruppur", "Tamil Nadu", 11.1085, 77.3411)
        .city("Kanchipuram", "Tamil Nadu", 12.8342, 79.7036)
        .city("Tiruvallur", "Tamil Nadu", 13.1231, 79.9120)
        .city("Tiruchirappalli", "Tamil Nadu", 10.7905, 78.7047)
        .city("Ajmer", "Rajasthan", 26.4499, 74.6399)
        .city("Vadodara", "Gujarat", 22.3072, 73.1812)
        .popular_route("Salem", "Chennai")
        .popular_route("Delhi", "Mumbai")
        .popular_route("Bangalore", "Chennai")
        .popular_route("Delhi", "Goa")
        .popular_route("Mumbai", "Pune")
        .popular_route("Chennai", "Kochi")
        .popular_route("Delhi", "Jaipur")
        .popular_route("Mumbai", "Goa")
        .popular_route("Bangalore", "Hyderabad")
        .popular_route("Kolkata", "Delhi")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalogue() {
        let catalog = LocationCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.get("Salem").is_none());
    }

    #[test]
    fn lookup_ignores_case() {
        let catalog = india_cities();
        assert_eq!(catalog.get("chennai").unwrap().name(), "Chennai");
        assert_eq!(catalog.get("  SALEM ").unwrap().region(), "Tamil Nadu");
        assert!(catalog.contains("Kochi"));
    }

    #[test]
    fn unknown_city_is_invalid_location() {
        let catalog = india_cities();
        assert!(matches!(
            catalog.lookup("Atlantis"),
            Err(DomainError::InvalidLocation(_))
        ));
    }

    #[test]
    fn add_replaces_same_name() {
        let mut catalog = LocationCatalog::new();
        catalog.add(Location::new("Goa", "Goa", 15.0, 74.0).unwrap());
        catalog.add(Location::new("goa", "Goa", 15.3, 74.1).unwrap());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("Goa").unwrap().latitude(), 15.3);
    }

    #[test]
    fn builder_skips_invalid_coordinates() {
        let catalog = LocationCatalogBuilder::new()
            .city("Nowhere", "", 95.0, 0.0)
            .city("Pune", "Maharashtra", 18.5204, 73.8567)
            .build();
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.contains("Nowhere"));
    }

    #[test]
    fn popular_routes_skip_unknown_cities() {
        let catalog = LocationCatalogBuilder::new()
            .city("Mumbai", "Maharashtra", 19.0760, 72.8777)
            .city("Pune", "Maharashtra", 18.5204, 73.8567)
            .popular_route("mumbai", "pune")
            .popular_route("Mumbai", "Atlantis")
            .build();
        assert_eq!(
            catalog.popular_routes(),
            &[("Mumbai".to_string(), "Pune".to_string())]
        );
    }

    #[test]
    fn default_catalogue_contents() {
        let catalog = india_cities();
        assert_eq!(catalog.len(), 25);
        assert_eq!(catalog.popular_routes().len(), 10);
        assert_eq!(catalog.names()[0], "Salem");
    }

    #[test]
    fn suggestions_match_substrings() {
        let catalog = india_cities();
        let names: Vec<_> = catalog
            .suggestions("pur", DEFAULT_SUGGESTION_LIMIT)
            .iter()
            .map(|l| l.name())
            .collect();
        assert_eq!(names, vec!["Jaipur", "Udaipur", "Tiruppur", "Kanchipuram"]);

        assert_eq!(catalog.suggestions("a", 5).len(), 5);
        assert!(catalog.suggestions("", 5).is_empty());
        assert!(catalog.suggestions("zzz", 5).is_empty());
    }

    #[test]
    fn resolve_name_and_coordinates() {
        let catalog = india_cities();

        let loc = catalog.resolve(&PlaceQuery::name("Delhi")).unwrap();
        assert_eq!(loc.name(), "Delhi");

        let manual = PlaceQuery::coordinates("Ooty", 11.4102, 76.6950);
        let loc = catalog.resolve(&manual).unwrap();
        assert_eq!(loc.name(), "Ooty");
        assert_eq!(loc.coordinates(), (11.4102, 76.6950));

        let bad = PlaceQuery::coordinates("Ooty", 200.0, 76.6950);
        assert!(matches!(
            catalog.resolve(&bad),
            Err(DomainError::InvalidLocation(_))
        ));
    }

    #[test]
    fn resolve_name_without_coordinates() {
        let catalog = india_cities();
        let named = |name: &str, latitude, longitude| PlaceQuery::Coordinates {
            name: name.into(),
            latitude,
            longitude,
        };

        let loc = catalog.resolve(&named("salem", None, None)).unwrap();
        assert_eq!(loc, *catalog.lookup("Salem").unwrap());

        assert!(matches!(
            catalog.resolve(&named("Ooty", None, None)),
            Err(DomainError::InvalidLocation(_))
        ));
        assert!(matches!(
            catalog.resolve(&named("Ooty", Some(11.4102), None)),
            Err(DomainError::InvalidLocation(_))
        ));
    }
}
