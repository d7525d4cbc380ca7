//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::domain::{DomainError, Location};
use crate::places::{DEFAULT_SUGGESTION_LIMIT, GeoDistanceEstimator, geodesic_km};
use crate::planner::{AlternateRoute, DEFAULT_ROUTE_LIMIT, RouteOptimizer};
use crate::session::TripContext;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Most suggestions a client may ask for.
const MAX_SUGGESTIONS: usize = 25;

/// Most alternate routes a client may ask for.
const MAX_ALTERNATE_ROUTES: usize = 10;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/about", get(about_page))
        .route("/api/cities/search", get(search_cities))
        .route("/api/routes/popular", get(popular_routes))
        .route("/api/routes/alternates", get(alternate_routes))
        .route("/trip/calculate", post(calculate_trip))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the trip form.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render(&IndexTemplate::from_catalog(&state.catalog))
}

/// About page.
async fn about_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render(&AboutTemplate::from_config(&state.factors))
}

async fn not_found() -> Response {
    let page = ErrorTemplate {
        title: "Not found".into(),
        message: "There is nothing at this address.".into(),
    };
    match render(&page) {
        Ok(html) => (StatusCode::NOT_FOUND, html).into_response(),
        Err(e) => e.into_response(),
    }
}

fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// Suggest cities by partial name.
async fn search_cities(
    State(state): State<AppState>,
    Query(req): Query<CitySearchRequest>,
) -> Json<CitySearchResponse> {
    let limit = req
        .limit
        .unwrap_or(DEFAULT_SUGGESTION_LIMIT)
        .min(MAX_SUGGESTIONS);
    let cities = state
        .catalog
        .suggestions(&req.q, limit)
        .into_iter()
        .map(CityResult::from_location)
        .collect();

    Json(CitySearchResponse { cities })
}

/// Popular route pairs with their distances.
async fn popular_routes(
    State(state): State<AppState>,
) -> Result<Json<PopularRoutesResponse>, AppError> {
    let geo = GeoDistanceEstimator::new(&state.catalog);
    let routes = state
        .catalog
        .popular_routes()
        .iter()
        .map(|(origin, destination)| {
            let distance_km = geo.distance_by_name(origin, destination)?;
            Ok(PopularRouteResult {
                origin: origin.clone(),
                destination: destination.clone(),
                distance_km: round2(distance_km),
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    Ok(Json(PopularRoutesResponse { routes }))
}

/// Alternate routes through intermediate cities.
async fn alternate_routes(
    State(state): State<AppState>,
    Query(req): Query<AlternatesRequest>,
) -> Result<Json<AlternatesResponse>, AppError> {
    let limit = req
        .limit
        .unwrap_or(DEFAULT_ROUTE_LIMIT)
        .min(MAX_ALTERNATE_ROUTES);
    let optimizer = RouteOptimizer::new(&state.catalog);
    let routes = optimizer.generate_alternate_routes(&req.origin, &req.destination, limit)?;

    Ok(Json(AlternatesResponse {
        origin: req.origin,
        destination: req.destination,
        routes: routes.iter().map(AlternateRouteResult::from_route).collect(),
    }))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Calculate a trip's footprint and its alternatives.
async fn calculate_trip(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let form: TripForm = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid trip form");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let trip = form.into_trip(&state.catalog)?;
    let distance_km = geodesic_km(trip.origin(), trip.destination());
    tracing::info!(
        origin = trip.origin().name(),
        destination = trip.destination().name(),
        distance_km,
        travelers = trip.travelers(),
        "calculating trip"
    );

    let mut ctx = TripContext::with_trip(trip);
    ctx.calculate(&state.factors, distance_km)?;

    let response = CalculateResponse::from_context(&ctx)
        .ok_or_else(|| AppError::Internal {
            message: "calculation produced no results".into(),
        })?
        .with_routes(&catalogue_routes(&state, &ctx));

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let html = render(&ResultsTemplate::from_response(&response))?;
        Ok(html.into_response())
    } else {
        Ok(Json(response).into_response())
    }
}

/// Alternate routes for a trip between two catalogue cities.
///
/// Places entered with their own coordinates have no waypoints to offer.
fn catalogue_routes(state: &AppState, ctx: &TripContext) -> Vec<AlternateRoute> {
    let Some(trip) = ctx.trip() else {
        return Vec::new();
    };
    let in_catalogue = |l: &Location| state.catalog.get(l.name()) == Some(l);
    if !in_catalogue(trip.origin()) || !in_catalogue(trip.destination()) {
        return Vec::new();
    }

    let optimizer = RouteOptimizer::new(&state.catalog);
    let origin = trip.origin().name();
    let destination = trip.destination().name();
    match optimizer.generate_alternate_routes(origin, destination, DEFAULT_ROUTE_LIMIT) {
        Ok(routes) => routes,
        Err(e) => {
            tracing::warn!(origin, destination, error = %e, "no alternate routes");
            Vec::new()
        }
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "request failed");
        } else {
            tracing::debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::estimate::EstimatorConfig;
    use crate::places::india_cities;

    fn app() -> Router {
        let state = AppState::new(india_cities(), EstimatorConfig::default());
        create_router(state, concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    async fn get(uri: &str) -> Response {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_trip(body: &str, accept: &str) -> Response {
        app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/trip/calculate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::ACCEPT, accept)
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn health_check() {
        let response = get("/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "ok");
    }

    #[tokio::test]
    async fn pages_render() {
        let response = get("/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Popular routes"));

        let response = get("/about").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get("/nowhere").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn city_search() {
        let response = get("/api/cities/search?q=ch").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let names: Vec<_> = json["cities"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["Chennai", "Kochi", "Kanchipuram", "Tiruchirappalli"]
        );

        let json = body_json(get("/api/cities/search?q=a&limit=2").await).await;
        assert_eq!(json["cities"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn popular_routes_have_distances() {
        let json = body_json(get("/api/routes/popular").await).await;
        let routes = json["routes"].as_array().unwrap();
        assert_eq!(routes.len(), 10);
        assert_eq!(routes[0]["origin"], "Salem");
        assert!(routes[0]["distance_km"].as_f64().unwrap() > 250.0);
    }

    #[tokio::test]
    async fn alternates() {
        let response = get("/api/routes/alternates?origin=Delhi&destination=Mumbai&limit=2").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let routes = json["routes"].as_array().unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0]["id"], "direct");
        assert_eq!(routes[0]["efficiency_pct"], 100.0);
        let via = routes[1]["efficiency_pct"].as_f64().unwrap();
        assert!(via > 0.0 && via < 100.0);

        let response = get("/api/routes/alternates?origin=Gotham&destination=Mumbai").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn calculate_json() {
        let response = post_trip(
            r#"{ "origin": "Salem", "destination": "Chennai", "modes": ["Car"], "travelers": 2 }"#,
            "application/json",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["origin"], "Salem");
        assert_eq!(json["travelers"], 2);
        assert_eq!(json["baseline"]["mode"], "Car");
        assert_eq!(json["alternatives"].as_array().unwrap().len(), 3);
        assert_eq!(json["alternatives"][0]["mode"], "Train");
        assert!(json["emissions"]["total_kg"].as_f64().unwrap() > 0.0);
        assert_eq!(json["emissions"]["accommodation_kg"], 0.0);
        assert_eq!(json["routes"][0]["id"], "direct");
        assert_eq!(json["routes"][0]["efficiency_pct"], 100.0);
    }

    #[tokio::test]
    async fn manual_coordinates_have_no_routes() {
        let response = post_trip(
            r#"{ "origin": { "name": "Ooty", "latitude": 11.4102, "longitude": 76.6950 },
                 "destination": "Chennai", "modes": ["Bus"] }"#,
            "application/json",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["origin"], "Ooty");
        assert!(json["routes"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn calculate_html() {
        let response = post_trip(
            r#"{ "origin": "Delhi", "destination": "Mumbai", "modes": ["Flight"] }"#,
            "text/html",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Delhi &rarr; Mumbai"));
        assert!(html.contains("Alternatives to Flight"));
        assert!(html.contains("Via Jaipur"));
        assert!(html.contains("100%"));
    }

    #[tokio::test]
    async fn calculate_errors() {
        let response = post_trip(
            r#"{ "origin": "Atlantis", "destination": "Chennai", "modes": ["Car"] }"#,
            "application/json",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("invalid location"));

        let response = post_trip(
            r#"{ "origin": "Salem", "destination": "Chennai", "modes": ["Rocket"] }"#,
            "application/json",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = post_trip(
            r#"{ "origin": { "name": "Ooty" }, "destination": "Chennai", "modes": ["Car"] }"#,
            "application/json",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("invalid location"));

        let response = post_trip(
            r#"{ "origin": "Salem", "destination": "Chennai", "modes": ["Car"],
                 "return_date": "2025-03-01" }"#,
            "application/json",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = post_trip("{ not json", "application/json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
