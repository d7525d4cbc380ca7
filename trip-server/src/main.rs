use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use trip_server::config::ServerConfig;
use trip_server::places::india_cities;
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trip_server=info,tower_http=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let factors = config.load_estimator_config()?;
    match &config.factors_path {
        Some(path) => tracing::info!(path = %path.display(), "loaded factor tables"),
        None => tracing::info!("using built-in factor tables"),
    }

    let catalog = india_cities();
    tracing::info!(cities = catalog.len(), "loaded city catalogue");

    let state = AppState::new(catalog, factors);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("EcoTrip listening on http://{}", config.bind);
    tracing::info!("  GET  /health                 - Health check");
    tracing::info!("  GET  /about                  - Factor tables");
    tracing::info!("  GET  /api/cities/search      - City suggestions");
    tracing::info!("  GET  /api/routes/popular     - Popular routes");
    tracing::info!("  GET  /api/routes/alternates  - Alternate routes");
    tracing::info!("  POST /trip/calculate         - Calculate a trip");

    axum::serve(listener, app).await?;
    Ok(())
}
