//! EPL Match Predictor API
//!
//! REST API and CLI for Premier League home win / draw / away win predictions.

mod cli;
mod config;
mod dataset;
mod error;
mod outcome;
mod predictor;
mod routes;
mod types;

use axum::{routing::get, routing::post, Router};
use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::predictor::build_predictor;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, data } => run_server(host, port, data).await,
        Commands::Predict {
            home,
            away,
            season,
            data,
            format,
        } => cli::run_predict(home, away, season, data, format),
        Commands::Teams { data } => cli::run_teams(data),
    }
}

/// Build the router: JSON API under `/api`, static files from `assets`.
fn app(state: Arc<AppState>, assets: &Path) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/teams", get(routes::teams))
        .route("/api/predict", post(routes::predict))
        .nest_service("/static", ServeDir::new(assets))
        .route_service("/", ServeFile::new(assets.join("index.html")))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the API server.
async fn run_server(
    host: Option<String>,
    port: Option<u16>,
    data: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "epl_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = cli::load_config(data)?;

    // Override with CLI args
    if let Some(h) = host {
        config.server.host = h;
    }
    if let Some(p) = port {
        config.server.port = p;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("Data path: {}", config.data.path);

    // Train once; on failure keep serving health but refuse predictions
    let predictor = match build_predictor(&config.data.path, &config.data.competition) {
        Ok(p) => {
            tracing::info!("Model trained successfully");
            Some(p)
        }
        Err(e) => {
            tracing::error!("Failed to train model: {}", e);
            None
        }
    };

    let state = Arc::new(AppState { predictor });
    let router = app(state, Path::new(&config.server.assets));

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
