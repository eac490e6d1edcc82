//! Tiffin API server.
//!
//! This binary serves the mess-management HTTP API on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework, JSON request/response bodies throughout
//! - `PostgreSQL` via sqlx for credentials, profiles, the catalog, carts
//!   and orders
//! - Argon2id password hashing, HMAC-signed bearer tokens with a fixed
//!   24 hour lifetime
//!
//! Access control is per route: reads of users and products are public,
//! everything else wants a bearer token, and role management wants the
//! admin role on top.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tiffin_api::config::ApiConfig;
use tiffin_api::state::AppState;
use tiffin_api::{db, routes};

#[tokio::main]
async fn main() {
    let config = ApiConfig::from_env().expect("Failed to load configuration");

    // RUST_LOG wins; otherwise default to info for this crate
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tiffin_api=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Connected to Postgres");

    // Migrations do not run at startup. Apply them with:
    //   cargo run -p tiffin-cli -- migrate

    let addr = config.socket_addr();
    let state = AppState::new(config, pool);

    // CORS sits outermost, mirroring the trace layer order
    let app = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    tracing::info!("tiffin api listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness probe. Answers as long as the process is up; touches nothing.
async fn health() -> &'static str {
    "ok"
}

/// Readiness probe. Pings the database and reports 503 until it answers.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").execute(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Resolve on Ctrl+C or SIGTERM, whichever lands first.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
