//! # Coursedesk API
//!
//! The API crate provides the web server for the Coursedesk course-management
//! service. It exposes RESTful endpoints for professors, courses, enrollment,
//! attendance and the weekly schedule, and rejects course schedules that
//! would double-book a room or a teacher.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Error mapping and JSON extraction
//! - **Config**: Handle environment and application configuration
//!
//! Storage is reached only through [`CourseRepository`], so the same router
//! runs over the in-memory store or PostgreSQL.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling and request extraction
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use coursedesk_db::CourseRepository;
use eyre::Result;
use tokio::{net::TcpListener, sync::Mutex};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Course, professor and attendance storage
    pub repo: Arc<dyn CourseRepository>,

    /// Serializes every check-then-write sequence (schedule conflict checks,
    /// enrollment capacity, professor uniqueness) so two requests cannot both
    /// pass a check before either has written.
    pub write_gate: Mutex<()>,
}

impl ApiState {
    pub fn new(repo: Arc<dyn CourseRepository>) -> Self {
        Self {
            repo,
            write_gate: Mutex::new(()),
        }
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Professor management endpoints
        .merge(routes::professor::routes())
        // Course, enrollment and attendance endpoints
        .merge(routes::course::routes())
        // Weekly planning endpoint
        .merge(routes::schedule::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and repository
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// use std::sync::Arc;
/// use coursedesk_api::{config::ApiConfig, start_server};
/// use coursedesk_db::InMemoryRepository;
///
/// let config = ApiConfig::from_env()?;
/// start_server(config, Arc::new(InMemoryRepository::new())).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, repo: Arc<dyn CourseRepository>) -> Result<()> {
    init_tracing(&config);

    let state = Arc::new(ApiState::new(repo));
    let app = router(state)
        .layer(cors_layer(&config))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
        );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Installs the global subscriber; `RUST_LOG` overrides `LOG_LEVEL`.
fn init_tracing(config: &config::ApiConfig) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level).into())
        .from_env_lossy();

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        warn!("Tracing subscriber already installed");
    }
}

fn cors_layer(config: &config::ApiConfig) -> CorsLayer {
    let origin = match &config.cors_origins {
        Some(origins) => {
            let parsed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();
            AllowOrigin::list(parsed)
        }
        None => AllowOrigin::mirror_request(),
    };

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origin)
        .allow_credentials(true)
}
