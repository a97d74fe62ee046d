//! Application setup and server configuration.

use std::time::Duration;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    destination_ports, destinations, events, flow_edges, health_handler, partylines,
    source_ports, sources,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
}

/// HTTP-level settings for [`build_app`].
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Empty allows any origin.
    pub allowed_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, options: AppOptions) -> Router {
    let app_state = AppState { deps };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin(&options.allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .merge(events::routes())
        .merge(sources::routes())
        .merge(destinations::routes())
        .merge(partylines::routes())
        .merge(source_ports::routes())
        .merge(destination_ports::routes())
        .merge(flow_edges::routes())
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(timeout_layer(options.request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Requests that outlive `duration` are answered with 408.
fn timeout_layer(duration: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, duration)
}

fn allow_origin(origins: &[String]) -> AllowOrigin {
    if origins.is_empty() {
        return AllowOrigin::from(Any);
    }
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    AllowOrigin::list(parsed)
}
