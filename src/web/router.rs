//! Web application router and middleware setup.

use crate::metrics::MetricService;
use crate::web::config::WebConfig;
use crate::web::handlers;
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Path of the metrics collection, relative to the API prefix.
pub const METRICS_PATH: &str = "/health/metrics";

/// Prefix every API route is mounted under.
pub const API_PREFIX: &str = "/api/v1";

/// Build the application with all routes and middleware.
pub fn create_app(config: &WebConfig, service: MetricService) -> Router {
    let api = Router::new().route(
        METRICS_PATH,
        get(handlers::list_metrics).post(handlers::create_metric),
    );

    let mut app = Router::new().nest(API_PREFIX, api).with_state(service);

    if config.enable_cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
