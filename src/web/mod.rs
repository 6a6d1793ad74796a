//! Web server and API endpoints for recording and querying metrics.

pub mod config;
pub mod handlers;
pub mod router;

// Re-export commonly used items
pub use config::WebConfig;
pub use router::create_app;

use crate::error::{MetricError, Result};
use crate::metrics::{sampler, MetricService};
use tracing::info;

/// Start the web server with the provided configuration and service.
pub async fn start_web_server(config: WebConfig, service: MetricService) -> Result<()> {
    let app = create_app(&config, service.clone());

    let addr = config.socket_addr()?;

    info!("Starting health metrics server on http://{}", addr);
    info!(
        "API endpoint: http://{}{}{}",
        addr,
        router::API_PREFIX,
        router::METRICS_PATH
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| MetricError::web_server_error(format!("Failed to bind to address: {}", e)))?;

    let _sampler_task = config.sample_interval_ms.map(|interval_ms| {
        info!("Recording host samples every {}ms", interval_ms);
        sampler::spawn_recorder(service, interval_ms)
    });

    axum::serve(listener, app)
        .await
        .map_err(|e| MetricError::web_server_error(format!("Server error: {}", e)))?;

    Ok(())
}
