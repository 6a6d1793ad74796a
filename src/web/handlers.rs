//! HTTP handlers for the metrics API.

use crate::error::{MetricError, Result};
use crate::metrics::{CreateSystemMetricRequest, MetricService, NewSystemMetric, SystemMetric};
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::{error, info};

/// Query string accepted by the list endpoint.
#[derive(Debug, Deserialize)]
pub struct MetricQuery {
    pub metric_name: Option<String>,
}

/// Record a metric from a JSON body.
///
/// The body is parsed here rather than through the `Json` extractor so that
/// every parse failure maps to the same client error and no content type is
/// required.
pub async fn create_metric(
    State(service): State<MetricService>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<SystemMetric>)> {
    let body = body.map_err(|rejection| {
        info!("Rejected metric body: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            MetricError::PayloadTooLarge(rejection.body_text())
        } else {
            MetricError::invalid_request(rejection.body_text())
        }
    })?;

    let metric = CreateSystemMetricRequest::from_json_slice(&body)
        .and_then(NewSystemMetric::try_from)
        .map_err(|e| {
            info!("Rejected metric payload: {}", e);
            e
        })?;

    let stored = service.create(metric).await.map_err(|e| {
        error!("Failed to store metric: {}", e);
        e
    })?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// List metrics, optionally filtered by exact name.
pub async fn list_metrics(
    State(service): State<MetricService>,
    query: std::result::Result<Query<MetricQuery>, QueryRejection>,
) -> Result<Json<Vec<SystemMetric>>> {
    let Query(query) =
        query.map_err(|rejection| MetricError::invalid_request(rejection.body_text()))?;

    let metrics = match query.metric_name.as_deref() {
        Some(name) if name.trim().is_empty() => {
            return Err(MetricError::invalid_request(
                "metric_name must not be empty",
            ));
        }
        Some(name) => service.find_by_name(name).await,
        None => service.list_all().await,
    }
    .map_err(|e| {
        error!("Failed to query metrics: {}", e);
        e
    })?;

    Ok(Json(metrics))
}
