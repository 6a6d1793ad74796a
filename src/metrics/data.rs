//! Data structures for recorded system metrics.

use crate::error::{MetricError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single named, typed, timestamped measurement as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SystemMetric {
    /// Identifier assigned when the metric is recorded
    pub id: Uuid,
    /// Metric name (e.g., "cpu_usage"); not unique across records
    pub metric_name: String,
    /// Category tag (e.g., "gauge", "counter")
    pub metric_type: String,
    /// Measured value
    pub value: f64,
    /// When the metric was recorded
    pub created_at: DateTime<Utc>,
}

/// A validated metric that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSystemMetric {
    pub metric_name: String,
    pub metric_type: String,
    pub value: f64,
}

/// JSON payload accepted by the create endpoint.
///
/// Unknown fields are rejected and every field is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateSystemMetricRequest {
    pub metric_name: String,
    pub metric_type: String,
    pub value: f64,
}

impl NewSystemMetric {
    /// Build a metric, rejecting blank names or types and non-finite values.
    pub fn new(
        metric_name: impl Into<String>,
        metric_type: impl Into<String>,
        value: f64,
    ) -> Result<Self> {
        let metric_name = metric_name.into();
        let metric_type = metric_type.into();

        if metric_name.trim().is_empty() {
            return Err(MetricError::invalid_request("metric_name must not be empty"));
        }
        if metric_type.trim().is_empty() {
            return Err(MetricError::invalid_request("metric_type must not be empty"));
        }
        if !value.is_finite() {
            return Err(MetricError::invalid_request("value must be a finite number"));
        }

        Ok(Self {
            metric_name,
            metric_type,
            value,
        })
    }

    /// Attach a fresh identifier and the current time.
    pub fn into_stored(self) -> SystemMetric {
        SystemMetric {
            id: Uuid::new_v4(),
            metric_name: self.metric_name,
            metric_type: self.metric_type,
            value: self.value,
            created_at: Utc::now(),
        }
    }
}

impl CreateSystemMetricRequest {
    /// Parse a raw request body.
    pub fn from_json_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| MetricError::invalid_request(format!("malformed metric payload: {}", e)))
    }
}

impl TryFrom<CreateSystemMetricRequest> for NewSystemMetric {
    type Error = MetricError;

    fn try_from(req: CreateSystemMetricRequest) -> Result<Self> {
        NewSystemMetric::new(req.metric_name, req.metric_type, req.value)
    }
}
