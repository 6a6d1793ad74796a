//! In-process metric store.

use crate::error::Result;
use crate::metrics::data::{NewSystemMetric, SystemMetric};
use crate::metrics::repository::MetricRepository;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Keeps metrics in insertion order in memory. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct InMemoryMetricRepository {
    records: RwLock<Vec<SystemMetric>>,
}

impl InMemoryMetricRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl MetricRepository for InMemoryMetricRepository {
    async fn create(&self, metric: NewSystemMetric) -> Result<SystemMetric> {
        let stored = metric.into_stored();
        self.records.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<SystemMetric>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|m| m.metric_name == name)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<SystemMetric>> {
        Ok(self.records.read().await.clone())
    }
}
