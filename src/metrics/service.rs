//! Service layer between HTTP handling and persistence.

use crate::error::Result;
use crate::metrics::data::{NewSystemMetric, SystemMetric};
use crate::metrics::repository::MetricRepository;
use std::sync::Arc;

/// Thin wrapper over a [`MetricRepository`]; cheap to clone.
#[derive(Clone)]
pub struct MetricService {
    repo: Arc<dyn MetricRepository>,
}

impl MetricService {
    pub fn new(repo: Arc<dyn MetricRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, metric: NewSystemMetric) -> Result<SystemMetric> {
        self.repo.create(metric).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<SystemMetric>> {
        self.repo.find_by_name(name).await
    }

    pub async fn list_all(&self) -> Result<Vec<SystemMetric>> {
        self.repo.list_all().await
    }
}

impl std::fmt::Debug for MetricService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricService").finish_non_exhaustive()
    }
}
