//! System metric records and their persistence.
//!
//! This module provides the metric data model, the repository seam with
//! PostgreSQL and in-memory stores, the service layer used by the web
//! handlers, and a host sampler that records local readings.

pub mod data;
pub mod memory;
pub mod repository;
pub mod sampler;
pub mod service;

// Re-export commonly used items
pub use data::{CreateSystemMetricRequest, NewSystemMetric, SystemMetric};
pub use memory::InMemoryMetricRepository;
pub use repository::{MetricRepository, PgMetricRepository, StoreConfig};
pub use sampler::HostSampler;
pub use service::MetricService;
