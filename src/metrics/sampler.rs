//! Samples the local host and turns readings into metrics.
//!
//! The sampler reads CPU, memory and load figures through `sysinfo` and emits
//! them as gauge/counter metrics that can be recorded like any client-submitted
//! metric.

use crate::metrics::data::NewSystemMetric;
use crate::metrics::service::MetricService;
use futures_util::stream::{self, BoxStream};
use std::time::Duration;
use sysinfo::System;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_stream::StreamExt;
use tracing::{debug, warn};

pub const CPU_USAGE: &str = "cpu_usage";
pub const MEMORY_USAGE: &str = "memory_usage";
pub const SWAP_USED_BYTES: &str = "swap_used_bytes";
pub const LOAD_AVERAGE_1M: &str = "load_average_1m";
pub const UPTIME_SECONDS: &str = "uptime_seconds";

/// Host sampler backed by `sysinfo`.
pub struct HostSampler {
    system: System,
}

impl HostSampler {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu_usage();
        system.refresh_memory();
        Self { system }
    }

    /// Take one reading of the host.
    ///
    /// CPU usage is measured since the previous call, so the first sample
    /// after construction may read 0. Readings that do not form a valid
    /// metric are logged and left out of the batch.
    pub fn sample(&mut self) -> Vec<NewSystemMetric> {
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();

        let cpus = self.system.cpus();
        let cpu_usage = if cpus.is_empty() {
            0.0
        } else {
            cpus.iter().map(|cpu| cpu.cpu_usage() as f64).sum::<f64>() / cpus.len() as f64
        };

        let total = self.system.total_memory();
        let memory_usage = if total > 0 {
            (self.system.used_memory() as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        let load = System::load_average();

        readings_to_metrics(&[
            (CPU_USAGE, "gauge", cpu_usage),
            (MEMORY_USAGE, "gauge", memory_usage),
            (SWAP_USED_BYTES, "gauge", self.system.used_swap() as f64),
            (LOAD_AVERAGE_1M, "gauge", load.one),
            (UPTIME_SECONDS, "counter", System::uptime() as f64),
        ])
    }

    /// Sample the host every `interval_ms` milliseconds.
    ///
    /// The stream never ends on its own; drop it to stop sampling.
    pub fn into_stream(self, interval_ms: u64) -> BoxStream<'static, Vec<NewSystemMetric>> {
        let interval = time::interval(Duration::from_millis(interval_ms.max(1)));

        let stream = stream::unfold((self, interval), |(mut sampler, mut interval)| async move {
            interval.tick().await;
            let batch = sampler.sample();
            Some((batch, (sampler, interval)))
        });

        Box::pin(stream)
    }
}

/// Turn raw `(name, type, value)` readings into metrics, skipping invalid ones.
fn readings_to_metrics(readings: &[(&str, &str, f64)]) -> Vec<NewSystemMetric> {
    readings
        .iter()
        .filter_map(|&(name, metric_type, value)| {
            match NewSystemMetric::new(name, metric_type, value) {
                Ok(metric) => Some(metric),
                Err(e) => {
                    warn!("Skipping host reading {}={}: {}", name, value, e);
                    None
                }
            }
        })
        .collect()
}

impl Default for HostSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Record host samples through `service` until the sample stream ends.
pub fn spawn_recorder(service: MetricService, interval_ms: u64) -> JoinHandle<()> {
    let mut samples = HostSampler::new().into_stream(interval_ms);

    tokio::spawn(async move {
        while let Some(batch) = samples.next().await {
            for metric in batch {
                let name = metric.metric_name.clone();
                if let Err(e) = service.create(metric).await {
                    warn!("Failed to record host metric {}: {}", name, e);
                }
            }
            debug!("Recorded host sample");
        }
    })
}
