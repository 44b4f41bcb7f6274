use std::{sync::Arc, time::Instant};

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder, proto::MetricFamily};
use tokio::task::JoinSet;
use tracing::{debug, error, instrument};

use crate::collector::{Collector, NAMESPACE};

const SCRAPE_SUBSYSTEM: &str = "scrape";

fn scrape_gauge(name: &str, help: &str) -> prometheus::Result<GaugeVec> {
    let opts = Opts::new(name, help)
        .namespace(NAMESPACE)
        .subsystem(SCRAPE_SUBSYSTEM);
    GaugeVec::new(opts, &["collector"])
}

/// Outcome of one collector run.
struct Outcome {
    name: String,
    duration: f64,
    success: bool,
}

/// Runs every built collector once per scrape.
pub struct Exporter {
    collectors: Vec<(String, Arc<dyn Collector>)>,
}

impl Exporter {
    pub fn new(collectors: Vec<(String, Arc<dyn Collector>)>) -> Self {
        Self { collectors }
    }

    pub fn collector_names(&self) -> Vec<&str> {
        self.collectors.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Run all collectors concurrently against a fresh registry and gather it.
    ///
    /// A failed collector registers nothing; its `collector_success` is `0`.
    #[instrument(level = "debug", skip(self), fields(collectors = self.collectors.len()))]
    pub async fn scrape(&self) -> prometheus::Result<Vec<MetricFamily>> {
        let registry = Registry::new();

        let mut set = JoinSet::new();
        for (name, collector) in &self.collectors {
            set.spawn(execute(name.clone(), Arc::clone(collector), registry.clone()));
        }

        let mut outcomes = Vec::with_capacity(self.collectors.len());
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => error!(error = %e, "collector task aborted"),
            }
        }

        if !outcomes.is_empty() {
            let duration = scrape_gauge(
                "collector_duration_seconds",
                "elasticsearch_exporter: Duration of a collector scrape.",
            )?;
            let success = scrape_gauge(
                "collector_success",
                "elasticsearch_exporter: Whether a collector succeeded.",
            )?;
            for outcome in &outcomes {
                let labels = [outcome.name.as_str()];
                duration.with_label_values(&labels).set(outcome.duration);
                success
                    .with_label_values(&labels)
                    .set(if outcome.success { 1.0 } else { 0.0 });
            }
            registry.register(Box::new(duration))?;
            registry.register(Box::new(success))?;
        }

        Ok(registry.gather())
    }

    /// Scrape and encode in the Prometheus text exposition format.
    pub async fn render_text(&self) -> prometheus::Result<Vec<u8>> {
        let families = self.scrape().await?;
        let mut buf = Vec::new();
        TextEncoder::new().encode(&families, &mut buf)?;
        Ok(buf)
    }
}

async fn execute(name: String, collector: Arc<dyn Collector>, registry: Registry) -> Outcome {
    let started = Instant::now();
    let result = collector.update(&registry).await;
    let duration = started.elapsed().as_secs_f64();

    let success = match result {
        Ok(()) => {
            debug!(collector = %name, duration_seconds = duration, "collector succeeded");
            true
        }
        Err(e) => {
            error!(
                collector = %name,
                duration_seconds = duration,
                error = %e,
                "collector failed"
            );
            false
        }
    };

    Outcome {
        name,
        duration,
        success,
    }
}
