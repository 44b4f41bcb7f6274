//! Collector plumbing for the Elasticsearch exporter.
//!
//! A [`Collector`] registers its metrics into a per-scrape [`Registry`] for one
//! collection cycle. Collectors are registered by name in a [`CollectorRegistry`],
//! which builds an [`Exporter`] running every enabled collector on each scrape.
//!
//! ## Metrics
//! - `elasticsearch_scrape_collector_duration_seconds{collector}` - Gauge
//! - `elasticsearch_scrape_collector_success{collector}` - Gauge

pub mod error;
pub use error::CollectorError;

mod collector;
pub use collector::{Collector, CollectorContext, NAMESPACE};

mod registry;
pub use registry::{CollectorFactory, CollectorRegistry};

mod exporter;
pub use exporter::Exporter;

pub use prometheus::{Encoder, Registry, TEXT_FORMAT, TextEncoder, proto::MetricFamily};
