use async_trait::async_trait;
use prometheus::Registry;
use tracing::Span;
use url::Url;

use crate::error::CollectorError;

/// Prefix of every exported metric name.
pub const NAMESPACE: &str = "elasticsearch";

/// A source of metrics sampled once per scrape.
///
/// `update` receives a registry that lives for one scrape only. It either
/// registers every metric of the cycle and returns `Ok`, or registers nothing
/// and returns the error that ended the cycle.
#[async_trait]
pub trait Collector: Send + Sync {
    async fn update(&self, registry: &Registry) -> Result<(), CollectorError>;
}

/// Everything a collector factory receives from the host.
#[derive(Debug, Clone)]
pub struct CollectorContext {
    /// Span carrying the `collector` field; collectors log inside it.
    pub span: Span,
    /// Base URL of the Elasticsearch cluster.
    pub url: Url,
    pub client: reqwest::Client,
}
