use std::sync::Arc;

use async_trait::async_trait;
use esx_core::{Collector, CollectorContext, CollectorError, CollectorRegistry, NAMESPACE};
use esx_model::{AggregatedTaskStats, aggregate_tasks};
use prometheus::{GaugeVec, Opts, Registry};
use tracing::{Instrument, Span, info};
use url::Url;

use crate::{config::TasksConfig, errors::FetchError, fetch::fetch_tasks};

/// Registry name of the collector.
pub const NAME: &str = "tasks";

const ACTION_LABEL: &str = "action";

/// Options of `elasticsearch_task_stats_action_total{action}`.
pub fn task_action_opts() -> Opts {
    Opts::new("action_total", "Number of tasks of a certain action")
        .namespace(NAMESPACE)
        .subsystem("task_stats")
}

pub struct TaskCollector {
    span: Span,
    client: reqwest::Client,
    url: Url,
    config: TasksConfig,
    opts: Opts,
}

impl TaskCollector {
    pub fn new(ctx: CollectorContext, config: TasksConfig) -> Result<Self, CollectorError> {
        if ctx.url.cannot_be_a_base() {
            return Err(CollectorError::Build {
                name: NAME.to_string(),
                reason: format!("{} cannot be used as a base url", ctx.url),
            });
        }

        let opts = task_action_opts();
        GaugeVec::new(opts.clone(), &[ACTION_LABEL])?;

        ctx.span.in_scope(|| {
            info!(action_filter = %config.actions, "task collector created");
        });

        Ok(Self {
            span: ctx.span,
            client: ctx.client,
            url: ctx.url,
            config,
            opts,
        })
    }

    async fn fetch_and_aggregate(&self) -> Result<AggregatedTaskStats, FetchError> {
        let resp = fetch_tasks(&self.client, &self.url, &self.config.actions).await?;
        Ok(aggregate_tasks(&resp.tasks))
    }
}

#[async_trait]
impl Collector for TaskCollector {
    async fn update(&self, registry: &Registry) -> Result<(), CollectorError> {
        let stats = self
            .fetch_and_aggregate()
            .instrument(self.span.clone())
            .await
            .map_err(|e| CollectorError::update("failed to fetch and decode task stats", e))?;

        if stats.is_empty() {
            return Ok(());
        }

        let gauge = GaugeVec::new(self.opts.clone(), &[ACTION_LABEL])?;
        for (action, count) in stats.iter() {
            gauge.with_label_values(&[action]).set(count as f64);
        }
        registry.register(Box::new(gauge))?;
        Ok(())
    }
}

/// Register the task collector under [`NAME`].
pub fn register(registry: &mut CollectorRegistry, config: TasksConfig, enabled_by_default: bool) {
    registry.register(
        NAME,
        enabled_by_default,
        Box::new(move |ctx: CollectorContext| {
            let collector = TaskCollector::new(ctx, config.clone())?;
            Ok(Arc::new(collector) as Arc<dyn Collector>)
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(url: &str) -> CollectorContext {
        CollectorContext {
            span: Span::none(),
            url: Url::parse(url).unwrap(),
            client: reqwest::Client::new(),
        }
    }

    #[test]
    fn metric_name() {
        assert_eq!(task_action_opts().fq_name(), "elasticsearch_task_stats_action_total");
    }

    #[test]
    fn new_keeps_config() {
        let config = TasksConfig {
            actions: "cluster:*".into(),
        };
        let collector = TaskCollector::new(ctx("http://localhost:9200"), config.clone()).unwrap();
        assert_eq!(collector.config, config);
    }

    #[test]
    fn new_rejects_non_base_url() {
        let err = TaskCollector::new(ctx("data:text/plain,x"), TasksConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, CollectorError::Build { .. }));
    }

    #[test]
    fn registers_under_name() {
        let mut registry = CollectorRegistry::new();
        register(&mut registry, TasksConfig::default(), false);
        assert!(registry.enabled().is_empty());

        registry.set_enabled(NAME, true).unwrap();
        assert_eq!(registry.enabled(), vec![NAME]);
    }
}
