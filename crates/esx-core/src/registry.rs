use std::{collections::BTreeMap, sync::Arc};

use tracing::{debug, info_span};
use url::Url;

use crate::{
    collector::{Collector, CollectorContext},
    error::CollectorError,
    exporter::Exporter,
};

pub type CollectorFactory =
    Box<dyn Fn(CollectorContext) -> Result<Arc<dyn Collector>, CollectorError> + Send + Sync>;

struct Entry {
    enabled: bool,
    factory: CollectorFactory,
}

/// Named collector factories, each enabled or disabled.
#[derive(Default)]
pub struct CollectorRegistry {
    entries: BTreeMap<String, Entry>,
}

impl CollectorRegistry {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register a factory under `name`, replacing any previous one.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        enabled_by_default: bool,
        factory: CollectorFactory,
    ) {
        self.entries.insert(
            name.into(),
            Entry {
                enabled: enabled_by_default,
                factory,
            },
        );
    }

    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), CollectorError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| CollectorError::UnknownCollector(name.to_string()))?;
        entry.enabled = enabled;
        Ok(())
    }

    /// Names of the enabled collectors, sorted.
    pub fn enabled(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, e)| e.enabled)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Instantiate every enabled collector; the first factory error aborts the build.
    pub fn build(&self, url: &Url, client: &reqwest::Client) -> Result<Exporter, CollectorError> {
        let mut collectors = Vec::new();
        for (name, entry) in self.entries.iter().filter(|(_, e)| e.enabled) {
            let ctx = CollectorContext {
                span: info_span!("collector", collector = %name),
                url: url.clone(),
                client: client.clone(),
            };
            let collector = (entry.factory)(ctx)?;
            debug!(collector = %name, "collector built");
            collectors.push((name.clone(), collector));
        }
        Ok(Exporter::new(collectors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use prometheus::Registry;

    struct Noop;

    #[async_trait]
    impl Collector for Noop {
        async fn update(&self, _registry: &Registry) -> Result<(), CollectorError> {
            Ok(())
        }
    }

    fn noop() -> CollectorFactory {
        Box::new(|_ctx: CollectorContext| Ok(Arc::new(Noop) as Arc<dyn Collector>))
    }

    fn url() -> Url {
        Url::parse("http://localhost:9200").unwrap()
    }

    #[test]
    fn respects_default_enabled() {
        let mut registry = CollectorRegistry::new();
        registry.register("tasks", false, noop());
        registry.register("cluster", true, noop());
        assert_eq!(registry.enabled(), vec!["cluster"]);

        registry.set_enabled("tasks", true).unwrap();
        registry.set_enabled("cluster", false).unwrap();
        assert_eq!(registry.enabled(), vec!["tasks"]);
    }

    #[test]
    fn unknown_collector_is_rejected() {
        let mut registry = CollectorRegistry::new();
        let err = registry.set_enabled("snapshots", true).unwrap_err();
        assert!(matches!(err, CollectorError::UnknownCollector(name) if name == "snapshots"));
    }

    #[test]
    fn build_only_enabled() {
        let mut registry = CollectorRegistry::new();
        registry.register("a", true, noop());
        registry.register("b", false, noop());
        registry.register("c", true, noop());

        let exporter = registry.build(&url(), &reqwest::Client::new()).unwrap();
        assert_eq!(exporter.collector_names(), vec!["a", "c"]);
    }

    #[test]
    fn build_propagates_factory_error() {
        let mut registry = CollectorRegistry::new();
        registry.register(
            "broken",
            true,
            Box::new(|_ctx: CollectorContext| -> Result<Arc<dyn Collector>, CollectorError> {
                Err(CollectorError::Build {
                    name: "broken".into(),
                    reason: "no".into(),
                })
            }),
        );

        let err = registry.build(&url(), &reqwest::Client::new()).err().unwrap();
        assert!(matches!(err, CollectorError::Build { .. }));
    }
}
