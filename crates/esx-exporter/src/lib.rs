mod cli;
pub use cli::{Cli, parse_duration};

mod http;
pub use http::MetricsApi;

use std::sync::Arc;

use esx_core::{CollectorRegistry, Exporter};
use esx_tasks::TasksConfig;
use tracing::{debug, info};

/// Build the HTTP client and every enabled collector from the command line.
pub fn build_exporter(cli: &Cli) -> anyhow::Result<Arc<Exporter>> {
    let client = reqwest::Client::builder().timeout(cli.es_timeout).build()?;

    let mut registry = CollectorRegistry::new();
    let tasks = TasksConfig {
        actions: cli.tasks_actions.clone(),
    };
    esx_tasks::register(&mut registry, tasks, false);
    registry.set_enabled(esx_tasks::NAME, cli.collector_tasks)?;
    debug!(enabled = ?registry.enabled(), "building collectors");

    let exporter = registry.build(&cli.es_uri, &client)?;
    info!(
        collectors = ?exporter.collector_names(),
        es_uri = %cli.es_uri,
        "exporter ready"
    );
    Ok(Arc::new(exporter))
}
