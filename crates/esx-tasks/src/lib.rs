//! Task-stats collector.
//!
//! Samples `GET /_tasks?group_by=none&actions=<filter>` and publishes the number
//! of in-flight tasks per action.
//!
//! ## Metrics
//! - `elasticsearch_task_stats_action_total{action}` - Gauge

mod config;
pub use config::{DEFAULT_ACTIONS, TasksConfig};

mod errors;
pub use errors::FetchError;

mod fetch;
pub use fetch::{fetch_tasks, tasks_url};

mod collector;
pub use collector::{NAME, TaskCollector, register, task_action_opts};
