//! Wire types of the Elasticsearch task management API and their aggregation.

mod tasks;
pub use tasks::{TaskRecord, TasksResponse};

mod stats;
pub use stats::{AggregatedTaskStats, aggregate_tasks};
