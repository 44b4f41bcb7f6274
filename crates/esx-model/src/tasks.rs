use serde::{Deserialize, Serialize};

/// Body of `GET /_tasks?group_by=none`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasksResponse {
    /// Tasks currently running on the cluster, in response order.
    ///
    /// A body without the `tasks` key decodes to an empty list.
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

/// A single in-flight task.
///
/// Only the `action` is kept; every other field of the upstream record is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Operation type, e.g. `indices:data/write/bulk`.
    pub action: String,
}

#[cfg(test)]
impl TaskRecord {
    pub(crate) fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }
}
