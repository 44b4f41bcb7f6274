/// Default value of the `actions` filter: every index-level action.
pub const DEFAULT_ACTIONS: &str = "indices:*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasksConfig {
    /// Passed verbatim as the `actions` parameter of the task API.
    ///
    /// Accepts whatever Elasticsearch accepts: wildcards, comma-separated lists.
    pub actions: String,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            actions: DEFAULT_ACTIONS.to_string(),
        }
    }
}
