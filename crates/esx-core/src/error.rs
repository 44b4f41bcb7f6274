use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("{context}: {source}")]
    Update {
        context: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("metric error: {0}")]
    Metric(#[from] prometheus::Error),

    #[error("failed to build collector {name}: {reason}")]
    Build { name: String, reason: String },

    #[error("unknown collector: {0}")]
    UnknownCollector(String),
}

impl CollectorError {
    /// Wrap a cycle failure with context describing the failed step.
    pub fn update(context: &'static str, source: impl Into<BoxError>) -> Self {
        CollectorError::Update {
            context,
            source: source.into(),
        }
    }
}
