use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid tasks url: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to get task stats from {target}: {source}")]
    Transport {
        target: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request to {url} failed with code {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode tasks response: {0}")]
    Decode(#[from] serde_json::Error),
}
