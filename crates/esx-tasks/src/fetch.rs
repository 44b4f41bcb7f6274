use esx_model::TasksResponse;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::errors::FetchError;

const TASKS_PATH: &str = "_tasks";

/// Resolve `_tasks` against `base` and attach the query parameters.
///
/// Resolution follows relative-reference rules: the last path segment of
/// `base` is replaced unless it ends with `/`.
pub fn tasks_url(base: &Url, actions: &str) -> Result<Url, FetchError> {
    let mut url = base.join(TASKS_PATH)?;
    url.query_pairs_mut()
        .clear()
        .append_pair("group_by", "none")
        .append_pair("actions", actions);
    Ok(url)
}

/// Fetch one task snapshot.
///
/// The body is only decoded for a `200 OK`; any other status fails without parsing.
pub async fn fetch_tasks(
    client: &Client,
    base: &Url,
    actions: &str,
) -> Result<TasksResponse, FetchError> {
    let url = tasks_url(base, actions)?;
    debug!(url = %url, "fetching tasks");

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            target: target(&url),
            source,
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        release(response).await;
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })?;
    Ok(serde_json::from_slice(&body)?)
}

/// Drain an unread body so the connection returns to the pool.
async fn release(response: Response) {
    if let Err(e) = response.bytes().await {
        warn!(error = %e, "failed to release response body");
    }
}

fn target(url: &Url) -> String {
    format!(
        "{}://{}:{}{}",
        url.scheme(),
        url.host_str().unwrap_or_default(),
        url.port_or_known_default().map(|p| p.to_string()).unwrap_or_default(),
        url.path()
    )
}
