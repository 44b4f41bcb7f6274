use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use esx_core::{Exporter, TEXT_FORMAT};
use tracing::error;

/// HTTP surface of the exporter.
pub struct MetricsApi {
    exporter: Arc<Exporter>,
}

impl MetricsApi {
    pub fn new(exporter: Arc<Exporter>) -> Self {
        Self { exporter }
    }

    /// Routes:
    /// - GET `telemetry_path` - scrape every collector
    /// - GET / - landing page linking to the metrics
    pub fn router(self, telemetry_path: &str) -> Router {
        let landing = landing_page(telemetry_path);
        Router::new()
            .route(telemetry_path, get(metrics))
            .route("/", get(move || async move { Html(landing) }))
            .with_state(self.exporter)
    }
}

async fn metrics(State(exporter): State<Arc<Exporter>>) -> Response {
    match exporter.render_text().await {
        Ok(body) => ([(header::CONTENT_TYPE, TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            error!(error = %e, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn landing_page(telemetry_path: &str) -> String {
    format!(
        "<html>\n<head><title>Elasticsearch Exporter</title></head>\n<body>\n\
         <h1>Elasticsearch Exporter</h1>\n<p><a href=\"{telemetry_path}\">Metrics</a></p>\n\
         </body>\n</html>\n"
    )
}
