use std::{net::SocketAddr, time::Duration};

use clap::{ArgAction, Parser};
use esx_observe::{LoggerFormat, LoggerLevel};
use esx_tasks::DEFAULT_ACTIONS;
use url::Url;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "esx-exporter",
    version,
    about = "Prometheus exporter for Elasticsearch task statistics"
)]
pub struct Cli {
    /// Address to listen on for web interface and telemetry.
    #[arg(
        long = "web.listen-address",
        env = "WEB_LISTEN_ADDRESS",
        default_value = "0.0.0.0:9114"
    )]
    pub listen_address: SocketAddr,

    /// Path under which to expose metrics.
    #[arg(
        long = "web.telemetry-path",
        env = "WEB_TELEMETRY_PATH",
        default_value = "/metrics",
        value_parser = parse_telemetry_path
    )]
    pub telemetry_path: String,

    /// HTTP API address of an Elasticsearch node.
    #[arg(long = "es.uri", env = "ES_URI", default_value = "http://localhost:9200")]
    pub es_uri: Url,

    /// Timeout for requests to Elasticsearch, e.g. `5s` or `500ms`.
    #[arg(
        long = "es.timeout",
        env = "ES_TIMEOUT",
        default_value = "5s",
        value_parser = parse_duration
    )]
    pub es_timeout: Duration,

    /// Filter on task actions, same syntax as the task API `actions` parameter.
    #[arg(long = "tasks.actions", env = "ES_TASKS_ACTIONS", default_value = DEFAULT_ACTIONS)]
    pub tasks_actions: String,

    /// Enable the tasks collector.
    #[arg(
        long = "collector.tasks",
        env = "ES_COLLECTOR_TASKS",
        default_value_t = false,
        action = ArgAction::Set
    )]
    pub collector_tasks: bool,

    #[arg(long = "log.level", env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LoggerLevel,

    /// One of text, json, journald.
    #[arg(long = "log.format", env = "LOG_FORMAT", default_value = "text")]
    pub log_format: LoggerFormat,
}

/// Parse `<n>ms`, `<n>s` or a bare number of seconds.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let (digits, to_duration): (&str, fn(u64) -> Duration) =
        if let Some(ms) = s.strip_suffix("ms") {
            (ms, Duration::from_millis)
        } else if let Some(secs) = s.strip_suffix('s') {
            (secs, Duration::from_secs)
        } else {
            (s, Duration::from_secs)
        };

    let n: u64 = digits
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration: {s:?}"))?;
    if n == 0 {
        return Err("duration must be greater than zero".to_string());
    }
    Ok(to_duration(n))
}

fn parse_telemetry_path(s: &str) -> Result<String, String> {
    if !s.starts_with('/') || s == "/" {
        return Err(format!("telemetry path must start with '/' and not be the root: {s:?}"));
    }
    Ok(s.to_string())
}
