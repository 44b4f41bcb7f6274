use clap::Parser;
use tracing::{error, info};

use esx_exporter::{Cli, MetricsApi, build_exporter};
use esx_observe::{LoggerConfig, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1) Logger
    let cfg = LoggerConfig {
        format: cli.log_format,
        level: cli.log_level.clone(),
        ..Default::default()
    };
    init_logger(&cfg)?;

    // 2) Collectors
    let exporter = build_exporter(&cli)?;

    // 3) HTTP
    let app = MetricsApi::new(exporter).router(&cli.telemetry_path);
    let listener = tokio::net::TcpListener::bind(cli.listen_address).await?;
    info!(
        address = %cli.listen_address,
        telemetry_path = %cli.telemetry_path,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
