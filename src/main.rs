// Main entry point - Load declarations, render once, hand off to a sink or serve
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use exventure_dashboards::application::catalog::DashboardCatalog;
use exventure_dashboards::application::dashboard_sink::DashboardSink;
use exventure_dashboards::application::provisioning_service::ProvisioningService;
use exventure_dashboards::domain::exventure;
use exventure_dashboards::infrastructure::config::{AppConfig, OutputMode, load_app_config, load_dashboard_declarations};
use exventure_dashboards::infrastructure::file_sink::{FileSink, StdoutSink};
use exventure_dashboards::infrastructure::grafana_api::GrafanaApiSink;
use exventure_dashboards::presentation::app_state::AppState;
use exventure_dashboards::presentation::handlers::{get_dashboard, health_check, list_dashboards};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries dashboard JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = load_app_config().context("Failed to load configuration")?;

    let builtin = if config.dashboards.include_builtin {
        vec![exventure::dashboard()]
    } else {
        Vec::new()
    };
    let declared = load_dashboard_declarations(&config.dashboards.directory)?;
    let catalog = DashboardCatalog::build(&builtin, &declared)?;

    tracing::info!("Rendered {} dashboards", catalog.len());
    if catalog.is_empty() {
        tracing::warn!("No dashboards declared");
    }

    match build_sink(&config)? {
        Some(sink) => {
            let published = ProvisioningService::new(sink).publish_all(&catalog).await?;
            tracing::info!("Published {} dashboards", published);
            Ok(())
        }
        None => serve(&config, catalog).await,
    }
}

/// Sink for the configured output mode; `None` in serve mode.
fn build_sink(config: &AppConfig) -> anyhow::Result<Option<Arc<dyn DashboardSink>>> {
    let sink: Arc<dyn DashboardSink> = match config.output.mode {
        OutputMode::Stdout => Arc::new(StdoutSink),
        OutputMode::File => {
            let sink = FileSink::new(config.output.directory.clone());
            tracing::info!("Writing dashboards to {}", sink.directory().display());
            Arc::new(sink)
        }
        OutputMode::Api => {
            let grafana = config
                .grafana
                .clone()
                .context("output.mode = \"api\" requires a [grafana] section")?;
            Arc::new(GrafanaApiSink::new(
                grafana.host,
                grafana.token,
                grafana.folder_uid,
                grafana.overwrite,
            ))
        }
        OutputMode::Serve => return Ok(None),
    };

    Ok(Some(sink))
}

async fn serve(config: &AppConfig, catalog: DashboardCatalog) -> anyhow::Result<()> {
    let state = Arc::new(AppState { catalog });

    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboards", get(list_dashboards))
        .route("/dashboards/:slug", get(get_dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid server.bind address {}", config.server.bind))?;
    tracing::info!("Serving dashboards on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
