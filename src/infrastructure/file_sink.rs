// Local sinks: standard output and Grafana file provisioning
use crate::application::dashboard_builder::SerializedDashboard;
use crate::application::dashboard_sink::DashboardSink;
use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Writes each document to stdout, one after another.
#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

#[async_trait]
impl DashboardSink for StdoutSink {
    fn name(&self) -> &'static str {
        "stdout"
    }

    async fn publish(&self, dashboard: &SerializedDashboard) -> anyhow::Result<()> {
        let mut json = dashboard.to_json_pretty()?;
        json.push('\n');

        let mut stdout = tokio::io::stdout();
        stdout.write_all(json.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}

/// Writes `<directory>/<slug>.json` for Grafana's file provider to pick up.
#[derive(Debug, Clone)]
pub struct FileSink {
    directory: PathBuf,
}

impl FileSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, dashboard: &SerializedDashboard) -> PathBuf {
        self.directory.join(format!("{}.json", dashboard.slug))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[async_trait]
impl DashboardSink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn publish(&self, dashboard: &SerializedDashboard) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .with_context(|| format!("Failed to create {}", self.directory.display()))?;

        let path = self.path_for(dashboard);
        let mut json = dashboard.to_json_pretty()?;
        json.push('\n');

        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}
