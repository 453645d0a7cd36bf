// Grafana HTTP API sink
use crate::application::dashboard_builder::SerializedDashboard;
use crate::application::dashboard_sink::DashboardSink;
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct GrafanaApiSink {
    host: String,
    token: String,
    folder_uid: Option<String>,
    overwrite: bool,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadRequest<'a> {
    dashboard: &'a Value,
    overwrite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    folder_uid: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    version: Option<u64>,
}

impl GrafanaApiSink {
    pub fn new(host: String, token: String, folder_uid: Option<String>, overwrite: bool) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            token,
            folder_uid,
            overwrite,
            client: reqwest::Client::new(),
        }
    }

    fn upload_url(&self) -> String {
        format!("{}/api/dashboards/db", self.host)
    }

    fn upload_body(&self, dashboard: &SerializedDashboard) -> anyhow::Result<Value> {
        let request = UploadRequest {
            dashboard: &dashboard.document,
            overwrite: self.overwrite,
            folder_uid: self.folder_uid.as_deref(),
        };
        Ok(serde_json::to_value(request)?)
    }
}

#[async_trait]
impl DashboardSink for GrafanaApiSink {
    fn name(&self) -> &'static str {
        "grafana-api"
    }

    async fn publish(&self, dashboard: &SerializedDashboard) -> anyhow::Result<()> {
        let url = self.upload_url();
        let body = self.upload_body(dashboard)?;

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Grafana")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Grafana upload failed with status {}: {}", status, body);
        }

        let data = response
            .json::<UploadResponse>()
            .await
            .context("Failed to parse Grafana response")?;

        tracing::debug!(
            "Grafana accepted '{}': status={:?} url={:?} version={:?}",
            dashboard.slug,
            data.status,
            data.url,
            data.version
        );

        Ok(())
    }
}
