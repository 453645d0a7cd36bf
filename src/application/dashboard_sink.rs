// Sink trait for publishing rendered dashboards
use crate::application::dashboard_builder::SerializedDashboard;
use async_trait::async_trait;

#[async_trait]
pub trait DashboardSink: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Hand one rendered dashboard to the provisioning target
    async fn publish(&self, dashboard: &SerializedDashboard) -> anyhow::Result<()>;
}
