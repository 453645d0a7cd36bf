// Provisioning service - Use case for publishing every catalog dashboard
use crate::application::catalog::DashboardCatalog;
use crate::application::dashboard_sink::DashboardSink;
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProvisioningService {
    sink: Arc<dyn DashboardSink>,
}

impl ProvisioningService {
    pub fn new(sink: Arc<dyn DashboardSink>) -> Self {
        Self { sink }
    }

    /// Publish dashboards in slug order, stopping at the first failure.
    pub async fn publish_all(&self, catalog: &DashboardCatalog) -> anyhow::Result<usize> {
        let mut published = 0;

        for dashboard in catalog.iter() {
            self.sink
                .publish(dashboard)
                .await
                .with_context(|| format!("Failed to publish dashboard '{}'", dashboard.slug))?;

            tracing::info!(
                "Published dashboard '{}' ({} panels) via {}",
                dashboard.slug,
                dashboard.panel_count,
                self.sink.name()
            );
            published += 1;
        }

        Ok(published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_builder::SerializedDashboard;
    use crate::domain::dashboard::Dashboard;
    use crate::domain::exventure;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        published: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl DashboardSink for RecordingSink {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn publish(&self, dashboard: &SerializedDashboard) -> anyhow::Result<()> {
            if self.fail_on.as_deref() == Some(dashboard.slug.as_str()) {
                anyhow::bail!("rejected");
            }
            self.published.lock().unwrap().push(dashboard.slug.clone());
            Ok(())
        }
    }

    fn catalog() -> DashboardCatalog {
        DashboardCatalog::build(
            &[exventure::dashboard(), Dashboard::new("Arena", vec![])],
            &[],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_publishes_in_slug_order() {
        let sink = Arc::new(RecordingSink::default());
        let service = ProvisioningService::new(sink.clone());

        let count = service.publish_all(&catalog()).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(*sink.published.lock().unwrap(), vec!["arena", "exventure"]);
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let sink = Arc::new(RecordingSink {
            fail_on: Some("arena".to_string()),
            ..RecordingSink::default()
        });
        let service = ProvisioningService::new(sink.clone());

        let err = service.publish_all(&catalog()).await.unwrap_err();

        assert!(err.to_string().contains("arena"));
        assert!(sink.published.lock().unwrap().is_empty());
    }
}
