// Dashboard catalog - Every dashboard rendered once, keyed by slug
use crate::application::dashboard_builder::{SerializedDashboard, build_dashboard};
use crate::domain::dashboard::Dashboard;
use crate::domain::error::BuildError;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct DashboardCatalog {
    entries: BTreeMap<String, SerializedDashboard>,
}

impl DashboardCatalog {
    /// Render built-in and declared dashboards.
    ///
    /// A declared dashboard replaces a built-in one with the same slug; two
    /// dashboards from the same source sharing a slug is an error.
    pub fn build(builtin: &[Dashboard], declared: &[Dashboard]) -> Result<Self, BuildError> {
        let mut entries = BTreeMap::new();

        for dashboard in builtin {
            let rendered = build_dashboard(dashboard)?;
            if entries.contains_key(&rendered.slug) {
                return Err(BuildError::DuplicateSlug(rendered.slug));
            }
            entries.insert(rendered.slug.clone(), rendered);
        }

        let mut seen = Vec::with_capacity(declared.len());
        for dashboard in declared {
            let rendered = build_dashboard(dashboard)?;
            if seen.contains(&rendered.slug) {
                return Err(BuildError::DuplicateSlug(rendered.slug));
            }
            seen.push(rendered.slug.clone());

            if entries.contains_key(&rendered.slug) {
                tracing::info!("Declared dashboard '{}' replaces built-in", rendered.slug);
            }
            entries.insert(rendered.slug.clone(), rendered);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, slug: &str) -> Option<&SerializedDashboard> {
        self.entries.get(slug)
    }

    /// Dashboards in slug order.
    pub fn iter(&self) -> impl Iterator<Item = &SerializedDashboard> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::{Panel, Row, Target};
    use crate::domain::exventure;

    fn single(title: &str, panel: &str) -> Dashboard {
        Dashboard::new(
            title,
            vec![Row::new(vec![Panel::graph(panel, "Prometheus", vec![Target::new("up")])])],
        )
    }

    #[test]
    fn test_catalog_keys_by_slug() {
        let catalog = DashboardCatalog::build(
            &[exventure::dashboard()],
            &[single("Zone Load", "CPU")],
        )
        .unwrap();

        let slugs: Vec<&str> = catalog.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["exventure", "zone-load"]);
        assert_eq!(catalog.get("zone-load").unwrap().title, "Zone Load");
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_numbering_is_dashboard_local() {
        let catalog =
            DashboardCatalog::build(&[single("One", "a"), single("Two", "b")], &[]).unwrap();

        for dashboard in catalog.iter() {
            assert_eq!(dashboard.document["rows"][0]["panels"][0]["id"], 1);
        }
    }

    #[test]
    fn test_declared_replaces_builtin() {
        let catalog = DashboardCatalog::build(
            &[exventure::dashboard()],
            &[single("ExVenture", "Only Panel")],
        )
        .unwrap();

        assert_eq!(catalog.len(), 1);
        let doc = &catalog.get("exventure").unwrap().document;
        assert_eq!(doc["rows"][0]["panels"][0]["title"], "Only Panel");
    }

    #[test]
    fn test_symbol_titles_are_keyed_by_uid() {
        let catalog = DashboardCatalog::build(
            &[
                Dashboard::new("!!!", vec![]).with_uid("alerts"),
                Dashboard::new("???", vec![]).with_uid("questions"),
            ],
            &[],
        )
        .unwrap();

        let slugs: Vec<&str> = catalog.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["alerts", "questions"]);
        assert_eq!(catalog.get("alerts").unwrap().title, "!!!");
    }

    #[test]
    fn test_duplicate_declared_slug_is_rejected() {
        let err = DashboardCatalog::build(&[], &[single("Zone Load", "a"), single("zone load", "b")])
            .unwrap_err();

        assert!(matches!(err, BuildError::DuplicateSlug(slug) if slug == "zone-load"));
    }
}
