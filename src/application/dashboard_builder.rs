// Dashboard builder - Use case for turning a declared dashboard into a Grafana document
use crate::domain::dashboard::{Dashboard, NumberedDashboard, NumberedPanel, NumberedRow, Row};
use crate::domain::error::BuildError;
use crate::infrastructure::grafana_mapper::dashboard_to_grafana;
use serde_json::Value;
use std::collections::HashSet;

/// First id handed out to panels without an explicit one.
pub const PANEL_ID_BASE: u32 = 1;
pub const MAX_SPAN: u8 = 12;
/// Slug for dashboards whose title and uid have no alphanumerics.
pub const FALLBACK_SLUG: &str = "dashboard";

/// A rendered dashboard document, ready to publish.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedDashboard {
    pub slug: String,
    pub title: String,
    pub panel_count: usize,
    pub document: Value,
}

impl SerializedDashboard {
    /// Two-space indented JSON with sorted keys.
    pub fn to_json_pretty(&self) -> Result<String, BuildError> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }
}

pub fn build(title: &str, rows: Vec<Row>) -> Result<SerializedDashboard, BuildError> {
    build_dashboard(&Dashboard::new(title, rows))
}

pub fn build_dashboard(dashboard: &Dashboard) -> Result<SerializedDashboard, BuildError> {
    let numbered = assign_panel_ids(dashboard)?;
    let grafana = dashboard_to_grafana(&numbered);
    let document = serde_json::to_value(&grafana)?;

    for row in &numbered.rows {
        for numbered_panel in &row.panels {
            tracing::trace!(
                "Panel {} '{}' ({})",
                numbered_panel.id,
                numbered_panel.panel.title,
                numbered_panel.panel.kind.name()
            );
        }
    }
    tracing::debug!(
        "Built dashboard '{}' with panel ids {:?}",
        dashboard.title,
        numbered.panel_ids()
    );

    Ok(SerializedDashboard {
        slug: dashboard_slug(dashboard),
        title: dashboard.title.clone(),
        panel_count: dashboard.panel_count(),
        document,
    })
}

/// Number every panel in traversal order, returning a new tree.
///
/// Explicit ids are kept. Every other panel takes the next integer from
/// `PANEL_ID_BASE` that no explicit id already claims, so a dashboard without
/// explicit ids is numbered `1..=N`.
pub fn assign_panel_ids(dashboard: &Dashboard) -> Result<NumberedDashboard, BuildError> {
    validate(dashboard)?;

    let mut explicit = HashSet::new();
    for id in dashboard.panels().filter_map(|p| p.id) {
        if !explicit.insert(id) {
            return Err(BuildError::DuplicatePanelId(id));
        }
    }

    let mut next = PANEL_ID_BASE;
    let mut take_next = || {
        while explicit.contains(&next) {
            next += 1;
        }
        let id = next;
        next += 1;
        id
    };

    let rows = dashboard
        .rows
        .iter()
        .map(|row| NumberedRow {
            row: row.clone(),
            panels: row
                .panels
                .iter()
                .map(|panel| NumberedPanel {
                    id: panel.id.unwrap_or_else(&mut take_next),
                    panel: panel.clone(),
                })
                .collect(),
        })
        .collect();

    Ok(NumberedDashboard {
        dashboard: dashboard.clone(),
        rows,
    })
}

fn validate(dashboard: &Dashboard) -> Result<(), BuildError> {
    if dashboard.title.is_empty() {
        return Err(BuildError::EmptyTitle);
    }

    for panel in dashboard.panels() {
        if let Some(span) = panel.span {
            if span == 0 || span > MAX_SPAN {
                return Err(BuildError::InvalidSpan {
                    panel: panel.title.clone(),
                    span,
                });
            }
        }
    }

    Ok(())
}

/// Slug from the title, else from the uid, else `FALLBACK_SLUG`.
pub fn dashboard_slug(dashboard: &Dashboard) -> String {
    let slug = slugify(&dashboard.title);
    if !slug.is_empty() {
        return slug;
    }

    dashboard
        .uid
        .as_deref()
        .map(slugify)
        .filter(|uid| !uid.is_empty())
        .unwrap_or_else(|| FALLBACK_SLUG.to_string())
}

/// Lower-case the title and collapse runs of other characters into `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
