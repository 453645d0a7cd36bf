use crate::domain::dashboard::{
    Dashboard, GraphOptions, Panel, PanelKind, Row, SingleStatOptions, Target, TimeRange,
};
use crate::domain::error::BuildError;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "EXVENTURE_DASHBOARDS";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub grafana: Option<GrafanaSettings>,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dashboards: DashboardSources,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Stdout,
    File,
    Api,
    Serve,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputSettings {
    #[serde(default)]
    pub mode: OutputMode,
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            directory: default_output_directory(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GrafanaSettings {
    pub host: String,
    pub token: String,
    #[serde(default)]
    pub folder_uid: Option<String>,
    #[serde(default = "default_true")]
    pub overwrite: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSources {
    #[serde(default = "default_true")]
    pub include_builtin: bool,
    #[serde(default = "default_declaration_directory")]
    pub directory: PathBuf,
}

impl Default for DashboardSources {
    fn default() -> Self {
        Self {
            include_builtin: true,
            directory: default_declaration_directory(),
        }
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("provisioning/dashboards")
}

fn default_declaration_directory() -> PathBuf {
    PathBuf::from("config/dashboards")
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_true() -> bool {
    true
}

/// Dashboard declared in a TOML file.
#[derive(Debug, Deserialize, Clone)]
pub struct DashboardDeclaration {
    pub title: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub time_from: Option<String>,
    #[serde(default)]
    pub time_to: Option<String>,
    #[serde(default)]
    pub rows: Vec<RowDeclaration>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RowDeclaration {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub collapse: bool,
    #[serde(default)]
    pub panels: Vec<PanelDeclaration>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PanelDeclaration {
    #[serde(default = "default_panel_kind")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub data_source: Option<String>,
    #[serde(default)]
    pub span: Option<u8>,
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub stack: bool,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub value_name: Option<String>,
    #[serde(default)]
    pub sparkline: bool,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub targets: Vec<TargetDeclaration>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TargetDeclaration {
    pub expr: String,
    #[serde(default)]
    pub legend_format: Option<String>,
}

fn default_panel_kind() -> String {
    "graph".to_string()
}

impl DashboardDeclaration {
    pub fn into_dashboard(self) -> Result<Dashboard, BuildError> {
        let rows = self
            .rows
            .into_iter()
            .map(RowDeclaration::into_row)
            .collect::<Result<Vec<_>, _>>()?;

        let mut dashboard = Dashboard::new(self.title, rows).with_tags(self.tags);
        if let Some(uid) = self.uid {
            dashboard = dashboard.with_uid(uid);
        }
        if let Some(description) = self.description {
            dashboard = dashboard.with_description(description);
        }
        if let Some(refresh) = self.refresh {
            dashboard = dashboard.with_refresh(refresh);
        }
        if let Some(timezone) = self.timezone {
            dashboard = dashboard.with_timezone(timezone);
        }

        let defaults = TimeRange::default();
        Ok(dashboard.with_time(TimeRange {
            from: self.time_from.unwrap_or(defaults.from),
            to: self.time_to.unwrap_or(defaults.to),
        }))
    }
}

impl RowDeclaration {
    fn into_row(self) -> Result<Row, BuildError> {
        let panels = self
            .panels
            .into_iter()
            .map(PanelDeclaration::into_panel)
            .collect::<Result<Vec<_>, _>>()?;

        let mut row = Row::new(panels);
        if let Some(title) = self.title {
            row = row.with_title(title);
        }
        if let Some(height) = self.height {
            row = row.with_height(height);
        }
        if self.collapse {
            row = row.collapsed();
        }
        Ok(row)
    }
}

impl PanelDeclaration {
    fn into_panel(self) -> Result<Panel, BuildError> {
        let targets: Vec<Target> = self
            .targets
            .into_iter()
            .map(|t| Target {
                expr: t.expr,
                legend_format: t.legend_format,
            })
            .collect();

        let mut panel = match self.kind.as_str() {
            "graph" => {
                let mut graph = GraphOptions {
                    stack: self.stack,
                    ..GraphOptions::default()
                };
                if let Some(format) = self.format {
                    graph.y_format = format;
                }
                Panel::with_kind(self.title, self.data_source, targets, PanelKind::Graph(graph))
            }
            "singlestat" => {
                let defaults = SingleStatOptions::default();
                let stat = SingleStatOptions {
                    format: self.format.unwrap_or(defaults.format),
                    value_name: self.value_name.unwrap_or(defaults.value_name),
                    sparkline: self.sparkline,
                };
                Panel::with_kind(self.title, self.data_source, targets, PanelKind::SingleStat(stat))
            }
            // Text panels run no queries
            "text" => Panel::text(self.title, self.content.unwrap_or_default()),
            other => return Err(BuildError::UnknownPanelKind(other.to_string())),
        };

        if let Some(span) = self.span {
            panel = panel.with_span(span);
        }
        if let Some(id) = self.id {
            panel = panel.with_id(id);
        }
        Ok(panel)
    }
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_app_config_from(Path::new("."), app_environment())
}

fn app_environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX).separator("__")
}

/// Read `<base>/config/app.*` if present, then apply `env` on top.
fn load_app_config_from(base: &Path, env: config::Environment) -> anyhow::Result<AppConfig> {
    let file = base.join("config").join("app");
    let settings = config::Config::builder()
        .add_source(config::File::with_name(&file.to_string_lossy()).required(false))
        .add_source(env)
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_dashboard_declaration(path: &Path) -> anyhow::Result<DashboardDeclaration> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path).format(config::FileFormat::Toml))
        .build()
        .with_context(|| format!("Failed to read dashboard declaration {}", path.display()))?;

    settings
        .try_deserialize()
        .with_context(|| format!("Invalid dashboard declaration {}", path.display()))
}

/// Load every `*.toml` declaration in `dir`, in file-name order.
///
/// A missing directory yields no dashboards.
pub fn load_dashboard_declarations(dir: &Path) -> anyhow::Result<Vec<Dashboard>> {
    if !dir.is_dir() {
        tracing::debug!("No dashboard declarations at {}", dir.display());
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    let mut dashboards = Vec::with_capacity(paths.len());
    for path in paths {
        let declaration = load_dashboard_declaration(&path)?;
        let dashboard = declaration
            .into_dashboard()
            .with_context(|| format!("Invalid dashboard declaration {}", path.display()))?;
        tracing::info!("Loaded dashboard '{}' from {}", dashboard.title, path.display());
        dashboards.push(dashboard);
    }

    Ok(dashboards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_builder::build_dashboard;
    use crate::domain::exventure;
    use std::fs;

    const SAMPLE: &str = r#"
title = "Server Health"
tags = ["ops"]
refresh = "30s"

[[rows]]
title = "Overview"

[[rows.panels]]
kind = "singlestat"
title = "Online"
data_source = "Prometheus"
format = "short"
span = 3

[[rows.panels.targets]]
expr = "sum(exventure_player_count)"

[[rows.panels]]
kind = "text"
title = "Notes"
content = "Runbook"

[[rows]]
height = "300px"
"#;

    #[test]
    fn test_declaration_into_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("health.toml");
        fs::write(&path, SAMPLE).unwrap();

        let dashboard = load_dashboard_declaration(&path)
            .unwrap()
            .into_dashboard()
            .unwrap();

        assert_eq!(dashboard.title, "Server Health");
        assert_eq!(dashboard.tags, vec!["ops".to_string()]);
        assert_eq!(dashboard.refresh, "30s");
        assert_eq!(dashboard.rows.len(), 2);
        assert_eq!(dashboard.rows[0].title.as_deref(), Some("Overview"));
        assert!(dashboard.rows[1].panels.is_empty());
        assert_eq!(dashboard.rows[1].height, "300px");

        let stat = &dashboard.rows[0].panels[0];
        assert_eq!(stat.span, Some(3));
        match &stat.kind {
            PanelKind::SingleStat(options) => {
                assert_eq!(options.format, "short");
                assert_eq!(options.value_name, "avg");
            }
            other => panic!("expected singlestat, got {other:?}"),
        }
        assert_eq!(dashboard.rows[0].panels[1].kind.name(), "text");
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        app_environment().source(Some(source))
    }

    #[test]
    fn test_app_config_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_app_config_from(dir.path(), env(&[])).unwrap();

        assert_eq!(config.output.mode, OutputMode::Stdout);
        assert_eq!(config.output.directory, PathBuf::from("provisioning/dashboards"));
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert!(config.grafana.is_none());
        assert!(config.dashboards.include_builtin);
        assert_eq!(config.dashboards.directory, PathBuf::from("config/dashboards"));
    }

    #[test]
    fn test_app_config_file_and_env_override() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config/app.toml"),
            "[output]\nmode = \"api\"\n\n[server]\nbind = \"127.0.0.1:9000\"\n",
        )
        .unwrap();

        let config = load_app_config_from(
            dir.path(),
            env(&[
                ("EXVENTURE_DASHBOARDS__OUTPUT__MODE", "file"),
                ("EXVENTURE_DASHBOARDS__GRAFANA__HOST", "http://grafana:3000"),
                ("EXVENTURE_DASHBOARDS__GRAFANA__TOKEN", "secret"),
            ]),
        )
        .unwrap();

        assert_eq!(config.output.mode, OutputMode::File);
        assert_eq!(config.server.bind, "127.0.0.1:9000");
        let grafana = config.grafana.unwrap();
        assert_eq!(grafana.host, "http://grafana:3000");
        assert_eq!(grafana.token, "secret");
        assert!(grafana.overwrite);
        assert!(grafana.folder_uid.is_none());
    }

    #[test]
    fn test_text_declaration_keeps_span_and_id() {
        let declaration = PanelDeclaration {
            kind: "text".to_string(),
            title: "Notes".to_string(),
            data_source: Some("Prometheus".to_string()),
            span: Some(6),
            id: Some(40),
            stack: false,
            format: None,
            value_name: None,
            sparkline: false,
            content: Some("Runbook".to_string()),
            targets: vec![TargetDeclaration {
                expr: "up".to_string(),
                legend_format: None,
            }],
        };

        let panel = declaration.into_panel().unwrap();
        assert_eq!(panel.span, Some(6));
        assert_eq!(panel.id, Some(40));
        assert!(panel.targets.is_empty());
        assert!(panel.data_source.is_none());
    }

    #[test]
    fn test_unknown_panel_kind_is_rejected() {
        let declaration = PanelDeclaration {
            kind: "heatmap".to_string(),
            title: "Heat".to_string(),
            data_source: None,
            span: None,
            id: None,
            stack: false,
            format: None,
            value_name: None,
            sparkline: false,
            content: None,
            targets: Vec::new(),
        };

        let err = declaration.into_panel().unwrap_err();
        assert!(matches!(err, BuildError::UnknownPanelKind(kind) if kind == "heatmap"));
    }

    #[test]
    fn test_declarations_load_in_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.toml"), "title = \"Second\"\n").unwrap();
        fs::write(dir.path().join("a.toml"), "title = \"First\"\n").unwrap();
        fs::write(dir.path().join("ignored.json"), "{}").unwrap();

        let dashboards = load_dashboard_declarations(dir.path()).unwrap();
        let titles: Vec<&str> = dashboards.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let dashboards = load_dashboard_declarations(&dir.path().join("absent")).unwrap();
        assert!(dashboards.is_empty());
    }

    #[test]
    fn test_shipped_exventure_declaration_matches_builtin() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/dashboards/exventure.toml");
        let declared = load_dashboard_declaration(&path)
            .unwrap()
            .into_dashboard()
            .unwrap();

        let from_file = build_dashboard(&declared).unwrap();
        let builtin = build_dashboard(&exventure::dashboard()).unwrap();
        assert_eq!(from_file.to_json_pretty().unwrap(), builtin.to_json_pretty().unwrap());
    }
}
