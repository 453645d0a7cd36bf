// Grafana dashboard JSON model (row-based schema, version 12)
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 12;
pub const DEFAULT_INTERVAL_FACTOR: u32 = 2;
pub const DEFAULT_STEP: u32 = 10;
pub const TIME_SERIES_FORMAT: &str = "time_series";

const REFRESH_INTERVALS: [&str; 10] = ["5s", "10s", "30s", "1m", "5m", "15m", "30m", "1h", "2h", "1d"];
const TIME_OPTIONS: [&str; 9] = ["5m", "15m", "1h", "6h", "12h", "24h", "2d", "7d", "30d"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaDashboard {
    #[serde(rename = "__inputs")]
    pub inputs: Vec<Value>,
    pub annotations: ItemList,
    pub description: String,
    pub editable: bool,
    pub gnet_id: Option<u32>,
    pub graph_tooltip: u8,
    pub hide_controls: bool,
    pub id: Option<u32>,
    pub links: Vec<Value>,
    pub refresh: String,
    pub rows: Vec<GrafanaRow>,
    pub schema_version: u32,
    pub shared_crosshair: bool,
    pub style: String,
    pub tags: Vec<String>,
    pub templating: ItemList,
    pub time: GrafanaTime,
    pub timepicker: TimePicker,
    pub timezone: String,
    pub title: String,
    pub uid: Option<String>,
    pub version: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemList {
    pub list: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GrafanaTime {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimePicker {
    pub refresh_intervals: Vec<String>,
    pub time_options: Vec<String>,
}

impl Default for TimePicker {
    fn default() -> Self {
        Self {
            refresh_intervals: REFRESH_INTERVALS.iter().map(|s| s.to_string()).collect(),
            time_options: TIME_OPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaRow {
    pub collapse: bool,
    pub editable: bool,
    pub height: String,
    pub panels: Vec<GrafanaPanel>,
    pub repeat: Option<String>,
    pub show_title: bool,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaPanel {
    pub id: u32,
    pub title: String,
    pub datasource: Option<String>,
    pub targets: Vec<GrafanaTarget>,
    pub span: Option<u8>,
    pub editable: bool,
    pub error: bool,
    pub links: Vec<Value>,
    pub transparent: bool,
    #[serde(flatten)]
    pub options: PanelOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum PanelOptions {
    #[serde(rename = "graph")]
    Graph(GraphPanel),
    #[serde(rename = "singlestat")]
    SingleStat(SingleStatPanel),
    #[serde(rename = "text")]
    Text(TextPanel),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphPanel {
    pub alias_colors: BTreeMap<String, String>,
    pub bars: bool,
    pub fill: u8,
    pub legend: Legend,
    pub lines: bool,
    #[serde(rename = "linewidth")]
    pub line_width: u8,
    pub null_point_mode: String,
    pub percentage: bool,
    #[serde(rename = "pointradius")]
    pub point_radius: u8,
    pub points: bool,
    pub renderer: String,
    pub series_overrides: Vec<Value>,
    pub stack: bool,
    pub stepped_line: bool,
    pub tooltip: Tooltip,
    pub xaxis: XAxis,
    pub yaxes: Vec<YAxis>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub align_as_table: bool,
    pub avg: bool,
    pub current: bool,
    pub max: bool,
    pub min: bool,
    pub right_side: bool,
    pub show: bool,
    pub total: bool,
    pub values: bool,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            align_as_table: false,
            avg: false,
            current: false,
            max: false,
            min: false,
            right_side: false,
            show: true,
            total: false,
            values: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub ms_resolution: bool,
    pub shared: bool,
    pub sort: u8,
    pub value_type: String,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            ms_resolution: true,
            shared: true,
            sort: 0,
            value_type: "cumulative".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct XAxis {
    pub mode: String,
    pub show: bool,
}

impl Default for XAxis {
    fn default() -> Self {
        Self {
            mode: "time".to_string(),
            show: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxis {
    pub decimals: Option<u8>,
    pub format: String,
    pub label: Option<String>,
    pub log_base: u32,
    pub max: Option<f64>,
    pub min: Option<f64>,
    pub show: bool,
}

impl YAxis {
    pub fn with_format(format: &str) -> Self {
        Self {
            decimals: None,
            format: format.to_string(),
            label: None,
            log_base: 1,
            max: None,
            min: None,
            show: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleStatPanel {
    pub color_background: bool,
    pub color_value: bool,
    pub format: String,
    pub postfix: String,
    pub prefix: String,
    pub sparkline: Sparkline,
    pub thresholds: String,
    pub value_font_size: String,
    pub value_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sparkline {
    pub full: bool,
    pub show: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextPanel {
    pub content: String,
    pub mode: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaTarget {
    pub expr: String,
    pub format: String,
    pub hide: bool,
    pub instant: bool,
    pub interval: String,
    pub interval_factor: u32,
    pub legend_format: String,
    pub metric: String,
    pub ref_id: String,
    pub step: u32,
    pub target: String,
}
