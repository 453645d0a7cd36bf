// Mapper to convert numbered domain dashboards to the Grafana JSON model
use crate::domain::dashboard::{NumberedDashboard, NumberedPanel, NumberedRow, PanelKind, Target};
use crate::infrastructure::grafana_model::{
    DEFAULT_INTERVAL_FACTOR, DEFAULT_STEP, GrafanaDashboard, GrafanaPanel, GrafanaRow, GrafanaTarget,
    GrafanaTime, GraphPanel, ItemList, Legend, PanelOptions, SCHEMA_VERSION, SingleStatPanel,
    Sparkline, TIME_SERIES_FORMAT, TextPanel, TimePicker, Tooltip, XAxis, YAxis,
};
use std::collections::BTreeMap;

pub fn dashboard_to_grafana(numbered: &NumberedDashboard) -> GrafanaDashboard {
    let dashboard = &numbered.dashboard;
    let rows: Vec<GrafanaRow> = numbered.rows.iter().map(row_to_grafana).collect();

    GrafanaDashboard {
        inputs: Vec::new(),
        annotations: ItemList::default(),
        description: dashboard.description.clone(),
        editable: true,
        gnet_id: None,
        graph_tooltip: 0,
        hide_controls: false,
        id: None,
        links: Vec::new(),
        refresh: dashboard.refresh.clone(),
        rows,
        schema_version: SCHEMA_VERSION,
        shared_crosshair: false,
        style: "dark".to_string(),
        tags: dashboard.tags.clone(),
        templating: ItemList::default(),
        time: GrafanaTime {
            from: dashboard.time.from.clone(),
            to: dashboard.time.to.clone(),
        },
        timepicker: TimePicker::default(),
        timezone: dashboard.timezone.clone(),
        title: dashboard.title.clone(),
        uid: dashboard.uid.clone(),
        version: 0,
    }
}

fn row_to_grafana(numbered: &NumberedRow) -> GrafanaRow {
    let row = &numbered.row;
    GrafanaRow {
        collapse: row.collapse,
        editable: true,
        height: row.height.clone(),
        panels: numbered.panels.iter().map(panel_to_grafana).collect(),
        repeat: None,
        show_title: row.title.is_some(),
        title: row.title.clone().unwrap_or_else(|| "New row".to_string()),
    }
}

fn panel_to_grafana(numbered: &NumberedPanel) -> GrafanaPanel {
    let panel = &numbered.panel;

    let targets: Vec<GrafanaTarget> = panel
        .targets
        .iter()
        .enumerate()
        .map(|(index, target)| target_to_grafana(target, index))
        .collect();

    let options = match &panel.kind {
        PanelKind::Graph(graph) => PanelOptions::Graph(GraphPanel {
            alias_colors: BTreeMap::new(),
            bars: false,
            fill: graph.fill,
            legend: Legend::default(),
            lines: true,
            line_width: graph.line_width,
            null_point_mode: "connected".to_string(),
            percentage: false,
            point_radius: 5,
            points: false,
            renderer: "flot".to_string(),
            series_overrides: Vec::new(),
            stack: graph.stack,
            stepped_line: false,
            tooltip: Tooltip::default(),
            xaxis: XAxis::default(),
            yaxes: vec![YAxis::with_format(&graph.y_format), YAxis::with_format("short")],
        }),
        PanelKind::SingleStat(stat) => PanelOptions::SingleStat(SingleStatPanel {
            color_background: false,
            color_value: false,
            format: stat.format.clone(),
            postfix: String::new(),
            prefix: String::new(),
            sparkline: Sparkline {
                full: false,
                show: stat.sparkline,
            },
            thresholds: String::new(),
            value_font_size: "80%".to_string(),
            value_name: stat.value_name.clone(),
        }),
        PanelKind::Text(text) => PanelOptions::Text(TextPanel {
            content: text.content.clone(),
            mode: "markdown".to_string(),
        }),
    };

    GrafanaPanel {
        id: numbered.id,
        title: panel.title.clone(),
        datasource: panel.data_source.clone(),
        targets,
        span: panel.span,
        editable: true,
        error: false,
        links: Vec::new(),
        transparent: false,
        options,
    }
}

fn target_to_grafana(target: &Target, index: usize) -> GrafanaTarget {
    GrafanaTarget {
        expr: target.expr.clone(),
        format: TIME_SERIES_FORMAT.to_string(),
        hide: false,
        instant: false,
        interval: String::new(),
        interval_factor: DEFAULT_INTERVAL_FACTOR,
        legend_format: target.legend_format.clone().unwrap_or_default(),
        metric: String::new(),
        ref_id: ref_id(index),
        step: DEFAULT_STEP,
        target: String::new(),
    }
}

/// Query letter for the target at `index`: A..Z, then AA, AB, ...
pub fn ref_id(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
