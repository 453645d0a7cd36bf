// Dashboard domain model
//
// The declared tree: Dashboard -> Row -> Panel -> Target. Values are built
// once and never mutated; panel ids are attached later by the builder.

pub const DEFAULT_REFRESH: &str = "10s";
pub const DEFAULT_TIMEZONE: &str = "utc";
pub const DEFAULT_ROW_HEIGHT: &str = "250px";
pub const DEFAULT_TIME_FROM: &str = "now-1h";
pub const DEFAULT_TIME_TO: &str = "now";

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub title: String,
    pub rows: Vec<Row>,
    pub uid: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub refresh: String,
    pub timezone: String,
    pub time: TimeRange,
}

impl Dashboard {
    pub fn new(title: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            title: title.into(),
            rows,
            uid: None,
            description: String::new(),
            tags: Vec::new(),
            refresh: DEFAULT_REFRESH.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            time: TimeRange::default(),
        }
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_refresh(mut self, refresh: impl Into<String>) -> Self {
        self.refresh = refresh.into();
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    pub fn with_time(mut self, time: TimeRange) -> Self {
        self.time = time;
        self
    }

    /// Panels in traversal order (rows in order, panels in order).
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.rows.iter().flat_map(|row| row.panels.iter())
    }

    pub fn panel_count(&self) -> usize {
        self.rows.iter().map(|row| row.panels.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            from: DEFAULT_TIME_FROM.to_string(),
            to: DEFAULT_TIME_TO.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub title: Option<String>,
    pub height: String,
    pub collapse: bool,
    pub panels: Vec<Panel>,
}

impl Row {
    pub fn new(panels: Vec<Panel>) -> Self {
        Self {
            title: None,
            height: DEFAULT_ROW_HEIGHT.to_string(),
            collapse: false,
            panels,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_height(mut self, height: impl Into<String>) -> Self {
        self.height = height.into();
        self
    }

    pub fn collapsed(mut self) -> Self {
        self.collapse = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub data_source: Option<String>,
    pub targets: Vec<Target>,
    pub kind: PanelKind,
    pub span: Option<u8>,
    /// Explicit id; panels without one are numbered by the builder.
    pub id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelKind {
    Graph(GraphOptions),
    SingleStat(SingleStatOptions),
    Text(TextOptions),
}

impl PanelKind {
    pub fn name(&self) -> &'static str {
        match self {
            PanelKind::Graph(_) => "graph",
            PanelKind::SingleStat(_) => "singlestat",
            PanelKind::Text(_) => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphOptions {
    pub stack: bool,
    pub fill: u8,
    pub line_width: u8,
    pub y_format: String,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            stack: false,
            fill: 1,
            line_width: 2,
            y_format: "short".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingleStatOptions {
    pub format: String,
    pub value_name: String,
    pub sparkline: bool,
}

impl Default for SingleStatOptions {
    fn default() -> Self {
        Self {
            format: "none".to_string(),
            value_name: "avg".to_string(),
            sparkline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextOptions {
    pub content: String,
}

impl Panel {
    pub fn graph(title: impl Into<String>, data_source: impl Into<String>, targets: Vec<Target>) -> Self {
        Self::with_kind(
            title,
            Some(data_source.into()),
            targets,
            PanelKind::Graph(GraphOptions::default()),
        )
    }

    pub fn single_stat(
        title: impl Into<String>,
        data_source: impl Into<String>,
        targets: Vec<Target>,
    ) -> Self {
        Self::with_kind(
            title,
            Some(data_source.into()),
            targets,
            PanelKind::SingleStat(SingleStatOptions::default()),
        )
    }

    pub fn text(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_kind(
            title,
            None,
            Vec::new(),
            PanelKind::Text(TextOptions {
                content: content.into(),
            }),
        )
    }

    pub fn with_kind(
        title: impl Into<String>,
        data_source: Option<String>,
        targets: Vec<Target>,
        kind: PanelKind,
    ) -> Self {
        Self {
            title: title.into(),
            data_source,
            targets,
            kind,
            span: None,
            id: None,
        }
    }

    pub fn with_span(mut self, span: u8) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub expr: String,
    pub legend_format: Option<String>,
}

impl Target {
    pub fn new(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            legend_format: None,
        }
    }

    pub fn with_legend_format(mut self, legend_format: impl Into<String>) -> Self {
        self.legend_format = Some(legend_format.into());
        self
    }
}

/// A panel after id assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedPanel {
    pub id: u32,
    pub panel: Panel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberedRow {
    pub row: Row,
    pub panels: Vec<NumberedPanel>,
}

/// A dashboard whose every panel carries its final id.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedDashboard {
    pub dashboard: Dashboard,
    pub rows: Vec<NumberedRow>,
}

impl NumberedDashboard {
    pub fn panel_ids(&self) -> Vec<u32> {
        self.rows
            .iter()
            .flat_map(|row| row.panels.iter().map(|p| p.id))
            .collect()
    }
}
