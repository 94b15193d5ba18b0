// Chart descriptions for the dashboard
//
// Figures serialize to Plotly's `{ data, layout }` JSON so the page can hand
// them straight to `Plotly.react`.

use serde::Serialize;

use crate::dataset::Dataset;
use crate::query::{DashboardView, FilterState};

/// Plotly's default qualitative palette.
pub const PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

fn color(i: usize) -> &'static str {
    PALETTE[i % PALETTE.len()]
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Bar(BarTrace),
    Pie(PieTrace),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub name: String,
    pub mode: &'static str,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub line: Line,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Line {
    pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BarTrace {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub marker: Marker,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub hole: f64,
    pub textposition: &'static str,
    pub textinfo: &'static str,
    pub marker: PieMarker,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieMarker {
    pub colors: Vec<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub margin: Margin,
    pub plot_bgcolor: &'static str,
    pub paper_bgcolor: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Margin {
    pub t: u32,
    pub b: u32,
    pub l: u32,
    pub r: u32,
}

/// Axis with its title suppressed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

impl Axis {
    fn untitled() -> Self {
        Self {
            title: Title {
                text: String::new(),
            },
        }
    }
}

impl Layout {
    fn white(title: &str) -> Self {
        Self {
            title: Title {
                text: title.to_string(),
            },
            margin: Margin {
                t: 40,
                b: 20,
                l: 20,
                r: 20,
            },
            plot_bgcolor: "white",
            paper_bgcolor: "white",
            xaxis: None,
            yaxis: None,
            hovermode: None,
        }
    }

    fn with_untitled_axes(mut self) -> Self {
        self.xaxis = Some(Axis::untitled());
        self.yaxis = Some(Axis::untitled());
        self
    }
}

/// The three figures returned for every filter change.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSet {
    pub sales_over_time: Figure,
    pub sales_by_category: Figure,
    pub profit_by_region: Figure,
}

impl ChartSet {
    pub fn from_view(view: &DashboardView) -> Self {
        Self {
            sales_over_time: sales_over_time(view),
            sales_by_category: sales_by_category(view),
            profit_by_region: profit_by_region(view),
        }
    }

    /// Filter, aggregate and build all three figures in one pass.
    pub fn render(dataset: &Dataset, filter: &FilterState) -> Self {
        Self::from_view(&DashboardView::compute(dataset, filter))
    }
}

/// Line chart of monthly sales.
pub fn sales_over_time(view: &DashboardView) -> Figure {
    let trace = ScatterTrace {
        name: "Sales".to_string(),
        mode: "lines",
        x: view
            .monthly_sales
            .iter()
            .map(|m| m.month_end.to_string())
            .collect(),
        y: view.monthly_sales.iter().map(|m| m.sales).collect(),
        line: Line { color: color(0) },
    };
    let mut layout = Layout::white("Monthly Sales Trend").with_untitled_axes();
    layout.hovermode = Some("x unified");
    Figure {
        data: vec![Trace::Scatter(trace)],
        layout,
    }
}

/// Bar chart of sales per category, one colored trace per category.
pub fn sales_by_category(view: &DashboardView) -> Figure {
    let data = view
        .sales_by_category
        .iter()
        .enumerate()
        .map(|(i, g)| {
            Trace::Bar(BarTrace {
                name: g.key.to_string(),
                x: vec![g.key.to_string()],
                y: vec![g.total],
                marker: Marker { color: color(i) },
            })
        })
        .collect();
    Figure {
        data,
        layout: Layout::white("Total Sales by Product Category").with_untitled_axes(),
    }
}

/// Donut chart of profit share per region.
pub fn profit_by_region(view: &DashboardView) -> Figure {
    let groups = &view.profit_by_region;
    let trace = PieTrace {
        labels: groups.iter().map(|g| g.key.to_string()).collect(),
        values: groups.iter().map(|g| g.total).collect(),
        hole: 0.4,
        textposition: "inside",
        textinfo: "percent+label",
        marker: PieMarker {
            colors: (0..groups.len()).map(color).collect(),
        },
    };
    Figure {
        data: vec![Trace::Pie(trace)],
        layout: Layout::white("Profit Distribution by Region"),
    }
}
