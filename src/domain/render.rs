// Render instructions - declarative patches for named chart surfaces
use crate::domain::metric::Metric;
use crate::domain::series::Window;
use crate::domain::theme::ChartPalette;
use serde::Serialize;
use serde_json::{Value, json};

/// Stable identifier of one chart region on the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SurfaceId(pub &'static str);

/// One request to the rendering collaborator. `NewPlot` fully replaces a
/// surface (startup only); `Update` patches trace data; `Relayout` patches
/// style or size; `SetText` drives the plain-text boxes and the connection
/// status indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderInstruction {
    NewPlot {
        surface: SurfaceId,
        traces: Value,
        layout: Value,
        config: Value,
    },
    Update {
        surface: SurfaceId,
        data: Value,
    },
    Relayout {
        surface: SurfaceId,
        layout: Value,
    },
    SetText {
        element: &'static str,
        text: String,
    },
}

/// Empty line trace for a history chart.
pub fn history_trace(metric: Metric) -> Value {
    json!([{
        "x": [],
        "y": [],
        "name": metric.key(),
        "mode": "lines+markers",
        "type": "line",
    }])
}

pub fn history_layout(metric: Metric, palette: &ChartPalette) -> Value {
    // Only the temperature chart pads its margin.
    let pad = match metric {
        Metric::Temperature => 10,
        _ => 0,
    };
    json!({
        "autosize": true,
        "title": { "text": metric.key() },
        "font": {
            "size": 12,
            "color": palette.font_color,
            "family": "poppins, san-serif",
        },
        "colorway": ["#05AD86"],
        "margin": { "t": 40, "b": 40, "l": 30, "r": 30, "pad": pad },
        "plot_bgcolor": palette.background,
        "paper_bgcolor": palette.background,
        "xaxis": {
            "color": palette.axis_color,
            "linecolor": palette.axis_color,
            "gridwidth": "2",
            "autorange": true,
        },
        "yaxis": {
            "color": palette.axis_color,
            "linecolor": palette.axis_color,
            "gridwidth": "2",
            "autorange": true,
        },
    })
}

/// Display options shared by all history charts.
pub fn display_config() -> Value {
    json!({ "responsive": true, "displayModeBar": false })
}

/// Dial trace for a gauge surface, zeroed until the first reading lands.
pub fn gauge_trace(metric: Metric) -> Value {
    let spec = metric.gauge_spec();
    json!([{
        "domain": { "x": [0, 1], "y": [0, 1] },
        "value": 0,
        "title": { "text": metric.key() },
        "type": "indicator",
        "mode": "gauge+number+delta",
        "delta": { "reference": spec.delta_reference },
        "gauge": {
            "axis": { "range": [null, spec.axis_max] },
            "steps": [
                { "range": spec.steps[0], "color": "lightgray" },
                { "range": spec.steps[1], "color": "gray" },
            ],
            "threshold": {
                "line": { "color": "red", "width": 4 },
                "thickness": 0.75,
                "value": spec.threshold,
            },
        },
    }])
}

pub fn gauge_layout() -> Value {
    json!({ "width": 300, "height": 250, "margin": { "t": 0, "b": 0, "l": 0, "r": 0 } })
}

pub fn gauge_value_update(value: f64) -> Value {
    json!({ "value": value })
}

/// Data patch carrying the full current window for one history chart.
pub fn history_data_update(window: &Window) -> Value {
    json!({ "x": [window.xs], "y": [window.ys] })
}

/// Style-only patch applied to every surface on a theme change.
pub fn palette_relayout(palette: &ChartPalette) -> Value {
    json!({
        "plot_bgcolor": palette.background,
        "paper_bgcolor": palette.background,
        "font": { "color": palette.font_color },
        "xaxis": { "color": palette.axis_color, "linecolor": palette.axis_color },
        "yaxis": { "color": palette.axis_color, "linecolor": palette.axis_color },
    })
}

/// Size-only patch applied to history surfaces on a breakpoint crossing.
pub fn viewport_relayout(width: u32, height: u32) -> Value {
    json!({
        "width": width,
        "height": height,
        "xaxis.autorange": true,
        "yaxis.autorange": true,
    })
}
