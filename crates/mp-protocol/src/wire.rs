//! Request/response body definitions.

use mp_core::{Axis, AxisSelection, PlotConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `/initplot` response: everything needed to populate the page controls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitResponse {
    /// Plot-control name -> selectable values.
    pub controls: BTreeMap<String, Vec<String>>,
    pub xaxis: AxisOptions,
    pub yaxis: AxisOptions,
    /// Names of previously saved charts.
    #[serde(default)]
    pub files: Vec<String>,
}

/// Selectable labels for one axis plus the server's default choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AxisOptions {
    pub opts: Vec<String>,
    pub def: String,
}

/// `/plot` request: one candidate configuration under the current axes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotRequest {
    pub plot: PlotConfig,
    pub axes: AxisSelection,
}

/// `/plot` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotResponse {
    pub trace: TraceData,
}

/// One renderable trace as the server computes it. The client never
/// inspects the point data; it is handed to the chart backend as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraceData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Marker/line mode hint for the renderer.
    pub mode: String,
    /// Legend label.
    pub name: String,
    /// Per-point hover annotations; opaque to the client.
    #[serde(default)]
    pub hovertext: Vec<serde_json::Value>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub showlegend: bool,
}

/// Axis retarget: at most one side set per `/changeaxes` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AxisPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

impl AxisPatch {
    /// Patch retargeting a single axis.
    pub fn one(axis: Axis, value: impl Into<String>) -> Self {
        let mut patch = Self::default();
        match axis {
            Axis::X => patch.xaxis = Some(value.into()),
            Axis::Y => patch.yaxis = Some(value.into()),
        }
        patch
    }
}

/// `/changeaxes` request: the retargeted axis plus every currently plotted
/// configuration, in trace order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeAxesRequest {
    pub axes: AxisPatch,
    pub traces: Vec<PlotConfig>,
}

/// One element of the `/changeaxes` response, index-aligned with the
/// current traces. Replacement point arrays come in restyle shape (each
/// array wrapped once, one inner array per targeted trace).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RestylePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<Vec<f64>>>,
}

/// `/load/{name}` response. `plots` carries the saved configurations so the
/// session's dedup list can be replaced wholesale alongside the rendered
/// traces; it is index-aligned with `traces` and required, since a session
/// that loses track of its configurations cannot dedup or retarget axes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadResponse {
    pub traces: Vec<TraceData>,
    pub plots: Vec<PlotConfig>,
    pub axes: AxisSelection,
}

/// `/save/{name}` request: the full session, not the rendered data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveRequest {
    pub traces: Vec<PlotConfig>,
    pub axes: AxisSelection,
}

/// Body of every non-success response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub message: String,
}
