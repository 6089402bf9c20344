//! Axis designators and the ordered x/y selection pair.

use serde::{Deserialize, Serialize};

/// Chart axis designator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Both axes, x first. The order matches the wire pair `[x, y]`.
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];

    /// Name used by the server protocol and the chart layout ("xaxis"/"yaxis").
    pub fn wire_name(self) -> &'static str {
        match self {
            Axis::X => "xaxis",
            Axis::Y => "yaxis",
        }
    }
}

/// The current axis choices, x then y. Always exactly two labels; serialized
/// on the wire as a two-element array `[x, y]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct AxisSelection {
    pub x: String,
    pub y: String,
}

impl AxisSelection {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn get(&self, axis: Axis) -> &str {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    pub fn set(&mut self, axis: Axis, value: impl Into<String>) {
        match axis {
            Axis::X => self.x = value.into(),
            Axis::Y => self.y = value.into(),
        }
    }
}

impl From<(String, String)> for AxisSelection {
    fn from((x, y): (String, String)) -> Self {
        Self { x, y }
    }
}

impl From<AxisSelection> for (String, String) {
    fn from(sel: AxisSelection) -> Self {
        (sel.x, sel.y)
    }
}
