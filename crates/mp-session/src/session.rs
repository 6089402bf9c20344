//! In-memory chart session: the single source of truth for what is plotted.

use mp_core::{Axis, AxisSelection, PlotConfig};
use serde::Serialize;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Configuration is already plotted")]
    DuplicateTrace,
}

/// The configurations currently plotted (insertion order = rendered trace
/// order, index-aligned with the chart) plus the current axis selection.
///
/// Owned exclusively by one page/terminal session; durability is delegated
/// to the server via save/load. Mutated only inside workflow success
/// branches, so a failed request leaves it exactly as it was.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSession {
    traces: Vec<PlotConfig>,
    axes: AxisSelection,
}

impl ChartSession {
    /// Empty session, created once at startup with the server's default axes.
    pub fn new(axes: AxisSelection) -> Self {
        Self {
            traces: Vec::new(),
            axes,
        }
    }

    /// Whether `config` is already plotted. Probed before every plot request
    /// so duplicates never reach the network.
    pub fn contains(&self, config: &PlotConfig) -> bool {
        self.traces.iter().any(|t| t == config)
    }

    /// Append a newly plotted configuration. Refuses duplicates, preserving
    /// the invariant that no two session entries are equal.
    pub fn append(&mut self, config: PlotConfig) -> SessionResult<()> {
        if self.contains(&config) {
            return Err(SessionError::DuplicateTrace);
        }
        self.traces.push(config);
        Ok(())
    }

    /// Wholesale replacement after a successful load. The replacement list
    /// must itself be duplicate-free.
    pub fn replace(&mut self, traces: Vec<PlotConfig>, axes: AxisSelection) -> SessionResult<()> {
        for (i, a) in traces.iter().enumerate() {
            if traces[..i].contains(a) {
                return Err(SessionError::DuplicateTrace);
            }
        }
        self.traces = traces;
        self.axes = axes;
        Ok(())
    }

    /// Drop every trace (reset). The axis selection is untouched.
    pub fn clear(&mut self) {
        self.traces.clear();
    }

    pub fn traces(&self) -> &[PlotConfig] {
        &self.traces
    }

    pub fn axes(&self) -> &AxisSelection {
        &self.axes
    }

    /// Record a new axis choice (the local echo of an axis-control change).
    pub fn set_axis(&mut self, axis: Axis, value: impl Into<String>) {
        self.axes.set(axis, value);
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}
