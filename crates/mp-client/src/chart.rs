//! Chart backend seam.
//!
//! The renderer is a collaborator: the service layer only assumes it can
//! add/delete traces, patch one trace's style by index, and apply layout
//! patches, all atomically and synchronously. Rendering correctness is the
//! backend's problem.

use mp_core::Axis;
use mp_protocol::{RestylePatch, TraceData};
use mp_session::{DEFAULT_AXIS_RANGE, RangeAction};

/// Pending layout changes for one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisLayout {
    pub title: Option<String>,
    /// Fixed range; mutually exclusive with autoranging.
    pub range: Option<[f64; 2]>,
    /// Autorange with rangemode anchored at zero.
    pub auto_from_zero: bool,
}

/// A batched layout change, applied in one backend call like the page
/// batches its relayout calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPatch {
    pub xaxis: AxisLayout,
    pub yaxis: AxisLayout,
}

impl LayoutPatch {
    pub fn axis_mut(&mut self, axis: Axis) -> &mut AxisLayout {
        match axis {
            Axis::X => &mut self.xaxis,
            Axis::Y => &mut self.yaxis,
        }
    }

    pub fn title(mut self, axis: Axis, text: impl Into<String>) -> Self {
        self.axis_mut(axis).title = Some(text.into());
        self
    }

    pub fn range(mut self, axis: Axis, range: [f64; 2]) -> Self {
        self.axis_mut(axis).range = Some(range);
        self
    }

    pub fn auto_from_zero(mut self, axis: Axis) -> Self {
        self.axis_mut(axis).auto_from_zero = true;
        self
    }

    /// Fold a range-policy decision into the patch.
    pub fn with_range_action(self, axis: Axis, action: RangeAction) -> Self {
        match action {
            RangeAction::Untouched => self,
            RangeAction::ResetDefault => self.range(axis, DEFAULT_AXIS_RANGE),
            RangeAction::AutoFromZero => self.auto_from_zero(axis),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Rendering operations the workflows depend on.
pub trait ChartBackend {
    fn add_traces(&mut self, traces: Vec<TraceData>);
    fn delete_traces(&mut self, indices: &[usize]);
    /// Apply a per-trace style patch by index, without re-adding the trace.
    fn restyle(&mut self, index: usize, patch: &RestylePatch);
    fn relayout(&mut self, patch: LayoutPatch);
    fn trace_count(&self) -> usize;
}

/// Delete every rendered trace. Returns false when there was nothing to
/// delete (the caller uses this to detect a previously-empty chart).
pub fn clear_all<C: ChartBackend>(chart: &mut C) -> bool {
    let count = chart.trace_count();
    if count == 0 {
        return false;
    }
    let indices: Vec<usize> = (0..count).collect();
    chart.delete_traces(&indices);
    true
}
