//! Axis range policy.
//!
//! An empty chart sits at a fixed `[0, 1]` range on both axes. When traces
//! first appear the axes switch to autoranging anchored at zero; when the
//! chart returns to empty the fixed default comes back. The policy fires
//! exactly once per empty/non-empty transition: issuing the autorange
//! layout on every load would fight the renderer's own autorange state.

/// Range of an axis on an empty chart.
pub const DEFAULT_AXIS_RANGE: [f64; 2] = [0.0, 1.0];

/// What a workflow should do to an axis's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeAction {
    /// Leave the range (and autorange state) alone.
    Untouched,
    /// Back to the fixed `DEFAULT_AXIS_RANGE`.
    ResetDefault,
    /// Autorange with the origin anchored at zero.
    AutoFromZero,
}

/// Policy after a successful plot: the first trace flips the axes from the
/// fixed default into autoranging; later traces change nothing.
pub fn range_after_plot(trace_count_after: usize) -> RangeAction {
    if trace_count_after == 1 {
        RangeAction::AutoFromZero
    } else {
        RangeAction::Untouched
    }
}

/// Policy after a successful load, per axis.
///
/// * non-empty chart, empty loaded session: back to the default range
/// * empty chart, non-empty loaded session: switch to autoranging
/// * anything else: leave the axis alone
pub fn range_after_load(was_empty: bool, loaded_traces: usize) -> RangeAction {
    if !was_empty && loaded_traces == 0 {
        RangeAction::ResetDefault
    } else if was_empty && loaded_traces > 0 {
        RangeAction::AutoFromZero
    } else {
        RangeAction::Untouched
    }
}
