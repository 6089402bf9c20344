//! mp-session: chart-session state and the axis range policy.
//!
//! Pure state, no I/O. Workflows in mp-client drive a `ChartSession`
//! through transitions and consult the range policy for which layout change
//! (if any) each transition implies.

pub mod range;
pub mod session;

pub use range::{DEFAULT_AXIS_RANGE, RangeAction, range_after_load, range_after_plot};
pub use session::{ChartSession, SessionError, SessionResult};
