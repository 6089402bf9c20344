//! mp-core: stable foundation for masterplot.
//!
//! Contains:
//! - config (plot-configuration identity and deduplication)
//! - axis (axis designators and the ordered x/y selection pair)
//! - filename (save-name validation)

pub mod axis;
pub mod config;
pub mod filename;

// Re-exports: nice ergonomics for downstream crates
pub use axis::{Axis, AxisSelection};
pub use config::PlotConfig;
pub use filename::invalid_filename;
