//! Endpoint paths.

/// GET: control options, axis options and defaults, saved-file names.
pub const INIT: &str = "/initplot";

/// POST: compute one trace for a configuration under the current axes.
pub const PLOT: &str = "/plot";

/// POST: recompute every current trace under a changed axis.
pub const CHANGE_AXES: &str = "/changeaxes";

/// GET: a saved chart by name.
pub fn load(name: &str) -> String {
    format!("/load/{name}")
}

/// POST: persist the current chart under a name.
pub fn save(name: &str) -> String {
    format!("/save/{name}")
}

/// DELETE: remove a saved chart by name.
pub fn delete(name: &str) -> String {
    format!("/delete/{name}")
}
