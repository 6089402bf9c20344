//! Page-control model and the per-operation control gate.
//!
//! The panel is an explicit value model of the page's widgets (no DOM):
//! selection controls with their options, the save-name text field, the
//! saved-files list, and the disabled flag of each action button. Keeping
//! it as plain data makes every gating decision inspectable in tests.

use mp_core::Axis;

/// The fixed set of action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionButton {
    Plot,
    Reset,
    Load,
    Save,
}

impl ActionButton {
    /// All buttons, in the panel's fixed order.
    pub const ALL: [ActionButton; 4] = [
        ActionButton::Plot,
        ActionButton::Reset,
        ActionButton::Load,
        ActionButton::Save,
    ];

    fn index(self) -> usize {
        match self {
            ActionButton::Plot => 0,
            ActionButton::Reset => 1,
            ActionButton::Load => 2,
            ActionButton::Save => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActionButton::Plot => "plot",
            ActionButton::Reset => "reset",
            ActionButton::Load => "load",
            ActionButton::Save => "save",
        }
    }
}

/// Handle to one gateable selection control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRef {
    /// A plot-parameter select, by position.
    PlotParam(usize),
    /// One of the two axis selects.
    AxisPick(Axis),
}

/// One selection widget: its option set, current value, and disabled flag.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectControl {
    pub name: String,
    pub options: Vec<String>,
    /// `None` models the unselected (empty) state.
    pub value: Option<String>,
    pub disabled: bool,
}

impl SelectControl {
    /// A control with no options yet, disabled until populated.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
            value: None,
            disabled: true,
        }
    }

    /// A populated, enabled control.
    pub fn with_options(name: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            name: name.into(),
            options,
            value: None,
            disabled: false,
        }
    }

    /// Pick a value. Returns false (and changes nothing) when the value is
    /// not one of the control's options.
    pub fn select(&mut self, value: &str) -> bool {
        if !self.options.iter().any(|o| o == value) {
            return false;
        }
        self.value = Some(value.to_string());
        true
    }

    /// Current value as submitted with a request; unselected reads as "".
    pub fn submitted_value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

/// The whole control surface of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    pub plot_controls: Vec<SelectControl>,
    pub x_axis: SelectControl,
    pub y_axis: SelectControl,
    pub saved_files: Vec<String>,
    pub save_name: String,
    buttons_disabled: [bool; 4],
}

impl ControlPanel {
    /// Page-load state: no options anywhere, everything disabled.
    pub fn new() -> Self {
        Self {
            plot_controls: Vec::new(),
            x_axis: SelectControl::empty(Axis::X.wire_name()),
            y_axis: SelectControl::empty(Axis::Y.wire_name()),
            saved_files: Vec::new(),
            save_name: String::new(),
            buttons_disabled: [true; 4],
        }
    }

    pub fn axis_control(&self, axis: Axis) -> &SelectControl {
        match axis {
            Axis::X => &self.x_axis,
            Axis::Y => &self.y_axis,
        }
    }

    pub fn axis_control_mut(&mut self, axis: Axis) -> &mut SelectControl {
        match axis {
            Axis::X => &mut self.x_axis,
            Axis::Y => &mut self.y_axis,
        }
    }

    pub fn plot_control_mut(&mut self, name: &str) -> Option<&mut SelectControl> {
        self.plot_controls.iter_mut().find(|c| c.name == name)
    }

    pub fn button_disabled(&self, button: ActionButton) -> bool {
        self.buttons_disabled[button.index()]
    }

    pub fn set_button_disabled(&mut self, button: ActionButton, disabled: bool) {
        self.buttons_disabled[button.index()] = disabled;
    }

    pub fn knows_saved_file(&self, name: &str) -> bool {
        self.saved_files.iter().any(|f| f == name)
    }

    fn control_mut(&mut self, handle: ControlRef) -> Option<&mut SelectControl> {
        match handle {
            // out-of-range handles are ignored, like unknown ids in the page
            ControlRef::PlotParam(i) => self.plot_controls.get_mut(i),
            ControlRef::AxisPick(axis) => Some(self.axis_control_mut(axis)),
        }
    }

    /// Handles for both axis selects, the usual gate scope for workflows
    /// that touch the whole chart.
    pub fn axis_refs() -> Vec<ControlRef> {
        vec![
            ControlRef::AxisPick(Axis::X),
            ControlRef::AxisPick(Axis::Y),
        ]
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-operation disable/enable fence.
///
/// `off` disables the scoped controls and buttons, remembering each
/// button's prior flag; `on` (which consumes the gate) restores them.
/// Callers must pair the two around exactly one operation; the gate is
/// never retained past `on`.
#[derive(Debug)]
pub struct ControlGate {
    controls: Vec<ControlRef>,
    buttons: Vec<(ActionButton, bool)>,
}

impl ControlGate {
    /// Disable the scoped controls, record and disable the listed buttons.
    /// Buttons are processed in the panel's fixed order; duplicates in the
    /// request collapse to one entry.
    pub fn off(panel: &mut ControlPanel, controls: Vec<ControlRef>, buttons: &[ActionButton]) -> Self {
        for &handle in &controls {
            if let Some(control) = panel.control_mut(handle) {
                control.disabled = true;
            }
        }

        let buttons = ActionButton::ALL
            .into_iter()
            .filter(|b| buttons.contains(b))
            .map(|b| {
                let prior = panel.button_disabled(b);
                panel.set_button_disabled(b, true);
                (b, prior)
            })
            .collect();

        Self { controls, buttons }
    }

    /// Re-enable the scoped controls unconditionally and restore the
    /// buttons. Reset is special: its availability must always reflect
    /// live chart content, so it is recomputed from `trace_count` instead
    /// of the remembered flag.
    pub fn on(self, panel: &mut ControlPanel, trace_count: usize) {
        for handle in self.controls {
            if let Some(control) = panel.control_mut(handle) {
                control.disabled = false;
            }
        }

        for (button, prior) in self.buttons {
            let disabled = match button {
                ActionButton::Reset => trace_count == 0,
                _ => prior,
            };
            panel.set_button_disabled(button, disabled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel_with_controls() -> ControlPanel {
        let mut panel = ControlPanel::new();
        panel.plot_controls = vec![
            SelectControl::with_options("workload", vec!["w1".into(), "w2".into()]),
            SelectControl::with_options("devices", vec!["d1".into()]),
        ];
        panel.x_axis = SelectControl::with_options("xaxis", vec!["cost".into()]);
        panel.y_axis = SelectControl::with_options("yaxis", vec!["tput".into()]);
        panel
    }

    #[test]
    fn off_disables_scope_and_on_restores() {
        let mut panel = panel_with_controls();
        panel.set_button_disabled(ActionButton::Plot, false);
        panel.set_button_disabled(ActionButton::Save, true);

        let gate = ControlGate::off(
            &mut panel,
            ControlPanel::axis_refs(),
            &[ActionButton::Plot, ActionButton::Save],
        );
        assert!(panel.x_axis.disabled);
        assert!(panel.y_axis.disabled);
        assert!(panel.button_disabled(ActionButton::Plot));
        assert!(panel.button_disabled(ActionButton::Save));

        gate.on(&mut panel, 0);
        assert!(!panel.x_axis.disabled);
        // non-reset buttons come back to exactly their pre-off flags
        assert!(!panel.button_disabled(ActionButton::Plot));
        assert!(panel.button_disabled(ActionButton::Save));
    }

    #[test]
    fn reset_is_recomputed_from_live_trace_count() {
        let mut panel = panel_with_controls();

        // previously disabled, chart now has traces: enabled
        panel.set_button_disabled(ActionButton::Reset, true);
        let gate = ControlGate::off(&mut panel, vec![], &[ActionButton::Reset]);
        gate.on(&mut panel, 2);
        assert!(!panel.button_disabled(ActionButton::Reset));

        // previously enabled, chart now empty: disabled
        panel.set_button_disabled(ActionButton::Reset, false);
        let gate = ControlGate::off(&mut panel, vec![], &[ActionButton::Reset]);
        gate.on(&mut panel, 0);
        assert!(panel.button_disabled(ActionButton::Reset));
    }

    #[test]
    fn unscoped_buttons_are_untouched() {
        let mut panel = panel_with_controls();
        panel.set_button_disabled(ActionButton::Plot, false);

        let gate = ControlGate::off(&mut panel, vec![], &[ActionButton::Reset, ActionButton::Load]);
        assert!(!panel.button_disabled(ActionButton::Plot));
        gate.on(&mut panel, 1);
        assert!(!panel.button_disabled(ActionButton::Plot));
    }

    #[test]
    fn out_of_range_control_handles_are_ignored() {
        let mut panel = panel_with_controls();
        let gate = ControlGate::off(&mut panel, vec![ControlRef::PlotParam(99)], &[]);
        gate.on(&mut panel, 0);
    }

    #[test]
    fn select_rejects_unknown_options() {
        let mut control = SelectControl::with_options("workload", vec!["w1".into()]);
        assert!(!control.select("nope"));
        assert_eq!(control.value, None);
        assert!(control.select("w1"));
        assert_eq!(control.submitted_value(), "w1");
    }
}
