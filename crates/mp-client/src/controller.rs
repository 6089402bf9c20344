//! User workflows.
//!
//! Every workflow is the same short machine: close a gate over the controls
//! it must fence, issue one blocking request, reconcile session and chart on
//! success, reopen the gate on both paths. Because the gate closes before
//! the request and the calls are blocking, a workflow can never be
//! re-entered while its own request is outstanding. Session state is only
//! mutated after a successful response, so a failure leaves it untouched.

use tracing::debug;

use mp_core::{Axis, AxisSelection, invalid_filename};
use mp_protocol::{
    AxisOptions, AxisPatch, ChangeAxesRequest, LoadResponse, PlotRequest, SaveRequest, endpoints,
};
use mp_session::{ChartSession, DEFAULT_AXIS_RANGE, range_after_load, range_after_plot};

use crate::chart::{ChartBackend, LayoutPatch, clear_all};
use crate::client::ServerClient;
use crate::controls::{ActionButton, ControlGate, ControlPanel, ControlRef, SelectControl};
use crate::error::{ClientError, ClientResult};
use crate::transport::Transport;

/// What a plot attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotOutcome {
    /// A new trace was fetched and added to the chart.
    Plotted,
    /// The configuration was already plotted; no request was sent.
    Duplicate,
}

/// Acknowledged save. The frontend reports this to the user; save is the
/// only workflow with an explicit user-visible acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    /// True when the name was saved for the first time and joined the
    /// saved-files list.
    pub newly_listed: bool,
}

/// The page controller: owns the control panel, the chart session, and the
/// chart handle, and drives every user workflow against the server.
pub struct PlotterController<T, C> {
    client: ServerClient<T>,
    chart: C,
    panel: ControlPanel,
    session: ChartSession,
}

impl<T: Transport, C: ChartBackend> PlotterController<T, C> {
    /// Controller over an empty chart. Nothing is enabled until
    /// [`initialize`](Self::initialize) has completed.
    pub fn new(transport: T, chart: C) -> Self {
        Self {
            client: ServerClient::new(transport),
            chart,
            panel: ControlPanel::new(),
            session: ChartSession::new(AxisSelection::new("", "")),
        }
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    pub fn session(&self) -> &ChartSession {
        &self.session
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }

    /// Startup: fetch control options, axis options and the saved-file
    /// list, populate the panel, title the axes, and enable plotting last.
    /// Runs without a gate since nothing is enabled yet. On failure the
    /// panel simply stays disabled.
    pub fn initialize(&mut self) -> ClientResult<()> {
        let init = self.client.init()?;

        self.panel.plot_controls = init
            .controls
            .into_iter()
            .map(|(name, options)| SelectControl::with_options(name, options))
            .collect();

        let axes = AxisSelection::new(init.xaxis.def.clone(), init.yaxis.def.clone());
        self.panel.x_axis = axis_select(Axis::X, init.xaxis);
        self.panel.y_axis = axis_select(Axis::Y, init.yaxis);

        if !init.files.is_empty() {
            self.panel.set_button_disabled(ActionButton::Load, false);
        }
        self.panel.saved_files = init.files;

        self.session = ChartSession::new(axes.clone());
        self.chart.relayout(
            LayoutPatch::default()
                .title(Axis::X, axes.x)
                .title(Axis::Y, axes.y),
        );

        self.panel.set_button_disabled(ActionButton::Plot, false);
        debug!("controller initialized");
        Ok(())
    }

    /// Fetch and add a trace for the current plot-control values.
    ///
    /// An already-plotted configuration is a silent no-op: the gate reopens
    /// and `Duplicate` is returned without any network traffic.
    pub fn plot(&mut self) -> ClientResult<PlotOutcome> {
        self.require_enabled(ActionButton::Plot)?;
        let gate = ControlGate::off(
            &mut self.panel,
            ControlPanel::axis_refs(),
            &ActionButton::ALL,
        );

        let config = self.candidate_config();
        let result = if self.session.contains(&config) {
            debug!("configuration already plotted, suppressing request");
            Ok(PlotOutcome::Duplicate)
        } else {
            let request = PlotRequest {
                plot: config.clone(),
                axes: self.session.axes().clone(),
            };
            match self.client.plot(&request) {
                Ok(response) => {
                    self.chart.add_traces(vec![response.trace]);
                    let action = range_after_plot(self.chart.trace_count());
                    let patch = LayoutPatch::default()
                        .with_range_action(Axis::X, action)
                        .with_range_action(Axis::Y, action);
                    if !patch.is_empty() {
                        self.chart.relayout(patch);
                    }
                    self.session
                        .append(config)
                        .map(|_| PlotOutcome::Plotted)
                        .map_err(ClientError::from)
                }
                Err(e) => Err(e),
            }
        };

        let count = self.chart.trace_count();
        gate.on(&mut self.panel, count);
        result
    }

    /// Empty the chart: every rendered trace goes, the session is cleared,
    /// and both axes fall back to the fixed default range. Local only.
    pub fn reset(&mut self) -> ClientResult<()> {
        self.require_enabled(ActionButton::Reset)?;
        // the chart is about to be empty, so reset fences itself right away
        self.panel.set_button_disabled(ActionButton::Reset, true);

        clear_all(&mut self.chart);
        self.session.clear();
        self.chart.relayout(
            LayoutPatch::default()
                .range(Axis::X, DEFAULT_AXIS_RANGE)
                .range(Axis::Y, DEFAULT_AXIS_RANGE),
        );
        Ok(())
    }

    /// Unselect every plot control. Chart and session are untouched.
    pub fn clear_controls(&mut self) {
        for control in &mut self.panel.plot_controls {
            control.value = None;
        }
    }

    /// Pick a value for one plot control.
    pub fn set_plot_control(&mut self, name: &str, value: &str) -> ClientResult<()> {
        let control = self
            .panel
            .plot_control_mut(name)
            .ok_or_else(|| ClientError::UnknownControl(name.to_string()))?;
        if !control.select(value) {
            return Err(ClientError::InvalidSelection {
                control: name.to_string(),
                value: value.to_string(),
            });
        }
        Ok(())
    }

    /// Retarget one axis. The axis title and session selection update
    /// immediately (pure local echo); with a non-empty chart the server is
    /// then asked how every existing trace changes under the new axis, and
    /// its answer is applied index-by-index.
    ///
    /// The gate here covers reset/load/save but deliberately leaves plot
    /// enabled while the request is outstanding.
    pub fn change_axis(&mut self, axis: Axis, value: &str) -> ClientResult<()> {
        let control = self.panel.axis_control_mut(axis);
        if control.disabled {
            return Err(ClientError::ActionUnavailable(axis.wire_name()));
        }
        if !control.select(value) {
            return Err(ClientError::InvalidSelection {
                control: control.name.clone(),
                value: value.to_string(),
            });
        }

        // unconditional local echo
        self.session.set_axis(axis, value);
        self.chart.relayout(LayoutPatch::default().title(axis, value));

        if self.chart.trace_count() == 0 {
            return Ok(());
        }

        let gate = ControlGate::off(
            &mut self.panel,
            vec![ControlRef::AxisPick(axis)],
            &[ActionButton::Reset, ActionButton::Load, ActionButton::Save],
        );

        let request = ChangeAxesRequest {
            axes: AxisPatch::one(axis, value),
            traces: self.session.traces().to_vec(),
        };
        let result = match self.client.change_axes(&request) {
            Ok(patches) => {
                // the server is the authority on how each trace changes
                for (index, patch) in patches.iter().enumerate() {
                    self.chart.restyle(index, patch);
                }
                Ok(())
            }
            Err(e) => Err(e),
        };

        let count = self.chart.trace_count();
        gate.on(&mut self.panel, count);
        result
    }

    /// Replace the chart with a saved one.
    pub fn load(&mut self, name: &str) -> ClientResult<()> {
        self.require_enabled(ActionButton::Load)?;
        if !self.panel.knows_saved_file(name) {
            return Err(ClientError::UnknownSavedChart(name.to_string()));
        }

        let gate = ControlGate::off(
            &mut self.panel,
            ControlPanel::axis_refs(),
            &ActionButton::ALL,
        );
        // remember emptiness before clearing: the range policy needs it
        let was_empty = !clear_all(&mut self.chart);

        let result = match self.client.load(name) {
            Ok(response) => self.apply_load(name, response, was_empty),
            Err(e) => Err(e),
        };

        let count = self.chart.trace_count();
        gate.on(&mut self.panel, count);
        result
    }

    fn apply_load(
        &mut self,
        name: &str,
        response: LoadResponse,
        was_empty: bool,
    ) -> ClientResult<()> {
        let LoadResponse {
            traces,
            plots,
            axes,
        } = response;

        // traces and configurations must stay index-aligned; a saved chart
        // that breaks that is a protocol violation, not something to render
        // half of
        if traces.len() != plots.len() {
            return Err(ClientError::Decode {
                endpoint: endpoints::load(name),
                message: format!(
                    "saved chart has {} traces but {} configurations",
                    traces.len(),
                    plots.len()
                ),
            });
        }

        // session first: a malformed saved chart must not half-update the
        // rendered chart
        self.session.replace(plots, axes.clone())?;

        let loaded = traces.len();
        self.chart.add_traces(traces);

        self.panel.axis_control_mut(Axis::X).value = Some(axes.x.clone());
        self.panel.axis_control_mut(Axis::Y).value = Some(axes.y.clone());

        let action = range_after_load(was_empty, loaded);
        self.chart.relayout(
            LayoutPatch::default()
                .title(Axis::X, axes.x)
                .title(Axis::Y, axes.y)
                .with_range_action(Axis::X, action)
                .with_range_action(Axis::Y, action),
        );
        Ok(())
    }

    /// Persist the current session under the panel's save name. The name
    /// has already been validated keystroke-by-keystroke; the save action
    /// is only enabled while it is valid.
    pub fn save(&mut self) -> ClientResult<SaveOutcome> {
        self.require_enabled(ActionButton::Save)?;
        let name = self.panel.save_name.clone();

        let gate = ControlGate::off(&mut self.panel, vec![], &[ActionButton::Save]);
        let already_listed = self.panel.knows_saved_file(&name);
        let request = SaveRequest {
            traces: self.session.traces().to_vec(),
            axes: self.session.axes().clone(),
        };

        let result = match self.client.save(&name, &request) {
            Ok(()) => {
                if !already_listed {
                    self.panel.saved_files.push(name);
                    // the very first saved file makes loading reachable
                    if self.panel.saved_files.len() == 1 {
                        self.panel.set_button_disabled(ActionButton::Load, false);
                    }
                }
                Ok(SaveOutcome {
                    newly_listed: !already_listed,
                })
            }
            Err(e) => Err(e),
        };

        let count = self.chart.trace_count();
        gate.on(&mut self.panel, count);
        result
    }

    /// Remove a saved chart from the server and the known-files list.
    pub fn delete_saved(&mut self, name: &str) -> ClientResult<()> {
        if !self.panel.knows_saved_file(name) {
            return Err(ClientError::UnknownSavedChart(name.to_string()));
        }

        let gate = ControlGate::off(
            &mut self.panel,
            vec![],
            &[ActionButton::Load, ActionButton::Save],
        );

        let result = match self.client.delete(name) {
            Ok(()) => {
                self.panel.saved_files.retain(|f| f != name);
                Ok(())
            }
            Err(e) => Err(e),
        };

        let count = self.chart.trace_count();
        gate.on(&mut self.panel, count);
        // with no files left, loading becomes unreachable again
        if self.panel.saved_files.is_empty() {
            self.panel.set_button_disabled(ActionButton::Load, true);
        }
        result
    }

    /// Keystroke-level hook for the save-name field: stores the text and
    /// gates the save action on its validity.
    pub fn save_name_input(&mut self, text: &str) {
        self.panel.save_name = text.to_string();
        self.panel
            .set_button_disabled(ActionButton::Save, invalid_filename(text));
    }

    /// The configuration the current plot-control values describe.
    /// Unselected controls submit the empty value, like an untouched page.
    fn candidate_config(&self) -> mp_core::PlotConfig {
        mp_core::PlotConfig::from_pairs(
            self.panel
                .plot_controls
                .iter()
                .map(|c| (c.name.clone(), c.submitted_value().to_string())),
        )
    }

    fn require_enabled(&self, button: ActionButton) -> ClientResult<()> {
        if self.panel.button_disabled(button) {
            return Err(ClientError::ActionUnavailable(button.label()));
        }
        Ok(())
    }
}

fn axis_select(axis: Axis, options: AxisOptions) -> SelectControl {
    let mut control = SelectControl::with_options(axis.wire_name(), options.opts);
    // the server's default comes preselected even if it is not among the
    // listed options
    control.value = Some(options.def);
    control
}
