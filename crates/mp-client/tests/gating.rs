//! Gating, failure-path, and range-policy behavior.

mod common;

use common::{FakeTransport, RecordingChart, init_body, plot_body, trace_body};
use mp_client::{ActionButton, ChartBackend, ClientError, PlotterController};
use mp_core::Axis;
use mp_session::DEFAULT_AXIS_RANGE;
use serde_json::json;

fn initialized(
    files: &[&str],
) -> (FakeTransport, PlotterController<FakeTransport, RecordingChart>) {
    let transport = FakeTransport::new();
    transport.queue_ok(init_body(files));
    let mut controller = PlotterController::new(transport.clone(), RecordingChart::default());
    controller.initialize().expect("initialize should succeed");
    (transport, controller)
}

fn plot_one(
    transport: &FakeTransport,
    controller: &mut PlotterController<FakeTransport, RecordingChart>,
    a: &str,
    b: &str,
) {
    controller.set_plot_control("a", a).unwrap();
    controller.set_plot_control("b", b).unwrap();
    transport.queue_ok(plot_body("trace"));
    controller.plot().unwrap();
}

#[test]
fn nothing_is_usable_before_initialize() {
    let transport = FakeTransport::new();
    let mut controller = PlotterController::new(transport.clone(), RecordingChart::default());

    assert!(matches!(
        controller.plot(),
        Err(ClientError::ActionUnavailable("plot"))
    ));
    assert!(matches!(
        controller.reset(),
        Err(ClientError::ActionUnavailable("reset"))
    ));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn plot_rejection_restores_controls_and_leaves_session_alone() {
    let (transport, mut controller) = initialized(&[]);
    controller.set_plot_control("a", "1").unwrap();
    controller.set_plot_control("b", "2").unwrap();

    transport.queue_rejection("No data found for the specified parameters.");
    let err = controller.plot().unwrap_err();
    assert!(matches!(err, ClientError::Server { .. }));

    assert!(controller.session().is_empty());
    assert_eq!(controller.chart().trace_count(), 0);

    let panel = controller.panel();
    assert!(!panel.x_axis.disabled && !panel.y_axis.disabled);
    assert!(!panel.button_disabled(ActionButton::Plot));
    // chart is still empty, so reset stays fenced
    assert!(panel.button_disabled(ActionButton::Reset));
}

#[test]
fn transport_failure_takes_the_same_cleanup_path() {
    let (transport, mut controller) = initialized(&[]);
    controller.set_plot_control("a", "1").unwrap();
    controller.set_plot_control("b", "2").unwrap();

    transport.queue_transport_failure("connection refused");
    let err = controller.plot().unwrap_err();
    assert!(matches!(err, ClientError::Transport { .. }));
    assert!(!controller.panel().button_disabled(ActionButton::Plot));
    assert!(controller.session().is_empty());
}

#[test]
fn axis_change_on_empty_chart_is_local_only() {
    let (transport, mut controller) = initialized(&[]);

    controller.change_axis(Axis::Y, "y2").unwrap();

    // only the init request went out
    assert_eq!(transport.request_count(), 1);
    assert_eq!(controller.session().axes().y, "y2");
    let echo = controller.chart().relayouts.last().unwrap();
    assert_eq!(echo.yaxis.title.as_deref(), Some("y2"));
}

#[test]
fn axis_change_restyles_every_trace_in_order() {
    let (transport, mut controller) = initialized(&[]);
    plot_one(&transport, &mut controller, "1", "2");
    plot_one(&transport, &mut controller, "3", "4");

    transport.queue_ok(json!([
        { "x": [[5.0, 6.0]] },
        { "x": [[7.0, 8.0]] },
    ]));
    controller.change_axis(Axis::X, "x2").unwrap();

    let request = transport.requests().last().unwrap().clone();
    assert_eq!(request.endpoint, "/changeaxes");
    assert_eq!(
        request.body.unwrap(),
        json!({
            "axes": { "xaxis": "x2" },
            "traces": [ {"a": "1", "b": "2"}, {"a": "3", "b": "4"} ],
        })
    );

    let restyles = &controller.chart().restyles;
    assert_eq!(restyles.len(), 2);
    assert_eq!(restyles[0].0, 0);
    assert_eq!(restyles[1].0, 1);
    assert_eq!(restyles[1].1.x, Some(vec![vec![7.0, 8.0]]));
}

#[test]
fn axis_change_failure_keeps_the_local_echo() {
    let (transport, mut controller) = initialized(&[]);
    plot_one(&transport, &mut controller, "1", "2");

    transport.queue_rejection("boom");
    let err = controller.change_axis(Axis::X, "x2").unwrap_err();
    assert!(matches!(err, ClientError::Server { .. }));

    // the title echo happened before the request and is not rolled back
    assert_eq!(controller.session().axes().x, "x2");
    assert_eq!(
        controller.panel().x_axis.value.as_deref(),
        Some("x2")
    );
    // controls usable again, and plot was in scope for nothing here
    assert!(!controller.panel().x_axis.disabled);
    assert!(!controller.panel().button_disabled(ActionButton::Plot));
    assert!(controller.chart().restyles.is_empty());
}

#[test]
fn loading_empty_session_onto_non_empty_chart_restores_default_ranges() {
    let (transport, mut controller) = initialized(&["s1"]);
    plot_one(&transport, &mut controller, "1", "2");

    transport.queue_ok(json!({ "traces": [], "plots": [], "axes": ["x2", "y2"] }));
    controller.load("s1").unwrap();

    assert_eq!(controller.chart().trace_count(), 0);
    assert!(controller.session().is_empty());
    let last = controller.chart().relayouts.last().unwrap();
    assert_eq!(last.xaxis.range, Some(DEFAULT_AXIS_RANGE));
    assert_eq!(last.yaxis.range, Some(DEFAULT_AXIS_RANGE));
    assert!(!last.xaxis.auto_from_zero);
    // empty chart again: reset fenced
    assert!(controller.panel().button_disabled(ActionButton::Reset));
}

#[test]
fn loading_onto_non_empty_chart_leaves_ranges_untouched() {
    let (transport, mut controller) = initialized(&["s1"]);
    plot_one(&transport, &mut controller, "1", "2");

    transport.queue_ok(json!({
        "traces": [trace_body("t")],
        "plots": [{"a": "3", "b": "4"}],
        "axes": ["x1", "y1"],
    }));
    controller.load("s1").unwrap();

    let last = controller.chart().relayouts.last().unwrap();
    assert_eq!(last.xaxis.range, None);
    assert!(!last.xaxis.auto_from_zero);
    assert_eq!(last.yaxis.range, None);
    assert!(!last.yaxis.auto_from_zero);
    // titles still follow the loaded axes
    assert_eq!(last.xaxis.title.as_deref(), Some("x1"));
}

#[test]
fn load_without_configurations_is_a_protocol_violation() {
    let (transport, mut controller) = initialized(&["s1"]);
    plot_one(&transport, &mut controller, "1", "2");

    // spec'd load shape carries plots alongside traces; a body without them
    // must not be rendered
    transport.queue_ok(json!({
        "traces": [trace_body("t1")],
        "axes": ["x1", "y1"],
    }));
    let err = controller.load("s1").unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));

    // nothing was rendered and the session still describes the old chart
    assert_eq!(controller.chart().trace_count(), 0);
    assert_eq!(controller.session().len(), 1);
    assert!(!controller.panel().button_disabled(ActionButton::Plot));
}

#[test]
fn load_with_misaligned_configurations_is_rejected() {
    let (transport, mut controller) = initialized(&["s1"]);

    transport.queue_ok(json!({
        "traces": [trace_body("t1"), trace_body("t2")],
        "plots": [{"a": "1", "b": "2"}],
        "axes": ["x1", "y1"],
    }));
    let err = controller.load("s1").unwrap_err();
    match err {
        ClientError::Decode { endpoint, .. } => assert_eq!(endpoint, "/load/s1"),
        other => panic!("unexpected error: {other:?}"),
    }

    // session and chart stay index-aligned: both empty
    assert_eq!(controller.chart().trace_count(), 0);
    assert!(controller.session().is_empty());
}

#[test]
fn load_failure_leaves_the_session_as_it_was() {
    let (transport, mut controller) = initialized(&["s1"]);
    plot_one(&transport, &mut controller, "1", "2");

    transport.queue_rejection("An error occurred trying to open chart file.");
    let err = controller.load("s1").unwrap_err();
    assert!(matches!(err, ClientError::Server { .. }));

    // session untouched; the rendered chart was already cleared and stays so
    assert_eq!(controller.session().len(), 1);
    assert_eq!(controller.chart().trace_count(), 0);
    assert!(!controller.panel().button_disabled(ActionButton::Plot));
}

#[test]
fn load_of_unknown_name_is_rejected_locally() {
    let (transport, mut controller) = initialized(&["s1"]);
    let err = controller.load("other").unwrap_err();
    assert!(matches!(err, ClientError::UnknownSavedChart(_)));
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn invalid_save_names_never_reach_the_network() {
    let (transport, mut controller) = initialized(&[]);

    for name in ["", "plot:1", "NUL", ".."] {
        controller.save_name_input(name);
        assert!(controller.panel().button_disabled(ActionButton::Save));
        assert!(matches!(
            controller.save(),
            Err(ClientError::ActionUnavailable("save"))
        ));
    }
    assert_eq!(transport.request_count(), 1);

    controller.save_name_input("my-plot-1");
    assert!(!controller.panel().button_disabled(ActionButton::Save));
}

#[test]
fn saving_an_existing_name_does_not_duplicate_the_listing() {
    let (transport, mut controller) = initialized(&["s1"]);
    controller.save_name_input("s1");
    transport.queue_ok(json!(null));

    let outcome = controller.save().unwrap();
    assert!(!outcome.newly_listed);
    assert_eq!(controller.panel().saved_files, vec!["s1"]);
}

#[test]
fn save_failure_restores_the_save_action() {
    let (transport, mut controller) = initialized(&[]);
    controller.save_name_input("s1");
    transport.queue_rejection("An error occurred trying to save this chart.");

    assert!(controller.save().is_err());
    // name is still valid, so save comes back enabled
    assert!(!controller.panel().button_disabled(ActionButton::Save));
    assert!(controller.panel().saved_files.is_empty());
    assert!(controller.panel().button_disabled(ActionButton::Load));
}

#[test]
fn deleting_saved_charts_shrinks_the_list_and_fences_load() {
    let (transport, mut controller) = initialized(&["s1", "s2"]);

    transport.queue_ok(json!(null));
    controller.delete_saved("s1").unwrap();
    assert_eq!(transport.requests().last().unwrap().endpoint, "/delete/s1");
    assert_eq!(controller.panel().saved_files, vec!["s2"]);
    assert!(!controller.panel().button_disabled(ActionButton::Load));

    transport.queue_ok(json!(null));
    controller.delete_saved("s2").unwrap();
    assert!(controller.panel().saved_files.is_empty());
    assert!(controller.panel().button_disabled(ActionButton::Load));

    assert!(matches!(
        controller.delete_saved("s1"),
        Err(ClientError::UnknownSavedChart(_))
    ));
}
