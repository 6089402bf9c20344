use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::debug;

use mp_client::{
    ActionButton, ChartBackend, ClientError, LayoutPatch, PlotOutcome, PlotterController,
    UreqTransport,
};
use mp_core::Axis;
use mp_protocol::{RestylePatch, TraceData};

#[derive(Parser)]
#[command(name = "mp-cli")]
#[command(about = "Masterplot CLI - terminal client for the plotting server", long_about = None)]
struct Cli {
    /// Base URL of the plotting server
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive command shell against the server
    Shell,
    /// Execute a YAML session script
    Run {
        /// Path to the script file
        script_path: PathBuf,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Script error: {0}")]
    Script(#[from] serde_yaml::Error),

    #[error("Unknown axis: {0} (expected x or y)")]
    UnknownAxis(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let transport = UreqTransport::new(cli.server.clone());
    let mut controller = PlotterController::new(transport, TermChart::default());

    println!("Connecting to {} ...", cli.server);
    controller.initialize()?;
    println!("✓ Controls loaded");

    match cli.command {
        Commands::Shell => cmd_shell(&mut controller),
        Commands::Run { script_path } => cmd_run_script(&mut controller, &script_path),
    }
}

/// Chart backend that narrates every rendering operation to the terminal.
#[derive(Default)]
struct TermChart {
    traces: Vec<TraceData>,
}

impl ChartBackend for TermChart {
    fn add_traces(&mut self, traces: Vec<TraceData>) {
        for trace in traces {
            println!("  [chart] + trace \"{}\" ({} points)", trace.name, trace.x.len());
            self.traces.push(trace);
        }
    }

    fn delete_traces(&mut self, indices: &[usize]) {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable();
        for index in sorted.into_iter().rev() {
            if index < self.traces.len() {
                let trace = self.traces.remove(index);
                println!("  [chart] - trace \"{}\"", trace.name);
            }
        }
    }

    fn restyle(&mut self, index: usize, patch: &RestylePatch) {
        if let Some(trace) = self.traces.get_mut(index) {
            if let Some(x) = patch.x.as_ref().and_then(|w| w.first()) {
                trace.x = x.clone();
            }
            if let Some(y) = patch.y.as_ref().and_then(|w| w.first()) {
                trace.y = y.clone();
            }
            println!("  [chart] ~ trace \"{}\" restyled", trace.name);
        }
    }

    fn relayout(&mut self, patch: LayoutPatch) {
        for (label, axis) in [("x", &patch.xaxis), ("y", &patch.yaxis)] {
            if let Some(title) = &axis.title {
                println!("  [chart] {label}-axis title: {title}");
            }
            if let Some(range) = axis.range {
                println!("  [chart] {label}-axis range: [{}, {}]", range[0], range[1]);
            }
            if axis.auto_from_zero {
                println!("  [chart] {label}-axis autorange (from zero)");
            }
        }
    }

    fn trace_count(&self) -> usize {
        self.traces.len()
    }
}

/// One step of a scripted session.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Step {
    Plot { controls: BTreeMap<String, String> },
    ChangeAxis { axis: String, value: String },
    Reset,
    ClearControls,
    Load { name: String },
    Save { name: String },
    Delete { name: String },
}

#[derive(Debug, Deserialize)]
struct Script {
    steps: Vec<Step>,
}

fn parse_axis(name: &str) -> CliResult<Axis> {
    match name {
        "x" | "xaxis" => Ok(Axis::X),
        "y" | "yaxis" => Ok(Axis::Y),
        other => Err(CliError::UnknownAxis(other.to_string())),
    }
}

fn cmd_run_script(
    controller: &mut PlotterController<UreqTransport, TermChart>,
    script_path: &Path,
) -> CliResult<()> {
    let content = std::fs::read_to_string(script_path)?;
    let script: Script = serde_yaml::from_str(&content)?;
    println!("Running {} steps from {}", script.steps.len(), script_path.display());

    for (i, step) in script.steps.into_iter().enumerate() {
        debug!(step = i, "executing script step");
        match step {
            Step::Plot { controls } => {
                for (name, value) in &controls {
                    controller.set_plot_control(name, value)?;
                }
                match controller.plot()? {
                    PlotOutcome::Plotted => println!("✓ step {i}: plotted"),
                    PlotOutcome::Duplicate => println!("- step {i}: already plotted, skipped"),
                }
            }
            Step::ChangeAxis { axis, value } => {
                controller.change_axis(parse_axis(&axis)?, &value)?;
                println!("✓ step {i}: {axis} axis -> {value}");
            }
            Step::Reset => {
                controller.reset()?;
                println!("✓ step {i}: chart reset");
            }
            Step::ClearControls => {
                controller.clear_controls();
                println!("✓ step {i}: controls cleared");
            }
            Step::Load { name } => {
                controller.load(&name)?;
                println!("✓ step {i}: loaded \"{name}\"");
            }
            Step::Save { name } => {
                controller.save_name_input(&name);
                let outcome = controller.save()?;
                if outcome.newly_listed {
                    println!("✓ step {i}: saved \"{name}\" (new)");
                } else {
                    println!("✓ step {i}: saved \"{name}\"");
                }
            }
            Step::Delete { name } => {
                controller.delete_saved(&name)?;
                println!("✓ step {i}: deleted \"{name}\"");
            }
        }
    }

    println!("✓ Script completed ({} traces on chart)", controller.chart().trace_count());
    Ok(())
}

fn cmd_shell(controller: &mut PlotterController<UreqTransport, TermChart>) -> CliResult<()> {
    println!("Type 'help' for commands.");
    let stdin = io::stdin();

    loop {
        print!("mp> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(()); // EOF
        }
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let rest: Vec<&str> = words.collect();

        let outcome = match command {
            "quit" | "exit" => return Ok(()),
            "help" => {
                print_help();
                Ok(())
            }
            "show" => {
                show_state(controller);
                Ok(())
            }
            "set" => shell_set(controller, &rest),
            "plot" => shell_plot(controller),
            "clear" => {
                controller.clear_controls();
                Ok(())
            }
            "xaxis" => shell_axis(controller, Axis::X, &rest),
            "yaxis" => shell_axis(controller, Axis::Y, &rest),
            "reset" => controller.reset().map_err(CliError::from),
            "files" => {
                for name in &controller.panel().saved_files {
                    println!("  {name}");
                }
                Ok(())
            }
            "save" => shell_save(controller, &rest),
            "load" => shell_one_name(&rest, "load <name>")
                .and_then(|name| controller.load(&name).map_err(CliError::from)),
            "delete" => shell_one_name(&rest, "delete <name>")
                .and_then(|name| controller.delete_saved(&name).map_err(CliError::from)),
            other => {
                println!("Unknown command: {other} (try 'help')");
                Ok(())
            }
        };

        if let Err(err) = outcome {
            println!("! {err}");
        }
    }
}

fn shell_set(
    controller: &mut PlotterController<UreqTransport, TermChart>,
    args: &[&str],
) -> CliResult<()> {
    if args.len() < 2 {
        println!("Usage: set <control> <value>");
        return Ok(());
    }
    // values may contain spaces ("write policy" columns do)
    let value = args[1..].join(" ");
    controller.set_plot_control(args[0], &value)?;
    Ok(())
}

fn shell_plot(controller: &mut PlotterController<UreqTransport, TermChart>) -> CliResult<()> {
    match controller.plot()? {
        PlotOutcome::Plotted => {}
        PlotOutcome::Duplicate => println!("Already plotted; nothing sent."),
    }
    Ok(())
}

fn shell_axis(
    controller: &mut PlotterController<UreqTransport, TermChart>,
    axis: Axis,
    args: &[&str],
) -> CliResult<()> {
    if args.is_empty() {
        println!("Usage: {}axis <label>", if axis == Axis::X { "x" } else { "y" });
        return Ok(());
    }
    controller.change_axis(axis, &args.join(" "))?;
    Ok(())
}

fn shell_save(
    controller: &mut PlotterController<UreqTransport, TermChart>,
    args: &[&str],
) -> CliResult<()> {
    let name = shell_one_name(args, "save <name>")?;
    controller.save_name_input(&name);
    if controller.panel().button_disabled(ActionButton::Save) {
        println!("Invalid filename: {name}");
        return Ok(());
    }
    controller.save()?;
    // save is the one workflow with an explicit acknowledgement
    println!("Chart was successfully saved!");
    Ok(())
}

fn shell_one_name(args: &[&str], usage: &'static str) -> CliResult<String> {
    if args.is_empty() {
        return Err(CliError::Usage(usage));
    }
    Ok(args.join(" "))
}

fn show_state(controller: &PlotterController<UreqTransport, TermChart>) {
    let panel = controller.panel();
    let session = controller.session();

    println!("Controls:");
    for control in &panel.plot_controls {
        let value = control.value.as_deref().unwrap_or("-");
        let state = if control.disabled { " (disabled)" } else { "" };
        println!("  {} = {}{}", control.name, value, state);
    }
    println!(
        "Axes: x = {}, y = {}",
        session.axes().x,
        session.axes().y
    );
    println!("Traces plotted: {}", session.len());
    for (i, config) in session.traces().iter().enumerate() {
        let params: Vec<String> = config.iter().map(|(k, v)| format!("{k}={v}")).collect();
        println!("  [{i}] {}", params.join(" "));
    }
    let buttons: Vec<String> = ActionButton::ALL
        .iter()
        .map(|&b| {
            format!(
                "{}{}",
                b.label(),
                if panel.button_disabled(b) { "(off)" } else { "" }
            )
        })
        .collect();
    println!("Actions: {}", buttons.join(" "));
}

fn print_help() {
    println!("Commands:");
    println!("  set <control> <value>   pick a plot-control value");
    println!("  plot                    fetch and add a trace for the current values");
    println!("  clear                   unselect all plot controls");
    println!("  xaxis <label>           retarget the x axis");
    println!("  yaxis <label>           retarget the y axis");
    println!("  reset                   remove every trace from the chart");
    println!("  files                   list saved charts");
    println!("  save <name>             save the current chart");
    println!("  load <name>             load a saved chart");
    println!("  delete <name>           delete a saved chart");
    println!("  show                    print controls, session, and actions");
    println!("  quit                    leave the shell");
}
