use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "framestep", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an action-sequence script headless and print the active target per frame.
    Preview(PreviewArgs),
    /// Print the trajectory of one progress-bar edge.
    Bar(BarArgs),
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frames to run; stops early when the sequence finishes.
    #[arg(long, default_value_t = 600)]
    frames: u64,
}

#[derive(Parser, Debug)]
struct BarArgs {
    /// Starting edge value.
    #[arg(long, allow_hyphen_values = true)]
    from: f64,

    /// Target edge value.
    #[arg(long, allow_hyphen_values = true)]
    to: f64,

    /// Seconds the move takes.
    #[arg(long, default_value_t = 1.0)]
    secs: f64,

    /// Clock rate in frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Lower bound of the bar.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    min: f64,

    /// Upper bound of the bar.
    #[arg(long, default_value_t = 100.0, allow_hyphen_values = true)]
    max: f64,

    /// Edge to move.
    #[arg(long, value_enum, default_value_t = EdgeChoice::High)]
    edge: EdgeChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EdgeChoice {
    Low,
    High,
}

impl From<EdgeChoice> for framestep::Edge {
    fn from(choice: EdgeChoice) -> Self {
        match choice {
            EdgeChoice::Low => framestep::Edge::Low,
            EdgeChoice::High => framestep::Edge::High,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Preview(args) => cmd_preview(args),
        Command::Bar(args) => cmd_bar(args),
    }
}

fn read_script_json(path: &Path) -> anyhow::Result<framestep::SequenceScript> {
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let script: framestep::SequenceScript =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse script JSON")?;
    script
        .validate()
        .with_context(|| format!("validate script '{}'", path.display()))?;
    Ok(script)
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let script = read_script_json(&args.in_path)?;
    let sequence = script.build().with_context(|| "build action sequence")?;

    let mut sched = framestep::Scheduler::new(framestep::SchedulerOpts { fps: script.fps });
    let id = sched.add_sequence(sequence);
    sched.start_sequence(id)?;

    let mut out = std::io::stdout().lock();
    for _ in 0..args.frames {
        let report = sched.frame();
        let seq = sched.sequence(id)?;
        let target = seq.active_target();
        let geometry = seq.target(target).map(|t| t.geometry());
        let line = serde_json::json!({
            "frame": report.frame.0,
            "action": seq.active_action(),
            "target": target,
            "geometry": geometry,
            "done": seq.is_terminal(),
        });
        writeln!(out, "{line}").with_context(|| "write frame line")?;
        if !sched.is_active(id) {
            break;
        }
    }
    Ok(())
}

fn cmd_bar(args: BarArgs) -> anyhow::Result<()> {
    let fps = framestep::Fps::new(args.fps, 1)?;
    let edge = framestep::Edge::from(args.edge);
    let initial = match edge {
        framestep::Edge::High => framestep::ValueRange::new(args.min, args.from),
        framestep::Edge::Low => framestep::ValueRange::new(args.from, args.max),
    };
    let stepper = framestep::ValueStepper::new(framestep::StepperOpts {
        bounds: framestep::ValueRange::new(args.min, args.max),
        initial: Some(initial),
        time_to_use_secs: args.secs,
    })?;

    let mut sched = framestep::Scheduler::new(framestep::SchedulerOpts { fps });
    let id = sched.add_stepper(stepper);
    sched.set_target(id, args.to, framestep::TargetMode::animated(edge))?;

    let mut out = std::io::stdout().lock();
    let mut emit = |frame: u64, range: framestep::ValueRange| -> anyhow::Result<()> {
        let line = serde_json::json!({ "frame": frame, "low": range.low, "high": range.high });
        writeln!(out, "{line}").with_context(|| "write frame line")
    };

    emit(sched.clock().get().0, sched.stepper(id)?.current())?;
    while sched.is_active(id) {
        let report = sched.frame();
        emit(report.frame.0, sched.stepper(id)?.current())?;
    }
    Ok(())
}
