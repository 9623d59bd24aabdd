use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{Context as _, bail};
use clap::{Args, Parser, Subcommand};
use spinner::{
    Console as _, HProgressBar, HProgressBarOptions, Indicator, Progress, ProgressSpinner,
    ProgressSpinnerOptions, Terminal, VProgressBar, VProgressBarOptions,
};

mod log_init;

/// Show the progress indicators in the terminal
#[derive(Debug, Parser)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,

    #[clap(flatten)]
    flags: Flags,
}

#[derive(Debug, Clone, PartialEq, Args)]
struct Flags {
    /// Verbose. More -v makes it more verbose (opposite of --quiet)
    #[clap(short = 'v', long, global = true, action(clap::ArgAction::Count))]
    verbose: u8,
    /// Quiet. More -q makes it more quiet (opposite of --verbose)
    #[clap(short = 'q', long, global = true, action(clap::ArgAction::Count))]
    quiet: u8,
}

impl Flags {
    fn level(&self) -> i8 {
        self.verbose.clamp(0, 2) as i8 - self.quiet.clamp(0, 2) as i8
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fill a horizontal bar from 0 to 100%
    Hbar(HbarArgs),
    /// Step a vertical bar through its ramp
    Vbar(VbarArgs),
    /// Run a spinner for a while
    Spinner(SpinnerArgs),
    /// Run every demo in sequence (the default)
    All,
}

/// Options shared by every indicator
#[derive(Debug, Args)]
struct Common {
    /// Text in front of the indicator
    #[clap(short, long)]
    label: Option<String>,
    /// Text printed after the label when the indicator is done
    #[clap(short, long)]
    completed_label: Option<String>,
    /// Glyph of the indicator. Repeat for each glyph
    #[clap(short, long = "glyph")]
    glyphs: Vec<String>,
    /// Text to switch to halfway through
    #[clap(long)]
    then_text: Option<String>,
}

#[derive(Debug, Args)]
struct HbarArgs {
    #[clap(flatten)]
    common: Common,
    /// Number of segments in the bar
    #[clap(short, long)]
    segments: Option<usize>,
    /// Opening and closing bracket
    #[clap(long, num_args = 2, value_names = ["OPEN", "CLOSE"], conflicts_with = "no_brackets")]
    brackets: Option<Vec<String>>,
    /// Draw the bar without brackets
    #[clap(long)]
    no_brackets: bool,
    /// Percentage added each step
    #[clap(long, default_value_t = 2.0)]
    step: f64,
    /// Delay between steps, in milliseconds
    #[clap(long, default_value_t = 50)]
    step_ms: u64,
}

#[derive(Debug, Args)]
struct VbarArgs {
    #[clap(flatten)]
    common: Common,
    /// Delay between steps, in milliseconds. One step advances one glyph
    #[clap(long, default_value_t = 400)]
    step_ms: u64,
}

#[derive(Debug, Args)]
struct SpinnerArgs {
    #[clap(flatten)]
    common: Common,
    /// Time between frames, in milliseconds
    #[clap(short, long)]
    interval_ms: Option<u64>,
    /// How long to spin, in milliseconds
    #[clap(short, long, default_value_t = 5000)]
    duration_ms: u64,
}

fn main() -> ExitCode {
    let start = std::time::Instant::now();
    let args = Cli::parse();
    log_init::init(args.flags.level());
    let result = run(args);
    let elapsed = start.elapsed().as_secs_f32();
    if let Err(e) = result {
        log::debug!("finished in {elapsed:.2}s");
        log::error!("fatal: {e:?}");
        ExitCode::FAILURE
    } else {
        log::info!("finished in {elapsed:.2}s");
        ExitCode::SUCCESS
    }
}

fn run(args: Cli) -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        // the indicator that hid the cursor will never stop
        let mut terminal = Terminal::stdout();
        terminal.write_str("\n");
        terminal.show_cursor(true);
        terminal.flush();
        std::process::exit(130);
    })
    .context("failed to set ctrl-c handler")?;

    match args.command.unwrap_or(Command::All) {
        Command::Hbar(args) => run_hbar(args),
        Command::Vbar(args) => run_vbar(args),
        Command::Spinner(args) => run_spinner(args),
        Command::All => run_all(),
    }
}

fn run_hbar(args: HbarArgs) -> anyhow::Result<()> {
    if args.step.is_nan() || args.step <= 0.0 {
        bail!("step must be positive, got {}", args.step);
    }
    let mut options = HProgressBarOptions::default().use_brackets(!args.no_brackets);
    if let Some(segments) = args.segments {
        options = options.segments(segments);
    }
    if let Some(brackets) = args.brackets {
        options = options.brackets(brackets);
    }
    if !args.common.glyphs.is_empty() {
        options = options.glyphs(args.common.glyphs);
    }
    if let Some(label) = args.common.label {
        options = options.label(label);
    }
    if let Some(label) = args.common.completed_label {
        options = options.completed_label(label);
    }
    let bar = HProgressBar::new(options).context("failed to build horizontal bar")?;
    fill_hbar(&bar, args.step, args.common.then_text.as_deref(), args.step_ms);
    Ok(())
}

fn fill_hbar(bar: &HProgressBar, step: f64, then_text: Option<&str>, step_ms: u64) {
    bar.start();
    let mut then_text = then_text;
    let mut percentage = 0.0;
    while percentage <= 100.0 {
        bar.update_progress(percentage);
        if percentage >= 50.0 {
            if let Some(text) = then_text.take() {
                bar.update_text(text);
            }
        }
        thread::sleep(Duration::from_millis(step_ms));
        percentage += step;
    }
    bar.stop();
}

fn run_vbar(args: VbarArgs) -> anyhow::Result<()> {
    let mut options = VProgressBarOptions::default();
    if !args.common.glyphs.is_empty() {
        options = options.glyphs(args.common.glyphs);
    }
    if let Some(label) = args.common.label {
        options = options.label(label);
    }
    if let Some(label) = args.common.completed_label {
        options = options.completed_label(label);
    }
    let bar = VProgressBar::new(options).context("failed to build vertical bar")?;
    step_vbar(&bar, args.common.then_text.as_deref(), args.step_ms);
    Ok(())
}

/// Step through the ramp one glyph at a time. The bar completes
/// on its own at 100%
fn step_vbar(bar: &VProgressBar, then_text: Option<&str>, step_ms: u64) {
    let tick = bar.tick();
    // count steps instead of adding up the tick, so 100% is hit exactly
    let steps = (100.0 / tick).round() as u32;
    let mut then_text = then_text;
    for i in 0..=steps {
        let percentage = (i as f64 * tick).min(100.0);
        bar.update_progress(percentage);
        if percentage >= 40.0 && !bar.is_completed() {
            if let Some(text) = then_text.take() {
                bar.update_text(text);
            }
        }
        thread::sleep(Duration::from_millis(step_ms));
    }
    if !bar.is_completed() {
        bar.stop();
    }
}

fn run_spinner(args: SpinnerArgs) -> anyhow::Result<()> {
    let mut options = ProgressSpinnerOptions::default();
    if !args.common.glyphs.is_empty() {
        options = options.glyphs(args.common.glyphs);
    }
    if let Some(label) = args.common.label {
        options = options.label(label);
    }
    if let Some(label) = args.common.completed_label {
        options = options.completed_label(label);
    }
    if let Some(ms) = args.interval_ms {
        options = options.update_interval_ms(ms);
    }
    let spinner = ProgressSpinner::new(options).context("failed to build spinner")?;
    spin(
        &spinner,
        args.common.then_text.as_deref(),
        Duration::from_millis(args.duration_ms),
    );
    Ok(())
}

/// Spin for `duration`, switching to `then_text` halfway
fn spin(spinner: &ProgressSpinner, then_text: Option<&str>, duration: Duration) {
    spinner.start();
    let half = duration / 2;
    thread::sleep(half);
    if let Some(text) = then_text {
        spinner.update_text(text);
    }
    thread::sleep(duration - half);
    spinner.stop();
}

fn run_all() -> anyhow::Result<()> {
    println!("HProgressBar Demo:");
    let bar = HProgressBar::new(HProgressBarOptions::default())?;
    fill_hbar(&bar, 5.0, None, 200);
    drop(bar);
    let bar = HProgressBar::new(
        HProgressBarOptions::default()
            .label("Loading: ")
            .glyphs(["-", "#"]),
    )?;
    fill_hbar(&bar, 2.0, None, 50);
    drop(bar);

    println!("\nVProgressBar Demo:");
    let bar = VProgressBar::new(VProgressBarOptions::default())?;
    step_vbar(&bar, None, 750);
    drop(bar);
    let bar = VProgressBar::new(VProgressBarOptions::default().glyphs([
        " ", "⣀", "⣄", "⣤", "⣦", "⣶", "⣷", "⣿",
    ]))?;
    step_vbar(&bar, Some("Getting close: "), 400);
    drop(bar);

    println!("\nProgressSpinner Demo:");
    let spinners = [
        ProgressSpinnerOptions::default(),
        ProgressSpinnerOptions::default()
            .label("Working: ")
            .glyphs(["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        ProgressSpinnerOptions::default()
            .label("Working: ")
            .glyphs(["🌒", "🌓", "🌔", "🌕", "🌖", "🌗", "🌘"])
            .update_interval_ms(500),
        ProgressSpinnerOptions::default()
            .label("Working: ")
            .glyphs(["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈"]),
    ];
    for (i, options) in spinners.into_iter().enumerate() {
        let spinner = ProgressSpinner::new(options)?;
        let then_text = (i > 0).then_some("Halfway there: ");
        spin(&spinner, then_text, Duration::from_secs(if i == 0 { 5 } else { 10 }));
    }
    Ok(())
}
