use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use arte::classifiers::Classifier;
use arte::ensemble::Arte;
use arte::evaluation::{BasicClassificationEvaluator, Snapshot};
use arte::tasks::PrequentialEvaluator;
use arte::ui::cli::args::{Cli, Command};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";
const FG_MAGENTA: &str = "\x1b[35m";
const FG_GREY: &str = "\x1b[90m";

const REPAINT: Duration = Duration::from_millis(150);
const BAR_WIDTH: usize = 15;

/// Extra kappa statistics shown after the main kappa, if the evaluator reports them.
const EXTRA_KAPPAS: [(&str, &str); 2] = [("kappa_t", "κₜ"), ("kappa_m", "κₘ")];

#[derive(Clone, Copy)]
struct Limits {
    instances: Option<u64>,
    seconds: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let Command::Run(args) = cli.command;
    let plan = args.into_plan().context("invalid run arguments")?;

    let banner = [
        format!("{BOLD}{FG_CYAN}▶ ARTE prequential run{RESET}"),
        format!(
            "{DIM}members={} jobs={} window={} sample_freq={}  {}{RESET}",
            plan.learner.ensemble_size,
            plan.learner.jobs,
            plan.learner.window_size,
            plan.sample_frequency,
            started_at()
        ),
        format!("{FG_GREY}{}{RESET}", "─".repeat(72)),
    ];

    let stream = plan.stream.build().context("failed to build stream")?;
    let evaluator = Box::new(BasicClassificationEvaluator::new(
        stream.header().number_of_classes(),
    ));
    let learner: Box<dyn Classifier> =
        Box::new(Arte::new(plan.learner.clone()).context("failed to build ensemble")?);

    let (tx, rx) = mpsc::channel();
    let limits = Limits {
        instances: plan.max_instances,
        seconds: plan.max_seconds,
    };
    let status: JoinHandle<()> = thread::spawn(move || show_progress(rx, &banner, limits));

    let mut runner = PrequentialEvaluator::new(
        learner,
        stream,
        evaluator,
        plan.max_instances,
        plan.max_seconds,
        plan.sample_frequency,
    )
    .context("failed to construct prequential evaluator")?
    .with_progress(tx);

    runner.run().context("prequential run failed")?;

    if let Some(last) = runner.curve().latest() {
        info!(
            instances = last.instances_seen,
            accuracy = last.accuracy,
            kappa = last.kappa,
            seconds = last.seconds,
            "evaluation finished"
        );
    }

    if let Some(path) = plan.dump_file.as_deref().filter(|p| !p.as_os_str().is_empty()) {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        runner
            .curve()
            .write_to(BufWriter::new(file), plan.dump_format)
            .with_context(|| format!("failed to write learning curve to {}", path.display()))?;
    }

    // Dropping the runner closes the progress channel and lets the status thread finish.
    drop(runner);
    let _ = status.join();

    Ok(())
}

/// Prints the banner, then keeps one status line up to date until the sender hangs up.
fn show_progress(rx: Receiver<Snapshot>, banner: &[String], limits: Limits) {
    let mut out = io::stdout();
    for line in banner {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out);

    let mut latest: Option<Snapshot> = None;
    let mut painted_at = Instant::now();
    loop {
        match rx.recv_timeout(REPAINT) {
            Ok(snapshot) => latest = Some(snapshot),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                if let Some(snapshot) = &latest {
                    let _ = write!(out, "\r{}\x1B[K\n", status_line(snapshot, limits));
                    let _ = out.flush();
                }
                return;
            }
        }

        if painted_at.elapsed() >= REPAINT {
            if let Some(snapshot) = &latest {
                let _ = write!(out, "\r{}\x1B[K", status_line(snapshot, limits));
                let _ = out.flush();
            }
            painted_at = Instant::now();
        }
    }
}

fn status_line(s: &Snapshot, limits: Limits) -> String {
    let mut line = format!(
        "{FG_GREEN}{BOLD}seen{RESET} {:>9}  {FG_CYAN}{BOLD}acc{RESET} {}%  {FG_MAGENTA}{BOLD}κ{RESET} {}%",
        s.instances_seen,
        percent(s.accuracy),
        percent(s.kappa),
    );
    for (key, label) in EXTRA_KAPPAS {
        if let Some(v) = s.extras.get(key) {
            line.push_str(&format!("  {DIM}{label}{RESET} {}%", percent(*v)));
        }
    }
    line.push_str(&format!("  {DIM}t{RESET} {:>7.3}s", s.seconds));

    if let Some(total) = limits.instances {
        line.push_str(&format!(
            "  {DIM}[inst]{RESET} {}",
            bar(s.instances_seen as f64 / total as f64)
        ));
    }
    if let Some(total) = limits.seconds {
        line.push_str(&format!("  {DIM}[time]{RESET} {}", bar(s.seconds / total as f64)));
    }
    line
}

fn bar(fraction: f64) -> String {
    if !fraction.is_finite() {
        return String::new();
    }
    let fraction = fraction.clamp(0.0, 1.0);
    let filled = (fraction * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        fraction * 100.0
    )
}

fn percent(ratio: f64) -> String {
    if ratio.is_nan() {
        format!("{DIM}    NaN{RESET}")
    } else {
        format!("{:>7.3}", ratio * 100.0)
    }
}

fn started_at() -> String {
    chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
