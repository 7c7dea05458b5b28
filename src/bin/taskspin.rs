// src/bin/taskspin.rs
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rand::Rng;

use taskspin::spinner::style;
use taskspin::{Config, Spinner, SpinnerGroup};

#[derive(Parser)]
#[command(name = "taskspin")]
#[command(about = "Runs simulated tasks behind a block of grouped spinners")]
struct Cli {
    /// Number of simulated tasks per round
    #[arg(long, short, default_value_t = 4)]
    tasks: usize,

    /// Upper bound for a task's simulated duration, in seconds
    #[arg(long, default_value_t = 5)]
    max_secs: u64,

    /// How many groups to run one after another
    #[arg(long, default_value_t = 1)]
    rounds: usize,

    /// Disrupt all unfinished tasks after this many milliseconds
    #[arg(long)]
    disrupt_after_ms: Option<u64>,

    /// Path to a TOML file with timing and frame settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    println!("Some text before the spinners");
    println!("{}", "-".repeat(40));

    for round in 1..=cli.rounds {
        run_round(&cli, &config);
        println!("Round {round} finished");
    }

    println!("Some text after the spinners");
    println!("{}", "-".repeat(40));
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn run_round(cli: &Cli, config: &Config) {
    let group = SpinnerGroup::with_config(config.clone());
    let workers: Vec<_> = (1..=cli.tasks)
        .map(|i| {
            let sp = group.add(format!("Task {i}"), format!("Done {i}"));
            let duration = random_duration(cli.max_secs);
            thread::spawn(move || simulate(&sp, i, duration))
        })
        .collect();

    group.start();

    if let Some(ms) = cli.disrupt_after_ms {
        thread::sleep(Duration::from_millis(ms));
        group.disrupt_all("context cancelled");
    }

    group.finish();
    for worker in workers {
        let _ = worker.join();
    }
    print_summary(&group);
}

fn random_duration(max_secs: u64) -> Duration {
    let max_ms = max_secs.max(1) * 1000;
    Duration::from_millis(rand::thread_rng().gen_range(500..=max_ms))
}

/// Stand-in for real work: sleeps, then reports an outcome that depends on
/// the task number so every symbol shows up.
fn simulate(sp: &Spinner, index: usize, duration: Duration) {
    thread::sleep(duration);
    match index % 4 {
        1 => {
            sp.stop();
        }
        2 => {
            sp.stop_with_outcome("success", "Success");
        }
        3 => {
            sp.stop_with_outcome("failure", "Failed");
        }
        _ => {
            sp.stop_with_outcome("disruption", "Disrupted");
        }
    }
}

fn print_summary(group: &SpinnerGroup) {
    let disrupted = group
        .spinners()
        .iter()
        .filter_map(Spinner::completion)
        .filter(|c| c.outcome == taskspin::Outcome::Disrupted)
        .count();
    if disrupted > 0 {
        println!(
            "{} {disrupted} task(s) disrupted",
            style::symbol(&taskspin::Outcome::Disrupted).yellow()
        );
    }
}
