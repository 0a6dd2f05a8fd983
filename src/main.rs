//! CPU scheduling simulator CLI.
//!
//! `run` simulates a workload file and writes the trace report; `generate`
//! prints a seeded synthetic workload in the same file format.

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use cpusched_sim::{
    Policy, Statistics, Ticks, Workload,
    parse::{load_workload, render_workload},
    report,
    sim::{BernoulliConfig, bernoulli_processes, full_run_length, simulate},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cpusched-sim")]
#[command(about = "Tick-accurate FCFS / SJF / Round-Robin scheduling simulator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a workload file and write the trace report
    Run {
        /// Workload file (processcount / runfor / use / quantum / process lines)
        input: PathBuf,

        /// Report destination; "-" for stdout. Defaults to <input>.out for
        /// .in files, stdout otherwise
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit a "preempted" line when a Round-Robin quantum expires
        #[arg(long)]
        announce_quantum_expiry: bool,

        /// Print mean wait / turnaround / response after the report
        #[arg(long)]
        summary: bool,
    },

    /// Print a synthetic workload with Bernoulli arrivals
    Generate {
        /// Scheduling policy (fcfs, sjf, rr)
        #[arg(long, default_value = "fcfs")]
        policy: Policy,

        /// Round-Robin quantum
        #[arg(long)]
        quantum: Option<Ticks>,

        /// Simulation horizon. Defaults to the arrival window plus every burst
        #[arg(long)]
        runfor: Option<Ticks>,

        /// Ticks during which processes may arrive
        #[arg(long, default_value = "50")]
        ticks: Ticks,

        /// Per-tick arrival probability
        #[arg(long, default_value = "0.3")]
        p_arrival: f64,

        /// Probability that an arriving process is short
        #[arg(long, default_value = "0.3")]
        p_short: f64,

        #[arg(long, default_value = "2")]
        short_burst: Ticks,

        #[arg(long, default_value = "6")]
        long_burst: Ticks,

        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

fn default_output(input: &Path) -> Option<PathBuf> {
    (input.extension()? == "in").then(|| input.with_extension("out"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            output,
            announce_quantum_expiry,
            summary,
        } => {
            let loaded = load_workload(&input)?;
            let workload = loaded
                .workload
                .with_quantum_expiry_events(announce_quantum_expiry);

            let outcome = simulate(&workload, loaded.processes)?;
            let stats = Statistics::from_processes(&outcome.processes);
            let text = report::render(&workload, &outcome, &stats);

            match output.or_else(|| default_output(&input)) {
                Some(path) if path.as_os_str() != "-" => {
                    fs::write(&path, &text)?;
                    info!(path = %path.display(), "report written");
                }
                _ => print!("{text}"),
            }

            if summary {
                let show = |m: Option<f64>| m.map_or("n/a".to_string(), |v| format!("{v:.2}"));
                println!("Average wait: {}", show(stats.mean_wait()));
                println!("Average turnaround: {}", show(stats.mean_turnaround()));
                println!("Average response: {}", show(stats.mean_response()));
            }
            info!(
                mean_wait = ?stats.mean_wait(),
                mean_turnaround = ?stats.mean_turnaround(),
                mean_response = ?stats.mean_response(),
                unfinished = stats.unfinished.len(),
                "run summary"
            );
        }

        Commands::Generate {
            policy,
            quantum,
            runfor,
            ticks,
            p_arrival,
            p_short,
            short_burst,
            long_burst,
            seed,
        } => {
            let processes = bernoulli_processes(&BernoulliConfig {
                ticks,
                p_arrival,
                p_short,
                short_burst,
                long_burst,
                seed,
            });
            let run_for = match runfor {
                Some(run_for) => run_for,
                None => full_run_length(ticks, &processes)
                    .ok_or("default run length overflows; pass --runfor explicitly")?,
            };

            let mut workload = Workload::new(policy, run_for).with_process_count(processes.len());
            workload.quantum = quantum;
            workload.validate(&processes)?;

            print!("{}", render_workload(&workload, &processes));
        }
    }

    Ok(())
}
