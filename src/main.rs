use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;

use srtf_sim::fmt::SimFormat;
use srtf_sim::sim::load_workload;
use srtf_sim::{Sim, SimConfig, SimError, SrtfScheduler};

/// Simulate shortest-remaining-time-first scheduling of atomic and
/// splittable jobs across one or more processors.
#[derive(Parser)]
#[command(name = "srtf-sim")]
struct Cli {
    /// Workload file: one `<arrival> <id> <execution> <n|p>` job per line.
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    file: PathBuf,

    /// Number of simulated processors.
    #[arg(short = 'p', long, env = "SRTF_SIM_PROCESSORS")]
    processors: usize,

    /// Admit the heaviest jobs first when the first two arrive together.
    #[arg(short = 'c', long)]
    heavy_first: bool,

    /// Print only the summary, not the per-event trace.
    #[arg(long)]
    summary_only: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn run(cli: &Cli) -> Result<(), RunError> {
    let config = SimConfig::new(cli.processors, cli.heavy_first)?;
    let jobs = load_workload(&cli.file)?;

    let report = Sim::<SrtfScheduler>::new(jobs, &config)?.run();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if !cli.summary_only {
        report.write_trace(&mut out)?;
    }
    write!(out, "{}", report.summary)?;
    out.flush()?;
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .event_format(SimFormat)
        .try_init();
}
