#![allow(dead_code)]

use srtf_sim::fmt::SimFormat;
use srtf_sim::{JobSpec, Report, Sim, SimConfig, SrtfScheduler};

/// Initialize tracing from `RUST_LOG`.
///
/// `try_init()` is idempotent: the first call in the process installs the
/// subscriber and later calls are ignored.
pub fn setup_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .event_format(SimFormat)
        .try_init();
}

pub fn simulate(jobs: Vec<JobSpec>, processors: usize, heavy_first: bool) -> Report {
    let config = SimConfig::new(processors, heavy_first).expect("valid config");
    Sim::<SrtfScheduler>::new(jobs, &config)
        .expect("valid workload")
        .run()
}

pub fn trace(report: &Report) -> Vec<String> {
    report.trace_lines()
}
