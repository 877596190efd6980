//! Workload file loading.
//!
//! One job per line: `<arrival> <id> <execution> <n|p>`, whitespace
//! separated. Blank lines and lines starting with `#` are skipped.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashSet;

use super::job::{JobKind, JobSpec, MAX_JOB_TICKS};
use crate::core::state::{JobId, Ticks};
use crate::error::SimError;

pub fn load_workload(path: &Path) -> Result<Vec<JobSpec>, SimError> {
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_workload(&text)
}

/// Parse and validate a workload, returning it stably sorted by arrival.
pub fn parse_workload(text: &str) -> Result<Vec<JobSpec>, SimError> {
    let mut jobs = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        jobs.push(parse_line(index + 1, line)?);
    }

    validate(&jobs)?;
    jobs.sort_by_key(|job| job.arrival_time);
    Ok(jobs)
}

fn parse_line(line_no: usize, line: &str) -> Result<JobSpec, SimError> {
    let parse_err = |reason: String| SimError::Parse {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [arrival, id, execution, kind] = fields[..] else {
        return Err(parse_err(format!(
            "expected 4 fields, found {}",
            fields.len()
        )));
    };

    let arrival_time: Ticks = arrival
        .parse()
        .map_err(|e| parse_err(format!("arrival time {arrival:?}: {e}")))?;
    let id: JobId = id
        .parse()
        .map_err(|e| parse_err(format!("job id {id:?}: {e}")))?;
    let execution_time: Ticks = execution
        .parse()
        .map_err(|e| parse_err(format!("execution time {execution:?}: {e}")))?;
    let kind = JobKind::from_flag(kind)
        .ok_or_else(|| parse_err(format!("job kind {kind:?} is neither 'n' nor 'p'")))?;

    Ok(JobSpec {
        arrival_time,
        id,
        execution_time,
        kind,
    })
}

/// Check ids are positive and unique, and every job carries a bounded
/// amount of work.
pub fn validate(jobs: &[JobSpec]) -> Result<(), SimError> {
    let mut seen = FxHashSet::default();
    for job in jobs {
        if job.id == 0 {
            return Err(SimError::InvalidJob {
                id: job.id,
                reason: "job ids must be positive".to_string(),
            });
        }
        if job.execution_time == 0 {
            return Err(SimError::InvalidJob {
                id: job.id,
                reason: "execution time must be positive".to_string(),
            });
        }
        if job.execution_time > MAX_JOB_TICKS || job.arrival_time > MAX_JOB_TICKS {
            return Err(SimError::InvalidJob {
                id: job.id,
                reason: format!("arrival and execution times must not exceed {MAX_JOB_TICKS}"),
            });
        }
        if !seen.insert(job.id) {
            return Err(SimError::DuplicateJob(job.id));
        }
    }
    Ok(())
}
