use std::path::PathBuf;

use thiserror::Error;

use crate::core::state::JobId;

/// Errors surfaced before a simulation starts.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Workload line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Job id {0} appears more than once")]
    DuplicateJob(JobId),

    #[error("Job {id} is invalid: {reason}")]
    InvalidJob { id: JobId, reason: String },
}
