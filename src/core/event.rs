use std::fmt;

use crate::core::{CpuId, JobId, JobKey, Ticks};

/// A line of the scheduling trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedEvent {
    /// `job` took over `cpu` with `remaining` ticks of work left.
    Running {
        tick: Ticks,
        job: JobKey,
        remaining: Ticks,
        cpu: CpuId,
    },
    /// Original job `job` finished; `waiting` distinct jobs remain queued.
    Finished {
        tick: Ticks,
        job: JobId,
        waiting: usize,
    },
}

impl SchedEvent {
    pub fn tick(&self) -> Ticks {
        match *self {
            Self::Running { tick, .. } | Self::Finished { tick, .. } => tick,
        }
    }
}

impl fmt::Display for SchedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running {
                tick,
                job,
                remaining,
                cpu,
            } => write!(
                f,
                "{tick},RUNNING,pid={job},remaining_time={remaining},cpu={cpu}"
            ),
            Self::Finished { tick, job, waiting } => {
                write!(f, "{tick},FINISHED,pid={job},proc_remaining={waiting}")
            }
        }
    }
}
