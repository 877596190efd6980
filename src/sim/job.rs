use crate::core::state::{Job, JobId, JobKey, ParentLink, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// Runs as one unit on one processor.
    Atomic,
    /// Split into one child per processor on admission.
    Splittable,
}

impl JobKind {
    /// Parse the workload-file flag: `n` for atomic, `p` for splittable.
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "n" => Some(Self::Atomic),
            "p" => Some(Self::Splittable),
            _ => None,
        }
    }
}

/// An input job descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub arrival_time: Ticks,
    pub id: JobId,
    pub execution_time: Ticks,
    pub kind: JobKind,
}

impl JobSpec {
    pub fn atomic(arrival_time: Ticks, id: JobId, execution_time: Ticks) -> Self {
        Self {
            arrival_time,
            id,
            execution_time,
            kind: JobKind::Atomic,
        }
    }

    pub fn splittable(arrival_time: Ticks, id: JobId, execution_time: Ticks) -> Self {
        Self {
            arrival_time,
            id,
            execution_time,
            kind: JobKind::Splittable,
        }
    }

    pub fn to_job(&self) -> Job {
        Job::atomic(self.id, self.arrival_time, self.execution_time)
    }
}

/// Largest accepted arrival or execution time. Keeps split padding, queue
/// loads and the clock clear of `u64` overflow.
pub const MAX_JOB_TICKS: Ticks = 1 << 32;

/// Per-child execution time when `execution_time` is split `n` ways.
pub fn child_execution_time(execution_time: Ticks, n: usize) -> Ticks {
    execution_time.div_ceil(n as Ticks) + 1
}

/// Split `spec` into `n` children of `ceil(execution / n) + 1` ticks each.
pub fn split(spec: &JobSpec, n: usize) -> Vec<Job> {
    assert!(n > 0, "Cannot split job {} across zero processors", spec.id);

    let execution_time = child_execution_time(spec.execution_time, n);
    let link = ParentLink {
        id: spec.id,
        arrival_time: spec.arrival_time,
        execution_time: spec.execution_time,
    };
    (0..n)
        .map(|slot| Job {
            key: JobKey::Child {
                parent: spec.id,
                slot,
            },
            arrival_time: spec.arrival_time,
            execution_time,
            remaining_time: execution_time,
            parent: Some(link),
        })
        .collect()
}

/// Heavy-first pre-pass.
///
/// When the first two jobs arrive together, reorder the whole sequence by
/// descending execution time (stable) and write the original arrival times
/// back by position, so longer jobs are admitted at the earliest slots.
/// Returns whether the sequence was reordered.
pub fn heavy_first(jobs: &mut [JobSpec]) -> bool {
    let simultaneous_start = match jobs {
        [first, second, ..] => first.arrival_time == second.arrival_time,
        _ => false,
    };
    if !simultaneous_start {
        return false;
    }

    let arrivals: Vec<Ticks> = jobs.iter().map(|job| job.arrival_time).collect();
    jobs.sort_by(|a, b| b.execution_time.cmp(&a.execution_time));
    for (job, arrival_time) in jobs.iter_mut().zip(arrivals) {
        job.arrival_time = arrival_time;
    }
    true
}
