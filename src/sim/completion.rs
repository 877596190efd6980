use rustc_hash::FxHashMap;
use tracing::debug;

use super::job::{JobKind, JobSpec};
use crate::core::{
    event::SchedEvent,
    state::{Job, JobId, JobKey, Ticks},
};

/// Final statistics of one original job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobStats {
    pub id: JobId,
    pub arrival_time: Ticks,
    pub execution_time: Ticks,
    pub completion_time: Ticks,
    pub turnaround_time: Ticks,
}

impl JobStats {
    pub fn new(
        id: JobId,
        arrival_time: Ticks,
        execution_time: Ticks,
        completion_time: Ticks,
    ) -> Self {
        Self {
            id,
            arrival_time,
            execution_time,
            completion_time,
            turnaround_time: completion_time - arrival_time,
        }
    }

    /// Turnaround divided by execution time.
    pub fn overhead(&self) -> f64 {
        self.turnaround_time as f64 / self.execution_time as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CompletionRecord {
    kind: JobKind,
    completed_children: usize,
    finished_at: Option<Ticks>,
}

/// Folds unit completions into original-job completions.
#[derive(Debug)]
pub struct CompletionTracker {
    records: FxHashMap<JobId, CompletionRecord>,
    children_per_job: usize,
    stats: Vec<JobStats>,
}

impl CompletionTracker {
    pub fn new(jobs: &[JobSpec], children_per_job: usize) -> Self {
        let records = jobs
            .iter()
            .map(|job| {
                (
                    job.id,
                    CompletionRecord {
                        kind: job.kind,
                        completed_children: 0,
                        finished_at: None,
                    },
                )
            })
            .collect();

        Self {
            records,
            children_per_job,
            stats: Vec::with_capacity(jobs.len()),
        }
    }

    /// Record that `job` ran out of work at `now`.
    ///
    /// Returns a FINISHED event when this completes an original job: always
    /// for atomic jobs, and for the last of a splittable job's children.
    /// `waiting` is the queued-job count reported with the event.
    pub fn complete(&mut self, job: &Job, now: Ticks, waiting: usize) -> Option<SchedEvent> {
        let id = job.key.origin();
        let children_per_job = self.children_per_job;
        let record = self
            .records
            .get_mut(&id)
            .unwrap_or_else(|| panic!("Completion reported for unknown job {}", job.key));
        assert!(
            record.finished_at.is_none(),
            "Job {} completed after its job already finished",
            job.key
        );

        let stats = match (job.key, record.kind) {
            (JobKey::Atomic(_), JobKind::Atomic) => {
                JobStats::new(id, job.arrival_time, job.execution_time, now)
            }
            (JobKey::Child { .. }, JobKind::Splittable) => {
                record.completed_children += 1;
                debug!(
                    job = %job.key,
                    done = record.completed_children,
                    of = children_per_job,
                    "child finished"
                );
                if record.completed_children < children_per_job {
                    return None;
                }
                let link = job
                    .parent
                    .expect("Child job is missing its parent provenance");
                JobStats::new(link.id, link.arrival_time, link.execution_time, now)
            }
            (key, kind) => panic!("Job {key} completed but was registered as {kind:?}"),
        };

        record.finished_at = Some(now);
        debug!(
            job = id,
            turnaround = stats.turnaround_time,
            waiting,
            "job finished"
        );
        self.stats.push(stats);

        Some(SchedEvent::Finished {
            tick: now,
            job: id,
            waiting,
        })
    }

    pub fn is_finished(&self, id: JobId) -> bool {
        self.records
            .get(&id)
            .is_some_and(|record| record.finished_at.is_some())
    }

    pub fn completed_children(&self, id: JobId) -> Option<usize> {
        self.records.get(&id).map(|record| record.completed_children)
    }

    /// Statistics in completion order.
    pub fn stats(&self) -> &[JobStats] {
        &self.stats
    }

    pub fn into_stats(self) -> Vec<JobStats> {
        self.stats
    }
}
