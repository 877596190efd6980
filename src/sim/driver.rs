use std::io::{self, Write};

use tracing::{debug, info};

use super::completion::{CompletionTracker, JobStats};
use super::job::{JobKind, JobSpec, heavy_first, split};
use super::stats::Summary;
use super::workload::validate;
use crate::{
    config::SimConfig,
    core::{driver::SchedCore, event::SchedEvent, state::Ticks},
    error::SimError,
    fmt::set_sim_tick,
    scheduler::Scheduler,
};

/// Output of a finished simulation.
#[derive(Debug, Clone)]
pub struct Report {
    pub events: Vec<SchedEvent>,
    pub stats: Vec<JobStats>,
    pub summary: Summary,
}

impl Report {
    pub fn write_trace<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for event in &self.events {
            writeln!(out, "{event}")?;
        }
        Ok(())
    }

    pub fn trace_lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    jobs: Vec<JobSpec>,
    job_cursor: usize,
    tracker: CompletionTracker,
    num_cpus: usize,
    done: bool,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(mut jobs: Vec<JobSpec>, config: &SimConfig) -> Result<Self, SimError> {
        if config.processors == 0 {
            return Err(SimError::Config(
                "processor count must be at least 1".to_string(),
            ));
        }
        validate(&jobs)?;

        jobs.sort_by_key(|job| job.arrival_time);
        if config.heavy_first && heavy_first(&mut jobs) {
            debug!("input reordered heaviest first");
        }

        let tracker = CompletionTracker::new(&jobs, config.processors);
        info!(
            jobs = jobs.len(),
            cpus = config.processors,
            "simulation configured"
        );

        Ok(Self {
            core: SchedCore::<S>::new(config.processors),
            jobs,
            job_cursor: 0,
            tracker,
            num_cpus: config.processors,
            done: false,
        })
    }

    /// Advance the simulation by one tick and return the events it produced.
    ///
    /// The tick first accounts the unit of service delivered since the
    /// previous tick (completions, then re-dispatch), then admits the jobs
    /// arriving now. Once every job has arrived and every queue has drained
    /// the clock stops and later calls return nothing.
    pub fn step(&mut self) -> Vec<SchedEvent> {
        if self.done {
            return Vec::new();
        }

        let now = self.core.now();
        set_sim_tick(now);
        let mut events = Vec::new();

        let completed = self.core.tick();
        if !completed.is_empty() {
            // Counted once every simultaneous finisher has left its queue
            let waiting = self.core.ctx.waiting_jobs();
            for (_, job) in &completed {
                events.extend(self.tracker.complete(job, now, waiting));
            }
        }
        events.extend(self.core.redispatch());

        self.handle_arrivals(&mut events);
        self.core.observe();

        if self.input_exhausted() && self.core.ctx.all_idle() {
            self.done = true;
            info!(makespan = now, "all jobs finished");
        } else {
            self.core.advance_time(1);
        }
        events
    }

    fn handle_arrivals(&mut self, events: &mut Vec<SchedEvent>) {
        let now = self.core.now();
        // Contiguous, since jobs are sorted by arrival
        let arriving = self.jobs[self.job_cursor..]
            .iter()
            .take_while(|job| job.arrival_time == now)
            .count();

        match arriving {
            0 => {}
            1 => self.admit_single(events),
            _ => self.admit_batch(arriving, events),
        }
    }

    /// Admit one job, letting each placement preempt as it lands.
    fn admit_single(&mut self, events: &mut Vec<SchedEvent>) {
        let spec = self.jobs[self.job_cursor].clone();
        self.job_cursor += 1;
        debug!(job = spec.id, kind = ?spec.kind, "arrival");

        match spec.kind {
            JobKind::Atomic => events.extend(self.core.assign(spec.to_job())),
            JobKind::Splittable => {
                for child in split(&spec, self.num_cpus) {
                    events.extend(self.core.assign(child));
                }
            }
        }
    }

    /// Admit `count` simultaneous jobs, then settle every processor once.
    fn admit_batch(&mut self, count: usize, events: &mut Vec<SchedEvent>) {
        let batch = self.job_cursor..self.job_cursor + count;
        self.job_cursor += count;
        debug!(count, "simultaneous arrivals");

        for index in batch {
            let spec = &self.jobs[index];
            match spec.kind {
                JobKind::Atomic => {
                    self.core.enqueue(spec.to_job());
                }
                JobKind::Splittable => {
                    for child in split(spec, self.num_cpus) {
                        self.core.enqueue(child);
                    }
                }
            }
        }
        events.extend(self.core.settle());
    }

    pub fn input_exhausted(&self) -> bool {
        self.job_cursor == self.jobs.len()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn now(&self) -> Ticks {
        self.core.now()
    }

    pub fn stats(&self) -> &[JobStats] {
        self.tracker.stats()
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.jobs.iter().all(|job| self.tracker.is_finished(job.id))
    }

    /// Step until done and collect the trace and statistics.
    pub fn run(mut self) -> Report {
        let mut events = Vec::new();
        while !self.done {
            events.extend(self.step());
        }
        debug_assert!(self.all_jobs_completed());

        let makespan = self.core.now();
        let stats = self.tracker.into_stats();
        let summary = Summary::new(&stats, makespan);
        Report {
            events,
            stats,
            summary,
        }
    }
}
