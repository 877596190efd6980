use tracing::{debug, trace};

use super::{
    event::SchedEvent,
    observer::Observer,
    state::{CpuId, Job, ProcessorBank, RunningSlot, Ticks},
};
use crate::scheduler::Scheduler;

pub struct SchedCore<S: Scheduler> {
    pub ctx: ProcessorBank,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(num_cpus: usize) -> Self {
        let ctx = ProcessorBank::new(num_cpus);
        let scheduler = S::init(&ctx);
        let observer = Observer::new();
        Self {
            ctx,
            scheduler,
            observer,
        }
    }

    /// Account one unit of service on every busy processor.
    ///
    /// Returns the jobs that ran out of work, already popped from their
    /// queues, in ascending CPU order.
    pub fn tick(&mut self) -> Vec<(CpuId, Job)> {
        let mut completed = Vec::new();
        let cpu_count = self.ctx.num_cpus();
        for cpu in 0..cpu_count {
            if let Some(job) = self.tick_cpu(cpu) {
                completed.push((cpu, job));
            }
        }
        completed
    }

    fn tick_cpu(&mut self, cpu: CpuId) -> Option<Job> {
        let job = self.ctx.cpus[cpu].queue.front_mut()?;
        job.remaining_time = job
            .remaining_time
            .checked_sub(1)
            .expect("Queued job had no remaining work");
        trace!(cpu, job = %job.key, remaining = job.remaining_time, "served");

        if job.remaining_time > 0 {
            return None;
        }

        let job = self.ctx.cpus[cpu]
            .queue
            .pop_front()
            .expect("Finished job vanished from its ready queue");
        debug!(cpu, job = %job.key, "job ran to completion");
        Some(job)
    }

    /// Place a newly admitted job and decide whether it takes the processor.
    pub fn assign(&mut self, job: Job) -> Option<SchedEvent> {
        let cpu = self.scheduler.select_cpu(&self.ctx, &job);

        let previous = match self.ctx.front(cpu) {
            Some(front) => RunningSlot::of(front),
            None => {
                self.ctx.enqueue(cpu, job);
                return Some(self.run_front(cpu));
            }
        };

        self.ctx.enqueue(cpu, job);
        self.reorder(cpu);

        let front = self.ctx.front(cpu)?;
        if self.scheduler.should_switch(front, &previous) {
            debug!(cpu, from = %previous.job, to = %front.key, "arrival takes the cpu");
            return Some(self.run_front(cpu));
        }
        None
    }

    /// Place a job without announcing anything; pair with [`Self::settle`].
    pub fn enqueue(&mut self, job: Job) -> CpuId {
        let cpu = self.scheduler.select_cpu(&self.ctx, &job);
        trace!(cpu, job = %job.key, "queued");
        self.ctx.enqueue(cpu, job);
        cpu
    }

    /// Reorder every queue and announce each processor whose front changed.
    pub fn settle(&mut self) -> Vec<SchedEvent> {
        for cpu in 0..self.ctx.num_cpus() {
            self.reorder(cpu);
        }
        self.redispatch()
    }

    /// Run [`Self::preempt_check`] on every processor with queued work.
    pub fn redispatch(&mut self) -> Vec<SchedEvent> {
        (0..self.ctx.num_cpus())
            .filter_map(|cpu| self.preempt_check(cpu))
            .collect()
    }

    /// Announce the queue front if the processor has never announced anything
    /// or the front differs from the last announcement. The last announcement
    /// is kept after its job completes, so a successor tied with it on
    /// remaining time is served without a new announcement.
    pub fn preempt_check(&mut self, cpu: CpuId) -> Option<SchedEvent> {
        let front = self.ctx.front(cpu)?;
        let switch = match &self.ctx.cpus[cpu].running {
            None => true,
            Some(current) => self.scheduler.should_switch(front, current),
        };
        switch.then(|| self.run_front(cpu))
    }

    fn reorder(&mut self, cpu: CpuId) {
        let scheduler = &self.scheduler;
        self.ctx.cpus[cpu]
            .queue
            .reorder_by(|a, b| scheduler.order(a, b));
    }

    fn run_front(&mut self, cpu: CpuId) -> SchedEvent {
        let slot = self.ctx.set_running(cpu);
        SchedEvent::Running {
            tick: self.ctx.now,
            job: slot.job,
            remaining: slot.remaining,
            cpu,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.ctx.advance_time(delta);
    }

    pub fn observe(&mut self) {
        self.observer.observe(&self.ctx, &self.scheduler);
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
