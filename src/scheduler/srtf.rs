use std::cmp::Ordering;

use tracing::trace;

use super::{CpuId, Job, ProcessorBank, RunningSlot, Scheduler};

/// Shortest remaining time first with least-loaded placement.
///
/// Placement goes to the lowest-indexed processor with an empty queue, and
/// otherwise to the processor whose queued jobs sum to the least remaining
/// time. The sum covers the whole queue rather than its head, so deep queues
/// are balanced against each other and not only their running jobs.
#[derive(Debug, Default)]
pub struct SrtfScheduler;

impl Scheduler for SrtfScheduler {
    fn init(_bank: &ProcessorBank) -> Self {
        Self
    }

    fn select_cpu(&mut self, bank: &ProcessorBank, job: &Job) -> CpuId {
        if let Some(cpu) = bank.pick_idle_cpu() {
            trace!(job = %job.key, cpu, "idle cpu selected");
            return cpu;
        }

        let cpu = bank.least_loaded_cpu();
        trace!(job = %job.key, cpu, load = bank.load(cpu), "least loaded cpu selected");
        cpu
    }

    fn order(&self, a: &Job, b: &Job) -> Ordering {
        a.remaining_time
            .cmp(&b.remaining_time)
            .then_with(|| a.key.cmp(&b.key))
    }

    // Both fields must differ; a tied sibling reaching the front is not a switch
    fn should_switch(&self, candidate: &Job, current: &RunningSlot) -> bool {
        candidate.key != current.job && candidate.remaining_time != current.remaining
    }
}
