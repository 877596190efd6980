use std::cmp::Ordering;

use super::state::ProcessorBank;
use crate::scheduler::Scheduler;

/// Debug-build consistency checks over the processor bank, run once per tick.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe<S: Scheduler>(&mut self, bank: &ProcessorBank, scheduler: &S) {
        self.step += 1;

        for cpu in &bank.cpus {
            for job in cpu.queue.iter() {
                debug_assert!(
                    job.remaining_time > 0,
                    "Job {} left on CPU {} with no remaining work",
                    job.key,
                    cpu.id
                );
            }

            let mut queued = cpu.queue.iter();
            if let Some(mut prev) = queued.next() {
                for job in queued {
                    debug_assert_ne!(
                        scheduler.order(prev, job),
                        Ordering::Greater,
                        "CPU {} queue out of order: {} before {}",
                        cpu.id,
                        prev.key,
                        job.key
                    );
                    prev = job;
                }
            }

            debug_assert!(
                cpu.queue.is_empty() || cpu.running.is_some(),
                "CPU {} has queued work but never announced a job",
                cpu.id
            );
        }
    }
}
