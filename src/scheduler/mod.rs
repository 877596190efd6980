pub mod srtf;

use std::cmp::Ordering;

use crate::core::state::{CpuId, Job, ProcessorBank, RunningSlot};
pub use srtf::SrtfScheduler;

/// Placement and ordering policy consulted by the scheduling core.
pub trait Scheduler {
    fn init(bank: &ProcessorBank) -> Self;

    /// Choose the processor whose ready queue receives `job`.
    fn select_cpu(&mut self, bank: &ProcessorBank, job: &Job) -> CpuId;

    /// Ready-queue order; the front of a queue is the job that gets served.
    fn order(&self, a: &Job, b: &Job) -> Ordering;

    /// Whether `candidate` should be announced in place of `current`.
    fn should_switch(&self, candidate: &Job, current: &RunningSlot) -> bool;
}
