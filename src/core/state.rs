use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

/// Identifier of an original (input) job.
pub type JobId = u32;
pub type CpuId = usize;
pub type Ticks = u64;

/// Identity of a schedulable unit.
///
/// Splittable jobs are never queued themselves; each of their children is
/// keyed by the parent id plus its slot among the siblings.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub enum JobKey {
    Atomic(JobId),
    Child { parent: JobId, slot: usize },
}

impl JobKey {
    /// The original job this unit belongs to.
    pub fn origin(&self) -> JobId {
        match *self {
            Self::Atomic(id) => id,
            Self::Child { parent, .. } => parent,
        }
    }

    pub fn is_child(&self) -> bool {
        matches!(self, Self::Child { .. })
    }

    // Atomic `n` sorts like child `n.0`, just ahead of it
    fn rank(&self) -> (JobId, usize, bool) {
        match *self {
            Self::Atomic(id) => (id, 0, false),
            Self::Child { parent, slot } => (parent, slot, true),
        }
    }
}

impl Ord for JobKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for JobKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atomic(id) => write!(f, "{id}"),
            Self::Child { parent, slot } => write!(f, "{parent}.{slot}"),
        }
    }
}

/// Provenance a child carries so the parent's statistics can be produced
/// when its last child finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentLink {
    pub id: JobId,
    pub arrival_time: Ticks,
    pub execution_time: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub key: JobKey,
    pub arrival_time: Ticks,
    pub execution_time: Ticks,
    pub remaining_time: Ticks,
    pub parent: Option<ParentLink>,
}

impl Job {
    pub fn atomic(id: JobId, arrival_time: Ticks, execution_time: Ticks) -> Self {
        Self {
            key: JobKey::Atomic(id),
            arrival_time,
            execution_time,
            remaining_time: execution_time,
            parent: None,
        }
    }
}

/// Ordered container backing a processor's ready queue.
#[derive(Debug, Clone)]
pub struct ReadyQueue<T> {
    items: VecDeque<T>,
}

impl<T> Default for ReadyQueue<T> {
    fn default() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T> ReadyQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, item: T) {
        self.items.push_back(item);
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.items.front_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Stable in-place reorder.
    pub fn reorder_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.make_contiguous().sort_by(compare);
    }
}

/// The job a processor last announced as running, with its remaining time
/// at the moment of the announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningSlot {
    pub job: JobKey,
    pub remaining: Ticks,
}

impl RunningSlot {
    pub fn of(job: &Job) -> Self {
        Self {
            job: job.key,
            remaining: job.remaining_time,
        }
    }
}

#[derive(Debug)]
pub struct CpuState {
    pub id: CpuId,
    pub queue: ReadyQueue<Job>,
    /// Last announcement on this CPU. Outlives the job it names; `None` only
    /// before the CPU has run anything.
    pub running: Option<RunningSlot>,
}

impl CpuState {
    /// Summed remaining time of everything queued here.
    pub fn load(&self) -> Ticks {
        self.queue
            .iter()
            .fold(0, |load: Ticks, job| load.saturating_add(job.remaining_time))
    }
}

#[derive(Debug)]
pub struct ProcessorBank {
    pub now: Ticks,
    pub cpus: Vec<CpuState>,
}

impl ProcessorBank {
    pub fn new(num_cpus: usize) -> Self {
        assert!(num_cpus > 0, "Processor bank requires at least one CPU");
        Self {
            now: 0,
            cpus: (0..num_cpus)
                .map(|id| CpuState {
                    id,
                    queue: ReadyQueue::new(),
                    running: None,
                })
                .collect(),
        }
    }

    pub fn num_cpus(&self) -> usize {
        self.cpus.len()
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn load(&self, cpu: CpuId) -> Ticks {
        self.cpus[cpu].load()
    }

    // Lowest-indexed CPU with an empty ready queue
    pub fn pick_idle_cpu(&self) -> Option<CpuId> {
        self.cpus
            .iter()
            .find(|cpu| cpu.queue.is_empty())
            .map(|cpu| cpu.id)
    }

    /// CPU with the smallest summed remaining time; the lowest index wins ties.
    pub fn least_loaded_cpu(&self) -> CpuId {
        let mut best = 0;
        let mut best_load = Ticks::MAX;
        for cpu in &self.cpus {
            let load = cpu.load();
            if load < best_load {
                best = cpu.id;
                best_load = load;
            }
        }
        best
    }

    pub fn all_idle(&self) -> bool {
        self.cpus.iter().all(|cpu| cpu.queue.is_empty())
    }

    pub fn enqueue(&mut self, cpu: CpuId, job: Job) {
        debug_assert!(job.remaining_time > 0, "Job {} enqueued with no work", job.key);
        self.cpus[cpu].queue.push_back(job);
    }

    pub fn front(&self, cpu: CpuId) -> Option<&Job> {
        self.cpus[cpu].queue.front()
    }

    /// Promote the front of `cpu`'s queue into its running slot.
    pub fn set_running(&mut self, cpu: CpuId) -> RunningSlot {
        let state = &mut self.cpus[cpu];
        let slot = RunningSlot::of(
            state
                .queue
                .front()
                .expect("Cannot run a job on a CPU with an empty ready queue"),
        );
        state.running = Some(slot);
        slot
    }

    /// Number of distinct original jobs with work still queued anywhere.
    /// Siblings of one splittable job count once.
    pub fn waiting_jobs(&self) -> usize {
        let mut atomic = FxHashSet::default();
        let mut parents = FxHashSet::default();
        for job in self.cpus.iter().flat_map(|cpu| cpu.queue.iter()) {
            match job.key {
                JobKey::Atomic(id) => atomic.insert(id),
                JobKey::Child { parent, .. } => parents.insert(parent),
            };
        }
        atomic.len() + parents.len()
    }
}
