pub mod completion;
pub mod driver;
pub mod job;
pub mod stats;
pub mod workload;

pub use completion::{CompletionTracker, JobStats};
pub use driver::{Report, Sim};
pub use job::{JobKind, JobSpec, heavy_first, split};
pub use stats::Summary;
pub use workload::{load_workload, parse_workload};
