pub mod config;
pub mod core;
pub mod error;
pub mod fmt;
pub mod scheduler;
pub mod sim;

pub use config::SimConfig;
pub use error::SimError;
pub use scheduler::{Scheduler, SrtfScheduler};
pub use sim::{JobKind, JobSpec, Report, Sim, Summary};
