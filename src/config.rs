//! Simulation configuration.

use crate::error::SimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Number of processors; also the number of children per splittable job.
    pub processors: usize,
    /// Reorder the input heaviest-first when the first two jobs arrive together.
    pub heavy_first: bool,
}

impl SimConfig {
    pub fn new(processors: usize, heavy_first: bool) -> Result<Self, SimError> {
        if processors == 0 {
            return Err(SimError::Config(
                "processor count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            processors,
            heavy_first,
        })
    }
}
