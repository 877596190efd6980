use std::fmt;

use average::Mean;

use super::completion::JobStats;
use crate::core::state::Ticks;

// Absorbs binary representation error before half-up rounding
const ROUNDING_SLACK: f64 = 1e-9;

/// End-of-run figures over every finished original job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub jobs: usize,
    /// Mean turnaround, rounded up.
    pub average_turnaround: Ticks,
    /// Largest overhead ratio, rounded half-up to two decimals.
    pub max_overhead: f64,
    /// Mean overhead ratio, rounded half-up to two decimals.
    pub average_overhead: f64,
    pub makespan: Ticks,
}

impl Summary {
    pub fn new(stats: &[JobStats], makespan: Ticks) -> Self {
        if stats.is_empty() {
            return Self {
                jobs: 0,
                average_turnaround: 0,
                max_overhead: 0.0,
                average_overhead: 0.0,
                makespan,
            };
        }

        let count = stats.len() as Ticks;
        let total_turnaround: Ticks = stats.iter().map(|job| job.turnaround_time).sum();

        // Compare turnaround/execution exactly instead of through f64
        let worst = stats
            .iter()
            .max_by(|a, b| {
                let lhs = a.turnaround_time as u128 * b.execution_time as u128;
                let rhs = b.turnaround_time as u128 * a.execution_time as u128;
                lhs.cmp(&rhs)
            })
            .expect("stats checked non-empty");
        let max_overhead =
            ratio_hundredths(worst.turnaround_time, worst.execution_time) as f64 / 100.0;

        let mean: Mean = stats.iter().map(JobStats::overhead).collect();

        Self {
            jobs: stats.len(),
            average_turnaround: total_turnaround.div_ceil(count),
            max_overhead,
            average_overhead: round_half_up(mean.mean()),
            makespan,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Turnaround time {}", self.average_turnaround)?;
        writeln!(
            f,
            "Time overhead {:.2} {:.2}",
            self.max_overhead, self.average_overhead
        )?;
        writeln!(f, "Makespan {}", self.makespan)
    }
}

/// `numerator / denominator` in hundredths, rounded half-up.
fn ratio_hundredths(numerator: Ticks, denominator: Ticks) -> u128 {
    let numerator = numerator as u128;
    let denominator = denominator as u128;
    (200 * numerator + denominator) / (2 * denominator)
}

/// Round to two decimals, halves away from zero.
pub fn round_half_up(value: f64) -> f64 {
    (value * 100.0 + 0.5 + ROUNDING_SLACK).floor() / 100.0
}
