//! Build concurrency sizing
//!
//! The external build tool runs the native build with `-j N` parallel
//! workers; the generator itself stays single-threaded. `N` comes from a
//! job-slot environment variable when the scheduler provides one, and
//! otherwise from a fraction of the host's available processing units.
//!
//! Host capacity is injected as a plain value so tests can exercise the
//! policy without touching real environment state; the environment and
//! CPU probes happen only in [`detect_jobs`].

use std::num::NonZeroUsize;

/// Environment variable carrying a scheduler-provided job-slot count.
pub const JOB_SLOTS_VAR: &str = "NSLOTS";

/// Policy for deriving a job count from available processing units.
///
/// The default reserves headroom on the host: `floor(units / 4) * 3`.
/// The fraction is a parameter rather than a constant so callers with
/// different host-sharing requirements can adjust it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobPolicy {
    pub numerator: usize,
    pub denominator: usize,
}

impl Default for JobPolicy {
    fn default() -> Self {
        Self {
            numerator: 3,
            denominator: 4,
        }
    }
}

impl JobPolicy {
    /// Compute the job count for a run.
    ///
    /// A slot override wins when it parses as a positive integer;
    /// anything else (absent, non-numeric, zero) falls back to the
    /// fraction of `available_units`. The fraction's result is not
    /// clamped: the policy owns the floor.
    pub fn jobs(&self, slot_override: Option<&str>, available_units: usize) -> usize {
        if let Some(slots) = slot_override {
            if let Ok(n) = slots.trim().parse::<usize>() {
                if n > 0 {
                    return n;
                }
            }
        }

        available_units / self.denominator * self.numerator
    }
}

/// Production entry point: read the job-slot variable and probe the
/// host's available parallelism, then apply the default policy.
pub fn detect_jobs() -> usize {
    let slots = std::env::var(JOB_SLOTS_VAR).ok();
    let units = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);

    JobPolicy::default().jobs(slots.as_deref(), units)
}
