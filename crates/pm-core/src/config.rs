//! Route planner configuration.

use crate::{CoreError, CoreResult};

/// Tuning knobs for the route planner.
///
/// `candidate_count` is the number of nearest network nodes considered for
/// each query endpoint.  The planner tries up to `candidate_count²` node
/// pairs before giving up, so this is also the caller's latency bound.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    pub candidate_count: usize,
}

impl PlannerConfig {
    pub const DEFAULT_CANDIDATE_COUNT: usize = 10;

    pub fn new(candidate_count: usize) -> Self {
        Self { candidate_count }
    }

    /// Reject configurations the planner cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.candidate_count == 0 {
            return Err(CoreError::Config(
                "candidate_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { candidate_count: Self::DEFAULT_CANDIDATE_COUNT }
    }
}
