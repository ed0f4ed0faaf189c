//! Feedback tiers derived from percentile thresholds

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClimbRankError, Result};

/// Feedback classification of a percentile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// At or above the excellent threshold
    Excellent,
    /// Between the two thresholds
    Mid,
    /// At or below the needs-improvement threshold
    NeedsImprovement,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::Excellent => "excellent",
            Tier::Mid => "mid",
            Tier::NeedsImprovement => "needs improvement",
        };
        f.write_str(label)
    }
}

/// Percentile cut-offs for the top and bottom tiers (both inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Percentiles at or above this are excellent
    pub excellent: f64,
    /// Percentiles at or below this need improvement
    pub needs_improvement: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            excellent: 90.0,
            needs_improvement: 10.0,
        }
    }
}

impl TierThresholds {
    /// Create thresholds, checking that they are ordered and within 0..=100
    pub fn new(excellent: f64, needs_improvement: f64) -> Result<Self> {
        let thresholds = Self {
            excellent,
            needs_improvement,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check that both thresholds lie in 0..=100 and bottom is below top
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("excellent", self.excellent),
            ("needs-improvement", self.needs_improvement),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ClimbRankError::InvalidConfig(format!(
                    "{name} threshold must be within 0..=100, got {value}"
                )));
            }
        }
        if self.needs_improvement >= self.excellent {
            return Err(ClimbRankError::InvalidConfig(format!(
                "needs-improvement threshold ({}) must be below excellent threshold ({})",
                self.needs_improvement, self.excellent
            )));
        }
        Ok(())
    }

    /// Classify an unrounded percentile
    #[must_use]
    pub fn classify(&self, percentile: f64) -> Tier {
        if percentile >= self.excellent {
            Tier::Excellent
        } else if percentile <= self.needs_improvement {
            Tier::NeedsImprovement
        } else {
            Tier::Mid
        }
    }
}
