//! Synthetic climber profiles
//!
//! Generates plausible, validated profiles for demos and tests. Metric means
//! rise with the position of the grade in the configured grade list, so
//! harder grades produce stronger cohorts.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::models::profile::{ClimberProfile, ProfileMetrics};

/// Grades used when none are configured
pub const DEFAULT_GRADES: [&str; 8] = ["V0", "V1", "V2", "V3", "V4", "V5", "V6", "V7"];

/// Configuration for synthetic profile generation
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    /// Number of profiles to generate
    pub count: usize,
    /// Grades to spread profiles over, easiest first
    pub grades: Vec<String>,
    /// Seed for reproducible output
    pub seed: Option<u64>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            count: 100,
            grades: DEFAULT_GRADES.iter().map(|g| (*g).to_string()).collect(),
            seed: None,
        }
    }
}

/// Generate `config.count` profiles
///
/// Returns an empty list when no grades are configured.
pub fn generate_profiles(config: &SyntheticConfig) -> Result<Vec<ClimberProfile>> {
    if config.grades.is_empty() {
        return Ok(Vec::new());
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let last = (config.grades.len() - 1).max(1) as f64;
    let mut profiles = Vec::with_capacity(config.count);

    for _ in 0..config.count {
        let grade_idx = rng.random_range(0..config.grades.len());
        // 0.0 for the easiest grade, 1.0 for the hardest
        let level = grade_idx as f64 / last;

        let metrics = ProfileMetrics {
            pull_up_strength: spread(&mut rng, 5.0 + 35.0 * level, 8.0),
            crimp_20mm_strength: spread(&mut rng, 2.0 + 30.0 * level, 6.0),
            crimp_10mm_strength: spread(&mut rng, 15.0 * level, 5.0),
            pinch_grip_strength: spread(&mut rng, 5.0 + 20.0 * level, 5.0),
            endurance: spread(&mut rng, 1.0 + 5.0 * level, 1.0),
            power_endurance: (8.0 + 20.0 * level + rng.random_range(-10.0..10.0)).round(),
            hamstring_flexibility: spread(&mut rng, 5.0 + 10.0 * level, 6.0),
            hip_flexibility: spread(&mut rng, 40.0 - 20.0 * level, 8.0),
            core_strength: spread(&mut rng, 1.5 + 3.0 * level, 1.0),
        };
        let height = (rng.random_range(155.0..195.0_f64) * 10.0).round() / 10.0;
        let weight = (rng.random_range(50.0..90.0_f64) * 10.0).round() / 10.0;

        profiles.push(ClimberProfile::new(
            config.grades[grade_idx].clone(),
            metrics,
            height,
            weight,
        )?);
    }

    Ok(profiles)
}

/// Uniform value around `mean`, clamped at zero and rounded to one decimal
fn spread(rng: &mut StdRng, mean: f64, width: f64) -> f64 {
    let value = mean + rng.random_range(-width..width);
    (value.max(0.0) * 10.0).round() / 10.0
}
