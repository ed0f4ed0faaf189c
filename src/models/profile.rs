//! Climber profile entity model
//!
//! A `ClimberProfile` is one self-reported set of performance measurements.
//! It is validated once at construction and never changes afterwards.
//! `ProfileRecord` is the flat 12-column row used by the storage layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClimbRankError, Result};
use crate::schema::{Column, Metric};

/// The nine measurements compared against the cohort
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProfileMetrics {
    /// Max one-rep pull-up, additional weight (kg)
    pub pull_up_strength: f64,
    /// 20mm edge dead hang, additional weight (kg)
    pub crimp_20mm_strength: f64,
    /// 10mm edge dead hang, additional weight (kg)
    pub crimp_10mm_strength: f64,
    /// Pinch grip dead hang, additional weight (kg)
    pub pinch_grip_strength: f64,
    /// 7:3 repeaters (min)
    pub endurance: f64,
    /// Total body-weight pull-ups, negative when a single one is out of reach
    pub power_endurance: f64,
    /// Reach beyond toes (cm)
    pub hamstring_flexibility: f64,
    /// Lateral split, pelvis to ground (cm)
    pub hip_flexibility: f64,
    /// Plank duration (min)
    pub core_strength: f64,
}

impl ProfileMetrics {
    /// Value of a single metric
    #[must_use]
    pub const fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::PullUpStrength => self.pull_up_strength,
            Metric::Crimp20mm => self.crimp_20mm_strength,
            Metric::Crimp10mm => self.crimp_10mm_strength,
            Metric::PinchGrip => self.pinch_grip_strength,
            Metric::Endurance => self.endurance,
            Metric::PowerEndurance => self.power_endurance,
            Metric::HamstringFlexibility => self.hamstring_flexibility,
            Metric::HipFlexibility => self.hip_flexibility,
            Metric::CoreStrength => self.core_strength,
        }
    }
}

/// A validated climber performance record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ProfileRecord", try_from = "ProfileRecord")]
pub struct ClimberProfile {
    grade: String,
    metrics: ProfileMetrics,
    height: f64,
    weight: f64,
}

impl ClimberProfile {
    /// Create a profile, checking every field invariant
    ///
    /// The grade must contain a non-whitespace character. All numbers must be
    /// finite, every metric except power endurance must be non-negative, and
    /// height and weight must be positive.
    pub fn new(
        grade: impl Into<String>,
        metrics: ProfileMetrics,
        height: f64,
        weight: f64,
    ) -> Result<Self> {
        let grade = grade.into();
        if grade.trim().is_empty() {
            return Err(ClimbRankError::invalid_profile(
                Column::HardestGrade.name(),
                "grade must not be empty",
            ));
        }

        for metric in Metric::ALL {
            let value = metrics.get(metric);
            ensure_finite(metric.column(), value)?;
            if !metric.allows_negative() && value < 0.0 {
                return Err(ClimbRankError::invalid_profile(
                    metric.name(),
                    format!("must be non-negative, got {value}"),
                ));
            }
        }

        for (column, value) in [(Column::Height, height), (Column::Weight, weight)] {
            ensure_finite(column, value)?;
            if value <= 0.0 {
                return Err(ClimbRankError::invalid_profile(
                    column.name(),
                    format!("must be positive, got {value}"),
                ));
            }
        }

        Ok(Self {
            grade,
            metrics,
            height,
            weight,
        })
    }

    /// Self-reported hardest grade
    #[must_use]
    pub fn grade(&self) -> &str {
        &self.grade
    }

    /// All nine compared measurements
    #[must_use]
    pub const fn metrics(&self) -> &ProfileMetrics {
        &self.metrics
    }

    /// Value of a single compared measurement
    #[must_use]
    pub const fn metric(&self, metric: Metric) -> f64 {
        self.metrics.get(metric)
    }

    /// Height (cm)
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Weight (kg)
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Value stored in `column`
    #[must_use]
    pub fn cell(&self, column: Column) -> Cell {
        match column {
            Column::HardestGrade => Cell::Text(self.grade.clone()),
            Column::Height => Cell::Number(self.height),
            Column::Weight => Cell::Number(self.weight),
            Column::PullUpStrength => Cell::Number(self.metrics.pull_up_strength),
            Column::Crimp20mm => Cell::Number(self.metrics.crimp_20mm_strength),
            Column::Crimp10mm => Cell::Number(self.metrics.crimp_10mm_strength),
            Column::PinchGrip => Cell::Number(self.metrics.pinch_grip_strength),
            Column::Endurance => Cell::Number(self.metrics.endurance),
            Column::PowerEndurance => Cell::Number(self.metrics.power_endurance),
            Column::HamstringFlexibility => Cell::Number(self.metrics.hamstring_flexibility),
            Column::HipFlexibility => Cell::Number(self.metrics.hip_flexibility),
            Column::CoreStrength => Cell::Number(self.metrics.core_strength),
        }
    }

    /// Ordered projection onto the 12 persisted columns
    #[must_use]
    pub fn cells(&self) -> [(Column, Cell); 12] {
        Column::ALL.map(|column| (column, self.cell(column)))
    }

    /// Flat row as written to storage
    #[must_use]
    pub fn to_record(&self) -> ProfileRecord {
        ProfileRecord::from(self.clone())
    }
}

fn ensure_finite(column: Column, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ClimbRankError::invalid_profile(
            column.name(),
            format!("must be a finite number, got {value}"),
        ))
    }
}

/// Single value of a profile column
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Text column (the grade)
    Text(String),
    /// Numeric column
    Number(f64),
}

impl Cell {
    /// Numeric value, if this is a numeric cell
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(_) => None,
        }
    }

    /// Text value, if this is a text cell
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Number(_) => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(v) => write!(f, "{v}"),
        }
    }
}

/// Persisted row, one field per column with the column header as its name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(rename = "Hardest Grade")]
    pub hardest_grade: String,
    #[serde(rename = "Pull-Up Strength (kg)")]
    pub pull_up_strength: f64,
    #[serde(rename = "Finger Strength on 20mm Crimp (kg)")]
    pub crimp_20mm_strength: f64,
    #[serde(rename = "Finger Strength on 10mm Crimp (kg)")]
    pub crimp_10mm_strength: f64,
    #[serde(rename = "Pinch Grip Strength (kg)")]
    pub pinch_grip_strength: f64,
    #[serde(rename = "Endurance (min)")]
    pub endurance: f64,
    #[serde(rename = "Power Endurance (Pull-Ups)")]
    pub power_endurance: f64,
    #[serde(rename = "Hamstring Flexibility (cm)")]
    pub hamstring_flexibility: f64,
    #[serde(rename = "Hip Flexibility (cm)")]
    pub hip_flexibility: f64,
    #[serde(rename = "Core Strength (min)")]
    pub core_strength: f64,
    #[serde(rename = "Height (cm)")]
    pub height: f64,
    #[serde(rename = "Weight (kg)")]
    pub weight: f64,
}

impl From<ClimberProfile> for ProfileRecord {
    fn from(profile: ClimberProfile) -> Self {
        let m = profile.metrics;
        Self {
            hardest_grade: profile.grade,
            pull_up_strength: m.pull_up_strength,
            crimp_20mm_strength: m.crimp_20mm_strength,
            crimp_10mm_strength: m.crimp_10mm_strength,
            pinch_grip_strength: m.pinch_grip_strength,
            endurance: m.endurance,
            power_endurance: m.power_endurance,
            hamstring_flexibility: m.hamstring_flexibility,
            hip_flexibility: m.hip_flexibility,
            core_strength: m.core_strength,
            height: profile.height,
            weight: profile.weight,
        }
    }
}

impl TryFrom<ProfileRecord> for ClimberProfile {
    type Error = ClimbRankError;

    fn try_from(record: ProfileRecord) -> Result<Self> {
        let metrics = ProfileMetrics {
            pull_up_strength: record.pull_up_strength,
            crimp_20mm_strength: record.crimp_20mm_strength,
            crimp_10mm_strength: record.crimp_10mm_strength,
            pinch_grip_strength: record.pinch_grip_strength,
            endurance: record.endurance,
            power_endurance: record.power_endurance,
            hamstring_flexibility: record.hamstring_flexibility,
            hip_flexibility: record.hip_flexibility,
            core_strength: record.core_strength,
        };
        Self::new(record.hardest_grade, metrics, record.height, record.weight)
    }
}
