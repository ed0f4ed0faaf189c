//! Column definitions for the climber profile table
//!
//! Every column the store writes or the analyzer reads is declared here, so
//! lookups go through `Column` instead of free-form strings.

use std::fmt;
use std::sync::{Arc, LazyLock};

use arrow_schema::{DataType, Field, Schema, SchemaRef};
use serde::{Deserialize, Serialize};

/// A column of the persisted profile table, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    /// Self-reported hardest grade
    HardestGrade,
    /// Max one-rep pull-up, additional weight
    PullUpStrength,
    /// Dead hang on a 20mm edge, additional weight
    Crimp20mm,
    /// Dead hang on a 10mm edge, additional weight
    Crimp10mm,
    /// Dead hang on a pinch block, additional weight
    PinchGrip,
    /// 7:3 hangboard repeaters
    Endurance,
    /// Total body-weight pull-ups
    PowerEndurance,
    /// Reach beyond toes
    HamstringFlexibility,
    /// Lateral split, distance from pelvis to ground
    HipFlexibility,
    /// Plank duration
    CoreStrength,
    /// Body height
    Height,
    /// Body weight
    Weight,
}

impl Column {
    /// All columns in the order they are persisted
    pub const ALL: [Column; 12] = [
        Column::HardestGrade,
        Column::PullUpStrength,
        Column::Crimp20mm,
        Column::Crimp10mm,
        Column::PinchGrip,
        Column::Endurance,
        Column::PowerEndurance,
        Column::HamstringFlexibility,
        Column::HipFlexibility,
        Column::CoreStrength,
        Column::Height,
        Column::Weight,
    ];

    /// The column header as stored
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Column::HardestGrade => "Hardest Grade",
            Column::PullUpStrength => "Pull-Up Strength (kg)",
            Column::Crimp20mm => "Finger Strength on 20mm Crimp (kg)",
            Column::Crimp10mm => "Finger Strength on 10mm Crimp (kg)",
            Column::PinchGrip => "Pinch Grip Strength (kg)",
            Column::Endurance => "Endurance (min)",
            Column::PowerEndurance => "Power Endurance (Pull-Ups)",
            Column::HamstringFlexibility => "Hamstring Flexibility (cm)",
            Column::HipFlexibility => "Hip Flexibility (cm)",
            Column::CoreStrength => "Core Strength (min)",
            Column::Height => "Height (cm)",
            Column::Weight => "Weight (kg)",
        }
    }

    /// Look a column up by its stored header
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Arrow type the column is written with and cast to on read
    #[must_use]
    pub const fn data_type(self) -> DataType {
        match self {
            Column::HardestGrade => DataType::Utf8,
            _ => DataType::Float64,
        }
    }

    /// Arrow field for this column
    #[must_use]
    pub fn field(self) -> Field {
        Field::new(self.name(), self.data_type(), false)
    }

    /// The metric stored in this column, if it is one of the analyzed ones
    #[must_use]
    pub fn metric(self) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.column() == self)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A metric compared against the cohort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "Pull-Up Strength (kg)")]
    PullUpStrength,
    #[serde(rename = "Finger Strength on 20mm Crimp (kg)")]
    Crimp20mm,
    #[serde(rename = "Finger Strength on 10mm Crimp (kg)")]
    Crimp10mm,
    #[serde(rename = "Pinch Grip Strength (kg)")]
    PinchGrip,
    #[serde(rename = "Endurance (min)")]
    Endurance,
    #[serde(rename = "Power Endurance (Pull-Ups)")]
    PowerEndurance,
    #[serde(rename = "Hamstring Flexibility (cm)")]
    HamstringFlexibility,
    #[serde(rename = "Hip Flexibility (cm)")]
    HipFlexibility,
    #[serde(rename = "Core Strength (min)")]
    CoreStrength,
}

impl Metric {
    /// Metrics in report order
    pub const ALL: [Metric; 9] = [
        Metric::PullUpStrength,
        Metric::Crimp20mm,
        Metric::Crimp10mm,
        Metric::PinchGrip,
        Metric::Endurance,
        Metric::PowerEndurance,
        Metric::HamstringFlexibility,
        Metric::HipFlexibility,
        Metric::CoreStrength,
    ];

    /// Column holding this metric
    #[must_use]
    pub const fn column(self) -> Column {
        match self {
            Metric::PullUpStrength => Column::PullUpStrength,
            Metric::Crimp20mm => Column::Crimp20mm,
            Metric::Crimp10mm => Column::Crimp10mm,
            Metric::PinchGrip => Column::PinchGrip,
            Metric::Endurance => Column::Endurance,
            Metric::PowerEndurance => Column::PowerEndurance,
            Metric::HamstringFlexibility => Column::HamstringFlexibility,
            Metric::HipFlexibility => Column::HipFlexibility,
            Metric::CoreStrength => Column::CoreStrength,
        }
    }

    /// Display name, identical to the column header
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.column().name()
    }

    /// Power endurance counts pull-ups relative to one and may go below zero
    #[must_use]
    pub const fn allows_negative(self) -> bool {
        matches!(self, Metric::PowerEndurance)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static PROFILE_SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(
        Column::ALL.into_iter().map(Column::field).collect::<Vec<_>>(),
    ))
});

/// Arrow schema of the persisted profile table
#[must_use]
pub fn profile_schema() -> SchemaRef {
    Arc::clone(&PROFILE_SCHEMA)
}
