//! Good/average/poor cutoffs for shooting metrics.
//!
//! This table is the single source of truth for shooting color coding. Views
//! never compare percentages against literals of their own.

use serde::{Deserialize, Serialize};

/// Shooting metrics that have a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    TrueShooting,
    EffectiveFieldGoal,
    FieldGoal,
    ThreePoint,
    FreeThrow,
}

impl MetricKind {
    pub const ALL: [MetricKind; 5] = [
        MetricKind::TrueShooting,
        MetricKind::EffectiveFieldGoal,
        MetricKind::FieldGoal,
        MetricKind::ThreePoint,
        MetricKind::FreeThrow,
    ];

    /// Column header
    pub fn abbreviation(self) -> &'static str {
        match self {
            MetricKind::TrueShooting => "TS%",
            MetricKind::EffectiveFieldGoal => "eFG%",
            MetricKind::FieldGoal => "FG%",
            MetricKind::ThreePoint => "3P%",
            MetricKind::FreeThrow => "FT%",
        }
    }
}

/// How a value compares to the cutoffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Good,
    Average,
    Poor,
}

impl Rating {
    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Good => "good",
            Rating::Average => "average",
            Rating::Poor => "poor",
        }
    }
}

/// Cutoffs for one metric: `value >= good` is good, `value < poor` is poor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShootingThresholds {
    pub good: f64,
    pub poor: f64,
}

impl ShootingThresholds {
    pub const fn new(good: f64, poor: f64) -> Self {
        Self { good, poor }
    }

    pub fn rate(&self, value: f64) -> Rating {
        if value >= self.good {
            Rating::Good
        } else if value < self.poor {
            Rating::Poor
        } else {
            Rating::Average
        }
    }
}

pub const TRUE_SHOOTING: ShootingThresholds = ShootingThresholds::new(55.0, 50.0);
pub const EFFECTIVE_FIELD_GOAL: ShootingThresholds = ShootingThresholds::new(50.0, 45.0);
pub const FIELD_GOAL: ShootingThresholds = ShootingThresholds::new(45.0, 40.0);
pub const THREE_POINT: ShootingThresholds = ShootingThresholds::new(36.0, 30.0);
pub const FREE_THROW: ShootingThresholds = ShootingThresholds::new(75.0, 65.0);

pub fn thresholds_for(kind: MetricKind) -> ShootingThresholds {
    match kind {
        MetricKind::TrueShooting => TRUE_SHOOTING,
        MetricKind::EffectiveFieldGoal => EFFECTIVE_FIELD_GOAL,
        MetricKind::FieldGoal => FIELD_GOAL,
        MetricKind::ThreePoint => THREE_POINT,
        MetricKind::FreeThrow => FREE_THROW,
    }
}

/// Rate a displayed percentage.
///
/// Returns `None` for non-finite input so callers render it unstyled.
pub fn rate(kind: MetricKind, value: f64) -> Option<Rating> {
    value
        .is_finite()
        .then(|| thresholds_for(kind).rate(value))
}
