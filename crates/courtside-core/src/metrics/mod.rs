//! Derived basketball metrics.
//!
//! This is the one place every displayed advanced stat is computed. All
//! functions are pure and total: a zero denominator yields `0` (or the
//! documented sentinel for [`assist_to_turnover`]), never NaN or infinity.
//!
//! Displayed values are rounded to one decimal with [`round1`].
//!
//! ```
//! use courtside_core::metrics;
//! use courtside_core::StatLine;
//!
//! let line = StatLine {
//!     points: 20,
//!     field_goals_attempted: 15,
//!     free_throws_attempted: 4,
//!     ..Default::default()
//! };
//! assert_eq!(metrics::true_shooting_pct(&line), 59.7);
//! ```

pub mod averages;
pub mod team;
pub mod thresholds;

use serde::{Deserialize, Serialize};

use crate::types::StatLine;

pub use averages::PerGameAverages;
pub use team::{FourFactors, TeamComparison};
pub use thresholds::{MetricKind, Rating, ShootingThresholds};

/// Weight of a free-throw attempt when estimating shooting possessions
pub const FREE_THROW_POSSESSION_WEIGHT: f64 = 0.44;

/// Round to the nearest tenth, halves rounding up (towards +infinity).
///
/// Equivalent to `round(x * 10) / 10` with half-up rounding, so `-0.25`
/// becomes `-0.2` rather than `-0.3`. Non-finite input yields `0`.
pub fn round1(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let rounded = (value * 10.0 + 0.5).floor() / 10.0;
    // Avoid displaying "-0.0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// `numerator / denominator * 100`, rounded; `0` when the denominator is 0.
pub fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    round1(numerator / denominator * 100.0)
}

/// True shooting percentage: `PTS / (2 * (FGA + 0.44 * FTA)) * 100`.
pub fn true_shooting_pct(line: &StatLine) -> f64 {
    let attempts = f64::from(line.field_goals_attempted)
        + FREE_THROW_POSSESSION_WEIGHT * f64::from(line.free_throws_attempted);
    percentage(f64::from(line.points), 2.0 * attempts)
}

/// Effective field goal percentage: `(FGM + 0.5 * 3PM) / FGA * 100`.
pub fn effective_fg_pct(line: &StatLine) -> f64 {
    let weighted_makes =
        f64::from(line.field_goals_made) + 0.5 * f64::from(line.three_pointers_made);
    percentage(weighted_makes, f64::from(line.field_goals_attempted))
}

pub fn field_goal_pct(line: &StatLine) -> f64 {
    percentage(
        f64::from(line.field_goals_made),
        f64::from(line.field_goals_attempted),
    )
}

pub fn three_point_pct(line: &StatLine) -> f64 {
    percentage(
        f64::from(line.three_pointers_made),
        f64::from(line.three_pointers_attempted),
    )
}

pub fn free_throw_pct(line: &StatLine) -> f64 {
    percentage(
        f64::from(line.free_throws_made),
        f64::from(line.free_throws_attempted),
    )
}

/// Sum of the positive box-score contributions
fn positive_contributions(line: &StatLine) -> i64 {
    i64::from(line.points)
        + i64::from(line.rebounds)
        + i64::from(line.assists)
        + i64::from(line.steals)
        + i64::from(line.blocks)
}

/// Misses, turnovers and fouls
fn negative_contributions(line: &StatLine) -> i64 {
    i64::from(line.field_goals_missed())
        + i64::from(line.free_throws_missed())
        + i64::from(line.turnovers)
        + i64::from(line.fouls)
}

/// Game efficiency rating: positive contributions minus misses, turnovers
/// and fouls. Not normalized by minutes; used for in-game context.
pub fn game_efficiency_rating(line: &StatLine) -> i64 {
    positive_contributions(line) - negative_contributions(line)
}

/// Simplified per-minute efficiency rating: [`game_efficiency_rating`]
/// divided by minutes played. `0` when no minutes were played.
pub fn player_efficiency_rating(line: &StatLine) -> f64 {
    if line.minutes_played <= 0.0 || !line.minutes_played.is_finite() {
        return 0.0;
    }
    round1(game_efficiency_rating(line) as f64 / line.minutes_played)
}

/// Assist-to-turnover ratio.
///
/// With zero turnovers the ratio is the assist count itself (as if one
/// turnover had been committed), so a 5-assist, 0-turnover game reads `5.0`.
pub fn assist_to_turnover(line: &StatLine) -> f64 {
    let turnovers = line.turnovers.max(1);
    round1(f64::from(line.assists) / f64::from(turnovers))
}

/// Turnovers per 100 plays: `TO / (FGA + 0.44 * FTA + TO) * 100`.
pub fn turnover_rate(line: &StatLine) -> f64 {
    let plays = f64::from(line.field_goals_attempted)
        + FREE_THROW_POSSESSION_WEIGHT * f64::from(line.free_throws_attempted)
        + f64::from(line.turnovers);
    percentage(f64::from(line.turnovers), plays)
}

/// Free-throw rate: free-throw attempts per 100 field-goal attempts.
pub fn free_throw_rate(line: &StatLine) -> f64 {
    percentage(
        f64::from(line.free_throws_attempted),
        f64::from(line.field_goals_attempted),
    )
}

/// Share of available offensive rebounds grabbed: `OREB / (OREB + opp DREB)`.
pub fn offensive_rebound_pct(team: &StatLine, opponent: &StatLine) -> f64 {
    let available = f64::from(team.offensive_rebounds) + f64::from(opponent.defensive_rebounds);
    percentage(f64::from(team.offensive_rebounds), available)
}

/// Share of available defensive rebounds grabbed: `DREB / (DREB + opp OREB)`.
pub fn defensive_rebound_pct(team: &StatLine, opponent: &StatLine) -> f64 {
    let available = f64::from(team.defensive_rebounds) + f64::from(opponent.offensive_rebounds);
    percentage(f64::from(team.defensive_rebounds), available)
}

/// Estimated possessions: `FGA - OREB + TO + 0.44 * FTA`, never negative.
pub fn estimated_possessions(line: &StatLine) -> f64 {
    let possessions = f64::from(line.field_goals_attempted) - f64::from(line.offensive_rebounds)
        + f64::from(line.turnovers)
        + FREE_THROW_POSSESSION_WEIGHT * f64::from(line.free_throws_attempted);
    round1(possessions.max(0.0))
}

/// Points per 100 possessions. `0` with no possessions.
pub fn rating(points: u32, possessions: f64) -> f64 {
    if possessions <= 0.0 {
        return 0.0;
    }
    round1(f64::from(points) / possessions * 100.0)
}

/// Offensive rating of `team` over its own estimated possessions
pub fn offensive_rating(team: &StatLine) -> f64 {
    rating(team.points, estimated_possessions(team))
}

/// Defensive rating: opponent points over `team`'s estimated possessions
pub fn defensive_rating(team: &StatLine, opponent: &StatLine) -> f64 {
    rating(opponent.points, estimated_possessions(team))
}

/// Every per-player metric a box score row shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMetrics {
    pub true_shooting_pct: f64,
    pub effective_fg_pct: f64,
    pub field_goal_pct: f64,
    pub three_point_pct: f64,
    pub free_throw_pct: f64,
    pub player_efficiency_rating: f64,
    pub game_efficiency_rating: i64,
    pub assist_to_turnover: f64,
    pub turnover_rate: f64,
    pub free_throw_rate: f64,
}

impl PlayerMetrics {
    pub fn from_line(line: &StatLine) -> Self {
        Self {
            true_shooting_pct: true_shooting_pct(line),
            effective_fg_pct: effective_fg_pct(line),
            field_goal_pct: field_goal_pct(line),
            three_point_pct: three_point_pct(line),
            free_throw_pct: free_throw_pct(line),
            player_efficiency_rating: player_efficiency_rating(line),
            game_efficiency_rating: game_efficiency_rating(line),
            assist_to_turnover: assist_to_turnover(line),
            turnover_rate: turnover_rate(line),
            free_throw_rate: free_throw_rate(line),
        }
    }

    /// Rating of the shooting metrics against the canonical thresholds
    pub fn shooting_rating(&self, kind: MetricKind) -> Option<Rating> {
        let value = match kind {
            MetricKind::TrueShooting => self.true_shooting_pct,
            MetricKind::EffectiveFieldGoal => self.effective_fg_pct,
            MetricKind::FieldGoal => self.field_goal_pct,
            MetricKind::ThreePoint => self.three_point_pct,
            MetricKind::FreeThrow => self.free_throw_pct,
        };
        thresholds::rate(kind, value)
    }
}
