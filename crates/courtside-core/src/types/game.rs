//! Game state as shown on the scoreboard.

use serde::{Deserialize, Serialize};

use super::GameId;

/// Lifecycle status of a game.
///
/// Transitions are requested by the client but authorized and applied by
/// the backend. [`GameStatus::can_transition_to`] is only a local guard so
/// obviously invalid requests never leave the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Scheduled,
    Active,
    Paused,
    Completed,
}

impl GameStatus {
    pub fn can_transition_to(self, next: GameStatus) -> bool {
        use GameStatus::*;
        matches!(
            (self, next),
            (Scheduled, Active)
                | (Active, Paused)
                | (Paused, Active)
                | (Active, Completed)
                | (Paused, Completed)
        )
    }

    /// Whether stats can currently be recorded
    pub fn is_live(self) -> bool {
        matches!(self, GameStatus::Active | GameStatus::Paused)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Scheduled => "scheduled",
            GameStatus::Active => "active",
            GameStatus::Paused => "paused",
            GameStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A regulation quarter or an overtime period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period(pub u8);

impl Period {
    pub const REGULATION_QUARTERS: u8 = 4;

    pub fn is_overtime(self) -> bool {
        self.0 > Self::REGULATION_QUARTERS
    }

    /// "Q1".."Q4", then "OT1", "OT2", ...
    pub fn label(self) -> String {
        if self.is_overtime() {
            format!("OT{}", self.0 - Self::REGULATION_QUARTERS)
        } else {
            format!("Q{}", self.0)
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Format a game clock.
///
/// At or above one minute: `M:SS`. Below one minute: `SS.t` with tenths
/// truncated, the way scoreboards show the final seconds.
pub fn format_clock(seconds_remaining: f64) -> String {
    let secs = if seconds_remaining.is_finite() {
        seconds_remaining.max(0.0)
    } else {
        0.0
    };
    if secs >= 60.0 {
        let whole = secs.floor() as u64;
        format!("{}:{:02}", whole / 60, whole % 60)
    } else {
        let tenths = (secs * 10.0).floor() as u64;
        format!("{}.{}", tenths / 10, tenths % 10)
    }
}

/// Scoreboard state of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameData {
    pub game_id: GameId,
    pub status: GameStatus,
    pub current_quarter: u8,
    /// Seconds left in the current period
    pub time_remaining: f64,
    pub home_score: u32,
    pub away_score: u32,
    #[serde(default)]
    pub home_team_name: String,
    #[serde(default)]
    pub away_team_name: String,
}

impl GameData {
    pub fn new(game_id: GameId, home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            game_id,
            status: GameStatus::Scheduled,
            current_quarter: 1,
            time_remaining: 600.0,
            home_score: 0,
            away_score: 0,
            home_team_name: home.into(),
            away_team_name: away.into(),
        }
    }

    pub fn period(&self) -> Period {
        Period(self.current_quarter.max(1))
    }

    pub fn clock(&self) -> String {
        format_clock(self.time_remaining)
    }

    /// Home score minus away score
    pub fn margin(&self) -> i64 {
        i64::from(self.home_score) - i64::from(self.away_score)
    }

    /// One-line scoreboard summary, e.g. "Hawks 54 - 50 Owls | Q3 4:12".
    pub fn summary(&self) -> String {
        let when = match self.status {
            GameStatus::Scheduled => "Scheduled".to_string(),
            GameStatus::Completed => "Final".to_string(),
            GameStatus::Paused => format!("{} {} (paused)", self.period(), self.clock()),
            GameStatus::Active => format!("{} {}", self.period(), self.clock()),
        };
        format!(
            "{} {} - {} {} | {}",
            self.home_team_name, self.home_score, self.away_score, self.away_team_name, when
        )
    }
}
