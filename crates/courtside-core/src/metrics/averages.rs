//! Season view: per-game averages over several games.

use serde::{Deserialize, Serialize};

use super::{effective_fg_pct, round1, true_shooting_pct};
use crate::types::StatLine;

/// Per-game averages, each rounded to one decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerGameAverages {
    pub games: usize,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
    pub minutes: f64,
    /// Computed from season totals, not averaged per game
    pub true_shooting_pct: f64,
    pub effective_fg_pct: f64,
}

impl PerGameAverages {
    /// Averages over `games`. An empty slice yields all zeros.
    pub fn from_games(games: &[StatLine]) -> Self {
        if games.is_empty() {
            return Self::default();
        }
        let totals: StatLine = games.iter().sum();
        let n = games.len() as f64;
        let avg = |total: u32| round1(f64::from(total) / n);
        Self {
            games: games.len(),
            points: avg(totals.points),
            rebounds: avg(totals.rebounds),
            assists: avg(totals.assists),
            steals: avg(totals.steals),
            blocks: avg(totals.blocks),
            turnovers: avg(totals.turnovers),
            minutes: round1(totals.minutes_played / n),
            true_shooting_pct: true_shooting_pct(&totals),
            effective_fg_pct: effective_fg_pct(&totals),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_season() {
        assert_eq!(PerGameAverages::from_games(&[]), PerGameAverages::default());
    }

    #[test]
    fn test_averages() {
        let games = [
            StatLine {
                points: 20,
                rebounds: 5,
                field_goals_made: 8,
                field_goals_attempted: 16,
                minutes_played: 30.0,
                ..Default::default()
            },
            StatLine {
                points: 11,
                rebounds: 4,
                field_goals_made: 4,
                field_goals_attempted: 10,
                minutes_played: 25.0,
                ..Default::default()
            },
            StatLine {
                points: 9,
                rebounds: 0,
                field_goals_made: 3,
                field_goals_attempted: 9,
                minutes_played: 20.0,
                ..Default::default()
            },
        ];
        let avg = PerGameAverages::from_games(&games);
        assert_eq!(avg.games, 3);
        assert_eq!(avg.points, 13.3);
        assert_eq!(avg.rebounds, 3.0);
        assert_eq!(avg.minutes, 25.0);
        // 15 / 35 made
        assert_eq!(avg.effective_fg_pct, 42.9);
    }
}
