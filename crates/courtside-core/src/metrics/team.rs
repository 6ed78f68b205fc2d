//! Team-level metrics that need the opponent's line.

use serde::{Deserialize, Serialize};

use super::{
    defensive_rebound_pct, effective_fg_pct, estimated_possessions, free_throw_rate,
    offensive_rebound_pct, rating, round1, turnover_rate,
};
use crate::types::StatLine;

/// Dean Oliver's four factors for one side of a game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FourFactors {
    pub effective_fg_pct: f64,
    pub turnover_rate: f64,
    pub offensive_rebound_pct: f64,
    pub free_throw_rate: f64,
}

impl FourFactors {
    pub fn compute(team: &StatLine, opponent: &StatLine) -> Self {
        Self {
            effective_fg_pct: effective_fg_pct(team),
            turnover_rate: turnover_rate(team),
            offensive_rebound_pct: offensive_rebound_pct(team, opponent),
            free_throw_rate: free_throw_rate(team),
        }
    }
}

/// Both teams' factors plus pace-adjusted ratings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamComparison {
    pub team: FourFactors,
    pub opponent: FourFactors,
    pub possessions: f64,
    pub opponent_possessions: f64,
    pub offensive_rating: f64,
    pub defensive_rating: f64,
    pub net_rating: f64,
    pub defensive_rebound_pct: f64,
}

impl TeamComparison {
    pub fn new(team: &StatLine, opponent: &StatLine) -> Self {
        let possessions = estimated_possessions(team);
        let offensive_rating = rating(team.points, possessions);
        let defensive_rating = rating(opponent.points, possessions);
        Self {
            team: FourFactors::compute(team, opponent),
            opponent: FourFactors::compute(opponent, team),
            possessions,
            opponent_possessions: estimated_possessions(opponent),
            offensive_rating,
            defensive_rating,
            net_rating: round1(offensive_rating - defensive_rating),
            defensive_rebound_pct: defensive_rebound_pct(team, opponent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team_line() -> StatLine {
        StatLine {
            points: 80,
            field_goals_made: 30,
            field_goals_attempted: 65,
            three_pointers_made: 8,
            offensive_rebounds: 10,
            defensive_rebounds: 25,
            turnovers: 12,
            free_throws_attempted: 20,
            ..Default::default()
        }
    }

    fn opponent_line() -> StatLine {
        StatLine {
            points: 72,
            field_goals_made: 27,
            field_goals_attempted: 62,
            three_pointers_made: 6,
            offensive_rebounds: 9,
            defensive_rebounds: 30,
            turnovers: 15,
            free_throws_attempted: 14,
            ..Default::default()
        }
    }

    #[test]
    fn test_four_factors() {
        let f = FourFactors::compute(&team_line(), &opponent_line());
        // (30 + 4) / 65
        assert_eq!(f.effective_fg_pct, 52.3);
        // 12 / (65 + 8.8 + 12)
        assert_eq!(f.turnover_rate, 14.0);
        // 10 / (10 + 30)
        assert_eq!(f.offensive_rebound_pct, 25.0);
        assert_eq!(f.free_throw_rate, 30.8);
    }

    #[test]
    fn test_comparison_ratings() {
        let c = TeamComparison::new(&team_line(), &opponent_line());
        assert_eq!(c.possessions, 75.8);
        assert_eq!(c.offensive_rating, 105.5);
        assert_eq!(c.defensive_rating, 95.0);
        assert_eq!(c.net_rating, 10.5);
        // 25 / (25 + 9)
        assert_eq!(c.defensive_rebound_pct, 73.5);
    }

    #[test]
    fn test_empty_lines_are_all_zero() {
        let c = TeamComparison::new(&StatLine::default(), &StatLine::default());
        assert_eq!(c.possessions, 0.0);
        assert_eq!(c.net_rating, 0.0);
        assert_eq!(c.team.turnover_rate, 0.0);
    }
}
