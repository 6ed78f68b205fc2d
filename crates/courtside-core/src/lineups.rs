//! Lineup and pairing tables.
//!
//! The aggregates come from the backend already computed; this module only
//! ranks and filters them for display.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CourtsideError;
use crate::types::{LineupData, LineupEntry, PairData, PlayerId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineupSort {
    #[default]
    Minutes,
    PlusMinus,
    NetRating,
}

impl FromStr for LineupSort {
    type Err = CourtsideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "minutes" => Ok(LineupSort::Minutes),
            "plus_minus" => Ok(LineupSort::PlusMinus),
            "net_rating" => Ok(LineupSort::NetRating),
            other => Err(CourtsideError::Config(format!("unknown lineup sort '{}'", other))),
        }
    }
}

/// Ranking options for the lineup screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineupQuery {
    pub sort: LineupSort,
    /// Hide units that barely played together
    pub min_minutes: f64,
    pub limit: Option<usize>,
    /// Only units including this player
    pub player: Option<PlayerId>,
}

/// Fields both tables rank on
trait Ranked {
    fn minutes(&self) -> f64;
    fn plus_minus(&self) -> i32;
    fn net_rating(&self) -> f64;
    fn includes(&self, player: &PlayerId) -> bool;
}

impl Ranked for LineupEntry {
    fn minutes(&self) -> f64 {
        self.minutes
    }
    fn plus_minus(&self) -> i32 {
        self.plus_minus
    }
    fn net_rating(&self) -> f64 {
        self.net_rating
    }
    fn includes(&self, player: &PlayerId) -> bool {
        self.contains(player)
    }
}

impl Ranked for PairData {
    fn minutes(&self) -> f64 {
        self.minutes
    }
    fn plus_minus(&self) -> i32 {
        self.plus_minus
    }
    fn net_rating(&self) -> f64 {
        self.net_rating
    }
    fn includes(&self, player: &PlayerId) -> bool {
        self.contains(player)
    }
}

fn compare<T: Ranked>(sort: LineupSort, a: &T, b: &T) -> Ordering {
    let primary = match sort {
        LineupSort::Minutes => b.minutes().total_cmp(&a.minutes()),
        LineupSort::PlusMinus => b.plus_minus().cmp(&a.plus_minus()),
        LineupSort::NetRating => b.net_rating().total_cmp(&a.net_rating()),
    };
    primary.then_with(|| b.minutes().total_cmp(&a.minutes()))
}

fn rank<'a, T: Ranked>(items: &'a [T], query: &LineupQuery) -> Vec<&'a T> {
    let mut ranked: Vec<&T> = items
        .iter()
        .filter(|item| item.minutes() >= query.min_minutes)
        .filter(|item| query.player.as_ref().map_or(true, |p| item.includes(p)))
        .collect();
    ranked.sort_by(|a, b| compare(query.sort, *a, *b));
    if let Some(limit) = query.limit {
        ranked.truncate(limit);
    }
    ranked
}

/// Five-player units, best first.
pub fn rank_lineups<'a>(data: &'a LineupData, query: &LineupQuery) -> Vec<&'a LineupEntry> {
    rank(&data.lineups, query)
}

/// Two-player pairs, best first.
pub fn rank_pairs<'a>(data: &'a LineupData, query: &LineupQuery) -> Vec<&'a PairData> {
    rank(&data.pairs, query)
}

/// The pair with the best plus/minus that includes `player`.
pub fn best_partner<'a>(data: &'a LineupData, player: &PlayerId) -> Option<&'a PairData> {
    let query = LineupQuery {
        sort: LineupSort::PlusMinus,
        player: Some(player.clone()),
        limit: Some(1),
        ..Default::default()
    };
    rank_pairs(data, &query).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lineup(ids: [&str; 5], minutes: f64, plus_minus: i32, net_rating: f64) -> LineupEntry {
        LineupEntry {
            players: ids.iter().map(|id| PlayerId::from(*id)).collect(),
            player_names: Vec::new(),
            minutes,
            plus_minus,
            points_for: 0,
            points_against: 0,
            net_rating,
        }
    }

    fn pair(a: &str, b: &str, minutes: f64, plus_minus: i32) -> PairData {
        PairData {
            player1: a.into(),
            player2: b.into(),
            player1_name: String::new(),
            player2_name: String::new(),
            minutes,
            plus_minus,
            net_rating: 0.0,
        }
    }

    fn data() -> LineupData {
        LineupData {
            lineups: vec![
                lineup(["a", "b", "c", "d", "e"], 18.0, 6, 12.5),
                lineup(["a", "b", "c", "d", "f"], 2.5, 9, 40.0),
                lineup(["b", "c", "d", "e", "f"], 11.0, -4, -8.0),
            ],
            pairs: vec![pair("a", "b", 20.0, 3), pair("a", "f", 6.0, 8), pair("c", "d", 25.0, -1)],
        }
    }

    #[test]
    fn test_rank_by_minutes_default() {
        let d = data();
        let ranked = rank_lineups(&d, &LineupQuery::default());
        let minutes: Vec<f64> = ranked.iter().map(|l| l.minutes).collect();
        assert_eq!(minutes, vec![18.0, 11.0, 2.5]);
    }

    #[test]
    fn test_min_minutes_filters_small_samples() {
        let d = data();
        let query = LineupQuery {
            sort: LineupSort::NetRating,
            min_minutes: 5.0,
            ..Default::default()
        };
        let ranked = rank_lineups(&d, &query);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].net_rating, 12.5);
    }

    #[test]
    fn test_player_filter_and_limit() {
        let d = data();
        let query = LineupQuery {
            sort: LineupSort::PlusMinus,
            player: Some("f".into()),
            limit: Some(1),
            ..Default::default()
        };
        let ranked = rank_lineups(&d, &query);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].plus_minus, 9);
    }

    #[test]
    fn test_best_partner() {
        let d = data();
        let best = best_partner(&d, &"a".into()).unwrap();
        assert_eq!(best.partner_of(&"a".into()), Some(&PlayerId::from("f")));
        assert!(best_partner(&d, &"z".into()).is_none());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!("plus-minus".parse::<LineupSort>().unwrap(), LineupSort::PlusMinus);
        assert!("height".parse::<LineupSort>().is_err());
    }
}
