//! Counting stats as delivered by the backend.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Aggregate counting stats for a player or a team over one or more games.
///
/// Missing fields deserialize as zero, so partially populated backend
/// documents never fail to load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatLine {
    pub points: u32,
    pub rebounds: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
    pub field_goals_made: u32,
    pub field_goals_attempted: u32,
    pub three_pointers_made: u32,
    pub three_pointers_attempted: u32,
    pub free_throws_made: u32,
    pub free_throws_attempted: u32,
    /// Minutes played, fractional
    pub minutes_played: f64,
}

impl StatLine {
    /// Missed field goals (never negative, even on inconsistent input)
    pub fn field_goals_missed(&self) -> u32 {
        self.field_goals_attempted
            .saturating_sub(self.field_goals_made)
    }

    /// Missed free throws
    pub fn free_throws_missed(&self) -> u32 {
        self.free_throws_attempted
            .saturating_sub(self.free_throws_made)
    }

    /// Two-point field goals made
    pub fn two_pointers_made(&self) -> u32 {
        self.field_goals_made
            .saturating_sub(self.three_pointers_made)
    }

    /// Whether the line has no recorded activity at all
    pub fn is_empty(&self) -> bool {
        *self == StatLine::default()
    }

    /// Number of categories (points, rebounds, assists, steals, blocks) in
    /// double figures.
    pub fn double_figure_categories(&self) -> usize {
        [
            self.points,
            self.rebounds,
            self.assists,
            self.steals,
            self.blocks,
        ]
        .iter()
        .filter(|&&v| v >= 10)
        .count()
    }

    pub fn is_double_double(&self) -> bool {
        self.double_figure_categories() >= 2
    }

    pub fn is_triple_double(&self) -> bool {
        self.double_figure_categories() >= 3
    }
}

/// Counters saturate at `u32::MAX` instead of overflowing.
impl AddAssign for StatLine {
    fn add_assign(&mut self, rhs: Self) {
        self.points = self.points.saturating_add(rhs.points);
        self.rebounds = self.rebounds.saturating_add(rhs.rebounds);
        self.offensive_rebounds = self.offensive_rebounds.saturating_add(rhs.offensive_rebounds);
        self.defensive_rebounds = self.defensive_rebounds.saturating_add(rhs.defensive_rebounds);
        self.assists = self.assists.saturating_add(rhs.assists);
        self.steals = self.steals.saturating_add(rhs.steals);
        self.blocks = self.blocks.saturating_add(rhs.blocks);
        self.turnovers = self.turnovers.saturating_add(rhs.turnovers);
        self.fouls = self.fouls.saturating_add(rhs.fouls);
        self.field_goals_made = self.field_goals_made.saturating_add(rhs.field_goals_made);
        self.field_goals_attempted =
            self.field_goals_attempted.saturating_add(rhs.field_goals_attempted);
        self.three_pointers_made = self.three_pointers_made.saturating_add(rhs.three_pointers_made);
        self.three_pointers_attempted =
            self.three_pointers_attempted.saturating_add(rhs.three_pointers_attempted);
        self.free_throws_made = self.free_throws_made.saturating_add(rhs.free_throws_made);
        self.free_throws_attempted =
            self.free_throws_attempted.saturating_add(rhs.free_throws_attempted);
        self.minutes_played += rhs.minutes_played;
    }
}

impl Add for StatLine {
    type Output = StatLine;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl std::iter::Sum for StatLine {
    fn sum<I: Iterator<Item = StatLine>>(iter: I) -> Self {
        iter.fold(StatLine::default(), Add::add)
    }
}

impl<'a> std::iter::Sum<&'a StatLine> for StatLine {
    fn sum<I: Iterator<Item = &'a StatLine>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Per-player, per-game stats plus on-court state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStat {
    pub player_id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub number: Option<u8>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(flatten)]
    pub stats: StatLine,
    #[serde(default)]
    pub plus_minus: i32,
    #[serde(default)]
    pub is_on_court: bool,
    #[serde(default)]
    pub fouled_out: bool,
}

impl PlayerStat {
    /// Create an empty stat record for a player
    pub fn new(player_id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            player_id,
            name: name.into(),
            number: None,
            position: None,
            stats: StatLine::default(),
            plus_minus: 0,
            is_on_court: false,
            fouled_out: false,
        }
    }

    /// Roster label, e.g. "#23 Jordan" or just the name without a number.
    pub fn label(&self) -> String {
        match self.number {
            Some(n) => format!("#{} {}", n, self.name),
            None => self.name.clone(),
        }
    }

    /// Initials for avatar placeholders: first letter of the first and last
    /// word, uppercased.
    pub fn initials(&self) -> String {
        let mut words = self.name.split_whitespace();
        let first = words.next().and_then(|w| w.chars().next());
        let last = words.last().and_then(|w| w.chars().next());
        first
            .into_iter()
            .chain(last)
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Whether the player may be brought onto the court
    pub fn is_available(&self) -> bool {
        !self.fouled_out
    }
}

/// Team totals are the sum of every player's line.
pub fn team_totals<'a>(players: impl IntoIterator<Item = &'a PlayerStat>) -> StatLine {
    players.into_iter().map(|p| &p.stats).sum()
}
