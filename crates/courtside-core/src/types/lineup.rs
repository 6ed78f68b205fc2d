//! Lineup and pairing aggregates, computed upstream and only displayed here.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// A five-player unit and how it performed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupEntry {
    pub players: Vec<PlayerId>,
    #[serde(default)]
    pub player_names: Vec<String>,
    pub minutes: f64,
    pub plus_minus: i32,
    #[serde(default)]
    pub points_for: u32,
    #[serde(default)]
    pub points_against: u32,
    #[serde(default)]
    pub net_rating: f64,
}

/// A two-player pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairData {
    pub player1: PlayerId,
    pub player2: PlayerId,
    #[serde(default)]
    pub player1_name: String,
    #[serde(default)]
    pub player2_name: String,
    pub minutes: f64,
    pub plus_minus: i32,
    #[serde(default)]
    pub net_rating: f64,
}

/// Everything the lineup screen shows for one team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupData {
    #[serde(default)]
    pub lineups: Vec<LineupEntry>,
    #[serde(default)]
    pub pairs: Vec<PairData>,
}

impl LineupEntry {
    /// Names joined for a list row, falling back to ids.
    pub fn display_names(&self) -> String {
        if self.player_names.is_empty() {
            self.players
                .iter()
                .map(PlayerId::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            self.player_names.join(", ")
        }
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.players.contains(player)
    }
}

impl PairData {
    pub fn contains(&self, player: &PlayerId) -> bool {
        &self.player1 == player || &self.player2 == player
    }

    /// The other half of the pair, if `player` is in it.
    pub fn partner_of(&self, player: &PlayerId) -> Option<&PlayerId> {
        if &self.player1 == player {
            Some(&self.player2)
        } else if &self.player2 == player {
            Some(&self.player1)
        } else {
            None
        }
    }
}
