//! Boundary to the data backend.
//!
//! The backend owns every record: game state, player stats, notifications.
//! The client reads through queries and writes through mutations, each of
//! which is a single awaited call with no retry. Responses are small objects
//! the flows branch on (see [`FreeThrowResponse`]).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Views (out of scope)                                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Flows: free throw, foul wizard, substitution (pure state)   │
//! │  Controllers: apply backend responses to flow state          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  DataBackend trait (this module)                             │
//! │  - MemoryBackend: recording in-memory implementation         │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CourtsideError, CourtsideResult};
use crate::flows::foul::{FoulType, ShotType};
use crate::inbox::NotificationPreferences;
use crate::types::{
    GameData, GameId, GameStatus, LineupData, Notification, NotificationId, PlayerId,
    PlayerStat, ShotLocation, StorageId, TeamId,
};

pub use memory::{BackendCall, MemoryBackend};

/// One free-throw attempt as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeThrowAttempt {
    pub game_id: GameId,
    pub shooter: PlayerId,
    pub made: bool,
    /// 1-based
    pub attempt_number: u8,
    pub total_attempts: u8,
    pub is_one_and_one: bool,
}

/// Backend verdict after a free throw is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeThrowResponse {
    pub sequence_continues: bool,
}

/// A completed foul, as produced by the foul wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoulRecord {
    pub game_id: GameId,
    pub fouler: PlayerId,
    pub foul_type: FoulType,
    #[serde(default)]
    pub shot_type: Option<ShotType>,
    #[serde(default)]
    pub and_one: bool,
    #[serde(default)]
    pub fouled_player: Option<PlayerId>,
    pub free_throws_awarded: u8,
}

/// Backend verdict after a foul is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoulResponse {
    pub player_fouls: u32,
    pub fouled_out: bool,
}

/// Profile fields a user can edit. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_team: Option<TeamId>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.email.is_none() && self.favorite_team.is_none()
    }
}

/// Record an uploaded image gets associated with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ImageTarget {
    Team(TeamId),
    Player(PlayerId),
    Profile,
}

/// Typed client of the data backend.
#[async_trait]
pub trait DataBackend: Send + Sync {
    // ---- Queries ----

    async fn game(&self, game_id: &GameId) -> CourtsideResult<GameData>;

    async fn player_stats(&self, game_id: &GameId) -> CourtsideResult<Vec<PlayerStat>>;

    async fn shots(&self, game_id: &GameId) -> CourtsideResult<Vec<ShotLocation>>;

    async fn lineups(&self, team_id: &TeamId) -> CourtsideResult<LineupData>;

    async fn notifications(&self) -> CourtsideResult<Vec<Notification>>;

    // ---- Mutations ----

    async fn record_free_throw(
        &self,
        attempt: &FreeThrowAttempt,
    ) -> CourtsideResult<FreeThrowResponse>;

    async fn record_foul(&self, foul: &FoulRecord) -> CourtsideResult<FoulResponse>;

    /// Field-goal attempt placed on the court diagram
    async fn record_shot(&self, game_id: &GameId, shot: &ShotLocation) -> CourtsideResult<()>;

    /// Replace `out` on the court with `incoming`
    async fn swap_players(
        &self,
        game_id: &GameId,
        out: &PlayerId,
        incoming: &PlayerId,
    ) -> CourtsideResult<()>;

    /// Put a bench player into an open court slot
    async fn add_to_court(&self, game_id: &GameId, player: &PlayerId) -> CourtsideResult<()>;

    async fn set_game_status(
        &self,
        game_id: &GameId,
        status: GameStatus,
    ) -> CourtsideResult<GameData>;

    async fn mark_notification_read(&self, id: &NotificationId) -> CourtsideResult<()>;

    async fn mark_all_notifications_read(&self) -> CourtsideResult<()>;

    async fn update_notification_preferences(
        &self,
        preferences: &NotificationPreferences,
    ) -> CourtsideResult<()>;

    /// Short-lived URL the image bytes are posted to
    async fn generate_upload_url(&self) -> CourtsideResult<String>;

    async fn update_profile(&self, update: &ProfileUpdate) -> CourtsideResult<()>;

    async fn attach_image(&self, target: &ImageTarget, storage_id: &StorageId)
        -> CourtsideResult<()>;
}

/// Ask the backend to move a game to `next`.
///
/// Obviously invalid transitions are refused locally; the backend still has
/// the final word and its answer replaces the local copy.
pub async fn request_status_change(
    backend: &dyn DataBackend,
    current: &GameData,
    next: GameStatus,
) -> CourtsideResult<GameData> {
    if !current.status.can_transition_to(next) {
        warn!(
            game = %current.game_id,
            from = %current.status,
            to = %next,
            "Refusing status change"
        );
        return Err(CourtsideError::InvalidTransition(format!(
            "game cannot go from {} to {}",
            current.status, next
        )));
    }
    debug!(game = %current.game_id, from = %current.status, to = %next, "Requesting status change");
    backend.set_game_status(&current.game_id, next).await
}
