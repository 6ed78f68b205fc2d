//! In-memory [`DataBackend`] that records every mutation.
//!
//! Used by tests and the CLI. It applies mutations to its own copies of the
//! records the way the real backend would (on-court flags, foul counts,
//! game status), so follow-up queries see the effect.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use super::{
    DataBackend, FoulRecord, FoulResponse, FreeThrowAttempt, FreeThrowResponse, ImageTarget,
    ProfileUpdate,
};
use crate::error::{CourtsideError, CourtsideResult};
use crate::inbox::NotificationPreferences;
use crate::types::{
    GameData, GameId, GameStatus, LineupData, Notification, NotificationId, PlayerId,
    PlayerStat, ShotLocation, StorageId, TeamId,
};

/// Personal fouls that disqualify a player
pub const FOUL_OUT_LIMIT: u32 = 5;

/// A mutation as received by the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    RecordFreeThrow(FreeThrowAttempt),
    RecordFoul(FoulRecord),
    RecordShot {
        game_id: GameId,
        shot: ShotLocation,
    },
    SwapPlayers {
        game_id: GameId,
        out: PlayerId,
        incoming: PlayerId,
    },
    AddToCourt {
        game_id: GameId,
        player: PlayerId,
    },
    SetGameStatus {
        game_id: GameId,
        status: GameStatus,
    },
    MarkNotificationRead(NotificationId),
    MarkAllNotificationsRead,
    UpdateNotificationPreferences(NotificationPreferences),
    GenerateUploadUrl,
    UpdateProfile(ProfileUpdate),
    AttachImage {
        target: ImageTarget,
        storage_id: StorageId,
    },
}

#[derive(Default)]
struct State {
    games: HashMap<GameId, GameData>,
    stats: HashMap<GameId, Vec<PlayerStat>>,
    shots: HashMap<GameId, Vec<ShotLocation>>,
    lineups: HashMap<TeamId, LineupData>,
    notifications: Vec<Notification>,
    preferences: NotificationPreferences,
    profile: ProfileUpdate,
    images: Vec<(ImageTarget, StorageId)>,
    scripted_free_throws: VecDeque<bool>,
    fail_next: Option<String>,
    calls: Vec<BackendCall>,
    upload_url: String,
}

/// Recording in-memory backend.
pub struct MemoryBackend {
    state: Mutex<State>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                upload_url: "https://uploads.invalid/upload".to_string(),
                ..Default::default()
            }),
        }
    }

    pub fn insert_game(&self, game: GameData) {
        let mut state = self.state.lock();
        state.games.insert(game.game_id.clone(), game);
    }

    pub fn insert_player_stats(&self, game_id: GameId, stats: Vec<PlayerStat>) {
        self.state.lock().stats.insert(game_id, stats);
    }

    pub fn insert_shots(&self, game_id: GameId, shots: Vec<ShotLocation>) {
        self.state.lock().shots.insert(game_id, shots);
    }

    pub fn insert_lineups(&self, team_id: TeamId, lineups: LineupData) {
        self.state.lock().lineups.insert(team_id, lineups);
    }

    pub fn push_notification(&self, notification: Notification) {
        self.state.lock().notifications.push(notification);
    }

    pub fn set_upload_url(&self, url: impl Into<String>) {
        self.state.lock().upload_url = url.into();
    }

    /// Queue `sequenceContinues` answers for upcoming free throws. Without a
    /// scripted answer the backend continues until the last attempt.
    pub fn script_free_throw_responses(&self, responses: impl IntoIterator<Item = bool>) {
        self.state.lock().scripted_free_throws.extend(responses);
    }

    /// Make the next mutation fail with a backend error carrying `message`
    pub fn fail_next(&self, message: impl Into<String>) {
        self.state.lock().fail_next = Some(message.into());
    }

    /// Mutations received so far, oldest first
    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.lock().calls.clone()
    }

    pub fn preferences(&self) -> NotificationPreferences {
        self.state.lock().preferences.clone()
    }

    pub fn profile(&self) -> ProfileUpdate {
        self.state.lock().profile.clone()
    }

    pub fn images(&self) -> Vec<(ImageTarget, StorageId)> {
        self.state.lock().images.clone()
    }

    /// Start a mutation: consume a pending failure, otherwise record the call.
    fn begin(state: &mut State, call: BackendCall) -> CourtsideResult<()> {
        if let Some(message) = state.fail_next.take() {
            debug!(?call, "Injected backend failure");
            return Err(CourtsideError::Backend(message));
        }
        state.calls.push(call);
        Ok(())
    }

    fn player_mut<'a>(
        state: &'a mut State,
        game_id: &GameId,
        player: &PlayerId,
    ) -> CourtsideResult<&'a mut PlayerStat> {
        state
            .stats
            .get_mut(game_id)
            .and_then(|players| players.iter_mut().find(|p| &p.player_id == player))
            .ok_or_else(|| CourtsideError::NotFound(format!("player {}", player)))
    }
}

#[async_trait]
impl DataBackend for MemoryBackend {
    async fn game(&self, game_id: &GameId) -> CourtsideResult<GameData> {
        self.state
            .lock()
            .games
            .get(game_id)
            .cloned()
            .ok_or_else(|| CourtsideError::NotFound(format!("game {}", game_id)))
    }

    async fn player_stats(&self, game_id: &GameId) -> CourtsideResult<Vec<PlayerStat>> {
        Ok(self
            .state
            .lock()
            .stats
            .get(game_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn shots(&self, game_id: &GameId) -> CourtsideResult<Vec<ShotLocation>> {
        Ok(self
            .state
            .lock()
            .shots
            .get(game_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn lineups(&self, team_id: &TeamId) -> CourtsideResult<LineupData> {
        Ok(self
            .state
            .lock()
            .lineups
            .get(team_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn notifications(&self) -> CourtsideResult<Vec<Notification>> {
        Ok(self.state.lock().notifications.clone())
    }

    async fn record_free_throw(
        &self,
        attempt: &FreeThrowAttempt,
    ) -> CourtsideResult<FreeThrowResponse> {
        let mut state = self.state.lock();
        Self::begin(&mut state, BackendCall::RecordFreeThrow(attempt.clone()))?;

        if let Ok(player) = Self::player_mut(&mut state, &attempt.game_id, &attempt.shooter) {
            player.stats.free_throws_attempted =
                player.stats.free_throws_attempted.saturating_add(1);
            if attempt.made {
                player.stats.free_throws_made = player.stats.free_throws_made.saturating_add(1);
                player.stats.points = player.stats.points.saturating_add(1);
            }
        }

        let default_continues = attempt.attempt_number < attempt.total_attempts
            && !(attempt.is_one_and_one && attempt.attempt_number == 1 && !attempt.made);
        let sequence_continues = state
            .scripted_free_throws
            .pop_front()
            .unwrap_or(default_continues);
        Ok(FreeThrowResponse { sequence_continues })
    }

    async fn record_foul(&self, foul: &FoulRecord) -> CourtsideResult<FoulResponse> {
        let mut state = self.state.lock();
        Self::player_mut(&mut state, &foul.game_id, &foul.fouler)?;
        Self::begin(&mut state, BackendCall::RecordFoul(foul.clone()))?;

        let player = Self::player_mut(&mut state, &foul.game_id, &foul.fouler)?;
        if foul.foul_type.is_personal() {
            player.stats.fouls = player.stats.fouls.saturating_add(1);
            if player.stats.fouls >= FOUL_OUT_LIMIT {
                player.fouled_out = true;
            }
        }
        Ok(FoulResponse {
            player_fouls: player.stats.fouls,
            fouled_out: player.fouled_out,
        })
    }

    async fn record_shot(&self, game_id: &GameId, shot: &ShotLocation) -> CourtsideResult<()> {
        let mut state = self.state.lock();
        Self::begin(
            &mut state,
            BackendCall::RecordShot {
                game_id: game_id.clone(),
                shot: shot.clone(),
            },
        )?;

        if let Some(shooter) = &shot.player_id {
            if let Ok(player) = Self::player_mut(&mut state, game_id, shooter) {
                let line = &mut player.stats;
                line.field_goals_attempted = line.field_goals_attempted.saturating_add(1);
                if shot.is_three {
                    line.three_pointers_attempted = line.three_pointers_attempted.saturating_add(1);
                }
                if shot.made {
                    line.field_goals_made = line.field_goals_made.saturating_add(1);
                    line.points = line.points.saturating_add(shot.value());
                    if shot.is_three {
                        line.three_pointers_made = line.three_pointers_made.saturating_add(1);
                    }
                }
            }
        }
        state
            .shots
            .entry(game_id.clone())
            .or_default()
            .push(shot.clone());
        Ok(())
    }

    async fn swap_players(
        &self,
        game_id: &GameId,
        out: &PlayerId,
        incoming: &PlayerId,
    ) -> CourtsideResult<()> {
        let mut state = self.state.lock();
        Self::begin(
            &mut state,
            BackendCall::SwapPlayers {
                game_id: game_id.clone(),
                out: out.clone(),
                incoming: incoming.clone(),
            },
        )?;
        if let Ok(p) = Self::player_mut(&mut state, game_id, out) {
            p.is_on_court = false;
        }
        if let Ok(p) = Self::player_mut(&mut state, game_id, incoming) {
            p.is_on_court = true;
        }
        Ok(())
    }

    async fn add_to_court(&self, game_id: &GameId, player: &PlayerId) -> CourtsideResult<()> {
        let mut state = self.state.lock();
        Self::begin(
            &mut state,
            BackendCall::AddToCourt {
                game_id: game_id.clone(),
                player: player.clone(),
            },
        )?;
        if let Ok(p) = Self::player_mut(&mut state, game_id, player) {
            p.is_on_court = true;
        }
        Ok(())
    }

    async fn set_game_status(
        &self,
        game_id: &GameId,
        status: GameStatus,
    ) -> CourtsideResult<GameData> {
        let mut state = self.state.lock();
        let current = state
            .games
            .get(game_id)
            .map(|g| g.status)
            .ok_or_else(|| CourtsideError::NotFound(format!("game {}", game_id)))?;
        if !current.can_transition_to(status) {
            return Err(CourtsideError::Backend(format!(
                "Cannot change game from {} to {}",
                current, status
            )));
        }
        Self::begin(
            &mut state,
            BackendCall::SetGameStatus {
                game_id: game_id.clone(),
                status,
            },
        )?;
        let game = state
            .games
            .get_mut(game_id)
            .ok_or_else(|| CourtsideError::NotFound(format!("game {}", game_id)))?;
        game.status = status;
        Ok(game.clone())
    }

    async fn mark_notification_read(&self, id: &NotificationId) -> CourtsideResult<()> {
        let mut state = self.state.lock();
        Self::begin(&mut state, BackendCall::MarkNotificationRead(id.clone()))?;
        if let Some(n) = state.notifications.iter_mut().find(|n| &n.id == id) {
            n.read = true;
        }
        Ok(())
    }

    async fn mark_all_notifications_read(&self) -> CourtsideResult<()> {
        let mut state = self.state.lock();
        Self::begin(&mut state, BackendCall::MarkAllNotificationsRead)?;
        for n in state.notifications.iter_mut() {
            n.read = true;
        }
        Ok(())
    }

    async fn update_notification_preferences(
        &self,
        preferences: &NotificationPreferences,
    ) -> CourtsideResult<()> {
        let mut state = self.state.lock();
        Self::begin(
            &mut state,
            BackendCall::UpdateNotificationPreferences(preferences.clone()),
        )?;
        state.preferences = preferences.clone();
        Ok(())
    }

    async fn generate_upload_url(&self) -> CourtsideResult<String> {
        let mut state = self.state.lock();
        Self::begin(&mut state, BackendCall::GenerateUploadUrl)?;
        Ok(state.upload_url.clone())
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> CourtsideResult<()> {
        let mut state = self.state.lock();
        Self::begin(&mut state, BackendCall::UpdateProfile(update.clone()))?;
        if let Some(name) = &update.display_name {
            state.profile.display_name = Some(name.clone());
        }
        if let Some(email) = &update.email {
            state.profile.email = Some(email.clone());
        }
        if let Some(team) = &update.favorite_team {
            state.profile.favorite_team = Some(team.clone());
        }
        Ok(())
    }

    async fn attach_image(
        &self,
        target: &ImageTarget,
        storage_id: &StorageId,
    ) -> CourtsideResult<()> {
        let mut state = self.state.lock();
        Self::begin(
            &mut state,
            BackendCall::AttachImage {
                target: target.clone(),
                storage_id: storage_id.clone(),
            },
        )?;
        state.images.push((target.clone(), storage_id.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::foul::FoulType;

    fn roster(game_id: &GameId) -> (MemoryBackend, PlayerId) {
        let backend = MemoryBackend::new();
        let player = PlayerStat::new(PlayerId::from("p1"), "Ava");
        backend.insert_player_stats(game_id.clone(), vec![player]);
        (backend, PlayerId::from("p1"))
    }

    #[tokio::test]
    async fn test_free_throw_updates_stats() {
        let game = GameId::from("g1");
        let (backend, shooter) = roster(&game);
        let attempt = FreeThrowAttempt {
            game_id: game.clone(),
            shooter,
            made: true,
            attempt_number: 1,
            total_attempts: 2,
            is_one_and_one: false,
        };
        let response = backend.record_free_throw(&attempt).await.unwrap();
        assert!(response.sequence_continues);

        let stats = backend.player_stats(&game).await.unwrap();
        assert_eq!(stats[0].stats.free_throws_made, 1);
        assert_eq!(stats[0].stats.points, 1);
    }

    #[tokio::test]
    async fn test_fifth_foul_fouls_out() {
        let game = GameId::from("g1");
        let (backend, fouler) = roster(&game);
        let foul = FoulRecord {
            game_id: game.clone(),
            fouler,
            foul_type: FoulType::Personal,
            shot_type: None,
            and_one: false,
            fouled_player: None,
            free_throws_awarded: 0,
        };
        for _ in 0..4 {
            assert!(!backend.record_foul(&foul).await.unwrap().fouled_out);
        }
        let fifth = backend.record_foul(&foul).await.unwrap();
        assert_eq!(fifth.player_fouls, 5);
        assert!(fifth.fouled_out);
    }

    #[tokio::test]
    async fn test_technical_fouls_do_not_foul_out() {
        let game = GameId::from("g1");
        let (backend, fouler) = roster(&game);
        let technical = FoulRecord {
            game_id: game.clone(),
            fouler,
            foul_type: FoulType::Technical,
            shot_type: None,
            and_one: false,
            fouled_player: None,
            free_throws_awarded: 1,
        };
        for _ in 0..FOUL_OUT_LIMIT {
            let response = backend.record_foul(&technical).await.unwrap();
            assert_eq!(response.player_fouls, 0);
            assert!(!response.fouled_out);
        }
        assert_eq!(backend.calls().len(), FOUL_OUT_LIMIT as usize);
    }

    #[tokio::test]
    async fn test_foul_by_unknown_player_is_not_recorded() {
        let game = GameId::from("g1");
        let (backend, _) = roster(&game);
        let foul = FoulRecord {
            game_id: game,
            fouler: PlayerId::from("nobody"),
            foul_type: FoulType::Personal,
            shot_type: None,
            and_one: false,
            fouled_player: None,
            free_throws_awarded: 0,
        };
        let err = backend.record_foul(&foul).await.unwrap_err();
        assert!(matches!(err, CourtsideError::NotFound(_)));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_injected_failure_is_not_recorded() {
        let backend = MemoryBackend::new();
        backend.fail_next("Upload quota exceeded");
        let err = backend.generate_upload_url().await.unwrap_err();
        assert_eq!(err.user_message(), "Upload quota exceeded");
        assert!(backend.calls().is_empty());

        // Only the next call fails
        assert!(backend.generate_upload_url().await.is_ok());
        assert_eq!(backend.calls(), vec![BackendCall::GenerateUploadUrl]);
    }

    #[tokio::test]
    async fn test_backend_rejects_invalid_status_change() {
        let backend = MemoryBackend::new();
        let game_id = GameId::from("g1");
        backend.insert_game(GameData::new(game_id.clone(), "H", "A"));
        let err = backend
            .set_game_status(&game_id, GameStatus::Paused)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Cannot change game from scheduled to paused");
    }

    #[tokio::test]
    async fn test_unknown_game_is_not_found() {
        let backend = MemoryBackend::new();
        let err = backend.game(&GameId::from("nope")).await.unwrap_err();
        assert!(matches!(err, CourtsideError::NotFound(_)));
    }
}
