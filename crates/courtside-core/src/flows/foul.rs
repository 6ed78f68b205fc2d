//! Foul-type wizard.
//!
//! ```text
//! FoulType ──shooting──▶ ShotType ──▶ AndOne ──▶ FouledPlayer ──▶ Done
//!     │
//!     └──any other foul──────────────────────────────────────────▶ Done
//! ```
//!
//! Every step accepts `Back`, except the first. The reducer is pure; the
//! view keeps the current [`FoulStep`] and replaces it with the reducer's
//! output.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::free_throw::FreeThrowSequence;
use crate::backend::{DataBackend, FoulRecord, FoulResponse};
use crate::error::{CourtsideError, CourtsideResult};
use crate::types::{GameId, PlayerId};

/// Team fouls in a period at which the opponent shoots a 1-and-1
pub const BONUS_TEAM_FOULS: u32 = 7;
/// Team fouls in a period at which the opponent shoots two
pub const DOUBLE_BONUS_TEAM_FOULS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoulType {
    Personal,
    Shooting,
    Offensive,
    Technical,
    Flagrant1,
    Flagrant2,
}

impl FoulType {
    /// Counts toward the player's personal fouls and the foul-out limit.
    /// Technical fouls do not.
    pub fn is_personal(self) -> bool {
        !matches!(self, FoulType::Technical)
    }

    pub fn label(self) -> &'static str {
        match self {
            FoulType::Personal => "Personal",
            FoulType::Shooting => "Shooting",
            FoulType::Offensive => "Offensive",
            FoulType::Technical => "Technical",
            FoulType::Flagrant1 => "Flagrant 1",
            FoulType::Flagrant2 => "Flagrant 2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotType {
    TwoPoint,
    ThreePoint,
}

/// What the wizard collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoulOutcome {
    pub foul_type: FoulType,
    pub shot_type: Option<ShotType>,
    pub and_one: bool,
    pub fouled_player: Option<PlayerId>,
}

/// Current step of the wizard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum FoulStep {
    #[default]
    FoulType,
    ShotType,
    AndOne { shot_type: ShotType },
    FouledPlayer { shot_type: ShotType, and_one: bool },
    Done(FoulOutcome),
}

/// User input to the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoulEvent {
    SelectFoulType(FoulType),
    SelectShotType(ShotType),
    SetAndOne(bool),
    SelectFouledPlayer(PlayerId),
    Back,
}

impl FoulStep {
    pub fn is_done(&self) -> bool {
        matches!(self, FoulStep::Done(_))
    }

    pub fn outcome(&self) -> Option<&FoulOutcome> {
        match self {
            FoulStep::Done(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Header for the modal
    pub fn title(&self) -> &'static str {
        match self {
            FoulStep::FoulType => "Foul type",
            FoulStep::ShotType => "Shot attempted",
            FoulStep::AndOne { .. } => "Did the shot go in?",
            FoulStep::FouledPlayer { .. } => "Who was fouled?",
            FoulStep::Done(_) => "Foul recorded",
        }
    }
}

/// Advance the wizard by one event.
///
/// Events that make no sense in the current step are rejected and the
/// caller keeps its current step.
pub fn reduce(step: &FoulStep, event: FoulEvent) -> CourtsideResult<FoulStep> {
    let next = match (step, event) {
        (FoulStep::FoulType, FoulEvent::SelectFoulType(FoulType::Shooting)) => FoulStep::ShotType,
        (FoulStep::FoulType, FoulEvent::SelectFoulType(foul_type)) => FoulStep::Done(FoulOutcome {
            foul_type,
            shot_type: None,
            and_one: false,
            fouled_player: None,
        }),
        (FoulStep::ShotType, FoulEvent::SelectShotType(shot_type)) => {
            FoulStep::AndOne { shot_type }
        }
        (FoulStep::ShotType, FoulEvent::Back) => FoulStep::FoulType,
        (FoulStep::AndOne { shot_type }, FoulEvent::SetAndOne(and_one)) => {
            FoulStep::FouledPlayer {
                shot_type: *shot_type,
                and_one,
            }
        }
        (FoulStep::AndOne { .. }, FoulEvent::Back) => FoulStep::ShotType,
        (FoulStep::FouledPlayer { shot_type, and_one }, FoulEvent::SelectFouledPlayer(player)) => {
            FoulStep::Done(FoulOutcome {
                foul_type: FoulType::Shooting,
                shot_type: Some(*shot_type),
                and_one: *and_one,
                fouled_player: Some(player),
            })
        }
        (FoulStep::FouledPlayer { shot_type, .. }, FoulEvent::Back) => FoulStep::AndOne {
            shot_type: *shot_type,
        },
        (FoulStep::Done(outcome), FoulEvent::Back) => match outcome.shot_type {
            Some(shot_type) => FoulStep::FouledPlayer {
                shot_type,
                and_one: outcome.and_one,
            },
            None => FoulStep::FoulType,
        },
        (step, event) => {
            return Err(CourtsideError::InvalidTransition(format!(
                "{:?} is not valid at step \"{}\"",
                event,
                step.title()
            )))
        }
    };
    debug!(from = step.title(), to = next.title(), "Foul wizard step");
    Ok(next)
}

/// Team-foul bonus situation for the period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusState {
    None,
    OneAndOne,
    Double,
}

impl BonusState {
    /// Bonus the opponent is in, given the fouling team's fouls this period
    /// (including the foul being recorded).
    pub fn from_team_fouls(team_fouls: u32) -> Self {
        if team_fouls >= DOUBLE_BONUS_TEAM_FOULS {
            BonusState::Double
        } else if team_fouls >= BONUS_TEAM_FOULS {
            BonusState::OneAndOne
        } else {
            BonusState::None
        }
    }
}

/// Free throws a foul awards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeThrowAward {
    pub attempts: u8,
    pub one_and_one: bool,
}

impl FreeThrowAward {
    pub const NONE: FreeThrowAward = FreeThrowAward {
        attempts: 0,
        one_and_one: false,
    };

    fn shots(attempts: u8) -> Self {
        Self {
            attempts,
            one_and_one: false,
        }
    }

    pub fn is_none(&self) -> bool {
        self.attempts == 0
    }

    /// Start the awarded sequence for `shooter`, if any shots were awarded
    pub fn sequence(&self, game_id: GameId, shooter: PlayerId) -> Option<FreeThrowSequence> {
        if self.is_none() {
            None
        } else if self.one_and_one {
            Some(FreeThrowSequence::one_and_one(game_id, shooter))
        } else {
            FreeThrowSequence::new(game_id, shooter, self.attempts, false).ok()
        }
    }
}

impl FoulOutcome {
    pub fn free_throws(&self, bonus: BonusState) -> FreeThrowAward {
        match self.foul_type {
            FoulType::Shooting if self.and_one => FreeThrowAward::shots(1),
            FoulType::Shooting => match self.shot_type {
                Some(ShotType::ThreePoint) => FreeThrowAward::shots(3),
                _ => FreeThrowAward::shots(2),
            },
            FoulType::Personal => match bonus {
                BonusState::None => FreeThrowAward::NONE,
                BonusState::OneAndOne => FreeThrowAward {
                    attempts: 2,
                    one_and_one: true,
                },
                BonusState::Double => FreeThrowAward::shots(2),
            },
            FoulType::Offensive => FreeThrowAward::NONE,
            FoulType::Technical => FreeThrowAward::shots(1),
            FoulType::Flagrant1 | FoulType::Flagrant2 => FreeThrowAward::shots(2),
        }
    }

    pub fn to_record(&self, game_id: GameId, fouler: PlayerId, bonus: BonusState) -> FoulRecord {
        FoulRecord {
            game_id,
            fouler,
            foul_type: self.foul_type,
            shot_type: self.shot_type,
            and_one: self.and_one,
            fouled_player: self.fouled_player.clone(),
            free_throws_awarded: self.free_throws(bonus).attempts,
        }
    }
}

/// Submit a finished wizard to the backend.
pub async fn submit_foul(
    backend: &dyn DataBackend,
    step: &FoulStep,
    game_id: &GameId,
    fouler: &PlayerId,
    bonus: BonusState,
) -> CourtsideResult<FoulResponse> {
    let outcome = step.outcome().ok_or_else(|| {
        CourtsideError::InvalidTransition(format!("foul wizard not finished: {}", step.title()))
    })?;
    let record = outcome.to_record(game_id.clone(), fouler.clone(), bonus);
    debug!(fouler = %fouler, foul = outcome.foul_type.label(), "Recording foul");
    backend.record_foul(&record).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(events: Vec<FoulEvent>) -> CourtsideResult<FoulStep> {
        events
            .into_iter()
            .try_fold(FoulStep::default(), |step, event| reduce(&step, event))
    }

    #[test]
    fn test_non_shooting_foul_resolves_in_one_step() {
        let step = run(vec![FoulEvent::SelectFoulType(FoulType::Offensive)]).unwrap();
        let outcome = step.outcome().unwrap();
        assert_eq!(outcome.foul_type, FoulType::Offensive);
        assert_eq!(outcome.shot_type, None);
        assert_eq!(outcome.fouled_player, None);
    }

    #[test]
    fn test_shooting_foul_walks_every_step() {
        let step = run(vec![
            FoulEvent::SelectFoulType(FoulType::Shooting),
            FoulEvent::SelectShotType(ShotType::ThreePoint),
            FoulEvent::SetAndOne(false),
            FoulEvent::SelectFouledPlayer(PlayerId::from("shooter")),
        ])
        .unwrap();
        let outcome = step.outcome().unwrap();
        assert_eq!(outcome.shot_type, Some(ShotType::ThreePoint));
        assert_eq!(outcome.fouled_player, Some(PlayerId::from("shooter")));
        assert_eq!(outcome.free_throws(BonusState::None).attempts, 3);
    }

    #[test]
    fn test_back_navigation() {
        let step = run(vec![
            FoulEvent::SelectFoulType(FoulType::Shooting),
            FoulEvent::SelectShotType(ShotType::TwoPoint),
            FoulEvent::SetAndOne(true),
        ])
        .unwrap();
        assert_eq!(
            step,
            FoulStep::FouledPlayer {
                shot_type: ShotType::TwoPoint,
                and_one: true
            }
        );
        let step = reduce(&step, FoulEvent::Back).unwrap();
        assert_eq!(
            step,
            FoulStep::AndOne {
                shot_type: ShotType::TwoPoint
            }
        );
        let step = reduce(&step, FoulEvent::Back).unwrap();
        assert_eq!(step, FoulStep::ShotType);
        let step = reduce(&step, FoulEvent::Back).unwrap();
        assert_eq!(step, FoulStep::FoulType);
    }

    #[test]
    fn test_back_from_done() {
        let done = run(vec![FoulEvent::SelectFoulType(FoulType::Technical)]).unwrap();
        assert_eq!(reduce(&done, FoulEvent::Back).unwrap(), FoulStep::FoulType);
    }

    #[test]
    fn test_invalid_events_are_rejected() {
        assert!(reduce(&FoulStep::FoulType, FoulEvent::Back).is_err());
        assert!(reduce(&FoulStep::FoulType, FoulEvent::SetAndOne(true)).is_err());
        assert!(
            reduce(&FoulStep::ShotType, FoulEvent::SelectFoulType(FoulType::Personal)).is_err()
        );
    }

    #[test]
    fn test_free_throw_awards() {
        let personal = FoulOutcome {
            foul_type: FoulType::Personal,
            shot_type: None,
            and_one: false,
            fouled_player: None,
        };
        assert!(personal.free_throws(BonusState::None).is_none());
        assert_eq!(
            personal.free_throws(BonusState::OneAndOne),
            FreeThrowAward {
                attempts: 2,
                one_and_one: true
            }
        );
        assert_eq!(personal.free_throws(BonusState::Double).attempts, 2);

        let and_one = FoulOutcome {
            foul_type: FoulType::Shooting,
            shot_type: Some(ShotType::ThreePoint),
            and_one: true,
            fouled_player: Some(PlayerId::from("p")),
        };
        assert_eq!(and_one.free_throws(BonusState::Double).attempts, 1);
    }

    #[test]
    fn test_bonus_thresholds() {
        assert_eq!(BonusState::from_team_fouls(6), BonusState::None);
        assert_eq!(BonusState::from_team_fouls(7), BonusState::OneAndOne);
        assert_eq!(BonusState::from_team_fouls(9), BonusState::OneAndOne);
        assert_eq!(BonusState::from_team_fouls(10), BonusState::Double);
    }

    #[test]
    fn test_award_starts_sequence() {
        let award = FreeThrowAward {
            attempts: 2,
            one_and_one: true,
        };
        let seq = award
            .sequence(GameId::from("g"), PlayerId::from("p"))
            .unwrap();
        assert!(seq.is_one_and_one());
        assert!(FreeThrowAward::NONE
            .sequence(GameId::from("g"), PlayerId::from("p"))
            .is_none());
    }
}
