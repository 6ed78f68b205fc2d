//! Free-throw sequence.
//!
//! A sequence is 1 to 3 attempts by one shooter. Each attempt is recorded
//! with the backend, whose `sequenceContinues` answer decides whether the
//! next attempt is shot. A 1-and-1 ends on a miss of the first attempt no
//! matter what the backend says.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::backend::{DataBackend, FreeThrowAttempt, FreeThrowResponse};
use crate::error::{CourtsideError, CourtsideResult};
use crate::types::{GameId, PlayerId};

pub const MAX_FREE_THROWS: u8 = 3;

/// Where a sequence stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum FreeThrowState {
    /// Waiting for the result of attempt `current_attempt` (1-based)
    Shooting { current_attempt: u8 },
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeThrowSequence {
    game_id: GameId,
    shooter: PlayerId,
    total_attempts: u8,
    is_one_and_one: bool,
    state: FreeThrowState,
    results: Vec<bool>,
}

impl FreeThrowSequence {
    pub fn new(
        game_id: GameId,
        shooter: PlayerId,
        total_attempts: u8,
        is_one_and_one: bool,
    ) -> CourtsideResult<Self> {
        if total_attempts == 0 || total_attempts > MAX_FREE_THROWS {
            return Err(CourtsideError::InvalidTransition(format!(
                "a free-throw sequence has 1 to {} attempts, got {}",
                MAX_FREE_THROWS, total_attempts
            )));
        }
        Ok(Self {
            game_id,
            shooter,
            total_attempts,
            is_one_and_one,
            state: FreeThrowState::Shooting { current_attempt: 1 },
            results: Vec::with_capacity(usize::from(total_attempts)),
        })
    }

    /// A bonus 1-and-1: up to two attempts, the second only after a make.
    pub fn one_and_one(game_id: GameId, shooter: PlayerId) -> Self {
        Self {
            game_id,
            shooter,
            total_attempts: 2,
            is_one_and_one: true,
            state: FreeThrowState::Shooting { current_attempt: 1 },
            results: Vec::with_capacity(2),
        }
    }

    pub fn state(&self) -> FreeThrowState {
        self.state
    }

    pub fn shooter(&self) -> &PlayerId {
        &self.shooter
    }

    pub fn total_attempts(&self) -> u8 {
        self.total_attempts
    }

    pub fn is_one_and_one(&self) -> bool {
        self.is_one_and_one
    }

    pub fn current_attempt(&self) -> Option<u8> {
        match self.state {
            FreeThrowState::Shooting { current_attempt } => Some(current_attempt),
            FreeThrowState::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == FreeThrowState::Complete
    }

    /// Results of the attempts taken so far, in order
    pub fn results(&self) -> &[bool] {
        &self.results
    }

    pub fn attempts_taken(&self) -> usize {
        self.results.len()
    }

    pub fn made_count(&self) -> usize {
        self.results.iter().filter(|&&made| made).count()
    }

    /// Points scored in this sequence so far
    pub fn points(&self) -> u32 {
        self.made_count() as u32
    }

    /// "Free throw 1 of 2", or "1-and-1" for the front end of a bonus.
    pub fn prompt(&self) -> String {
        match self.state {
            FreeThrowState::Shooting { current_attempt: 1 } if self.is_one_and_one => {
                "1-and-1".to_string()
            }
            FreeThrowState::Shooting { current_attempt } => {
                format!("Free throw {} of {}", current_attempt, self.total_attempts)
            }
            FreeThrowState::Complete => {
                format!("{} of {} made", self.made_count(), self.attempts_taken())
            }
        }
    }

    /// Request for recording the current attempt
    pub fn attempt(&self, made: bool) -> CourtsideResult<FreeThrowAttempt> {
        let attempt_number = self.current_attempt().ok_or_else(|| {
            CourtsideError::InvalidTransition("free-throw sequence is complete".to_string())
        })?;
        Ok(FreeThrowAttempt {
            game_id: self.game_id.clone(),
            shooter: self.shooter.clone(),
            made,
            attempt_number,
            total_attempts: self.total_attempts,
            is_one_and_one: self.is_one_and_one,
        })
    }

    /// Apply the result of the current attempt and the backend's answer.
    pub fn apply(
        &mut self,
        made: bool,
        response: FreeThrowResponse,
    ) -> CourtsideResult<FreeThrowState> {
        let current = self.current_attempt().ok_or_else(|| {
            CourtsideError::InvalidTransition("free-throw sequence is complete".to_string())
        })?;
        self.results.push(made);

        let missed_front_end = self.is_one_and_one && current == 1 && !made;
        self.state = if missed_front_end
            || current >= self.total_attempts
            || !response.sequence_continues
        {
            FreeThrowState::Complete
        } else {
            FreeThrowState::Shooting {
                current_attempt: current + 1,
            }
        };
        Ok(self.state)
    }
}

/// Record the current attempt with the backend and advance the sequence.
///
/// On a backend error the sequence is left untouched so the attempt can be
/// entered again.
pub async fn record_free_throw(
    backend: &dyn DataBackend,
    sequence: &mut FreeThrowSequence,
    made: bool,
) -> CourtsideResult<FreeThrowState> {
    let attempt = sequence.attempt(made)?;
    debug!(
        shooter = %attempt.shooter,
        attempt = attempt.attempt_number,
        total = attempt.total_attempts,
        made,
        "Recording free throw"
    );
    let response = backend.record_free_throw(&attempt).await?;
    let state = sequence.apply(made, response)?;
    if state == FreeThrowState::Complete {
        info!(
            shooter = %sequence.shooter,
            made = sequence.made_count(),
            taken = sequence.attempts_taken(),
            "Free-throw sequence complete"
        );
    }
    Ok(state)
}
