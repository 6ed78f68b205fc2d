//! Court-tap shot recording.
//!
//! The scorer taps a spot on the court diagram, optionally corrects the
//! three-point flag, then marks the attempt made or missed. The spot stays
//! pending until the backend accepts the shot, so a failed call can be
//! retried without tapping again.

use tracing::info;

use crate::backend::DataBackend;
use crate::error::{CourtsideError, CourtsideResult};
use crate::types::shot::is_three_point_spot;
use crate::types::{GameId, PlayerId, ShotLocation};

#[derive(Debug, Clone, PartialEq)]
pub struct ShotEntry {
    shooter: PlayerId,
    quarter: u8,
    spot: Option<ShotLocation>,
}

impl ShotEntry {
    pub fn new(shooter: PlayerId, quarter: u8) -> Self {
        Self {
            shooter,
            quarter,
            spot: None,
        }
    }

    pub fn shooter(&self) -> &PlayerId {
        &self.shooter
    }

    /// The tapped spot, if any
    pub fn pending(&self) -> Option<&ShotLocation> {
        self.spot.as_ref()
    }

    /// Place (or move) the marker at court-feet coordinates.
    pub fn tap(&mut self, x: f64, y: f64) {
        let mut shot = ShotLocation::new(x, y, false, false).clamped();
        shot.is_three = is_three_point_spot(shot.x, shot.y);
        self.place(shot);
    }

    /// Place the marker from a tap on the court diagram, drawn `width` x
    /// `height` with the baseline at the top.
    pub fn tap_view(&mut self, view_x: f64, view_y: f64, width: f64, height: f64) {
        self.place(ShotLocation::from_view(view_x, view_y, width, height, false));
    }

    fn place(&mut self, mut shot: ShotLocation) {
        shot.player_id = Some(self.shooter.clone());
        shot.quarter = Some(self.quarter);
        self.spot = Some(shot);
    }

    /// Flip the three-point flag for a tap right on the line.
    pub fn toggle_three(&mut self) -> CourtsideResult<()> {
        let shot = self.spot.as_mut().ok_or_else(no_spot)?;
        shot.is_three = !shot.is_three;
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.spot = None;
    }

    /// The shot that marking the pending spot `made` would record.
    pub fn resolve(&self, made: bool) -> CourtsideResult<ShotLocation> {
        let mut shot = self.spot.clone().ok_or_else(no_spot)?;
        shot.made = made;
        Ok(shot)
    }
}

fn no_spot() -> CourtsideError {
    CourtsideError::InvalidTransition("tap the court before marking the shot".to_string())
}

/// Record the pending shot; the marker is cleared only once the backend
/// accepted it.
pub async fn record_shot(
    backend: &dyn DataBackend,
    game_id: &GameId,
    entry: &mut ShotEntry,
    made: bool,
) -> CourtsideResult<ShotLocation> {
    let shot = entry.resolve(made)?;
    backend.record_shot(game_id, &shot).await?;
    info!(shooter = %entry.shooter, made, three = shot.is_three, "Shot recorded");
    entry.cancel();
    Ok(shot)
}
