//! Shot markers on the half court.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Half court width in feet
pub const COURT_WIDTH_FT: f64 = 50.0;
/// Half court depth (baseline to half-court line) in feet
pub const COURT_DEPTH_FT: f64 = 47.0;
/// Basket center, measured from the left sideline and the baseline
pub const BASKET_X_FT: f64 = 25.0;
pub const BASKET_Y_FT: f64 = 5.25;
/// Three-point arc radius above the break
pub const THREE_POINT_RADIUS_FT: f64 = 23.75;
/// Distance from the basket to the straight corner three lines
pub const CORNER_THREE_FT: f64 = 22.0;
/// The corner lines run this far from the baseline before the arc starts
pub const CORNER_DEPTH_FT: f64 = 14.0;

/// Whether a spot on the half court is behind the three-point line.
pub fn is_three_point_spot(x: f64, y: f64) -> bool {
    if y <= CORNER_DEPTH_FT {
        (x - BASKET_X_FT).abs() >= CORNER_THREE_FT
    } else {
        (x - BASKET_X_FT).hypot(y - BASKET_Y_FT) >= THREE_POINT_RADIUS_FT
    }
}

/// A recorded shot in court-feet coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotLocation {
    pub x: f64,
    pub y: f64,
    pub made: bool,
    pub is_three: bool,
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub quarter: Option<u8>,
}

impl ShotLocation {
    pub fn new(x: f64, y: f64, made: bool, is_three: bool) -> Self {
        Self {
            x,
            y,
            made,
            is_three,
            player_id: None,
            quarter: None,
        }
    }

    /// Shot from a tap on a court drawn `width` x `height` with the baseline
    /// at the top. The three-point flag follows the line.
    pub fn from_view(view_x: f64, view_y: f64, width: f64, height: f64, made: bool) -> Self {
        let x = if width > 0.0 { view_x / width * COURT_WIDTH_FT } else { 0.0 };
        let y = if height > 0.0 { view_y / height * COURT_DEPTH_FT } else { 0.0 };
        let x = x.clamp(0.0, COURT_WIDTH_FT);
        let y = y.clamp(0.0, COURT_DEPTH_FT);
        Self::new(x, y, made, is_three_point_spot(x, y))
    }

    /// Distance from the basket in feet
    pub fn distance_ft(&self) -> f64 {
        (self.x - BASKET_X_FT).hypot(self.y - BASKET_Y_FT)
    }

    /// Point value of the attempt
    pub fn value(&self) -> u32 {
        if self.is_three {
            3
        } else {
            2
        }
    }

    /// Clamp the location onto the half court (taps can land on the lines).
    pub fn clamped(&self) -> Self {
        let mut shot = self.clone();
        shot.x = self.x.clamp(0.0, COURT_WIDTH_FT);
        shot.y = self.y.clamp(0.0, COURT_DEPTH_FT);
        shot
    }

    /// Map to view coordinates for a court drawn `width` x `height` with the
    /// baseline at the top.
    pub fn to_view(&self, width: f64, height: f64) -> (f64, f64) {
        let c = self.clamped();
        (c.x / COURT_WIDTH_FT * width, c.y / COURT_DEPTH_FT * height)
    }
}
