//! Shot chart analysis: court zones, per-zone shooting and heat maps.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::metrics::percentage;
use crate::types::shot::{BASKET_X_FT, CORNER_DEPTH_FT, COURT_DEPTH_FT, COURT_WIDTH_FT};
use crate::types::{PlayerId, ShotLocation};

/// Radius of the restricted-area arc
pub const RESTRICTED_AREA_FT: f64 = 4.0;
/// Half the lane width
pub const LANE_HALF_WIDTH_FT: f64 = 8.0;
/// Baseline to free-throw line
pub const FREE_THROW_LINE_FT: f64 = 19.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtZone {
    RestrictedArea,
    Paint,
    MidRange,
    Corner3,
    AboveBreak3,
}

impl CourtZone {
    pub const ALL: [CourtZone; 5] = [
        CourtZone::RestrictedArea,
        CourtZone::Paint,
        CourtZone::MidRange,
        CourtZone::Corner3,
        CourtZone::AboveBreak3,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CourtZone::RestrictedArea => "Restricted Area",
            CourtZone::Paint => "Paint",
            CourtZone::MidRange => "Mid-Range",
            CourtZone::Corner3 => "Corner 3",
            CourtZone::AboveBreak3 => "Above the Break 3",
        }
    }

    /// Zone of a recorded shot. The shot's own three-point flag wins over
    /// its coordinates.
    pub fn of(shot: &ShotLocation) -> Self {
        let shot = shot.clamped();
        if shot.is_three {
            return if shot.y <= CORNER_DEPTH_FT {
                CourtZone::Corner3
            } else {
                CourtZone::AboveBreak3
            };
        }
        if shot.distance_ft() <= RESTRICTED_AREA_FT {
            CourtZone::RestrictedArea
        } else if (shot.x - BASKET_X_FT).abs() <= LANE_HALF_WIDTH_FT
            && shot.y <= FREE_THROW_LINE_FT
        {
            CourtZone::Paint
        } else {
            CourtZone::MidRange
        }
    }
}

/// Makes and attempts in one zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSummary {
    pub zone: CourtZone,
    pub made: u32,
    pub attempts: u32,
    pub pct: f64,
}

/// One row per zone, in [`CourtZone::ALL`] order, including empty zones.
pub fn zone_breakdown<'a>(shots: impl IntoIterator<Item = &'a ShotLocation>) -> Vec<ZoneSummary> {
    let mut rows: Vec<ZoneSummary> = CourtZone::ALL
        .iter()
        .map(|&zone| ZoneSummary {
            zone,
            made: 0,
            attempts: 0,
            pct: 0.0,
        })
        .collect();

    for shot in shots {
        let zone = CourtZone::of(shot);
        if let Some(row) = rows.iter_mut().find(|r| r.zone == zone) {
            row.attempts += 1;
            if shot.made {
                row.made += 1;
            }
        }
    }
    for row in rows.iter_mut() {
        row.pct = percentage(row.made as f64, row.attempts as f64);
    }
    rows
}

/// Which shots the chart shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShotFilter {
    pub player: Option<PlayerId>,
    pub quarter: Option<u8>,
    pub made: Option<bool>,
}

impl ShotFilter {
    pub fn matches(&self, shot: &ShotLocation) -> bool {
        if let Some(player) = &self.player {
            if shot.player_id.as_ref() != Some(player) {
                return false;
            }
        }
        if let Some(quarter) = self.quarter {
            if shot.quarter != Some(quarter) {
                return false;
            }
        }
        self.made.map_or(true, |made| shot.made == made)
    }

    pub fn apply<'a>(&self, shots: &'a [ShotLocation]) -> Vec<&'a ShotLocation> {
        shots.iter().filter(|s| self.matches(s)).collect()
    }
}

/// Largest grid [`HeatMap::build`] will allocate (200 x 200)
pub const MAX_HEAT_MAP_CELLS: usize = 40_000;

/// Attempt density over a grid laid across the half court.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatMap {
    cols: usize,
    rows: usize,
    counts: Vec<u32>,
    max: u32,
}

impl HeatMap {
    /// Bin `shots` into `cols` x `rows` cells. Shots off the court land in
    /// the nearest edge cell. A zero-sized grid, or one with more than
    /// [`MAX_HEAT_MAP_CELLS`] cells, yields an empty map.
    pub fn build<'a>(
        shots: impl IntoIterator<Item = &'a ShotLocation>,
        cols: usize,
        rows: usize,
    ) -> Self {
        let (cols, rows) = match cols.checked_mul(rows) {
            Some(cells) if cells <= MAX_HEAT_MAP_CELLS => (cols, rows),
            _ => {
                warn!(cols, rows, "Heat map grid too large");
                (0, 0)
            }
        };
        let mut counts = vec![0u32; cols * rows];
        if !counts.is_empty() {
            for shot in shots {
                let shot = shot.clamped();
                let col = cell(shot.x, COURT_WIDTH_FT, cols);
                let row = cell(shot.y, COURT_DEPTH_FT, rows);
                counts[row * cols + col] = counts[row * cols + col].saturating_add(1);
            }
        }
        let max = counts.iter().copied().max().unwrap_or(0);
        Self {
            cols,
            rows,
            counts,
            max,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn count(&self, col: usize, row: usize) -> u32 {
        if col >= self.cols || row >= self.rows {
            return 0;
        }
        self.counts[row * self.cols + col]
    }

    /// Cell count relative to the busiest cell, in `0.0..=1.0`
    pub fn intensity(&self, col: usize, row: usize) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        self.count(col, row) as f64 / self.max as f64
    }

    pub fn total(&self) -> u32 {
        self.counts
            .iter()
            .fold(0u32, |total, &count| total.saturating_add(count))
    }
}

fn cell(value: f64, extent: f64, cells: usize) -> usize {
    let index = (value / extent * cells as f64).floor() as usize;
    index.min(cells - 1)
}
