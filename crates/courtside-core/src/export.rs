//! Game export links.
//!
//! Exports are rendered by an external endpoint; the client only builds the
//! link and hands it to the platform's URL opener:
//!
//! ```text
//! <base>/games/<game id>/export?format=pdf&sections=box_score,shot_chart&theme=dark&heatmap=true
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::error::{CourtsideError, CourtsideResult};
use crate::theme::ColorScheme;
use crate::types::GameId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Csv,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Csv => "csv",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = CourtsideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(CourtsideError::InvalidExport(format!(
                "unknown format '{}', expected pdf or csv",
                other
            ))),
        }
    }
}

/// Content that can be selected for an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportSection {
    BoxScore,
    PlayerStats,
    TeamStats,
    ShotChart,
    PlayByPlay,
    Lineups,
}

impl ExportSection {
    pub const ALL: [ExportSection; 6] = [
        ExportSection::BoxScore,
        ExportSection::PlayerStats,
        ExportSection::TeamStats,
        ExportSection::ShotChart,
        ExportSection::PlayByPlay,
        ExportSection::Lineups,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExportSection::BoxScore => "box_score",
            ExportSection::PlayerStats => "player_stats",
            ExportSection::TeamStats => "team_stats",
            ExportSection::ShotChart => "shot_chart",
            ExportSection::PlayByPlay => "play_by_play",
            ExportSection::Lineups => "lineups",
        }
    }
}

impl std::str::FromStr for ExportSection {
    type Err = CourtsideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        ExportSection::ALL
            .into_iter()
            .find(|section| section.as_str() == wanted)
            .ok_or_else(|| CourtsideError::InvalidExport(format!("unknown section '{}'", s)))
    }
}

/// Everything the export sheet lets the user choose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub game_id: GameId,
    pub format: ExportFormat,
    pub sections: Vec<ExportSection>,
    pub theme: ColorScheme,
    pub include_heat_map: bool,
}

impl ExportRequest {
    /// A PDF of the box score in the light theme
    pub fn new(game_id: GameId) -> Self {
        Self {
            game_id,
            format: ExportFormat::Pdf,
            sections: vec![ExportSection::BoxScore],
            theme: ColorScheme::Light,
            include_heat_map: false,
        }
    }

    /// Build the export link under `base`.
    ///
    /// Sections are deduplicated and sent in a stable order. Heat maps only
    /// exist in PDF output; a CSV request always carries `heatmap=false`.
    pub fn to_url(&self, base: &Url) -> CourtsideResult<Url> {
        if self.sections.is_empty() {
            return Err(CourtsideError::InvalidExport(
                "select at least one section to export".to_string(),
            ));
        }
        if self.game_id.as_str().is_empty() {
            return Err(CourtsideError::InvalidExport("missing game id".to_string()));
        }

        let mut sections = self.sections.clone();
        sections.sort();
        sections.dedup();
        let sections = sections
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let heat_map = self.include_heat_map && self.format == ExportFormat::Pdf;

        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| CourtsideError::InvalidExport(format!("{} cannot be a base URL", base)))?
            .pop_if_empty()
            .extend(["games", self.game_id.as_str(), "export"]);
        url.query_pairs_mut()
            .clear()
            .append_pair("format", self.format.as_str())
            .append_pair("sections", &sections)
            .append_pair("theme", self.theme.as_str())
            .append_pair("heatmap", if heat_map { "true" } else { "false" });
        Ok(url)
    }
}

/// Platform facility that opens a link (browser, share sheet).
pub trait UrlOpener {
    fn open(&self, url: &Url) -> CourtsideResult<()>;
}

/// Build the export link and hand it to `opener`.
pub fn open_export(
    request: &ExportRequest,
    base: &Url,
    opener: &dyn UrlOpener,
) -> CourtsideResult<Url> {
    let url = request.to_url(base)?;
    info!(game = %request.game_id, format = request.format.as_str(), "Opening export");
    opener.open(&url)?;
    Ok(url)
}
