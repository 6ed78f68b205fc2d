//! Courtside Core Library
//!
//! Client-side logic for live basketball stat tracking.
//!
//! ## Overview
//!
//! Courtside is a scorer's and coach's companion: it records free throws,
//! fouls, shots and substitutions during a game and shows box scores,
//! shooting efficiency and lineup numbers. All records live in an external
//! data backend; this crate holds what the client itself computes.
//!
//! ## Core Principles
//!
//! - **One formula per metric**: every derived statistic lives in [`metrics`]
//!   with a single rounding rule and a documented zero-denominator result
//! - **Flows are values**: multi-step interactions are explicit states with
//!   pure transitions, testable without any view
//! - **Backend behind a trait**: [`DataBackend`] is the only way data comes
//!   in or goes out
//!
//! ## Quick Start
//!
//! ```ignore
//! use courtside_core::flows::{record_free_throw, FreeThrowSequence};
//! use courtside_core::{MemoryBackend, GameId, PlayerId};
//!
//! #[tokio::main]
//! async fn main() -> courtside_core::CourtsideResult<()> {
//!     let backend = MemoryBackend::new();
//!     let mut seq = FreeThrowSequence::one_and_one(GameId::from("g1"), PlayerId::from("p7"));
//!
//!     // Front end missed: the sequence ends after one call
//!     record_free_throw(&backend, &mut seq, false).await?;
//!     assert!(seq.is_complete());
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod export;
pub mod flows;
pub mod inbox;
pub mod lineups;
pub mod metrics;
pub mod shots;
pub mod theme;
pub mod types;
pub mod upload;

// Re-exports
pub use backend::{
    request_status_change, BackendCall, DataBackend, FoulRecord, FoulResponse, FreeThrowAttempt,
    FreeThrowResponse, ImageTarget, MemoryBackend, ProfileUpdate,
};
pub use config::ClientConfig;
pub use error::{CourtsideError, CourtsideResult};
pub use export::{open_export, ExportFormat, ExportRequest, ExportSection, UrlOpener};
pub use inbox::{NotificationInbox, NotificationPreferences};
pub use metrics::{FourFactors, PlayerMetrics, Rating, TeamComparison};
pub use theme::{ColorScheme, Theme, ThemePreference};
pub use types::*;
pub use upload::{upload_image, HttpUploadTransport, MediaPermission, UploadTransport};
