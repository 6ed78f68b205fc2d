//! Core types for Courtside
//!
//! These are view models mirroring records owned by the data backend. The
//! client never owns their lifecycle: they are fetched, displayed and
//! discarded on every refresh.

pub mod game;
pub mod lineup;
pub mod notification;
pub mod shot;
pub mod stats;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

pub use game::{GameData, GameStatus, Period};
pub use lineup::{LineupData, LineupEntry, PairData};
pub use notification::{Notification, NotificationType};
pub use shot::ShotLocation;
pub use stats::{team_totals, PlayerStat, StatLine};

/// Backend document ids are opaque strings. Each kind gets its own newtype so
/// a player id can never be passed where a game id is expected.
macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Mint a fresh, time-ordered id (used for local fixtures)
            pub fn new() -> Self {
                Self(format!(concat!($prefix, "_{}"), Ulid::new()))
            }

            /// Wrap an id issued by the backend
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Borrow the raw id
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

document_id!(
    /// Identifier of a game document
    GameId,
    "game"
);
document_id!(
    /// Identifier of a player document
    PlayerId,
    "player"
);
document_id!(
    /// Identifier of a team document
    TeamId,
    "team"
);
document_id!(
    /// Identifier of a notification document
    NotificationId,
    "notif"
);
document_id!(
    /// Storage handle returned by the upload endpoint
    StorageId,
    "storage"
);
