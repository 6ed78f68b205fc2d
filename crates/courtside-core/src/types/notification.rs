//! Inbox notifications.

use serde::{Deserialize, Serialize};

use super::NotificationId;

/// Kind of notification, used for icons and preference filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    GameStart,
    GameEnd,
    ScoreUpdate,
    TeamInvite,
    System,
}

/// A single inbox entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub read: bool,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
}

impl Notification {
    pub fn new(
        kind: NotificationType,
        title: impl Into<String>,
        body: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            kind,
            title: title.into(),
            body: body.into(),
            read: false,
            timestamp,
        }
    }
}
