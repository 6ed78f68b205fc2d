//! Notification inbox.
//!
//! Notifications come from the backend; the inbox keeps them newest first,
//! tracks read state, and groups them by calendar day for display.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::backend::DataBackend;
use crate::error::CourtsideResult;
use crate::types::{Notification, NotificationId, NotificationType};

const MINUTE_SECS: i64 = 60;
const HOUR_SECS: i64 = 3_600;
const DAY_SECS: i64 = 86_400;

/// Which notification kinds the user wants pushed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPreferences {
    pub game_start: bool,
    pub game_end: bool,
    pub score_updates: bool,
    pub team_invites: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            game_start: true,
            game_end: true,
            score_updates: true,
            team_invites: true,
        }
    }
}

impl NotificationPreferences {
    /// System notices can't be turned off
    pub fn allows(&self, kind: NotificationType) -> bool {
        match kind {
            NotificationType::GameStart => self.game_start,
            NotificationType::GameEnd => self.game_end,
            NotificationType::ScoreUpdate => self.score_updates,
            NotificationType::TeamInvite => self.team_invites,
            NotificationType::System => true,
        }
    }
}

/// Notifications sharing a calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup<'a> {
    pub label: String,
    pub items: Vec<&'a Notification>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationInbox {
    items: Vec<Notification>,
}

impl NotificationInbox {
    pub fn new(mut items: Vec<Notification>) -> Self {
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self { items }
    }

    /// Replace the contents with the backend's current list.
    pub async fn refresh(&mut self, backend: &dyn DataBackend) -> CourtsideResult<()> {
        let items = backend.notifications().await?;
        debug!(count = items.len(), "Inbox refreshed");
        *self = Self::new(items);
        Ok(())
    }

    /// Newest first
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub async fn mark_read(
        &mut self,
        backend: &dyn DataBackend,
        id: &NotificationId,
    ) -> CourtsideResult<()> {
        let Some(item) = self.items.iter_mut().find(|n| &n.id == id) else {
            return Ok(());
        };
        if item.read {
            return Ok(());
        }
        backend.mark_notification_read(id).await?;
        item.read = true;
        Ok(())
    }

    /// No backend call when nothing is unread.
    pub async fn mark_all_read(&mut self, backend: &dyn DataBackend) -> CourtsideResult<()> {
        let unread = self.unread_count();
        if unread == 0 {
            return Ok(());
        }
        backend.mark_all_notifications_read().await?;
        for item in self.items.iter_mut() {
            item.read = true;
        }
        info!(count = unread, "Marked notifications read");
        Ok(())
    }

    /// Group by calendar day in the timezone of `now`. Groups keep the
    /// newest-first order.
    pub fn group_by_day(&self, now: DateTime<FixedOffset>) -> Vec<DayGroup<'_>> {
        let today = now.date_naive();
        let mut groups: Vec<(NaiveDate, DayGroup<'_>)> = Vec::new();

        for item in &self.items {
            let Some(day) = local_date(item.timestamp, &now) else {
                continue;
            };
            match groups.last_mut() {
                Some((last, group)) if *last == day => group.items.push(item),
                _ => groups.push((
                    day,
                    DayGroup {
                        label: day_label(day, today),
                        items: vec![item],
                    },
                )),
            }
        }

        groups.into_iter().map(|(_, group)| group).collect()
    }
}

fn local_date(timestamp_ms: i64, now: &DateTime<FixedOffset>) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|utc| utc.with_timezone(now.offset()).date_naive())
}

/// "Today", "Yesterday", otherwise e.g. "Mar 3"
pub fn day_label(day: NaiveDate, today: NaiveDate) -> String {
    if day == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(day) {
        "Yesterday".to_string()
    } else {
        day.format("%b %-d").to_string()
    }
}

/// Human-readable age of a millisecond timestamp relative to `now_ms`.
pub fn relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff_secs = (now_ms - timestamp_ms).max(0) / 1000;

    if diff_secs < MINUTE_SECS {
        "Just now".to_string()
    } else if diff_secs < HOUR_SECS {
        format!("{}m ago", diff_secs / MINUTE_SECS)
    } else if diff_secs < DAY_SECS {
        format!("{}h ago", diff_secs / HOUR_SECS)
    } else if diff_secs < 2 * DAY_SECS {
        "Yesterday".to_string()
    } else {
        format!("{}d ago", diff_secs / DAY_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendCall, MemoryBackend};

    // 2024-03-15 12:00:00 UTC
    const NOON: i64 = 1_710_504_000_000;
    const HOUR_MS: i64 = 3_600_000;

    fn note(id: &str, timestamp: i64, read: bool) -> Notification {
        let mut n = Notification::new(NotificationType::ScoreUpdate, id, "", timestamp);
        n.id = NotificationId::from(id);
        n.read = read;
        n
    }

    fn noon() -> DateTime<FixedOffset> {
        DateTime::from_timestamp_millis(NOON).unwrap().fixed_offset()
    }

    #[test]
    fn test_relative_time() {
        assert_eq!(relative_time(NOON, NOON + 30_000), "Just now");
        assert_eq!(relative_time(NOON, NOON + 5 * 60_000), "5m ago");
        assert_eq!(relative_time(NOON, NOON + 2 * HOUR_MS), "2h ago");
        assert_eq!(relative_time(NOON, NOON + 30 * HOUR_MS), "Yesterday");
        assert_eq!(relative_time(NOON, NOON + 72 * HOUR_MS), "3d ago");
        // Clock skew
        assert_eq!(relative_time(NOON + 10_000, NOON), "Just now");
    }

    #[test]
    fn test_sorted_newest_first() {
        let inbox = NotificationInbox::new(vec![
            note("old", NOON - HOUR_MS, false),
            note("new", NOON, true),
        ]);
        assert_eq!(inbox.items()[0].id.as_str(), "new");
        assert_eq!(inbox.unread_count(), 1);
    }

    #[test]
    fn test_group_by_day() {
        let inbox = NotificationInbox::new(vec![
            note("a", NOON - HOUR_MS, false),
            note("b", NOON - 20 * HOUR_MS, false),
            note("c", NOON - 50 * HOUR_MS, false),
            note("d", NOON - 49 * HOUR_MS, false),
        ]);
        let groups = inbox.group_by_day(noon());
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Today", "Yesterday", "Mar 13"]);
        assert_eq!(groups[2].items.len(), 2);
        assert_eq!(groups[2].items[0].id.as_str(), "d");
    }

    #[test]
    fn test_group_uses_local_day() {
        // 23:00 UTC on the 14th is already the 15th at UTC+2
        let inbox = NotificationInbox::new(vec![note("late", NOON - 13 * HOUR_MS, false)]);
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let groups = inbox.group_by_day(noon().with_timezone(&plus_two));
        assert_eq!(groups[0].label, "Today");
        assert_eq!(inbox.group_by_day(noon())[0].label, "Yesterday");
    }

    #[test]
    fn test_preferences_filter() {
        let prefs = NotificationPreferences {
            score_updates: false,
            ..Default::default()
        };
        assert!(!prefs.allows(NotificationType::ScoreUpdate));
        assert!(prefs.allows(NotificationType::System));
        let parsed: NotificationPreferences =
            serde_json::from_str(r#"{"gameEnd":false}"#).unwrap();
        assert!(!parsed.game_end);
        assert!(parsed.game_start);
    }

    #[tokio::test]
    async fn test_mark_read_goes_through_backend() {
        let backend = MemoryBackend::new();
        backend.push_notification(note("n1", NOON, false));
        backend.push_notification(note("n2", NOON - HOUR_MS, false));

        let mut inbox = NotificationInbox::default();
        inbox.refresh(&backend).await.unwrap();
        assert_eq!(inbox.unread_count(), 2);

        inbox.mark_read(&backend, &NotificationId::from("n1")).await.unwrap();
        // Already read: no second call
        inbox.mark_read(&backend, &NotificationId::from("n1")).await.unwrap();
        assert_eq!(inbox.unread_count(), 1);

        inbox.mark_all_read(&backend).await.unwrap();
        inbox.mark_all_read(&backend).await.unwrap();
        assert_eq!(inbox.unread_count(), 0);
        assert_eq!(
            backend.calls(),
            vec![
                BackendCall::MarkNotificationRead(NotificationId::from("n1")),
                BackendCall::MarkAllNotificationsRead,
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_mark_read_keeps_local_state() {
        let backend = MemoryBackend::new();
        let mut inbox = NotificationInbox::new(vec![note("n1", NOON, false)]);
        backend.fail_next("offline");
        assert!(inbox.mark_read(&backend, &NotificationId::from("n1")).await.is_err());
        assert_eq!(inbox.unread_count(), 1);
    }
}
