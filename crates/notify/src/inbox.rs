//! The append-only notification inbox.

use std::sync::Mutex;

use campus_core::types::Timestamp;

/// What kind of operational event produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// A scheduled attendance report was dispatched.
    ReportSent,
    /// Library alert (overdue book, fine).
    LibraryAlert,
    /// Fee alert (due/overdue payment).
    FeeAlert,
}

/// One notification as shown in the badge panel.
///
/// Entries are never mutated after insertion; `read` only flips via the
/// local mark-read affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEntry {
    pub message: String,
    pub kind: NotificationKind,
    pub received_at: Timestamp,
    pub read: bool,
}

/// Ordered, append-only inbox; shared between the channel's dispatch task
/// and whichever surface renders the badge.
///
/// Thread-safe via an interior mutex; designed to be wrapped in `Arc`.
#[derive(Debug, Default)]
pub struct NotificationInbox {
    entries: Mutex<Vec<NotificationEntry>>,
}

impl NotificationInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry, stamped with the current time.
    pub fn push(&self, kind: NotificationKind, message: impl Into<String>) {
        let entry = NotificationEntry {
            message: message.into(),
            kind,
            received_at: chrono::Utc::now(),
            read: false,
        };
        self.entries
            .lock()
            .expect("inbox lock poisoned")
            .push(entry);
    }

    /// Snapshot of all entries, oldest first.
    pub fn entries(&self) -> Vec<NotificationEntry> {
        self.entries.lock().expect("inbox lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("inbox lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries not yet marked read (the badge count).
    pub fn unread_count(&self) -> usize {
        self.entries
            .lock()
            .expect("inbox lock poisoned")
            .iter()
            .filter(|entry| !entry.read)
            .count()
    }

    /// Mark every entry read. Local only; nothing is acknowledged upstream.
    pub fn mark_all_read(&self) {
        for entry in self
            .entries
            .lock()
            .expect("inbox lock poisoned")
            .iter_mut()
        {
            entry.read = true;
        }
    }

    /// Drop all entries. Local only.
    pub fn clear(&self) {
        self.entries.lock().expect("inbox lock poisoned").clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_appends_in_order() {
        let inbox = NotificationInbox::new();
        inbox.push(NotificationKind::FeeAlert, "Fee due");
        inbox.push(NotificationKind::LibraryAlert, "Book overdue");

        let entries = inbox.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "Fee due");
        assert_eq!(entries[0].kind, NotificationKind::FeeAlert);
        assert_eq!(entries[1].message, "Book overdue");
        assert!(!entries[0].read);
    }

    #[test]
    fn unread_count_tracks_mark_all_read() {
        let inbox = NotificationInbox::new();
        inbox.push(NotificationKind::ReportSent, "Report sent");
        inbox.push(NotificationKind::FeeAlert, "Fee due");
        assert_eq!(inbox.unread_count(), 2);

        inbox.mark_all_read();
        assert_eq!(inbox.unread_count(), 0);
        assert_eq!(inbox.len(), 2, "marking read must not drop entries");
    }

    #[test]
    fn clear_empties_the_inbox() {
        let inbox = NotificationInbox::new();
        inbox.push(NotificationKind::ReportSent, "Report sent");
        inbox.clear();
        assert!(inbox.is_empty());
    }
}
