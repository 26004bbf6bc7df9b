//! Bridges live channel events into the inbox and the toast surface.

use std::sync::Arc;

use campus_channel::{LiveChannel, LiveEvent, SubscriptionId};
use campus_core::events::{EVENT_ATTENDANCE_REPORT_SENT, EVENT_FEE_CHECK, EVENT_LIBRARY_CHECK};

use crate::inbox::{NotificationInbox, NotificationKind};
use crate::toast::Toaster;

/// Fixed toast shown when an attendance report dispatch is announced.
const REPORT_SENT_TOAST: &str = "Attendance report sent";

/// Consumes live notification events for the duration of a session view.
///
/// `attach` subscribes one handler per event; every received event appends
/// exactly one [`NotificationInbox`] entry and publishes exactly one toast.
/// `detach` removes all handlers so a remounted view cannot double-deliver
/// while the channel itself stays connected.
pub struct NotificationAggregator {
    inbox: Arc<NotificationInbox>,
    toaster: Toaster,
    subscriptions: Vec<(&'static str, SubscriptionId)>,
}

impl NotificationAggregator {
    pub fn new(toaster: Toaster) -> Self {
        Self {
            inbox: Arc::new(NotificationInbox::new()),
            toaster,
            subscriptions: Vec::new(),
        }
    }

    /// Shared handle to the inbox backing the badge/panel.
    pub fn inbox(&self) -> Arc<NotificationInbox> {
        Arc::clone(&self.inbox)
    }

    /// Whether handlers are currently subscribed.
    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Subscribe to the three notification events.
    ///
    /// Attaching an already-attached aggregator is a no-op, which is the guard
    /// against duplicate delivery when a view remounts.
    pub fn attach(&mut self, channel: &LiveChannel) {
        if self.is_attached() {
            return;
        }

        for event in [
            EVENT_ATTENDANCE_REPORT_SENT,
            EVENT_LIBRARY_CHECK,
            EVENT_FEE_CHECK,
        ] {
            let inbox = Arc::clone(&self.inbox);
            let toaster = self.toaster.clone();
            let id = channel.subscribe(event, move |incoming| {
                deliver(&inbox, &toaster, incoming);
            });
            self.subscriptions.push((event, id));
        }
        tracing::debug!("Notification aggregator attached");
    }

    /// Remove every handler registered by [`attach`](Self::attach).
    pub fn detach(&mut self, channel: &LiveChannel) {
        for (event, id) in self.subscriptions.drain(..) {
            channel.unsubscribe(event, id);
        }
        tracing::debug!("Notification aggregator detached");
    }
}

/// Turn one live event into an inbox entry plus a toast.
fn deliver(inbox: &NotificationInbox, toaster: &Toaster, event: &LiveEvent) {
    match event {
        LiveEvent::AttendanceReportSent(data) => {
            inbox.push(NotificationKind::ReportSent, &data.message);
            toaster.success(REPORT_SENT_TOAST);
        }
        LiveEvent::LibraryCheck(data) => {
            inbox.push(NotificationKind::LibraryAlert, &data.message);
            toaster.info(&data.message);
        }
        LiveEvent::FeeCheck(data) => {
            inbox.push(NotificationKind::FeeAlert, &data.message);
            toaster.info(&data.message);
        }
    }
}
