//! Transient toast surface backed by a `tokio::sync::broadcast` channel.
//!
//! [`Toaster`] is the fan-out hub: any component may publish, any surface
//! may subscribe. It is designed to be cloned freely; clones share the same
//! underlying channel.

use tokio::sync::broadcast;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// Visual flavor of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// One transient message for the toast surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Fan-out hub for toasts.
#[derive(Clone)]
pub struct Toaster {
    sender: broadcast::Sender<Toast>,
}

impl Toaster {
    /// Create a toaster with a specific channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a toast to all current subscribers.
    ///
    /// If nobody is listening the toast is silently dropped; toasts are
    /// transient by definition.
    pub fn publish(&self, kind: ToastKind, message: impl Into<String>) {
        let toast = Toast {
            kind,
            message: message.into(),
        };
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(toast);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(ToastKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.publish(ToastKind::Info, message);
    }

    /// Subscribe to every toast published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.sender.subscribe()
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn published_toasts_reach_subscribers() {
        let toaster = Toaster::default();
        let mut rx = toaster.subscribe();

        toaster.success("Login successful!");

        let toast = rx.recv().await.expect("should receive the toast");
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.message, "Login successful!");
    }

    #[tokio::test]
    async fn clones_share_one_channel() {
        let toaster = Toaster::default();
        let mut rx = toaster.subscribe();

        toaster.clone().error("Login Failed");

        let toast = rx.recv().await.unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let toaster = Toaster::default();
        toaster.info("nobody is listening");
    }
}
