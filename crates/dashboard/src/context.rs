//! The owned dashboard context and its session lifecycle.

use std::sync::Arc;

use chrono::NaiveDate;

use campus_api::{ApiClient, RegisterRequest};
use campus_attendance::AttendanceEngine;
use campus_channel::LiveChannel;
use campus_core::Identity;
use campus_notify::{NotificationAggregator, NotificationInbox, Toaster};
use campus_session::{CredentialStorage, SessionError, SessionStore};

use crate::config::DashboardConfig;

/// Everything a dashboard process needs, wired together with an explicit
/// lifecycle.
///
/// The presence of valid credentials gates the live channel: `start`,
/// `login`, and `register` open it; `logout` and `shutdown` close it. The
/// notification aggregator attaches and detaches alongside.
pub struct DashboardContext<S: CredentialStorage> {
    api: Arc<ApiClient>,
    channel: LiveChannel,
    session: SessionStore<S>,
    notifications: NotificationAggregator,
    toaster: Toaster,
}

impl<S: CredentialStorage> DashboardContext<S> {
    /// Build a context from config and credential storage.
    ///
    /// Nothing connects yet; call [`start`](Self::start) or
    /// [`login`](Self::login).
    pub fn new(config: &DashboardConfig, storage: S) -> Self {
        let toaster = Toaster::default();
        Self {
            api: Arc::new(ApiClient::new(&config.api_url)),
            channel: LiveChannel::new(&config.ws_url),
            session: SessionStore::new(storage),
            notifications: NotificationAggregator::new(toaster.clone()),
            toaster,
        }
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn channel(&self) -> &LiveChannel {
        &self.channel
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    /// Shared handle to the notification inbox.
    pub fn inbox(&self) -> Arc<NotificationInbox> {
        self.notifications.inbox()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.session.identity()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Restore a persisted session, if any.
    ///
    /// When credentials exist the API client is armed and the live channel
    /// opened; otherwise the context stays signed out.
    pub fn start(&mut self) -> Option<&Identity> {
        if let Some(restored) = self.session.restore() {
            self.api.set_token(&restored.access_token);
            self.open_channel();
        }
        self.session.identity()
    }

    /// Authenticate, persist the session, and open the live channel.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Identity, SessionError> {
        match self.session.login(&self.api, email, password).await {
            Ok(auth) => {
                self.api.set_token(&auth.token);
                self.open_channel();
                self.toaster.success("Login successful!");
                Ok(auth.user)
            }
            Err(e) => {
                self.toaster.error(surface_message(&e, "Login Failed"));
                Err(e)
            }
        }
    }

    /// Register a new account, persist the session, and open the live
    /// channel.
    pub async fn register(&mut self, request: &RegisterRequest) -> Result<Identity, SessionError> {
        match self.session.register(&self.api, request).await {
            Ok(auth) => {
                self.api.set_token(&auth.token);
                self.open_channel();
                self.toaster.success("Registration successful!");
                Ok(auth.user)
            }
            Err(e) => {
                self.toaster
                    .error(surface_message(&e, "Registration Failed"));
                Err(e)
            }
        }
    }

    /// Sign out: stop notifications, close the channel, clear credentials.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.notifications.detach(&self.channel);
        self.channel.disconnect();
        self.api.clear_token();

        self.session.logout()?;
        self.toaster.success("Logged out successfully");
        Ok(())
    }

    /// Tear down connections without clearing credentials (process exit).
    ///
    /// The next [`start`](Self::start) restores the same session.
    pub fn shutdown(&mut self) {
        self.notifications.detach(&self.channel);
        self.channel.disconnect();
    }

    /// An attendance engine for `date`, sharing this context's API client
    /// and toast surface.
    pub fn attendance_engine(&self, date: NaiveDate) -> AttendanceEngine<Arc<ApiClient>> {
        AttendanceEngine::new(Arc::clone(&self.api), date, self.toaster.clone())
    }

    fn open_channel(&mut self) {
        self.channel.connect();
        self.notifications.attach(&self.channel);
    }
}

/// The backend's message verbatim when it sent one, else the per-operation
/// fallback.
fn surface_message<'a>(error: &'a SessionError, fallback: &'a str) -> &'a str {
    match error {
        SessionError::Api(api) => api.message_or(fallback),
        SessionError::Storage(_) => fallback,
    }
}

#[cfg(test)]
mod tests {
    use campus_core::UserRole;
    use campus_session::storage::{KEY_ACCESS_TOKEN, KEY_REFRESH_TOKEN, KEY_USER};
    use campus_session::MemoryStorage;

    use super::*;

    const FEE_FRAME: &str = r#"{"event":"fee_check","data":{"message":"Fee due"}}"#;

    fn config() -> DashboardConfig {
        DashboardConfig {
            api_url: "http://127.0.0.1:9/api".into(),
            ws_url: "ws://127.0.0.1:9".into(),
            session_file: ".campus-session.json".into(),
        }
    }

    fn seeded_storage() -> MemoryStorage {
        let identity = Identity {
            id: "u1".into(),
            email: "t@school.test".into(),
            role: UserRole::Teacher,
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            phone: None,
            is_active: true,
        };
        let mut storage = MemoryStorage::new();
        storage.set(KEY_ACCESS_TOKEN, "jwt").unwrap();
        storage.set(KEY_REFRESH_TOKEN, "refresh").unwrap();
        storage
            .set(KEY_USER, &serde_json::to_string(&identity).unwrap())
            .unwrap();
        storage
    }

    #[tokio::test]
    async fn start_without_credentials_stays_offline() {
        let mut context = DashboardContext::new(&config(), MemoryStorage::new());

        assert!(context.start().is_none());
        assert!(!context.is_authenticated());
        assert!(!context.channel().is_connected());
        assert!(!context.api().has_token());
    }

    #[tokio::test]
    async fn start_with_credentials_opens_the_channel() {
        let mut context = DashboardContext::new(&config(), seeded_storage());

        let identity = context.start().expect("session should restore");
        assert_eq!(identity.role, UserRole::Teacher);
        assert!(context.channel().is_connected());
        assert!(context.api().has_token());

        // The aggregator is live: a pushed event lands in the inbox.
        context.channel().process_frame(FEE_FRAME);
        assert_eq!(context.inbox().len(), 1);

        context.shutdown();
    }

    #[tokio::test]
    async fn logout_disconnects_and_stops_delivery() {
        let mut context = DashboardContext::new(&config(), seeded_storage());
        context.start();
        assert!(context.channel().is_connected());

        context.logout().unwrap();

        assert!(!context.is_authenticated());
        assert!(!context.channel().is_connected());
        assert!(!context.api().has_token());

        // No further events reach the aggregator after logout.
        context.channel().process_frame(FEE_FRAME);
        assert!(context.inbox().is_empty());

        // And the persisted session is gone.
        assert!(context.start().is_none());
    }

    #[tokio::test]
    async fn shutdown_keeps_credentials_for_the_next_start() {
        let mut context = DashboardContext::new(&config(), seeded_storage());
        context.start();

        context.shutdown();
        assert!(!context.channel().is_connected());
        assert!(
            context.is_authenticated(),
            "shutdown must not sign the user out"
        );

        // The same context can come back online.
        assert!(context.start().is_some());
        assert!(context.channel().is_connected());
        context.shutdown();
    }

    #[tokio::test]
    async fn attendance_engine_shares_the_context_api() {
        let context = DashboardContext::new(&config(), MemoryStorage::new());
        let engine =
            context.attendance_engine(chrono::NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
        assert!(engine.class_id().is_none());
    }
}
