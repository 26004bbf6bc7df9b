//! The session store: restore, login, register, logout.

use campus_api::{ApiClient, ApiError, AuthSession, RegisterRequest};
use campus_core::Identity;

use crate::storage::{
    CredentialStorage, StorageError, KEY_ACCESS_TOKEN, KEY_REFRESH_TOKEN, KEY_USER,
};

/// Errors raised by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The auth authority rejected the call (or was unreachable).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Credentials could not be persisted or cleared.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Credentials recovered from durable storage at startup.
#[derive(Debug, Clone)]
pub struct RestoredSession {
    pub identity: Identity,
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Holds the signed-in identity and its persisted credentials.
///
/// Only successful auth calls mutate state: a failed login leaves any prior
/// session untouched. A restored identity is trusted provisionally: stale
/// tokens are not validated here; the first authenticated request that fails
/// is the point of truth.
pub struct SessionStore<S: CredentialStorage> {
    storage: S,
    identity: Option<Identity>,
    loading: bool,
}

impl<S: CredentialStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            identity: None,
            loading: true,
        }
    }

    /// True until the startup [`restore`](Self::restore) attempt has run.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Recover a persisted session, if any.
    ///
    /// Synchronous: reads the stored token and identity, publishes the
    /// identity, and hands the credentials back so the owning context can arm
    /// the API client and open the live channel. A corrupt persisted identity
    /// is discarded with a warning and treated as signed-out.
    pub fn restore(&mut self) -> Option<RestoredSession> {
        let recovered = self.read_persisted();
        self.loading = false;

        let (identity, access_token) = recovered?;
        self.identity = Some(identity.clone());
        tracing::info!(user_id = %identity.id, "Restored persisted session");

        Some(RestoredSession {
            identity,
            access_token,
            refresh_token: self.storage.get(KEY_REFRESH_TOKEN),
        })
    }

    fn read_persisted(&self) -> Option<(Identity, String)> {
        let token = self.storage.get(KEY_ACCESS_TOKEN)?;
        let raw_user = self.storage.get(KEY_USER)?;
        match serde_json::from_str::<Identity>(&raw_user) {
            Ok(identity) => Some((identity, token)),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding corrupt persisted identity");
                None
            }
        }
    }

    /// Authenticate against the backend and persist the returned session.
    pub async fn login(
        &mut self,
        api: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, SessionError> {
        let session = api.login(email, password).await?;
        self.persist(&session)?;
        tracing::info!(user_id = %session.user.id, "Login succeeded");
        Ok(session)
    }

    /// Register a new account and persist the returned session.
    pub async fn register(
        &mut self,
        api: &ApiClient,
        request: &RegisterRequest,
    ) -> Result<AuthSession, SessionError> {
        let session = api.register(request).await?;
        self.persist(&session)?;
        tracing::info!(user_id = %session.user.id, "Registration succeeded");
        Ok(session)
    }

    fn persist(&mut self, session: &AuthSession) -> Result<(), StorageError> {
        let user_json =
            serde_json::to_string(&session.user).expect("Identity is always serialisable");

        self.storage.set(KEY_ACCESS_TOKEN, &session.token)?;
        self.storage.set(KEY_REFRESH_TOKEN, &session.refresh_token)?;
        self.storage.set(KEY_USER, &user_json)?;

        self.identity = Some(session.user.clone());
        self.loading = false;
        Ok(())
    }

    /// Clear persisted credentials and publish the signed-out state.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.storage.remove(KEY_ACCESS_TOKEN)?;
        self.storage.remove(KEY_REFRESH_TOKEN)?;
        self.storage.remove(KEY_USER)?;
        self.identity = None;
        tracing::info!("Logged out");
        Ok(())
    }
}
