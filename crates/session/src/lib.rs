//! Session lifecycle: the authenticated identity and its persisted
//! credentials.
//!
//! [`SessionStore`] owns the current [`Identity`](campus_core::Identity) and
//! a [`CredentialStorage`] holding the access/refresh tokens plus the
//! serialized identity, so a restart can restore the signed-in state without
//! a network round trip. Opening and closing the live channel on
//! login/logout is the owning context's job; this crate only manages
//! credentials and identity.

pub mod storage;
pub mod store;

pub use storage::{CredentialStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{RestoredSession, SessionError, SessionStore};
