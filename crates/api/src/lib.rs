//! HTTP client for the school backend REST API.
//!
//! The backend owns all durable records; this crate is the dashboard's only
//! way to read or write them. Success bodies arrive enveloped as
//! `{"data": ...}` and failures carry `{"message": ...}`; both are decoded
//! here so callers work with domain types and [`ApiError`] only.

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{AuthSession, RegisterRequest};
