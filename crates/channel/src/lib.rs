//! The live channel: a single long-lived, reconnectable event-stream
//! connection to the backend notification service.
//!
//! [`LiveChannel`] owns one background connection task per session, a
//! per-event handler registry, and automatic exponential-backoff reconnect.
//! Incoming frames are parsed into the typed [`LiveEvent`] union before
//! dispatch, so consumers never touch raw JSON.

pub mod client;
pub mod events;
pub mod reconnect;
pub mod registry;

pub use client::LiveChannel;
pub use events::{parse_frame, EventMessage, LiveEvent};
pub use registry::SubscriptionId;
