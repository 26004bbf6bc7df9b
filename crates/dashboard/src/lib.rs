//! The dashboard shell: one explicitly-owned context wiring the session
//! store, API client, live channel, and notification aggregator together,
//! plus its environment configuration.
//!
//! There are no module-level singletons: the embedding process constructs a
//! [`DashboardContext`], drives its lifecycle, and drops it on exit.

pub mod config;
pub mod context;

pub use config::DashboardConfig;
pub use context::DashboardContext;
