//! `campus-dashboard` -- headless session and notification watcher.
//!
//! Restores a persisted session (or signs in with env credentials), keeps
//! the live channel connected, and logs every toast until Ctrl-C. Useful as
//! a smoke shell for the backend and as the reference wiring of the
//! dashboard context.
//!
//! # Environment variables
//!
//! | Variable              | Required | Default                     | Description                    |
//! |-----------------------|----------|-----------------------------|--------------------------------|
//! | `CAMPUS_API_URL`      | no       | `http://localhost:5000/api` | REST API base URL              |
//! | `CAMPUS_WS_URL`       | no       | `ws://localhost:5000`       | Live channel endpoint          |
//! | `CAMPUS_SESSION_FILE` | no       | `.campus-session.json`      | Persisted session location     |
//! | `CAMPUS_EMAIL`        | no*      | --                          | Login email (*when no session) |
//! | `CAMPUS_PASSWORD`     | no*      | --                          | Login password                 |

use campus_dashboard::{DashboardConfig, DashboardContext};
use campus_session::FileStorage;

use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus=info,campus_dashboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DashboardConfig::from_env();
    tracing::info!(
        api_url = %config.api_url,
        ws_url = %config.ws_url,
        "Starting campus-dashboard",
    );

    let storage = FileStorage::open(&config.session_file)?;
    let mut context = DashboardContext::new(&config, storage);

    if context.start().is_none() {
        let email = std::env::var("CAMPUS_EMAIL").ok();
        let password = std::env::var("CAMPUS_PASSWORD").ok();
        match (email, password) {
            (Some(email), Some(password)) => {
                context.login(&email, &password).await?;
            }
            _ => {
                tracing::error!(
                    "No persisted session; set CAMPUS_EMAIL and CAMPUS_PASSWORD to sign in"
                );
                std::process::exit(1);
            }
        }
    }

    if let Some(identity) = context.identity() {
        tracing::info!(
            user = %identity.full_name(),
            role = identity.role.as_str(),
            "Session active, watching notifications",
        );
    }

    let mut toasts = context.toaster().subscribe();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            toast = toasts.recv() => match toast {
                Ok(toast) => tracing::info!(kind = ?toast.kind, "{}", toast.message),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Toast stream lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    let inbox = context.inbox();
    tracing::info!(
        unread = inbox.unread_count(),
        total = inbox.len(),
        "Shutting down",
    );
    context.shutdown();
    Ok(())
}
