//! services/client/src/bin/client.rs

use client_lib::{
    adapters::{FileTokenStore, HttpBackend, LogNotifier},
    app::{catalog, startup, AppState},
    config::Config,
    error::ClientError,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting client...");

    // --- 2. Initialize Port Adapters ---
    let backend = Arc::new(HttpBackend::new(
        config.api_base_url.clone(),
        config.request_timeout,
    )?);
    let tokens = Arc::new(FileTokenStore::new(config.token_path.clone()));
    let notifier = Arc::new(LogNotifier);

    // --- 3. Build the Shared AppState ---
    let state = AppState::new(backend, tokens, notifier, config.clone());

    // --- 4. Run the Startup Sequence ---
    // A browser shell would pass its real location; the headless shell
    // starts at the root with no callback token.
    let report = startup::run(&state, "/", None).await;
    if report.resolve.rewrite_history_to_root {
        info!("callback processed; history rewritten to /");
    }

    let data = state.store.snapshot();
    info!(
        page = ?report.page,
        logged_in = data.user.is_some(),
        courses = data.courses.len(),
        reviews = data.reviews.len(),
        announcements = data.announcements.len(),
        badges = data.badge_catalog.len(),
        "initial state ready"
    );

    // --- 5. Keep the Visitor Counter Fresh ---
    let cancel = CancellationToken::new();
    let poller = catalog::spawn_visitor_poll(state.clone(), cancel.clone());

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    cancel.cancel();
    let _ = poller.await;

    Ok(())
}
