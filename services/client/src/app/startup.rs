//! services/client/src/app/startup.rs
//!
//! The initial load sequence: session resolution and the catalog batch run
//! concurrently, and the page is selected only after both settle. This is
//! the single place the explicit loading state exists; later mutations are
//! optimistic instead of blocking.

use crate::app::router::{self, Page};
use crate::app::session::{self, ResolveOutcome};
use crate::app::state::AppState;
use crate::app::store::Action;
use crate::app::catalog;
use tracing::info;

/// What the shell needs to act on after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupReport {
    pub resolve: ResolveOutcome,
    pub page: Page,
}

/// Runs the startup sequence.
///
/// `path` is the URL path at load time; `query_token` is the `token` query
/// parameter a social-login callback carries, when present.
pub async fn run(state: &AppState, path: &str, query_token: Option<&str>) -> StartupReport {
    let (resolve, ()) = tokio::join!(
        session::resolve(state, query_token, path),
        catalog::load_all(state),
    );

    let page = router::select(path);
    state.store.dispatch(Action::PageChanged(page));
    info!(?page, "startup complete");

    StartupReport { resolve, page }
}
