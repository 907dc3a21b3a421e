//! services/client/src/app/session.rs
//!
//! Session resolution: turns a token (explicit, stored, or ambient) into the
//! current user profile, exactly once per startup and again after any event
//! that may have changed server-side user state.
//!
//! Resolution never fails outward. A failed "who am I" call means "not
//! logged in": the token store is cleared and the session slices are reset.

use crate::app::router::AUTH_CALLBACK_PATH;
use crate::app::state::AppState;
use crate::app::store::Action;
use galmaetgil_core::domain::Badge;
use tracing::{info, warn};

/// Marker persisted when a resolution succeeds without an explicit token:
/// it records that an ambient cookie session exists, so later loads attempt
/// resolution again. Never sent as a bearer credential.
pub const AMBIENT_SENTINEL: &str = "logged-in";

/// What the shell must do after a resolution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOutcome {
    /// The current URL is the OAuth callback; rewrite history to the root
    /// path without a reload, dropping transient query parameters.
    pub rewrite_history_to_root: bool,
}

/// Resolves the current user.
///
/// Token precedence: `explicit_token` (from the URL after a social login),
/// then the persisted token, then the ambient cookie alone. An explicit
/// token is persisted before use, mirroring the login handoff.
pub async fn resolve(
    state: &AppState,
    explicit_token: Option<&str>,
    current_path: &str,
) -> ResolveOutcome {
    let outcome = ResolveOutcome {
        rewrite_history_to_root: current_path == AUTH_CALLBACK_PATH,
    };

    if let Some(token) = explicit_token {
        if let Err(e) = state.tokens.save(token) {
            warn!("failed to persist url token: {e}");
        }
    }

    let bearer = state.bearer_token();
    match state.backend.fetch_profile(bearer.as_deref()).await {
        Ok(user) => {
            info!(user_id = user.id, "session resolved");

            // Detect newly granted achievements by diffing badge collections.
            // Only a re-resolution has a meaningful previous collection; the
            // first fetch of a session must not celebrate old badges.
            let previous = state
                .store
                .with(|data| data.user.as_ref().map(|_| data.my_badges.clone()));
            if let Some(previous) = previous {
                if let Some(badge) = newly_awarded(&previous, &user.badges) {
                    state.notifier.badge_awarded(&badge);
                    state.store.dispatch(Action::BadgeAwarded(badge));
                }
            }

            state.store.dispatch(Action::LoginSucceeded(user));

            // An ambient-cookie session with nothing persisted: leave a
            // marker so the next load attempts resolution again.
            match state.tokens.read() {
                Ok(None) => {
                    if let Err(e) = state.tokens.save(AMBIENT_SENTINEL) {
                        warn!("failed to persist session marker: {e}");
                    }
                }
                Ok(Some(_)) => {}
                Err(e) => warn!("token store read failed: {e}"),
            }

            // Challenges share the auth context but fail independently.
            match state.backend.fetch_challenges(bearer.as_deref()).await {
                Ok(challenges) => state.store.dispatch(Action::ChallengesLoaded(challenges)),
                Err(e) => {
                    warn!("challenge fetch failed: {e}");
                    state.store.dispatch(Action::ChallengesCleared);
                }
            }
        }
        Err(e) => {
            // Not logged in. Any error lands here: network, 401, bad payload.
            warn!("profile resolution failed: {e}");
            if let Err(e) = state.tokens.clear() {
                warn!("token store clear failed: {e}");
            }
            state.store.dispatch(Action::SessionCleared);
        }
    }

    outcome
}

/// Returns one newly awarded badge when `next` is a strict superset of
/// `previous` (by badge identity), and `None` otherwise.
pub fn newly_awarded(previous: &[Badge], next: &[Badge]) -> Option<Badge> {
    let had = |id| previous.iter().any(|b| b.id == id);
    let has = |id| next.iter().any(|b| b.id == id);
    if !previous.iter().all(|b| has(b.id)) {
        return None;
    }
    next.iter().find(|b| !had(b.id)).cloned()
}
