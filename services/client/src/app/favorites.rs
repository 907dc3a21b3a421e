//! services/client/src/app/favorites.rs
//!
//! The optimistic mutation coordinator, canonical instance: favorite
//! toggling. The local flip is visible before the network call is issued;
//! a remote failure rolls the flip back and surfaces a notice; a remote
//! success needs no reconciliation, the optimistic state already reflects
//! the end result.

use crate::app::state::AppState;
use galmaetgil_core::domain::{CourseId, Notice};
use tracing::warn;

/// The result of a toggle attempt, for callers that care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The flip stands (remote confirmed it).
    Applied,
    /// The remote call failed and the flip was rolled back.
    RolledBack,
    /// The rollback arrived after a newer toggle and was discarded.
    Superseded,
    /// No session; nothing changed, the caller shows an auth prompt.
    NotLoggedIn,
}

pub async fn toggle_favorite(state: &AppState, course_id: CourseId) -> ToggleOutcome {
    if !state.store.is_logged_in() {
        state
            .notifier
            .notify(Notice::error("로그인이 필요합니다."));
        return ToggleOutcome::NotLoggedIn;
    }

    // Local flip first, strictly before the network call.
    let seq = state.store.begin_favorite_toggle(course_id);

    let bearer = state.bearer_token();
    match state
        .backend
        .toggle_favorite(bearer.as_deref(), course_id)
        .await
    {
        Ok(()) => ToggleOutcome::Applied,
        Err(e) => {
            warn!("favorite toggle failed for course {course_id}: {e}");
            state
                .notifier
                .notify(Notice::error("요청 처리에 실패했습니다."));
            if state.store.rollback_favorite(course_id, seq) {
                ToggleOutcome::RolledBack
            } else {
                ToggleOutcome::Superseded
            }
        }
    }
}
