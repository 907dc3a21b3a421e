//! services/client/src/app/reviews.rs
//!
//! Review submission: multipart metadata plus photos through the backend
//! port. The created review is prepended to the cached list (newest first);
//! a failure changes nothing locally.

use crate::app::state::AppState;
use crate::app::store::Action;
use galmaetgil_core::domain::{NewReview, Notice};
use tracing::warn;

pub async fn submit_review(state: &AppState, review: NewReview) -> bool {
    if !state.store.is_logged_in() {
        state
            .notifier
            .notify(Notice::error("로그인이 필요합니다."));
        return false;
    }

    let bearer = state.bearer_token();
    match state.backend.create_review(bearer.as_deref(), &review).await {
        Ok(created) => {
            state.store.dispatch(Action::ReviewAdded(created));
            state
                .notifier
                .notify(Notice::success("리뷰가 작성되었습니다!"));
            true
        }
        Err(e) => {
            warn!("review submission failed: {e}");
            state
                .notifier
                .notify(Notice::error("리뷰 작성에 실패했습니다."));
            false
        }
    }
}
