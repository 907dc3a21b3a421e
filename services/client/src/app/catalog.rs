//! services/client/src/app/catalog.rs
//!
//! The read-mostly catalog cache: courses, reviews, announcements, the badge
//! catalog, and both ranking boards, fetched once at startup. Each request
//! fails independently; a failed slice stays empty while the rest populate,
//! and the UI remains usable with partial data.

use crate::app::state::AppState;
use crate::app::store::Action;
use galmaetgil_core::domain::CourseId;
use galmaetgil_core::ports::PortError;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Loads every catalog slice concurrently. Never fails; each slice either
/// populates or is logged and left empty.
pub async fn load_all(state: &AppState) {
    let (courses, reviews, announcements, badges, course_rankings, global_ranking) = futures::join!(
        state.backend.list_courses(),
        state.backend.list_reviews(),
        state.backend.list_announcements(),
        state.backend.badge_catalog(),
        state.backend.course_rankings(),
        state.backend.global_ranking(),
    );

    populate(state, "courses", courses, Action::CoursesLoaded);
    populate(state, "reviews", reviews, Action::ReviewsLoaded);
    populate(state, "announcements", announcements, Action::AnnouncementsLoaded);
    populate(state, "badge catalog", badges, Action::BadgeCatalogLoaded);
    populate(state, "course rankings", course_rankings, Action::CourseRankingsLoaded);
    populate(state, "global ranking", global_ranking, Action::GlobalRankingLoaded);
}

fn populate<T>(state: &AppState, slice: &str, result: Result<T, PortError>, into: fn(T) -> Action) {
    match result {
        Ok(value) => state.store.dispatch(into(value)),
        Err(e) => warn!("catalog load failed for {slice}: {e}"),
    }
}

/// Opens a course detail view: the cached entry is shown immediately, then
/// refreshed from the backend for freshness. A failed refresh keeps the
/// cached value.
pub async fn open_course(state: &AppState, course_id: CourseId) {
    let cached = state
        .store
        .with(|data| data.courses.iter().find(|c| c.id == course_id).cloned());
    if let Some(course) = cached {
        state.store.dispatch(Action::CourseSelected(course));
    }

    match state.backend.get_course(course_id).await {
        Ok(course) => state.store.dispatch(Action::CourseSelected(course)),
        Err(e) => warn!("course {course_id} refresh failed: {e}"),
    }
}

pub fn close_course(state: &AppState) {
    state.store.dispatch(Action::CourseDeselected);
}

/// Spawns the visitor-count poller: an independent fixed-interval sub-fetch,
/// the only periodic refresh in the client. Stops when `cancel` is triggered.
pub fn spawn_visitor_poll(state: AppState, cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    let interval = state.config.visitor_poll_interval;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("visitor poller stopped");
                    return;
                }
                _ = ticker.tick() => {
                    match state.backend.visitor_count_today().await {
                        Ok(count) => state.store.dispatch(Action::VisitorCountUpdated(count)),
                        Err(e) => warn!("visitor count fetch failed: {e}"),
                    }
                }
            }
        }
    })
}
