//! services/client/src/app/scan.rs
//!
//! The section-completion tracker: validates scanned proof-of-presence codes
//! against the currently open course and maintains the deduplicated set of
//! completed section keys. One scan runs the whole
//! idle → validating → accepted/rejected cycle and always returns control to
//! idle (the scanning UI is dismissed either way).

use crate::app::session;
use crate::app::state::AppState;
use crate::app::store::Action;
use galmaetgil_core::domain::{CourseId, Notice, SectionKey};
use tracing::{info, warn};

/// Proof codes are printed as `GALMAETGIL_<course>-<section>`.
const CODE_PREFIX: &str = "GALMAETGIL_";

/// Terminal state of one scan cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// First valid scan of this section: key inserted, session refreshed.
    Completed(SectionKey),
    /// Idempotent no-op; the key was already present.
    AlreadyCompleted(SectionKey),
    /// The code belongs to a different course than the one on screen.
    WrongCourse { expected: CourseId },
    /// The code does not parse.
    Malformed,
    /// The backend declined the proof; the set is unchanged.
    RemoteRejected,
    /// No session or no open course detail; nothing to validate against.
    NotReady,
}

/// Parses a raw scanned string into a section key.
pub fn parse_code(raw: &str) -> Option<SectionKey> {
    let body = raw.strip_prefix(CODE_PREFIX)?;
    let (course, section) = body.split_once('-')?;
    let course_id = course.parse().ok()?;
    let section_id = section.parse().ok()?;
    Some(SectionKey::new(course_id, section_id))
}

/// Handles one scanned code end to end.
pub async fn handle_scan(state: &AppState, raw: &str) -> ScanOutcome {
    let open_course = state.store.with(|data| {
        data.user
            .as_ref()
            .and_then(|_| data.selected_course.as_ref().map(|c| (c.id, c.name.clone())))
    });
    let Some((expected, course_name)) = open_course else {
        return ScanOutcome::NotReady;
    };

    let Some(key) = parse_code(raw) else {
        state
            .notifier
            .notify(Notice::error("인식할 수 없는 코드입니다."));
        return ScanOutcome::Malformed;
    };

    if key.course_id != expected {
        state.notifier.notify(Notice::error(format!(
            "잘못된 코스입니다. 현재 {expected}코스 페이지입니다."
        )));
        return ScanOutcome::WrongCourse { expected };
    }

    if state.store.with(|data| data.completed_sections.contains(&key)) {
        state.notifier.notify(Notice::info(format!(
            "이미 인증된 구간입니다 ({}구간).",
            key.section_id
        )));
        return ScanOutcome::AlreadyCompleted(key);
    }

    // Server-side proof validation precedes the local insertion; the server
    // owns the durable completion record.
    let bearer = state.bearer_token();
    match state.backend.confirm_section(bearer.as_deref(), key).await {
        Ok(()) => {
            state.store.dispatch(Action::SectionCompleted(key));
            state.notifier.notify(Notice::success(format!(
                "{}의 {}구간 인증 성공!",
                course_name, key.section_id
            )));
            info!(%key, "section completed");
            // Pick up any newly completed course or newly awarded badge
            // computed server-side.
            session::resolve(state, None, "/").await;
            ScanOutcome::Completed(key)
        }
        Err(e) => {
            warn!(%key, "section confirmation rejected: {e}");
            state
                .notifier
                .notify(Notice::error("구간 인증에 실패했습니다."));
            ScanOutcome::RemoteRejected
        }
    }
}
