//! services/client/src/app/router.rs
//!
//! Maps the URL path to one of a fixed set of page states, evaluated once at
//! startup after session resolution and the catalog load have both settled.
//! Subsequent navigation is a finite set of named pages chosen by explicit
//! user action; the browser keeps its own native history.

use crate::app::state::AppState;
use crate::app::store::Action;
use galmaetgil_core::domain::Notice;

/// Where the social-login provider redirects back to. The session loader has
/// already consumed the token by the time the router runs.
pub const AUTH_CALLBACK_PATH: &str = "/auth/callback";
/// One-shot page that completes a social signup.
pub const REGISTER_SOCIAL_PATH: &str = "/register-social";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Shown only during the initial startup sequence.
    Loading,
    Home,
    Courses,
    Map,
    About,
    Community,
    MyPage,
    RegisterSocial,
}

/// Pure page selection from the startup path.
pub fn select(path: &str) -> Page {
    match path {
        // Post-processing is already done by the session loader.
        AUTH_CALLBACK_PATH => Page::Home,
        REGISTER_SOCIAL_PATH => Page::RegisterSocial,
        _ => Page::Home,
    }
}

/// Soft client-side navigation after startup. MyPage needs a session.
pub fn navigate(state: &AppState, page: Page) {
    if page == Page::MyPage && !state.store.is_logged_in() {
        state
            .notifier
            .notify(Notice::error("로그인이 필요합니다."));
        return;
    }
    state.store.dispatch(Action::PageChanged(page));
}
