//! services/client/src/app/auth.rs
//!
//! Login, logout, registration, and the social-login handoff. The social
//! providers are reached by plain redirect; the only client-side protocol
//! logic is constructing the redirect URL.

use crate::app::router::Page;
use crate::app::session;
use crate::app::state::AppState;
use crate::app::store::Action;
use galmaetgil_core::domain::{Credentials, Notice, Registration};
use tracing::warn;

/// Supported social-login providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Kakao,
    Naver,
}

impl Provider {
    fn slug(self) -> &'static str {
        match self {
            Provider::Kakao => "kakao",
            Provider::Naver => "naver",
        }
    }
}

/// The externally hosted OAuth entry point for `provider`. Navigating the
/// browser there starts the handoff; the provider redirects back to the
/// callback path with a token in the query string.
pub fn social_login_url(state: &AppState, provider: Provider) -> String {
    format!(
        "{}/oauth2/authorization/{}",
        state.config.api_base_url,
        urlencoding::encode(provider.slug())
    )
}

/// Password login: exchanges credentials for a token, persists it, and
/// resolves the session. Returns whether a session is now present.
pub async fn login(state: &AppState, credentials: &Credentials) -> bool {
    match state.backend.login(credentials).await {
        Ok(token) => {
            session::resolve(state, Some(&token), "/").await;
            let logged_in = state.store.is_logged_in();
            if logged_in {
                state.notifier.notify(Notice::success("로그인되었습니다."));
            }
            logged_in
        }
        Err(e) => {
            warn!("login failed: {e}");
            state
                .notifier
                .notify(Notice::error("로그인에 실패했습니다."));
            false
        }
    }
}

/// Creates an account. The caller logs in afterwards.
pub async fn register(state: &AppState, registration: &Registration) -> bool {
    match state.backend.register(registration).await {
        Ok(()) => {
            state
                .notifier
                .notify(Notice::success("회원가입이 완료되었습니다!"));
            true
        }
        Err(e) => {
            warn!("registration failed: {e}");
            state
                .notifier
                .notify(Notice::error("회원가입에 실패했습니다."));
            false
        }
    }
}

/// Completes a social signup: trades the guest token from the callback URL
/// plus the collected profile fields for a permanent token, persists it, and
/// resolves the session.
pub async fn register_social(
    state: &AppState,
    guest_token: &str,
    nickname: &str,
    region: &str,
) -> bool {
    match state
        .backend
        .register_social(guest_token, nickname, region)
        .await
    {
        Ok(token) => {
            session::resolve(state, Some(&token), "/").await;
            state
                .notifier
                .notify(Notice::success("회원가입이 완료되었습니다! 환영합니다!"));
            state.store.is_logged_in()
        }
        Err(e) => {
            warn!("social registration failed: {e}");
            state
                .notifier
                .notify(Notice::error("회원가입에 실패했습니다."));
            false
        }
    }
}

/// Explicit logout: clears the persisted token and every session slice.
pub fn logout(state: &AppState) {
    if let Err(e) = state.tokens.clear() {
        warn!("token store clear failed: {e}");
    }
    state.store.dispatch(Action::SessionCleared);
    state.store.dispatch(Action::PageChanged(Page::Home));
    state
        .notifier
        .notify(Notice::success("로그아웃되었습니다."));
}
