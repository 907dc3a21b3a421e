//! Optimistic favorite toggling: synchronous visibility, rollback on remote
//! failure, and the login precondition.

mod common;

use common::{harness, sample_profile, MemoryTokenStore, MockBackend};
use client_lib::app::favorites::{toggle_favorite, ToggleOutcome};
use client_lib::app::session;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn toggle_requires_a_session() {
    let h = harness(MockBackend::default(), MemoryTokenStore::default());

    let outcome = toggle_favorite(&h.state, 7).await;

    assert_eq!(outcome, ToggleOutcome::NotLoggedIn);
    assert!(h.state.store.with(|d| d.favorites.is_empty()));
    assert_eq!(h.backend.toggle_calls.load(Ordering::SeqCst), 0);
    assert!(!h.notifier.messages().is_empty());
}

#[tokio::test]
async fn successful_toggle_adds_then_removes() {
    let h = harness(
        MockBackend::with_profile(sample_profile(1)),
        MemoryTokenStore::with_token("token"),
    );
    session::resolve(&h.state, None, "/").await;

    assert_eq!(toggle_favorite(&h.state, 7).await, ToggleOutcome::Applied);
    assert!(h.state.store.with(|d| d.favorites.contains(&7)));

    assert_eq!(toggle_favorite(&h.state, 7).await, ToggleOutcome::Applied);
    assert!(!h.state.store.with(|d| d.favorites.contains(&7)));
    assert_eq!(h.backend.toggle_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_toggle_rolls_back_to_pre_toggle_membership() {
    let h = harness(
        MockBackend::with_profile(sample_profile(1)),
        MemoryTokenStore::with_token("token"),
    );
    session::resolve(&h.state, None, "/").await;
    h.backend.fail_toggle.store(true, Ordering::SeqCst);

    // Not present before, must not be present after.
    let outcome = toggle_favorite(&h.state, 7).await;
    assert_eq!(outcome, ToggleOutcome::RolledBack);
    assert!(!h.state.store.with(|d| d.favorites.contains(&7)));

    // Present before (optimistically added while the mock succeeded), must
    // be restored to present after a failed removal.
    h.backend.fail_toggle.store(false, Ordering::SeqCst);
    toggle_favorite(&h.state, 9).await;
    h.backend.fail_toggle.store(true, Ordering::SeqCst);
    let outcome = toggle_favorite(&h.state, 9).await;
    assert_eq!(outcome, ToggleOutcome::RolledBack);
    assert!(h.state.store.with(|d| d.favorites.contains(&9)));
}

#[tokio::test]
async fn flip_is_visible_before_the_network_call_resolves() {
    let h = harness(
        MockBackend::with_profile(sample_profile(1)),
        MemoryTokenStore::with_token("token"),
    );
    session::resolve(&h.state, None, "/").await;
    h.backend.hang_toggle.store(true, Ordering::SeqCst);

    let state = h.state.clone();
    let pending = tokio::spawn(async move { toggle_favorite(&state, 7).await });
    // Let the coordinator run up to its stalled network call.
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }

    assert!(h.state.store.with(|d| d.favorites.contains(&7)));
    assert_eq!(h.backend.toggle_calls.load(Ordering::SeqCst), 1);
    pending.abort();
}
