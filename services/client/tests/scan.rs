//! Section-completion tracking: idempotent insertion, course mismatch
//! rejection, malformed codes, and remote rejection.

mod common;

use common::{harness, sample_course, sample_profile, Harness, MemoryTokenStore, MockBackend};
use client_lib::app::scan::{handle_scan, ScanOutcome};
use client_lib::app::{catalog, session};
use galmaetgil_core::domain::SectionKey;
use std::sync::atomic::Ordering;

/// A harness with a resolved session and course 3 open in the detail view.
async fn viewing_course_three() -> Harness {
    let backend = MockBackend::with_profile(sample_profile(1));
    backend.courses.lock().unwrap().push(sample_course(3));
    let h = harness(backend, MemoryTokenStore::with_token("token"));
    session::resolve(&h.state, None, "/").await;
    catalog::open_course(&h.state, 3).await;
    h
}

#[tokio::test]
async fn first_scan_inserts_second_scan_is_a_no_op() {
    let h = viewing_course_three().await;

    let outcome = handle_scan(&h.state, "GALMAETGIL_3-1").await;
    assert_eq!(outcome, ScanOutcome::Completed(SectionKey::new(3, 1)));
    assert!(h
        .state
        .store
        .with(|d| d.completed_sections.contains(&SectionKey::new(3, 1))));

    let outcome = handle_scan(&h.state, "GALMAETGIL_3-1").await;
    assert_eq!(outcome, ScanOutcome::AlreadyCompleted(SectionKey::new(3, 1)));

    // Exactly one membership, one confirmation, one success notice.
    assert_eq!(h.state.store.with(|d| d.completed_sections.len()), 1);
    assert_eq!(h.backend.confirm_calls.load(Ordering::SeqCst), 1);
    let successes = h
        .notifier
        .messages()
        .iter()
        .filter(|m| m.contains("인증 성공"))
        .count();
    assert_eq!(successes, 1);
}

#[tokio::test]
async fn code_for_another_course_is_rejected_naming_the_open_one() {
    let h = viewing_course_three().await;

    let outcome = handle_scan(&h.state, "GALMAETGIL_5-2").await;

    assert_eq!(outcome, ScanOutcome::WrongCourse { expected: 3 });
    assert!(h.state.store.with(|d| d.completed_sections.is_empty()));
    assert_eq!(h.backend.confirm_calls.load(Ordering::SeqCst), 0);
    let messages = h.notifier.messages();
    assert!(messages.last().unwrap().contains('3'));
}

#[tokio::test]
async fn malformed_code_is_rejected_without_mutation() {
    let h = viewing_course_three().await;

    assert_eq!(handle_scan(&h.state, "not-a-code").await, ScanOutcome::Malformed);
    assert_eq!(handle_scan(&h.state, "GALMAETGIL_x-y").await, ScanOutcome::Malformed);
    assert!(h.state.store.with(|d| d.completed_sections.is_empty()));
}

#[tokio::test]
async fn remote_rejection_leaves_the_set_unchanged() {
    let h = viewing_course_three().await;
    h.backend.fail_confirm.store(true, Ordering::SeqCst);

    let outcome = handle_scan(&h.state, "GALMAETGIL_3-1").await;

    assert_eq!(outcome, ScanOutcome::RemoteRejected);
    assert!(h.state.store.with(|d| d.completed_sections.is_empty()));
}

#[tokio::test]
async fn scanning_without_an_open_course_does_nothing() {
    let backend = MockBackend::with_profile(sample_profile(1));
    let h = harness(backend, MemoryTokenStore::with_token("token"));
    session::resolve(&h.state, None, "/").await;

    assert_eq!(handle_scan(&h.state, "GALMAETGIL_3-1").await, ScanOutcome::NotReady);
    assert!(h.state.store.with(|d| d.completed_sections.is_empty()));
}

#[tokio::test]
async fn successful_scan_refreshes_the_session() {
    let h = viewing_course_three().await;
    let before = h.backend.profile_calls.load(Ordering::SeqCst);

    handle_scan(&h.state, "GALMAETGIL_3-2").await;

    assert!(h.backend.profile_calls.load(Ordering::SeqCst) > before);
}
