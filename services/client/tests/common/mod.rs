//! Shared test doubles: in-memory implementations of the core ports, so the
//! coordinators can be exercised without a backend.

// Not every test binary uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use client_lib::app::AppState;
use client_lib::config::Config;
use galmaetgil_core::domain::{
    Announcement, Badge, Challenge, Course, CourseId, CourseRanking, CourseSection, Credentials,
    GlobalRanking, NewReview, Notice, Registration, Review, SectionKey, UserProfile,
};
use galmaetgil_core::ports::{BackendService, Notifier, PortError, PortResult, TokenStore};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::Level;

//=========================================================================================
// Sample Domain Values
//=========================================================================================

pub fn sample_badge(id: i64, name: &str) -> Badge {
    Badge {
        id,
        name: name.to_string(),
        description: String::new(),
        icon: String::new(),
        condition: String::new(),
        rarity: "common".to_string(),
    }
}

pub fn sample_course(id: CourseId) -> Course {
    Course {
        id,
        name: format!("갈맷길 {id}코스"),
        description: String::new(),
        distance_km: 12.0,
        duration: "4시간".to_string(),
        difficulty: "보통".to_string(),
        region: "부산".to_string(),
        sections: vec![
            CourseSection {
                id: 1,
                name: "1구간".to_string(),
                distance_km: 6.0,
                start_point: "A".to_string(),
                end_point: "B".to_string(),
            },
            CourseSection {
                id: 2,
                name: "2구간".to_string(),
                distance_km: 6.0,
                start_point: "B".to_string(),
                end_point: "C".to_string(),
            },
        ],
        completed_count: 0,
    }
}

pub fn sample_profile(id: i64) -> UserProfile {
    UserProfile {
        id,
        email: format!("user{id}@example.com"),
        nickname: format!("walker{id}"),
        region: "해운대구".to_string(),
        join_date: Utc::now(),
        total_distance_km: 0.0,
        completed_courses: Vec::new(),
        badges: Vec::new(),
        favorites: BTreeSet::new(),
    }
}

//=========================================================================================
// Mock Backend
//=========================================================================================

/// A `BackendService` whose behavior is tweaked per test through flags.
#[derive(Default)]
pub struct MockBackend {
    /// `None` makes profile resolution fail with `Unauthorized`.
    pub profile: Mutex<Option<UserProfile>>,
    /// `None` makes the challenges sub-fetch fail.
    pub challenges: Mutex<Option<Vec<Challenge>>>,
    pub courses: Mutex<Vec<Course>>,
    pub login_token: Mutex<Option<String>>,
    pub social_token: Mutex<Option<String>>,

    pub fail_courses: AtomicBool,
    pub fail_reviews: AtomicBool,
    pub fail_toggle: AtomicBool,
    /// Makes `toggle_favorite` never resolve, for optimistic-visibility tests.
    pub hang_toggle: AtomicBool,
    pub fail_confirm: AtomicBool,

    pub toggle_calls: AtomicUsize,
    pub confirm_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
}

impl MockBackend {
    pub fn with_profile(profile: UserProfile) -> Self {
        let backend = Self::default();
        *backend.profile.lock().unwrap() = Some(profile);
        *backend.challenges.lock().unwrap() = Some(Vec::new());
        backend
    }
}

fn unexpected() -> PortError {
    PortError::Unexpected("injected failure".to_string())
}

#[async_trait]
impl BackendService for MockBackend {
    async fn fetch_profile(&self, _token: Option<&str>) -> PortResult<UserProfile> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.profile
            .lock()
            .unwrap()
            .clone()
            .ok_or(PortError::Unauthorized)
    }

    async fn fetch_challenges(&self, _token: Option<&str>) -> PortResult<Vec<Challenge>> {
        self.challenges.lock().unwrap().clone().ok_or_else(unexpected)
    }

    async fn login(&self, _credentials: &Credentials) -> PortResult<String> {
        self.login_token
            .lock()
            .unwrap()
            .clone()
            .ok_or(PortError::Unauthorized)
    }

    async fn register(&self, _registration: &Registration) -> PortResult<()> {
        Ok(())
    }

    async fn register_social(
        &self,
        _guest_token: &str,
        _nickname: &str,
        _region: &str,
    ) -> PortResult<String> {
        self.social_token
            .lock()
            .unwrap()
            .clone()
            .ok_or(PortError::Unauthorized)
    }

    async fn list_courses(&self) -> PortResult<Vec<Course>> {
        if self.fail_courses.load(Ordering::SeqCst) {
            return Err(unexpected());
        }
        Ok(self.courses.lock().unwrap().clone())
    }

    async fn get_course(&self, course_id: CourseId) -> PortResult<Course> {
        self.courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == course_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("course {course_id}")))
    }

    async fn list_reviews(&self) -> PortResult<Vec<Review>> {
        if self.fail_reviews.load(Ordering::SeqCst) {
            return Err(unexpected());
        }
        Ok(Vec::new())
    }

    async fn list_announcements(&self) -> PortResult<Vec<Announcement>> {
        Ok(Vec::new())
    }

    async fn badge_catalog(&self) -> PortResult<Vec<Badge>> {
        Ok(vec![sample_badge(1, "새싹 탐험가"), sample_badge(2, "코스 마스터")])
    }

    async fn course_rankings(&self) -> PortResult<Vec<CourseRanking>> {
        Ok(Vec::new())
    }

    async fn global_ranking(&self) -> PortResult<GlobalRanking> {
        Ok(GlobalRanking::empty())
    }

    async fn visitor_count_today(&self) -> PortResult<u64> {
        Ok(42)
    }

    async fn toggle_favorite(&self, _token: Option<&str>, _course_id: CourseId) -> PortResult<()> {
        self.toggle_calls.fetch_add(1, Ordering::SeqCst);
        if self.hang_toggle.load(Ordering::SeqCst) {
            futures::future::pending::<()>().await;
        }
        if self.fail_toggle.load(Ordering::SeqCst) {
            return Err(unexpected());
        }
        Ok(())
    }

    async fn confirm_section(&self, _token: Option<&str>, _key: SectionKey) -> PortResult<()> {
        self.confirm_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_confirm.load(Ordering::SeqCst) {
            return Err(unexpected());
        }
        Ok(())
    }

    async fn create_review(&self, _token: Option<&str>, review: &NewReview) -> PortResult<Review> {
        Ok(Review {
            id: 1,
            course_id: review.course_id,
            user_id: 1,
            user_name: "walker1".to_string(),
            rating: review.rating,
            content: review.content.clone(),
            photos: Vec::new(),
            date: Utc::now(),
            likes: 0,
        })
    }
}

//=========================================================================================
// Mock Token Store & Recording Notifier
//=========================================================================================

#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }

    pub fn current(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) -> PortResult<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn read(&self) -> PortResult<Option<String>> {
        Ok(self.token.lock().unwrap().clone())
    }

    fn clear(&self) -> PortResult<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
    pub badges: Mutex<Vec<Badge>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }

    fn badge_awarded(&self, badge: &Badge) {
        self.badges.lock().unwrap().push(badge.clone());
    }
}

//=========================================================================================
// Wiring
//=========================================================================================

pub fn test_config() -> Config {
    Config {
        api_base_url: "http://backend.invalid".to_string(),
        token_path: PathBuf::from("/tmp/unused"),
        log_level: Level::INFO,
        request_timeout: Duration::from_secs(1),
        visitor_poll_interval: Duration::from_secs(3600),
    }
}

pub struct Harness {
    pub state: AppState,
    pub backend: Arc<MockBackend>,
    pub tokens: Arc<MemoryTokenStore>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness(backend: MockBackend, tokens: MemoryTokenStore) -> Harness {
    let backend = Arc::new(backend);
    let tokens = Arc::new(tokens);
    let notifier = Arc::new(RecordingNotifier::default());
    let state = AppState::new(
        backend.clone(),
        tokens.clone(),
        notifier.clone(),
        Arc::new(test_config()),
    );
    Harness {
        state,
        backend,
        tokens,
        notifier,
    }
}
