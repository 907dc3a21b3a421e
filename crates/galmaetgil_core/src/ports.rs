//! crates/galmaetgil_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations like the HTTP
//! backend or on-disk token storage.

use async_trait::async_trait;
use crate::domain::{
    Announcement, Badge, Challenge, Course, CourseId, CourseRanking, Credentials, GlobalRanking,
    NewReview, Notice, Registration, Review, SectionKey, UserProfile,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services
/// (e.g., transport, storage).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The backend rejected the credential (missing, invalid, or expired).
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The remote REST backend. The `token` parameter carries the bearer
/// credential when one is present; `None` relies on the ambient cookie
/// that the transport sends transparently.
#[async_trait]
pub trait BackendService: Send + Sync {
    // --- Session ---
    async fn fetch_profile(&self, token: Option<&str>) -> PortResult<UserProfile>;
    async fn fetch_challenges(&self, token: Option<&str>) -> PortResult<Vec<Challenge>>;

    // --- Auth ---
    async fn login(&self, credentials: &Credentials) -> PortResult<String>;
    async fn register(&self, registration: &Registration) -> PortResult<()>;
    /// Completes a social signup: exchanges the guest token plus profile
    /// fields for a permanent token.
    async fn register_social(
        &self,
        guest_token: &str,
        nickname: &str,
        region: &str,
    ) -> PortResult<String>;

    // --- Catalog reads ---
    async fn list_courses(&self) -> PortResult<Vec<Course>>;
    async fn get_course(&self, course_id: CourseId) -> PortResult<Course>;
    async fn list_reviews(&self) -> PortResult<Vec<Review>>;
    async fn list_announcements(&self) -> PortResult<Vec<Announcement>>;
    async fn badge_catalog(&self) -> PortResult<Vec<Badge>>;
    async fn course_rankings(&self) -> PortResult<Vec<CourseRanking>>;
    async fn global_ranking(&self) -> PortResult<GlobalRanking>;
    async fn visitor_count_today(&self) -> PortResult<u64>;

    // --- Mutations ---
    /// Toggle membership of `course_id` in the current user's favorites.
    /// Idempotent-toggle semantics on the backend; no body beyond auth.
    async fn toggle_favorite(&self, token: Option<&str>, course_id: CourseId) -> PortResult<()>;
    /// Server-side proof validation for a scanned section code.
    async fn confirm_section(&self, token: Option<&str>, key: SectionKey) -> PortResult<()>;
    async fn create_review(&self, token: Option<&str>, review: &NewReview) -> PortResult<Review>;
}

/// Durable storage for the opaque bearer credential. Read at startup,
/// written only by the session loader and explicit logout.
pub trait TokenStore: Send + Sync {
    fn save(&self, token: &str) -> PortResult<()>;
    fn read(&self) -> PortResult<Option<String>>;
    fn clear(&self) -> PortResult<()>;
}

/// The UI notification surface (toasts, badge celebration modal).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
    /// A newly awarded badge was detected; the UI shows a celebration.
    fn badge_awarded(&self, badge: &Badge);
}
