//! crates/galmaetgil_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any wire or serialization format;
//! the HTTP adapter owns the mapping from backend payloads.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::fmt;

/// Every identifier handed out by the backend is numeric.
pub type CourseId = i64;
pub type SectionId = i64;
pub type UserId = i64;
pub type BadgeId = i64;
pub type ReviewId = i64;

/// The (course, section) tuple used as the deduplication key for
/// completion tracking. Serialized as `"<course>-<section>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionKey {
    pub course_id: CourseId,
    pub section_id: SectionId,
}

impl SectionKey {
    pub fn new(course_id: CourseId, section_id: SectionId) -> Self {
        Self {
            course_id,
            section_id,
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.course_id, self.section_id)
    }
}

/// Represents the current user, as resolved from the backend.
///
/// Optional backend collections (favorites, completed courses, badges) are
/// normalized to empty exactly once, at the HTTP adapter boundary; consumers
/// never re-derive defaults.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub nickname: String,
    pub region: String,
    pub join_date: DateTime<Utc>,
    pub total_distance_km: f64,
    pub completed_courses: Vec<CourseId>,
    pub badges: Vec<Badge>,
    pub favorites: BTreeSet<CourseId>,
}

/// A badge from the catalog, also used for the per-user awarded relation.
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub id: BadgeId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub condition: String,
    pub rarity: String,
}

/// A sub-unit of a course with its own waypoints and proof-code namespace.
#[derive(Debug, Clone)]
pub struct CourseSection {
    pub id: SectionId,
    pub name: String,
    pub distance_km: f64,
    pub start_point: String,
    pub end_point: String,
}

/// A static catalog entity, read-only from the client's perspective.
#[derive(Debug, Clone)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub description: String,
    pub distance_km: f64,
    pub duration: String,
    pub difficulty: String,
    pub region: String,
    pub sections: Vec<CourseSection>,
    pub completed_count: u64,
}

#[derive(Debug, Clone)]
pub struct Review {
    pub id: ReviewId,
    pub course_id: CourseId,
    pub user_id: UserId,
    pub user_name: String,
    pub rating: u8,
    pub content: String,
    pub photos: Vec<String>,
    pub date: DateTime<Utc>,
    pub likes: u64,
}

/// Payload for creating a review: JSON metadata plus image attachments.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub course_id: CourseId,
    pub rating: u8,
    pub content: String,
    pub photos: Vec<PhotoAttachment>,
}

#[derive(Debug, Clone)]
pub struct PhotoAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementCategory {
    Notice,
    Event,
    Maintenance,
}

#[derive(Debug, Clone)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub category: AnnouncementCategory,
}

/// One row of a ranking board.
#[derive(Debug, Clone)]
pub struct UserRanking {
    pub user_id: UserId,
    pub user_name: String,
    pub rank: u32,
    pub total_distance_km: f64,
    pub completion_count: u32,
}

#[derive(Debug, Clone)]
pub struct CourseRanking {
    pub course_id: CourseId,
    pub course_name: String,
    pub rankings: Vec<UserRanking>,
}

#[derive(Debug, Clone)]
pub struct GlobalRanking {
    pub period: String,
    pub rankings: Vec<UserRanking>,
    pub last_updated: DateTime<Utc>,
}

impl GlobalRanking {
    /// The placeholder shown before the first fetch completes.
    pub fn empty() -> Self {
        Self {
            period: "all-time".to_string(),
            rankings: Vec::new(),
            last_updated: Utc::now(),
        }
    }
}

/// A per-user challenge with its progress toward a target.
#[derive(Debug, Clone)]
pub struct Challenge {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub target: u32,
    pub current: u32,
    pub reward: String,
    pub completed: bool,
}

/// Credentials for a password login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Fields collected at registration time.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub nickname: String,
    pub region: String,
}

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A transient, user-visible notification (the toast surface).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
