pub mod domain;
pub mod ports;

pub use domain::{
    Announcement, Badge, Challenge, Course, CourseSection, Credentials, GlobalRanking, NewReview,
    Notice, NoticeLevel, Registration, Review, SectionKey, UserProfile,
};
pub use ports::{BackendService, Notifier, PortError, PortResult, TokenStore};
