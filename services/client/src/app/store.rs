//! services/client/src/app/store.rs
//!
//! The single owned state container for the client. Every mutation is an
//! explicit `Action` applied through one dispatch path, so ordering and
//! rollback stay auditable; the scattered per-slice setters of a typical
//! UI layer collapse into `apply`.
//!
//! Nothing is held across an await point: callers take a snapshot or apply
//! an action, and the lock is released before any network call is issued.

use crate::app::router::Page;
use galmaetgil_core::domain::{
    Announcement, Badge, Challenge, Course, CourseId, CourseRanking, GlobalRanking, Review,
    SectionKey, UserProfile,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

//=========================================================================================
// State Snapshot
//=========================================================================================

/// The full client-side state, rebuilt from the backend on every load.
#[derive(Debug, Clone)]
pub struct AppData {
    pub user: Option<UserProfile>,
    pub challenges: Vec<Challenge>,

    // Read-mostly catalog slices, each populated independently.
    pub courses: Vec<Course>,
    pub reviews: Vec<Review>,
    pub announcements: Vec<Announcement>,
    pub badge_catalog: Vec<Badge>,
    pub course_rankings: Vec<CourseRanking>,
    pub global_ranking: GlobalRanking,
    pub visitor_count_today: Option<u64>,

    // Per-user mutable slices.
    pub favorites: BTreeSet<CourseId>,
    pub completed_courses: Vec<CourseId>,
    pub my_badges: Vec<Badge>,
    /// Section keys proven during this session; the durable record is the
    /// server-side completion state, reconciled on the next session refresh.
    pub completed_sections: BTreeSet<SectionKey>,

    // UI-facing selections.
    pub selected_course: Option<Course>,
    pub new_badge: Option<Badge>,
    pub page: Page,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            user: None,
            challenges: Vec::new(),
            courses: Vec::new(),
            reviews: Vec::new(),
            announcements: Vec::new(),
            badge_catalog: Vec::new(),
            course_rankings: Vec::new(),
            global_ranking: GlobalRanking::empty(),
            visitor_count_today: None,
            favorites: BTreeSet::new(),
            completed_courses: Vec::new(),
            my_badges: Vec::new(),
            completed_sections: BTreeSet::new(),
            selected_course: None,
            new_badge: None,
            page: Page::Loading,
        }
    }
}

//=========================================================================================
// Actions
//=========================================================================================

/// Every mutation of `AppData`, named.
#[derive(Debug, Clone)]
pub enum Action {
    LoginSucceeded(UserProfile),
    SessionCleared,
    ChallengesLoaded(Vec<Challenge>),
    ChallengesCleared,

    CoursesLoaded(Vec<Course>),
    ReviewsLoaded(Vec<Review>),
    AnnouncementsLoaded(Vec<Announcement>),
    BadgeCatalogLoaded(Vec<Badge>),
    CourseRankingsLoaded(Vec<CourseRanking>),
    GlobalRankingLoaded(GlobalRanking),
    VisitorCountUpdated(u64),

    CourseSelected(Course),
    CourseDeselected,
    ReviewAdded(Review),

    FavoriteToggled { course_id: CourseId, seq: u64 },
    /// Inverse of a failed toggle. Applied only while `seq` is still the
    /// newest toggle for that course; a stale rollback is discarded
    /// (last-write-wins, see DESIGN.md).
    FavoriteRolledBack { course_id: CourseId, seq: u64 },

    SectionCompleted(SectionKey),
    BadgeAwarded(Badge),
    BadgeModalDismissed,
    PageChanged(Page),
}

//=========================================================================================
// The Store
//=========================================================================================

struct Inner {
    data: AppData,
    /// Latest toggle sequence per course id.
    favorite_seqs: HashMap<CourseId, u64>,
    next_seq: u64,
}

/// The state container. Shared as `Arc<Store>` across coordinators.
pub struct Store {
    inner: Mutex<Inner>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                data: AppData::default(),
                favorite_seqs: HashMap::new(),
                next_seq: 0,
            }),
        }
    }

    /// Applies one action. The only mutation path.
    pub fn dispatch(&self, action: Action) {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        apply(&mut inner, action);
    }

    /// Flips favorite membership for `course_id` and returns the sequence
    /// number the caller must present to roll the flip back. The flip and
    /// the sequence assignment are atomic.
    pub fn begin_favorite_toggle(&self, course_id: CourseId) -> u64 {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        inner.next_seq += 1;
        let seq = inner.next_seq;
        apply(&mut inner, Action::FavoriteToggled { course_id, seq });
        seq
    }

    /// Rolls back the toggle identified by `seq`. Returns whether the
    /// rollback was applied (false when a newer toggle superseded it).
    pub fn rollback_favorite(&self, course_id: CourseId, seq: u64) -> bool {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        let applies = inner.favorite_seqs.get(&course_id) == Some(&seq);
        apply(&mut inner, Action::FavoriteRolledBack { course_id, seq });
        applies
    }

    /// Reads a value out of the current state.
    pub fn with<R>(&self, f: impl FnOnce(&AppData) -> R) -> R {
        let inner = self.inner.lock().expect("store lock poisoned");
        f(&inner.data)
    }

    /// Clones the full state. Test and shell convenience.
    pub fn snapshot(&self) -> AppData {
        self.with(Clone::clone)
    }

    pub fn is_logged_in(&self) -> bool {
        self.with(|data| data.user.is_some())
    }
}

fn apply(inner: &mut Inner, action: Action) {
    let data = &mut inner.data;
    match action {
        Action::LoginSucceeded(user) => {
            data.favorites = user.favorites.clone();
            data.completed_courses = user.completed_courses.clone();
            data.my_badges = user.badges.clone();
            data.user = Some(user);
        }
        Action::SessionCleared => {
            data.user = None;
            data.challenges.clear();
            data.favorites.clear();
            data.completed_courses.clear();
            data.my_badges.clear();
            data.completed_sections.clear();
        }
        Action::ChallengesLoaded(challenges) => data.challenges = challenges,
        Action::ChallengesCleared => data.challenges.clear(),

        Action::CoursesLoaded(courses) => data.courses = courses,
        Action::ReviewsLoaded(reviews) => data.reviews = reviews,
        Action::AnnouncementsLoaded(announcements) => data.announcements = announcements,
        Action::BadgeCatalogLoaded(badges) => data.badge_catalog = badges,
        Action::CourseRankingsLoaded(rankings) => data.course_rankings = rankings,
        Action::GlobalRankingLoaded(ranking) => data.global_ranking = ranking,
        Action::VisitorCountUpdated(count) => data.visitor_count_today = Some(count),

        Action::CourseSelected(course) => data.selected_course = Some(course),
        Action::CourseDeselected => data.selected_course = None,
        Action::ReviewAdded(review) => data.reviews.insert(0, review),

        Action::FavoriteToggled { course_id, seq } => {
            inner.favorite_seqs.insert(course_id, seq);
            flip_membership(&mut data.favorites, course_id);
        }
        Action::FavoriteRolledBack { course_id, seq } => {
            // A newer toggle owns the slot now; this rollback is stale.
            if inner.favorite_seqs.get(&course_id) == Some(&seq) {
                flip_membership(&mut data.favorites, course_id);
                inner.favorite_seqs.remove(&course_id);
            }
        }

        Action::SectionCompleted(key) => {
            data.completed_sections.insert(key);
        }
        Action::BadgeAwarded(badge) => {
            if !data.my_badges.iter().any(|b| b.id == badge.id) {
                data.my_badges.push(badge.clone());
            }
            data.new_badge = Some(badge);
        }
        Action::BadgeModalDismissed => data.new_badge = None,
        Action::PageChanged(page) => data.page = page,
    }
}

fn flip_membership(set: &mut BTreeSet<CourseId>, course_id: CourseId) {
    if !set.insert(course_id) {
        set.remove(&course_id);
    }
}
