//! services/client/src/adapters/http.rs
//!
//! This module contains the HTTP adapter, which is the concrete implementation
//! of the `BackendService` port from the `core` crate. It handles all
//! interactions with the remote REST backend using `reqwest`.
//!
//! The cookie jar is enabled so an ambient session credential set by the
//! backend rides along transparently; an explicit bearer token is attached
//! only when the caller supplies one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use galmaetgil_core::domain::{
    Announcement, AnnouncementCategory, Badge, Challenge, Course, CourseId, CourseRanking,
    CourseSection, Credentials, GlobalRanking, NewReview, Registration, Review, SectionKey,
    UserProfile, UserRanking,
};
use galmaetgil_core::ports::{BackendService, PortError, PortResult};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An HTTP adapter that implements the `BackendService` port.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Creates a new `HttpBackend` against the given base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().cookie_store(true).timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_auth(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }
}

/// Maps a transport-level failure into the generic port error.
fn transport_err(e: reqwest::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

/// Checks the response status and classifies failures.
async fn check_status(response: Response) -> PortResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(PortError::Unauthorized),
        StatusCode::NOT_FOUND => Err(PortError::NotFound(body)),
        _ => Err(PortError::Unexpected(format!("status {status}: {body}"))),
    }
}

//=========================================================================================
// "Impure" Wire Record Structs
//=========================================================================================
//
// The backend's optional collections are defaulted to empty exactly here;
// nothing downstream re-derives defaults.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    id: i64,
    email: String,
    nickname: String,
    region: String,
    join_date: DateTime<Utc>,
    total_distance: f64,
    completed_courses: Option<Vec<i64>>,
    badges: Option<Vec<BadgeRecord>>,
    favorites: Option<Vec<i64>>,
}

impl UserRecord {
    fn to_domain(self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email,
            nickname: self.nickname,
            region: self.region,
            join_date: self.join_date,
            total_distance_km: self.total_distance,
            completed_courses: self.completed_courses.unwrap_or_default(),
            badges: self
                .badges
                .unwrap_or_default()
                .into_iter()
                .map(BadgeRecord::to_domain)
                .collect(),
            favorites: self.favorites.unwrap_or_default().into_iter().collect(),
        }
    }
}

#[derive(Deserialize)]
struct BadgeRecord {
    id: i64,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    condition: String,
    #[serde(default)]
    rarity: String,
}

impl BadgeRecord {
    fn to_domain(self) -> Badge {
        Badge {
            id: self.id,
            name: self.name,
            description: self.description,
            icon: self.icon,
            condition: self.condition,
            rarity: self.rarity,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SectionRecord {
    id: i64,
    name: String,
    distance: f64,
    start_point: String,
    end_point: String,
}

impl SectionRecord {
    fn to_domain(self) -> CourseSection {
        CourseSection {
            id: self.id,
            name: self.name,
            distance_km: self.distance,
            start_point: self.start_point,
            end_point: self.end_point,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseRecord {
    id: i64,
    name: String,
    description: String,
    distance: f64,
    duration: String,
    difficulty: String,
    region: String,
    #[serde(default)]
    sections: Vec<SectionRecord>,
    #[serde(default)]
    completed_count: u64,
}

impl CourseRecord {
    fn to_domain(self) -> Course {
        Course {
            id: self.id,
            name: self.name,
            description: self.description,
            distance_km: self.distance,
            duration: self.duration,
            difficulty: self.difficulty,
            region: self.region,
            sections: self.sections.into_iter().map(SectionRecord::to_domain).collect(),
            completed_count: self.completed_count,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewRecord {
    id: i64,
    course_id: i64,
    user_id: i64,
    user_name: String,
    rating: u8,
    content: String,
    #[serde(default)]
    photos: Vec<String>,
    date: DateTime<Utc>,
    #[serde(default)]
    likes: u64,
}

impl ReviewRecord {
    fn to_domain(self) -> Review {
        Review {
            id: self.id,
            course_id: self.course_id,
            user_id: self.user_id,
            user_name: self.user_name,
            rating: self.rating,
            content: self.content,
            photos: self.photos,
            date: self.date,
            likes: self.likes,
        }
    }
}

#[derive(Deserialize)]
struct AnnouncementRecord {
    id: i64,
    title: String,
    content: String,
    date: DateTime<Utc>,
    category: String,
}

impl AnnouncementRecord {
    fn to_domain(self) -> Announcement {
        let category = match self.category.as_str() {
            "event" => AnnouncementCategory::Event,
            "maintenance" => AnnouncementCategory::Maintenance,
            _ => AnnouncementCategory::Notice,
        };
        Announcement {
            id: self.id,
            title: self.title,
            content: self.content,
            date: self.date,
            category,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRankingRecord {
    user_id: i64,
    user_name: String,
    #[serde(default)]
    rank: u32,
    #[serde(default)]
    total_distance: f64,
    #[serde(default)]
    completion_count: u32,
}

impl UserRankingRecord {
    fn to_domain(self) -> UserRanking {
        UserRanking {
            user_id: self.user_id,
            user_name: self.user_name,
            rank: self.rank,
            total_distance_km: self.total_distance,
            completion_count: self.completion_count,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseRankingRecord {
    course_id: i64,
    course_name: String,
    #[serde(default)]
    rankings: Vec<UserRankingRecord>,
}

impl CourseRankingRecord {
    fn to_domain(self) -> CourseRanking {
        CourseRanking {
            course_id: self.course_id,
            course_name: self.course_name,
            rankings: self
                .rankings
                .into_iter()
                .map(UserRankingRecord::to_domain)
                .collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GlobalRankingRecord {
    period: String,
    #[serde(default)]
    rankings: Vec<UserRankingRecord>,
    last_updated: DateTime<Utc>,
}

impl GlobalRankingRecord {
    fn to_domain(self) -> GlobalRanking {
        GlobalRanking {
            period: self.period,
            rankings: self
                .rankings
                .into_iter()
                .map(UserRankingRecord::to_domain)
                .collect(),
            last_updated: self.last_updated,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChallengeRecord {
    id: i64,
    title: String,
    #[serde(default)]
    description: String,
    target: u32,
    current: u32,
    #[serde(default)]
    reward: String,
    #[serde(default)]
    completed: bool,
}

impl ChallengeRecord {
    fn to_domain(self) -> Challenge {
        Challenge {
            id: self.id,
            title: self.title,
            description: self.description,
            target: self.target,
            current: self.current,
            reward: self.reward,
            completed: self.completed,
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Deserialize)]
struct VisitorCountResponse {
    count: u64,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    nickname: &'a str,
    region: &'a str,
}

#[derive(Serialize)]
struct RegisterSocialRequest<'a> {
    nickname: &'a str,
    region: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewMetadata<'a> {
    course_id: i64,
    rating: u8,
    content: &'a str,
}

//=========================================================================================
// `BackendService` Trait Implementation
//=========================================================================================

#[async_trait]
impl BackendService for HttpBackend {
    async fn fetch_profile(&self, token: Option<&str>) -> PortResult<UserProfile> {
        let request = Self::with_auth(self.client.get(self.url("/api/user/me")), token);
        let response = check_status(request.send().await.map_err(transport_err)?).await?;
        let record: UserRecord = response.json().await.map_err(transport_err)?;
        Ok(record.to_domain())
    }

    async fn fetch_challenges(&self, token: Option<&str>) -> PortResult<Vec<Challenge>> {
        let request = Self::with_auth(self.client.get(self.url("/api/user/me/challenges")), token);
        let response = check_status(request.send().await.map_err(transport_err)?).await?;
        let records: Vec<ChallengeRecord> = response.json().await.map_err(transport_err)?;
        Ok(records.into_iter().map(ChallengeRecord::to_domain).collect())
    }

    async fn login(&self, credentials: &Credentials) -> PortResult<String> {
        let body = LoginRequest {
            email: &credentials.email,
            password: &credentials.password,
        };
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&body)
            .send()
            .await
            .map_err(transport_err)?;
        let response = check_status(response).await?;
        let tokens: TokenResponse = response.json().await.map_err(transport_err)?;
        Ok(tokens.token)
    }

    async fn register(&self, registration: &Registration) -> PortResult<()> {
        let body = RegisterRequest {
            email: &registration.email,
            password: &registration.password,
            nickname: &registration.nickname,
            region: &registration.region,
        };
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&body)
            .send()
            .await
            .map_err(transport_err)?;
        check_status(response).await?;
        Ok(())
    }

    async fn register_social(
        &self,
        guest_token: &str,
        nickname: &str,
        region: &str,
    ) -> PortResult<String> {
        let body = RegisterSocialRequest { nickname, region };
        let request = Self::with_auth(
            self.client.post(self.url("/api/auth/register-social")),
            Some(guest_token),
        );
        let response = check_status(request.json(&body).send().await.map_err(transport_err)?).await?;
        let tokens: TokenResponse = response.json().await.map_err(transport_err)?;
        Ok(tokens.token)
    }

    async fn list_courses(&self) -> PortResult<Vec<Course>> {
        let response = self
            .client
            .get(self.url("/api/courses"))
            .send()
            .await
            .map_err(transport_err)?;
        let records: Vec<CourseRecord> =
            check_status(response).await?.json().await.map_err(transport_err)?;
        Ok(records.into_iter().map(CourseRecord::to_domain).collect())
    }

    async fn get_course(&self, course_id: CourseId) -> PortResult<Course> {
        let response = self
            .client
            .get(self.url(&format!("/api/courses/{course_id}")))
            .send()
            .await
            .map_err(transport_err)?;
        let record: CourseRecord =
            check_status(response).await?.json().await.map_err(transport_err)?;
        Ok(record.to_domain())
    }

    async fn list_reviews(&self) -> PortResult<Vec<Review>> {
        let response = self
            .client
            .get(self.url("/api/reviews"))
            .send()
            .await
            .map_err(transport_err)?;
        let records: Vec<ReviewRecord> =
            check_status(response).await?.json().await.map_err(transport_err)?;
        Ok(records.into_iter().map(ReviewRecord::to_domain).collect())
    }

    async fn list_announcements(&self) -> PortResult<Vec<Announcement>> {
        let response = self
            .client
            .get(self.url("/api/announcements"))
            .send()
            .await
            .map_err(transport_err)?;
        let records: Vec<AnnouncementRecord> =
            check_status(response).await?.json().await.map_err(transport_err)?;
        Ok(records.into_iter().map(AnnouncementRecord::to_domain).collect())
    }

    async fn badge_catalog(&self) -> PortResult<Vec<Badge>> {
        let response = self
            .client
            .get(self.url("/api/badges"))
            .send()
            .await
            .map_err(transport_err)?;
        let records: Vec<BadgeRecord> =
            check_status(response).await?.json().await.map_err(transport_err)?;
        Ok(records.into_iter().map(BadgeRecord::to_domain).collect())
    }

    async fn course_rankings(&self) -> PortResult<Vec<CourseRanking>> {
        let response = self
            .client
            .get(self.url("/api/rankings/courses"))
            .send()
            .await
            .map_err(transport_err)?;
        let records: Vec<CourseRankingRecord> =
            check_status(response).await?.json().await.map_err(transport_err)?;
        Ok(records.into_iter().map(CourseRankingRecord::to_domain).collect())
    }

    async fn global_ranking(&self) -> PortResult<GlobalRanking> {
        let response = self
            .client
            .get(self.url("/api/rankings/global"))
            .send()
            .await
            .map_err(transport_err)?;
        let record: GlobalRankingRecord =
            check_status(response).await?.json().await.map_err(transport_err)?;
        Ok(record.to_domain())
    }

    async fn visitor_count_today(&self) -> PortResult<u64> {
        let response = self
            .client
            .get(self.url("/api/visit/today"))
            .send()
            .await
            .map_err(transport_err)?;
        let body: VisitorCountResponse =
            check_status(response).await?.json().await.map_err(transport_err)?;
        Ok(body.count)
    }

    async fn toggle_favorite(&self, token: Option<&str>, course_id: CourseId) -> PortResult<()> {
        let request = Self::with_auth(
            self.client
                .post(self.url(&format!("/api/courses/{course_id}/favorite"))),
            token,
        );
        check_status(request.send().await.map_err(transport_err)?).await?;
        Ok(())
    }

    async fn confirm_section(&self, token: Option<&str>, key: SectionKey) -> PortResult<()> {
        let path = format!(
            "/api/courses/{}/sections/{}/complete",
            key.course_id, key.section_id
        );
        let request = Self::with_auth(self.client.post(self.url(&path)), token);
        check_status(request.send().await.map_err(transport_err)?).await?;
        Ok(())
    }

    async fn create_review(&self, token: Option<&str>, review: &NewReview) -> PortResult<Review> {
        let metadata = ReviewMetadata {
            course_id: review.course_id,
            rating: review.rating,
            content: &review.content,
        };
        let metadata_json =
            serde_json::to_string(&metadata).map_err(|e| PortError::Unexpected(e.to_string()))?;

        let mut form = reqwest::multipart::Form::new().part(
            "review",
            reqwest::multipart::Part::text(metadata_json).mime_str("application/json")
                .map_err(|e| PortError::Unexpected(e.to_string()))?,
        );
        for photo in &review.photos {
            form = form.part(
                "photos",
                reqwest::multipart::Part::bytes(photo.bytes.clone())
                    .file_name(photo.file_name.clone()),
            );
        }

        let request = Self::with_auth(self.client.post(self.url("/api/reviews")), token);
        let response = check_status(
            request.multipart(form).send().await.map_err(transport_err)?,
        )
        .await?;
        let record: ReviewRecord = response.json().await.map_err(transport_err)?;
        Ok(record.to_domain())
    }
}
