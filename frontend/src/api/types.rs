use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Option<UserResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Registration may or may not sign the new account in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<UserResponse>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    SignedIn,
    LoginRequired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    /// Present only when the server rotates refresh tokens.
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub badges: Vec<UserBadge>,
    #[serde(default)]
    pub enrolled_courses_count: i64,
}

fn default_role() -> String {
    "learner".into()
}

impl UserResponse {
    pub fn is_admin(&self) -> bool {
        matches!(self.role.as_str(), "admin" | "superadmin")
    }

    pub fn is_mentor(&self) -> bool {
        self.role == "mentor"
    }

    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBadge {
    pub id: i64,
    pub badge: i64,
    #[serde(default)]
    pub badge_name: String,
    #[serde(default)]
    pub badge_description: String,
    #[serde(default)]
    pub badge_icon: Option<String>,
    #[serde(default)]
    pub awarded_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub skill_level: String,
    /// Hours.
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub external_url: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: f64,
    #[serde(default)]
    pub enrolled_count: i64,
    #[serde(default)]
    pub is_enrolled: bool,
    #[serde(default)]
    pub user_progress: i64,
}

/// Server-side filters for the course catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub skill_level: Option<String>,
}

impl CourseQuery {
    pub fn to_params(&self) -> Vec<(String, String)> {
        [
            ("search", &self.search),
            ("category", &self.category),
            ("skill_level", &self.skill_level),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key.to_string(), v.to_string()))
        })
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoursePayload {
    pub title: String,
    pub description: String,
    pub category: String,
    pub skill_level: String,
    pub duration: i64,
    pub provider: String,
    pub external_url: String,
    pub is_active: bool,
}

impl Default for CoursePayload {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: "coding".into(),
            skill_level: "beginner".into(),
            duration: 10,
            provider: String::new(),
            external_url: String::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub course: i64,
    #[serde(default)]
    pub user: Option<i64>,
    #[serde(default)]
    pub course_title: String,
    #[serde(default)]
    pub course_image: Option<String>,
    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub certificate_url: String,
    #[serde(default)]
    pub rating: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub progress: i64,
}

/// Acknowledgement body used by the action endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mentorship {
    pub id: i64,
    pub mentor: i64,
    pub learner: i64,
    #[serde(default)]
    pub course: Option<i64>,
    #[serde(default = "default_mentorship_status")]
    pub status: String,
    #[serde(default)]
    pub mentor_username: String,
    #[serde(default)]
    pub learner_username: String,
    #[serde(default)]
    pub course_title: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub rating: i64,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub meeting_link: String,
}

fn default_mentorship_status() -> String {
    "pending".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorshipRequest {
    pub mentor: i64,
    pub learner: i64,
    pub status: String,
}

/// `POST /mentorships/match/` answers 200 either way.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum MatchResponse {
    Matched(Mentorship),
    Unavailable { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub course: Option<i64>,
    #[serde(default)]
    pub creator: Option<i64>,
    #[serde(default)]
    pub creator_username: String,
    #[serde(default)]
    pub members: Vec<i64>,
    #[serde(default)]
    pub members_count: i64,
    #[serde(default)]
    pub is_member: bool,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default = "default_max_members")]
    pub max_members: i64,
    #[serde(default)]
    pub meeting_link: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_max_members() -> i64 {
    20
}

impl StudyGroup {
    /// Servers report either `members_count` or only the `members` list.
    pub fn member_count(&self) -> i64 {
        self.members_count.max(self.members.len() as i64)
    }

    pub fn is_full(&self) -> bool {
        self.member_count() >= self.max_members
    }

    pub fn has_member(&self, user_id: i64) -> bool {
        self.is_member || self.members.contains(&user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudyGroup {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<i64>,
    pub is_private: bool,
    pub max_members: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub meeting_link: String,
}

impl Default for NewStudyGroup {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            course: None,
            is_private: false,
            max_members: default_max_members(),
            meeting_link: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMessage {
    pub id: i64,
    pub group: i64,
    pub sender: i64,
    #[serde(default)]
    pub sender_username: String,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default = "default_message_type")]
    pub message_type: String,
}

fn default_message_type() -> String {
    "text".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGroupMessage {
    pub group: i64,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    #[default]
    All,
    Month,
    Week,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Month => "month",
            Self::Week => "week",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicStats {
    #[serde(default)]
    pub total_users: i64,
    #[serde(default)]
    pub total_courses: i64,
    #[serde(default)]
    pub total_enrollments: i64,
    #[serde(default)]
    pub total_mentorships: i64,
    #[serde(default)]
    pub total_study_groups: i64,
    #[serde(default)]
    pub popular_skills: Vec<String>,
    #[serde(default)]
    pub courses_by_category: BTreeMap<String, i64>,
    #[serde(default)]
    pub user_growth: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeCourse {
    pub id: String,
    pub title: String,
    pub provider: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub skill_level: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: f64,
    #[serde(default)]
    pub enrolled_count: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct FreeCoursesResponse {
    #[serde(default)]
    pub results: Vec<FreeCourse>,
}

/// List endpoints answer either a bare array or a paginated envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListPayload<T> {
    Page { results: Vec<T> },
    Plain(Vec<T>),
}

impl<T> ListPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Page { results } => results,
            Self::Plain(items) => items,
        }
    }
}

/// Decimal fields arrive as JSON strings ("4.5") from the REST framework.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null(()),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
        Raw::Null(()) => Ok(0.0),
    }
}
