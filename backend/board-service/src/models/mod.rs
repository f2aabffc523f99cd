/// Data models for board-service
///
/// - `Post`: user-authored board posts with tags and engagement counters
/// - `UserProfile`: account profile including onboarding survey answers
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A board post. The rich-text body is stored opaque, exactly as the editor
/// produced it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub like_count: i64,
    pub comment_count: i64,
    pub bookmark_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User profile. `id` is the auth provider's subject, not locally assigned.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub survey_completed: bool,
    pub personal_info: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Onboarding survey answers (stored as JSON on the profile).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub age: Option<String>,
    pub gender: Option<String>,
    pub occupation: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub experience: Option<String>,
    #[serde(default)]
    pub goals: Vec<String>,
}
