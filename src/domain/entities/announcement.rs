use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A broadcast from the advisory (or a client) shown to everyone.
/// Titles are stored upper-cased.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

impl Announcement {
    pub fn new(title: String, content: String, author_id: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_uppercase(),
            content,
            author_id,
            created_at: Utc::now(),
        }
    }
}

/// A threaded reply under an announcement. `user_name` is denormalized
/// at creation so threads survive account renames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub id: String,
    pub announcement_id: String,
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Reply {
    pub fn new(
        announcement_id: String,
        user_id: String,
        user_name: String,
        content: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            announcement_id,
            user_id,
            user_name,
            content,
            created_at: Utc::now(),
        }
    }
}
