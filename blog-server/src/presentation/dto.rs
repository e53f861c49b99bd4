use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::blog::{Blog, BlogWithAuthor};
use crate::domain::user::UserView;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

/// Shared by create and update; both overwrite title and content whole.
/// Emptiness is not validated here, matching the public contract.
#[derive(Debug, Deserialize)]
pub struct BlogPayload {
    pub title: String,
    pub content: String,
}

/// Pagination query. Kept as raw strings so a non-numeric `page` or `limit`
/// falls back to the default instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> i64 {
        lenient_positive(self.page.as_deref()).unwrap_or(1)
    }

    pub fn limit(&self) -> i64 {
        lenient_positive(self.limit.as_deref()).unwrap_or(10)
    }
}

fn lenient_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.parse::<i64>().ok()).filter(|n| *n >= 1)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: UserView,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl BlogView {
    /// For the create path, where the author is the authenticated caller
    /// and no re-read from the store is needed.
    pub fn with_author(blog: Blog, author: UserView) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            content: blog.content,
            author,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

impl From<BlogWithAuthor> for BlogView {
    fn from(blog: BlogWithAuthor) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            content: blog.content,
            author: UserView {
                id: blog.author_id,
                name: blog.author_name,
                email: blog.author_email,
            },
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogListResponse {
    pub blogs: Vec<BlogView>,
    pub total_pages: i64,
    pub current_page: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub msg: &'static str,
}
