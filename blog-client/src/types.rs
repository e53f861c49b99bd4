//! Wire types, matching the server's JSON surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: User,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogList {
    pub blogs: Vec<Blog>,
    pub total_pages: i64,
    pub current_page: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blog_deserializes_from_the_server_shape() {
        let blog: Blog = serde_json::from_str(
            r#"{
                "id": "5f3f0a3e-7a4e-4c2b-9e1c-0d6a2b4c8e10",
                "title": "First",
                "content": "Hello",
                "author": {
                    "id": "0c8e10a3-0d6a-4c2b-9e1c-5f3f0a3e7a4e",
                    "name": "Ada",
                    "email": "ada@example.com"
                },
                "createdAt": "2026-08-30T12:00:00Z",
                "updatedAt": "2026-08-30T12:00:00Z"
            }"#,
        )
        .expect("deserialize");
        assert_eq!(blog.author.name, "Ada");
    }

    #[test]
    fn list_reads_total_and_current_page() {
        let list: BlogList = serde_json::from_str(
            r#"{"blogs": [], "totalPages": 2, "currentPage": 1}"#,
        )
        .expect("deserialize");
        assert_eq!(list.total_pages, 2);
        assert_eq!(list.current_page, 1);
    }
}
