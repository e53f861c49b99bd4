use crate::domain::blog::{Blog, BlogWithAuthor};
use crate::domain::error::ApiError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create(&self, blog: Blog) -> Result<Blog, ApiError>;
    async fn find_with_author(&self, id: Uuid) -> Result<Option<BlogWithAuthor>, ApiError>;
    /// Newest first, joined with the author row.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<BlogWithAuthor>, ApiError>;
    async fn count(&self) -> Result<i64, ApiError>;
    /// Overwrites title and content; `created_at` is never touched. Returns
    /// `None` when the row is gone.
    async fn update(&self, id: Uuid, title: String, content: String)
    -> Result<Option<Blog>, ApiError>;
    /// Permanent removal. Returns whether a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

const WITH_AUTHOR: &str = r#"
    SELECT b.id, b.author_id, b.title, b.content, b.created_at, b.updated_at,
           u.name AS author_name, u.email AS author_email
    FROM blogs b
    JOIN users u ON u.id = b.author_id
"#;

#[derive(Clone)]
pub struct PostgresBlogRepository {
    pool: PgPool,
}

impl PostgresBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn create(&self, blog: Blog) -> Result<Blog, ApiError> {
        sqlx::query(
            r#"
            INSERT INTO blogs (id, author_id, title, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(blog.id)
        .bind(blog.author_id)
        .bind(&blog.title)
        .bind(&blog.content)
        .bind(blog.created_at)
        .bind(blog.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create blog: {}", e);
            ApiError::Internal(format!("database error: {}", e))
        })?;

        info!(blog_id = %blog.id, author_id = %blog.author_id, "blog created");
        Ok(blog)
    }

    async fn find_with_author(&self, id: Uuid) -> Result<Option<BlogWithAuthor>, ApiError> {
        sqlx::query_as::<_, BlogWithAuthor>(&format!("{WITH_AUTHOR} WHERE b.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to find blog {}: {}", id, e);
                ApiError::Internal(format!("database error: {}", e))
            })
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<BlogWithAuthor>, ApiError> {
        sqlx::query_as::<_, BlogWithAuthor>(&format!(
            "{WITH_AUTHOR} ORDER BY b.created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to list blogs: {}", e);
            ApiError::Internal(format!("database error: {}", e))
        })
    }

    async fn count(&self) -> Result<i64, ApiError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM blogs")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to count blogs: {}", e);
                ApiError::Internal(format!("database error: {}", e))
            })
    }

    async fn update(
        &self,
        id: Uuid,
        title: String,
        content: String,
    ) -> Result<Option<Blog>, ApiError> {
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            UPDATE blogs
            SET title = $1, content = $2, updated_at = $3
            WHERE id = $4
            RETURNING id, author_id, title, content, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update blog {}: {}", id, e);
            ApiError::Internal(format!("database error: {}", e))
        })?;

        if blog.is_some() {
            info!(blog_id = %id, "blog updated");
        }
        Ok(blog)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let deleted = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete blog {}: {}", id, e);
                ApiError::Internal(format!("database error: {}", e))
            })?;

        let removed = deleted.rows_affected() > 0;
        if removed {
            info!(blog_id = %id, "blog deleted");
        }
        Ok(removed)
    }
}
