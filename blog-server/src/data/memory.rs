//! In-memory repository used by service and handler tests in place of
//! Postgres. Mirrors the SQL semantics: unique email on insert, join with
//! the author on reads, newest-first ordering.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::data::blog_repository::BlogRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::blog::{Blog, BlogWithAuthor};
use crate::domain::error::ApiError;
use crate::domain::user::User;

#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<User>>,
    blogs: Mutex<Vec<Blog>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn join(&self, blog: &Blog) -> BlogWithAuthor {
        let users = self.users.lock().unwrap();
        let author = users
            .iter()
            .find(|u| u.id == blog.author_id)
            .expect("blog author must exist");
        BlogWithAuthor {
            id: blog.id,
            author_id: blog.author_id,
            title: blog.title.clone(),
            content: blog.content.clone(),
            created_at: blog.created_at,
            updated_at: blog.updated_at,
            author_name: author.name.clone(),
            author_email: author.email.clone(),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, ApiError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(ApiError::EmailTaken);
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl BlogRepository for InMemoryStore {
    async fn create(&self, blog: Blog) -> Result<Blog, ApiError> {
        self.blogs.lock().unwrap().push(blog.clone());
        Ok(blog)
    }

    async fn find_with_author(&self, id: Uuid) -> Result<Option<BlogWithAuthor>, ApiError> {
        let blog = {
            let blogs = self.blogs.lock().unwrap();
            blogs.iter().find(|b| b.id == id).cloned()
        };
        Ok(blog.map(|b| self.join(&b)))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<BlogWithAuthor>, ApiError> {
        let mut blogs = self.blogs.lock().unwrap().clone();
        blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(blogs
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|b| self.join(&b))
            .collect())
    }

    async fn count(&self) -> Result<i64, ApiError> {
        Ok(self.blogs.lock().unwrap().len() as i64)
    }

    async fn update(
        &self,
        id: Uuid,
        title: String,
        content: String,
    ) -> Result<Option<Blog>, ApiError> {
        let mut blogs = self.blogs.lock().unwrap();
        Ok(blogs.iter_mut().find(|b| b.id == id).map(|blog| {
            blog.title = title;
            blog.content = content;
            blog.updated_at = Utc::now();
            blog.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut blogs = self.blogs.lock().unwrap();
        let before = blogs.len();
        blogs.retain(|b| b.id != id);
        Ok(blogs.len() < before)
    }
}
