use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::blog_repository::BlogRepository;
use crate::domain::blog::{Blog, BlogWithAuthor};
use crate::domain::error::ApiError;

/// One page of the public listing.
#[derive(Debug)]
pub struct BlogPage {
    pub blogs: Vec<BlogWithAuthor>,
    pub total_pages: i64,
    pub current_page: i64,
}

#[derive(Clone)]
pub struct BlogService {
    repo: Arc<dyn BlogRepository>,
}

impl BlogService {
    pub fn new(repo: Arc<dyn BlogRepository>) -> Self {
        Self { repo }
    }

    /// `page` and `limit` arrive already normalized (>= 1). No upper bound
    /// is enforced on `limit`.
    pub async fn list(&self, page: i64, limit: i64) -> Result<BlogPage, ApiError> {
        // Clients control both numbers, so the offset must not overflow.
        let offset = (page - 1).saturating_mul(limit);
        let blogs = self.repo.list(limit, offset).await?;
        let total = self.repo.count().await?;
        Ok(BlogPage {
            blogs,
            total_pages: (total + limit - 1) / limit,
            current_page: page,
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<BlogWithAuthor, ApiError> {
        self.repo
            .find_with_author(id)
            .await?
            .ok_or(ApiError::BlogNotFound)
    }

    #[instrument(skip(self, content))]
    pub async fn create(
        &self,
        author_id: Uuid,
        title: String,
        content: String,
    ) -> Result<Blog, ApiError> {
        self.repo.create(Blog::new(author_id, title, content)).await
    }

    /// Ownership gate: only the recorded author may overwrite. `created_at`
    /// is left untouched by the store.
    #[instrument(skip(self, content))]
    pub async fn update(
        &self,
        author_id: Uuid,
        id: Uuid,
        title: String,
        content: String,
    ) -> Result<BlogWithAuthor, ApiError> {
        let existing = self.get(id).await?;
        if existing.author_id != author_id {
            return Err(ApiError::Forbidden);
        }

        let updated = self
            .repo
            .update(id, title, content)
            .await?
            .ok_or(ApiError::BlogNotFound)?;

        Ok(BlogWithAuthor {
            title: updated.title,
            content: updated.content,
            updated_at: updated.updated_at,
            ..existing
        })
    }

    /// Same authorization rule as update; removal is permanent.
    #[instrument(skip(self))]
    pub async fn delete(&self, author_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let existing = self.get(id).await?;
        if existing.author_id != author_id {
            return Err(ApiError::Forbidden);
        }

        if !self.repo.delete(id).await? {
            return Err(ApiError::BlogNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::InMemoryStore;
    use crate::data::user_repository::UserRepository;
    use crate::domain::user::User;

    async fn seed_user(store: &InMemoryStore, email: &str) -> Uuid {
        let user = User::new("Ada".into(), email.into(), "hash".into());
        let id = user.id;
        UserRepository::create(store, user).await.expect("seed user");
        id
    }

    fn service(store: &Arc<InMemoryStore>) -> BlogService {
        BlogService::new(Arc::clone(store) as Arc<dyn BlogRepository>)
    }

    #[tokio::test]
    async fn create_sets_the_caller_as_author() {
        let store = Arc::new(InMemoryStore::new());
        let author = seed_user(&store, "ada@example.com").await;
        let service = service(&store);

        let blog = service
            .create(author, "First".into(), "Hello".into())
            .await
            .expect("create");
        assert_eq!(blog.author_id, author);

        let fetched = service.get(blog.id).await.expect("get");
        assert_eq!(fetched.author_name, "Ada");
        assert_eq!(fetched.author_email, "ada@example.com");
    }

    #[tokio::test]
    async fn fifteen_posts_paginate_into_ten_and_five() {
        let store = Arc::new(InMemoryStore::new());
        let author = seed_user(&store, "ada@example.com").await;
        let service = service(&store);

        for i in 0..15 {
            service
                .create(author, format!("Post {i}"), "body".into())
                .await
                .expect("create");
        }

        let first = service.list(1, 10).await.expect("page 1");
        assert_eq!(first.blogs.len(), 10);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.current_page, 1);

        let second = service.list(2, 10).await.expect("page 2");
        assert_eq!(second.blogs.len(), 5);
        assert_eq!(second.total_pages, 2);
        assert_eq!(second.current_page, 2);
    }

    #[tokio::test]
    async fn listing_orders_newest_first() {
        let store = Arc::new(InMemoryStore::new());
        let author = seed_user(&store, "ada@example.com").await;
        let service = service(&store);

        for i in 0..3 {
            service
                .create(author, format!("Post {i}"), "body".into())
                .await
                .expect("create");
        }

        let page = service.list(1, 10).await.expect("list");
        let created: Vec<_> = page.blogs.iter().map(|b| b.created_at).collect();
        let mut sorted = created.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(created, sorted);
    }

    #[tokio::test]
    async fn absurd_page_numbers_return_an_empty_page() {
        let store = Arc::new(InMemoryStore::new());
        let author = seed_user(&store, "ada@example.com").await;
        let service = service(&store);

        for i in 0..3 {
            service
                .create(author, format!("Post {i}"), "body".into())
                .await
                .expect("create");
        }

        let page = service.list(i64::MAX, 10).await.expect("list");
        assert!(page.blogs.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, i64::MAX);
    }

    #[tokio::test]
    async fn empty_store_lists_zero_pages() {
        let store = Arc::new(InMemoryStore::new());
        let page = service(&store).list(1, 10).await.expect("list");
        assert!(page.blogs.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn non_author_update_is_forbidden_and_changes_nothing() {
        let store = Arc::new(InMemoryStore::new());
        let author = seed_user(&store, "ada@example.com").await;
        let intruder = seed_user(&store, "eve@example.com").await;
        let service = service(&store);

        let blog = service
            .create(author, "Mine".into(), "body".into())
            .await
            .expect("create");

        let err = service
            .update(intruder, blog.id, "Stolen".into(), "tampered".into())
            .await
            .expect_err("forbidden");
        assert!(matches!(err, ApiError::Forbidden));

        let unchanged = service.get(blog.id).await.expect("get");
        assert_eq!(unchanged.title, "Mine");
    }

    #[tokio::test]
    async fn author_update_overwrites_but_keeps_created_at() {
        let store = Arc::new(InMemoryStore::new());
        let author = seed_user(&store, "ada@example.com").await;
        let service = service(&store);

        let blog = service
            .create(author, "Draft".into(), "v1".into())
            .await
            .expect("create");

        let updated = service
            .update(author, blog.id, "Final".into(), "v2".into())
            .await
            .expect("update");
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.content, "v2");
        assert_eq!(updated.created_at, blog.created_at);
    }

    #[tokio::test]
    async fn non_author_delete_is_forbidden_author_delete_removes() {
        let store = Arc::new(InMemoryStore::new());
        let author = seed_user(&store, "ada@example.com").await;
        let intruder = seed_user(&store, "eve@example.com").await;
        let service = service(&store);

        let blog = service
            .create(author, "Mine".into(), "body".into())
            .await
            .expect("create");

        let err = service
            .delete(intruder, blog.id)
            .await
            .expect_err("forbidden");
        assert!(matches!(err, ApiError::Forbidden));

        service.delete(author, blog.id).await.expect("delete");
        let err = service.get(blog.id).await.expect_err("gone");
        assert!(matches!(err, ApiError::BlogNotFound));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let err = service(&store)
            .get(Uuid::new_v4())
            .await
            .expect_err("missing");
        assert!(matches!(err, ApiError::BlogNotFound));
    }
}
