use reqwest::Client;
use serde_json::json;
use uuid::Uuid;

use crate::error::BlogApiError;
use crate::token_store::{Session, TokenStore};
use crate::types::{AuthResponse, Blog, BlogList, User};

/// Typed client over the REST surface. Holds the session in the token
/// store; every authenticated call attaches `Authorization: Bearer <token>`
/// from it.
#[derive(Clone)]
pub struct BlogApi {
    client: Client,
    base_url: String,
    tokens: TokenStore,
}

impl BlogApi {
    pub fn new(endpoint: &str, tokens: TokenStore) -> Self {
        Self {
            client: Client::new(),
            base_url: endpoint.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.tokens.load()
    }

    fn bearer(&self) -> Result<String, BlogApiError> {
        self.tokens
            .load()
            .map(|s| format!("Bearer {}", s.token))
            .ok_or(BlogApiError::NotLoggedIn)
    }

    async fn handle_auth(&self, resp: reqwest::Response) -> Result<User, BlogApiError> {
        if !resp.status().is_success() {
            return Err(BlogApiError::from_response(resp).await);
        }
        let auth: AuthResponse = resp.json().await?;
        self.tokens.save(&Session {
            token: auth.token,
            user: auth.user.clone(),
        })?;
        Ok(auth.user)
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, BlogApiError> {
        let resp = self
            .client
            .post(format!("{}/api/auth/register", self.base_url))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;
        self.handle_auth(resp).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, BlogApiError> {
        let resp = self
            .client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        self.handle_auth(resp).await
    }

    /// Clears the stored session. Purely local; tokens are stateless on the
    /// server side.
    pub fn logout(&self) -> Result<(), BlogApiError> {
        self.tokens.clear()?;
        Ok(())
    }

    pub async fn list_blogs(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<BlogList, BlogApiError> {
        let mut req = self.client.get(format!("{}/api/blogs", self.base_url));
        if let Some(page) = page {
            req = req.query(&[("page", page)]);
        }
        if let Some(limit) = limit {
            req = req.query(&[("limit", limit)]);
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(BlogApiError::from_response(resp).await);
        }
        Ok(resp.json().await?)
    }

    pub async fn get_blog(&self, id: Uuid) -> Result<Blog, BlogApiError> {
        let resp = self
            .client
            .get(format!("{}/api/blogs/{}", self.base_url, id))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(BlogApiError::from_response(resp).await);
        }
        Ok(resp.json().await?)
    }

    pub async fn create_blog(&self, title: &str, content: &str) -> Result<Blog, BlogApiError> {
        let resp = self
            .client
            .post(format!("{}/api/blogs", self.base_url))
            .header(reqwest::header::AUTHORIZATION, self.bearer()?)
            .json(&json!({ "title": title, "content": content }))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(BlogApiError::from_response(resp).await);
        }
        Ok(resp.json().await?)
    }

    pub async fn update_blog(
        &self,
        id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Blog, BlogApiError> {
        let resp = self
            .client
            .put(format!("{}/api/blogs/{}", self.base_url, id))
            .header(reqwest::header::AUTHORIZATION, self.bearer()?)
            .json(&json!({ "title": title, "content": content }))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(BlogApiError::from_response(resp).await);
        }
        Ok(resp.json().await?)
    }

    pub async fn delete_blog(&self, id: Uuid) -> Result<(), BlogApiError> {
        let resp = self
            .client
            .delete(format!("{}/api/blogs/{}", self.base_url, id))
            .header(reqwest::header::AUTHORIZATION, self.bearer()?)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(BlogApiError::from_response(resp).await);
        }
        Ok(())
    }
}
