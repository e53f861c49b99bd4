use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::user_repository::UserRepository;
use crate::domain::{error::ApiError, user::User};
use crate::infrastructure::security::{JwtKeys, hash_password, verify_password};

#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn UserRepository>,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(repo: Arc<dyn UserRepository>, keys: JwtKeys) -> Self {
        Self { repo, keys }
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    /// Middleware lookup: resolves a verified token's subject to a live
    /// user. A valid token whose subject is gone is `UserNotFound`, not an
    /// authentication failure.
    pub async fn get_user(&self, id: Uuid) -> Result<User, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<(String, User), ApiError> {
        let hash = hash_password(&password).map_err(|err| ApiError::Internal(err.to_string()))?;
        let user = User::new(name, email.to_lowercase(), hash);
        let user = self.repo.create(user).await?;

        let token = self
            .keys
            .generate_token(user.id)
            .map_err(|err| ApiError::Internal(err.to_string()))?;
        Ok((token, user))
    }

    /// Unknown email and wrong password both fail with `InvalidCredentials`
    /// so a caller cannot tell which emails are registered.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), ApiError> {
        let user = self
            .repo
            .find_by_email(&email.to_lowercase())
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|_| ApiError::InvalidCredentials)?;
        if !valid {
            return Err(ApiError::InvalidCredentials);
        }

        let token = self
            .keys
            .generate_token(user.id)
            .map_err(|err| ApiError::Internal(err.to_string()))?;
        Ok((token, user))
    }
}
