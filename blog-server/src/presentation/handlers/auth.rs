use actix_web::{HttpResponse, Responder, Scope, post, web};
use tracing::info;

use crate::application::auth_service::AuthService;
use crate::domain::error::ApiError;
use crate::presentation::dto::{AuthResponse, LoginRequest, RegisterRequest};

pub fn scope() -> Scope {
    web::scope("/auth").service(register).service(login)
}

#[post("/register")]
async fn register(
    service: web::Data<AuthService>,
    payload: web::Json<RegisterRequest>,
) -> Result<impl Responder, ApiError> {
    let payload = payload.into_inner();
    let (token, user) = service
        .register(payload.name, payload.email, payload.password)
        .await?;

    info!(user_id = %user.id, "user registered");

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: user.into(),
    }))
}

#[post("/login")]
async fn login(
    service: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, ApiError> {
    let (token, user) = service.login(&payload.email, &payload.password).await?;

    info!(user_id = %user.id, "user logged in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: user.into(),
    }))
}
