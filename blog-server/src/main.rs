mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use chrono::{DateTime, Utc};
use serde::Serialize;

use application::auth_service::AuthService;
use application::blog_service::BlogService;
use data::blog_repository::{BlogRepository, PostgresBlogRepository};
use data::user_repository::{PostgresUserRepository, UserRepository};
use infrastructure::config::AppConfig;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::security::JwtKeys;
use presentation::handlers;
use presentation::middleware::{BearerAuthMiddleware, RequestIdMiddleware, TimingMiddleware};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let blog_repo: Arc<dyn BlogRepository> = Arc::new(PostgresBlogRepository::new(pool.clone()));

    let auth_service = AuthService::new(user_repo, JwtKeys::new(config.jwt_secret.clone()));
    let blog_service = BlogService::new(blog_repo);

    let config_data = config.clone();
    let bind_address = (config.host.clone(), config.port);

    tracing::info!(host = %bind_address.0, port = bind_address.1, "starting HTTP server");

    HttpServer::new(move || {
        let cors = build_cors(&config_data);
        // wraps run in reverse registration order; the request id must be
        // attached before the timing layer reads it
        App::new()
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer")),
            )
            .wrap(cors)
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(blog_service.clone()))
            .route("/", web::get().to(index))
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(health))
                    .service(handlers::auth::scope())
                    .service(handlers::blog::list_blogs)
                    .service(handlers::blog::get_blog)
                    .service(
                        web::scope("")
                            .wrap(BearerAuthMiddleware)
                            .service(handlers::blog::create_blog)
                            .service(handlers::blog::update_blog)
                            .service(handlers::blog::delete_blog),
                    ),
            )
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in &config.cors_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}

async fn index() -> impl Responder {
    HttpResponse::Ok().body("Blog API is running...")
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
