use actix_web::{HttpMessage, HttpRequest, HttpResponse, delete, get, post, put, web};
use tracing::info;
use uuid::Uuid;

use crate::application::blog_service::BlogService;
use crate::domain::error::ApiError;
use crate::presentation::dto::{BlogListResponse, BlogPayload, BlogView, DeleteResponse, ListQuery};
use crate::presentation::extractors::AuthenticatedUser;

/// An id segment that is not a UUID is treated the same as an unknown id.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BlogNotFound)
}

#[get("/blogs")]
pub async fn list_blogs(
    service: web::Data<BlogService>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = service.list(query.page(), query.limit()).await?;

    Ok(HttpResponse::Ok().json(BlogListResponse {
        blogs: page.blogs.into_iter().map(BlogView::from).collect(),
        total_pages: page.total_pages,
        current_page: page.current_page,
    }))
}

#[get("/blogs/{id}")]
pub async fn get_blog(
    service: web::Data<BlogService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;
    let blog = service.get(id).await?;
    Ok(HttpResponse::Ok().json(BlogView::from(blog)))
}

#[post("/blogs")]
pub async fn create_blog(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<BlogService>,
    payload: web::Json<BlogPayload>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    let blog = service
        .create(user.id, payload.title, payload.content)
        .await?;

    info!(
        request_id = %request_id(&req),
        blog_id = %blog.id,
        author_id = %user.id,
        "blog created"
    );

    Ok(HttpResponse::Created().json(BlogView::with_author(blog, user.view())))
}

#[put("/blogs/{id}")]
pub async fn update_blog(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<BlogService>,
    payload: web::Json<BlogPayload>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;
    let payload = payload.into_inner();
    let blog = service
        .update(user.id, id, payload.title, payload.content)
        .await?;

    info!(
        request_id = %request_id(&req),
        blog_id = %id,
        author_id = %user.id,
        "blog updated"
    );

    Ok(HttpResponse::Ok().json(BlogView::from(blog)))
}

#[delete("/blogs/{id}")]
pub async fn delete_blog(
    req: HttpRequest,
    user: AuthenticatedUser,
    service: web::Data<BlogService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;
    service.delete(user.id, id).await?;

    info!(
        request_id = %request_id(&req),
        blog_id = %id,
        author_id = %user.id,
        "blog deleted"
    );

    Ok(HttpResponse::Ok().json(DeleteResponse {
        msg: "Blog removed",
    }))
}

fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<crate::presentation::middleware::RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
