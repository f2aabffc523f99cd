/// Post handlers - HTTP endpoints for post operations
use crate::error::{AppError, Result};
use crate::middleware::{check_post_ownership, UserId};
use crate::purge::{PurgeCoordinator, PurgeOptions};
use crate::services::PostService;
use actix_web::{web, HttpRequest, HttpResponse};
use object_store::ObjectStore;
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub tag: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

/// Create a new post
pub async fn create_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(user_id.0, &req.title, &req.content, &req.tags)
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Get a post by ID
pub async fn get_post(pool: web::Data<PgPool>, post_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    match service.get_post(*post_id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(post)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// List posts, newest first, optionally filtered by tag
pub async fn list_posts(
    pool: web::Data<PgPool>,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let limit = query.limit.clamp(1, 100);
    let posts = service
        .list_posts(query.tag.as_deref(), limit, query.offset.max(0))
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Delete a post together with its stored objects.
///
/// Routes through the purge coordinator with a single-id set, so there is
/// exactly one deletion path: objects first, then the document.
pub async fn delete_post(
    pool: web::Data<PgPool>,
    coordinator: web::Data<Arc<PurgeCoordinator>>,
    user_id: UserId,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service.require_post(*post_id).await?;
    check_post_ownership(user_id.0, &post).map_err(|_| {
        AppError::Forbidden("You don't have permission to delete this post".to_string())
    })?;

    let options = PurgeOptions::for_posts(vec![*post_id]);
    let report = coordinator
        .run(&options)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if let Some(failure) = report.failures.first() {
        return Err(AppError::StorageError(format!(
            "post {} not fully deleted: {}",
            failure.post_id, failure.error
        )));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Like a post
pub async fn like_post(pool: web::Data<PgPool>, post_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    service.like_post(*post_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Remove a like from a post
pub async fn unlike_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    service.unlike_post(*post_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Upload an image under a post's storage namespace.
///
/// Returns the retrievable URL; the object will be swept by the purge
/// coordinator when the post is deleted.
pub async fn upload_post_image(
    pool: web::Data<PgPool>,
    store: web::Data<Arc<dyn ObjectStore>>,
    user_id: UserId,
    path: web::Path<(Uuid, String)>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let (post_id, filename) = path.into_inner();

    let service = PostService::new((**pool).clone());
    let post = service.require_post(post_id).await?;
    check_post_ownership(user_id.0, &post).map_err(|_| {
        AppError::Forbidden("You don't have permission to modify this post".to_string())
    })?;

    if body.is_empty() {
        return Err(AppError::BadRequest("empty upload body".to_string()));
    }

    let content_type = req
        .headers()
        .get("Content-Type")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("application/octet-stream");

    let key = service.image_key(post_id, &filename)?;
    let url = store.put(&key, body.to_vec(), content_type).await?;

    tracing::info!(post_id = %post_id, key = %key, "image uploaded");

    Ok(HttpResponse::Created().json(serde_json::json!({
        "key": key,
        "url": url,
    })))
}
