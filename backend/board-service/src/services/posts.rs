/// Post service - handles post creation, retrieval, and counters
use crate::db::post_repo;
use crate::error::{AppError, Result};
use crate::models::Post;
use crate::purge::object_prefix;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a post by ID
    pub async fn get_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        Ok(post_repo::find_post_by_id(&self.pool, post_id).await?)
    }

    /// Get a post by ID, failing when absent
    pub async fn require_post(&self, post_id: Uuid) -> Result<Post> {
        post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))
    }

    /// List posts, newest first, optionally filtered by tag
    pub async fn list_posts(&self, tag: Option<&str>, limit: i64, offset: i64) -> Result<Vec<Post>> {
        Ok(post_repo::list_posts(&self.pool, tag, limit, offset).await?)
    }

    /// Create a new post
    pub async fn create_post(
        &self,
        author_id: Uuid,
        title: &str,
        content: &str,
        tags: &[String],
    ) -> Result<Post> {
        let post = post_repo::create_post(&self.pool, author_id, title, content, tags).await?;

        tracing::info!(post_id = %post.id, author_id = %author_id, "post created");
        Ok(post)
    }

    /// Increment the like counter
    pub async fn like_post(&self, post_id: Uuid) -> Result<()> {
        if !post_repo::increment_like_count(&self.pool, post_id).await? {
            return Err(AppError::NotFound(format!("post {}", post_id)));
        }
        Ok(())
    }

    /// Decrement the like counter (floored at zero)
    pub async fn unlike_post(&self, post_id: Uuid) -> Result<()> {
        if !post_repo::decrement_like_count(&self.pool, post_id).await? {
            return Err(AppError::NotFound(format!("post {}", post_id)));
        }
        Ok(())
    }

    /// Storage key for an uploaded post image. Keys stay inside the post's
    /// purge namespace so the coordinator can find them later by prefix.
    pub fn image_key(&self, post_id: Uuid, filename: &str) -> Result<String> {
        if filename.is_empty() || filename.contains('/') || filename.contains("..") {
            return Err(AppError::BadRequest(format!(
                "invalid image filename: {}",
                filename
            )));
        }

        Ok(format!("{}{}", object_prefix("post_images", post_id), filename))
    }
}
