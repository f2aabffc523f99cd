use crate::models::Post;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new post
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    title: &str,
    content: &str,
    tags: &[String],
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (author_id, title, content, tags)
        VALUES ($1, $2, $3, $4)
        RETURNING id, author_id, title, content, tags,
                  like_count, comment_count, bookmark_count,
                  created_at, updated_at
        "#,
    )
    .bind(author_id)
    .bind(title)
    .bind(content)
    .bind(tags)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, title, content, tags,
               like_count, comment_count, bookmark_count,
               created_at, updated_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// List posts in descending order by creation date, optionally filtered by tag
pub async fn list_posts(
    pool: &PgPool,
    tag: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, title, content, tags,
               like_count, comment_count, bookmark_count,
               created_at, updated_at
        FROM posts
        WHERE $1::text IS NULL OR $1 = ANY(tags)
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(tag)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Enumerate every post id currently stored
pub async fn list_post_ids(pool: &PgPool) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (Uuid,)>("SELECT id FROM posts ORDER BY created_at")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Hard-delete a post. Returns the number of rows removed (0 when the post
/// was already gone).
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Increment like count. Returns false when the post does not exist.
pub async fn increment_like_count(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET like_count = like_count + 1, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Decrement like count, floored at zero. Returns false when the post does
/// not exist.
pub async fn decrement_like_count(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET like_count = GREATEST(like_count - 1, 0), updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
