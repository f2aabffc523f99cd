use crate::models::UserProfile;
use sqlx::PgPool;
use uuid::Uuid;

/// Find a profile by user id
pub async fn find_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<UserProfile>, sqlx::Error> {
    let profile = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT id, email, display_name, photo_url, survey_completed, personal_info,
               created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

/// Create or update a profile. The id comes from the auth provider, so a
/// returning user hits the conflict path.
pub async fn upsert_profile(
    pool: &PgPool,
    user_id: Uuid,
    email: &str,
    display_name: &str,
    photo_url: Option<&str>,
) -> Result<UserProfile, sqlx::Error> {
    let profile = sqlx::query_as::<_, UserProfile>(
        r#"
        INSERT INTO users (id, email, display_name, photo_url)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE
        SET email = EXCLUDED.email,
            display_name = EXCLUDED.display_name,
            photo_url = EXCLUDED.photo_url,
            updated_at = NOW()
        RETURNING id, email, display_name, photo_url, survey_completed, personal_info,
                  created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(email)
    .bind(display_name)
    .bind(photo_url)
    .fetch_one(pool)
    .await?;

    Ok(profile)
}

/// Store survey answers and mark the survey completed. Returns false when no
/// profile exists for the user.
pub async fn save_survey(
    pool: &PgPool,
    user_id: Uuid,
    personal_info: &serde_json::Value,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET personal_info = $1, survey_completed = TRUE, updated_at = NOW()
        WHERE id = $2
        "#,
    )
    .bind(personal_info)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
