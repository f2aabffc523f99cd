/// Profile handlers - own profile and onboarding survey
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::PersonalInfo;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertProfileRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub display_name: String,
    #[validate(url)]
    pub photo_url: Option<String>,
}

/// Get own profile
pub async fn get_me(pool: web::Data<PgPool>, user_id: UserId) -> Result<HttpResponse> {
    match user_repo::find_profile(&pool, user_id.0).await? {
        Some(profile) => Ok(HttpResponse::Ok().json(profile)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Create or update own profile
pub async fn upsert_me(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<UpsertProfileRequest>,
) -> Result<HttpResponse> {
    req.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let profile = user_repo::upsert_profile(
        &pool,
        user_id.0,
        &req.email,
        &req.display_name,
        req.photo_url.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(profile))
}

/// Store onboarding survey answers and mark the survey completed
pub async fn save_survey(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<PersonalInfo>,
) -> Result<HttpResponse> {
    let personal_info = serde_json::to_value(req.into_inner())?;

    if !user_repo::save_survey(&pool, user_id.0, &personal_info).await? {
        return Err(AppError::NotFound(format!("profile {}", user_id.0)));
    }

    tracing::info!(user_id = %user_id.0, "survey completed");
    Ok(HttpResponse::NoContent().finish())
}
