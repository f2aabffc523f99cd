/// Admin handlers - bulk content purge
///
/// The coordinator performs no confirmation prompting; obtaining the
/// operator's confirmation is the caller's responsibility before this
/// endpoint is hit.
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::purge::{PurgeCoordinator, PurgeOptions};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct PurgeRequest {
    /// When false, only documents are removed and objects are deliberately
    /// orphaned
    #[serde(default = "default_true")]
    pub delete_objects: bool,
    /// Restrict the purge to these posts; omitted means every post
    pub post_ids: Option<Vec<Uuid>>,
}

fn default_true() -> bool {
    true
}

/// Purge posts and (by default) their stored objects.
///
/// Responds 200 with the full report; `success` is false when any post
/// could not be completely removed, and `failures` names each one.
pub async fn purge_posts(
    config: web::Data<Config>,
    coordinator: web::Data<Arc<PurgeCoordinator>>,
    user_id: UserId,
    req: web::Json<PurgeRequest>,
) -> Result<HttpResponse> {
    if !config.is_admin(user_id.0) {
        return Err(AppError::Forbidden(
            "Admin privileges required for bulk purge".to_string(),
        ));
    }

    let mut options = match &req.post_ids {
        Some(ids) => PurgeOptions::for_posts(ids.clone()),
        None => PurgeOptions::default(),
    };
    options.delete_objects = req.delete_objects;

    tracing::warn!(
        admin = %user_id.0,
        delete_objects = options.delete_objects,
        restricted = options.post_ids.is_some(),
        "bulk purge requested"
    );

    let report = coordinator
        .run(&options)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": report.is_success(),
        "purged": report.purged,
        "failures": report.failures,
        "objects_deleted": report.objects_deleted,
    })))
}
