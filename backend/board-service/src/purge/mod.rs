//! Bulk content deletion coordinator
//!
//! Deletes posts together with their stored binary objects. Objects live
//! under deterministic prefixes (`{category}/{post_id}/`); the prefix is the
//! only index over a post's objects, so the coordinator always removes the
//! objects *before* the owning document. The reverse order would leave
//! orphaned objects that nothing can enumerate back to a post.
//!
//! Per-post pipelines run concurrently and independently: one post failing
//! never aborts or obscures the others. Failures are collected into the
//! report instead of propagated, and "already absent" is a successful no-op
//! so a second run over an emptied store reports clean success.
//!
//! There is no cross-store transaction. If a post's objects are deleted and
//! the document delete then fails, that post's objects are gone while its
//! document remains; the post is reported failed and a retry completes the
//! removal. This is the one inconsistent state the coordinator can produce.
//!
//! There is no cancellation: once started, in-flight deletions run to
//! completion. Callers wanting a bounded blast radius pass an explicit id
//! set in [`PurgeOptions`].

use crate::metrics::purge as metrics;
use async_trait::async_trait;
use futures::future::join_all;
use object_store::{ObjectStore, ObjectStoreError};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use uuid::Uuid;

pub mod pg;

pub use pg::PgDocumentStore;

/// Object categories swept per post. Adding a category changes nothing about
/// the algorithm shape.
pub const DEFAULT_CATEGORIES: [&str; 2] = ["post_images", "post_attachments"];

/// Storage prefix owning every object of one post in one category
pub fn object_prefix(category: &str, post_id: Uuid) -> String {
    format!("{}/{}/", category, post_id)
}

/// Errors from the document store boundary
#[derive(Debug, Error)]
pub enum DocumentStoreError {
    /// The document is already gone
    #[error("document not found: {id}")]
    NotFound { id: Uuid },

    /// The store rejected or could not serve the operation
    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

/// Capabilities the coordinator needs from the document store.
///
/// Injected explicitly so tests can substitute fakes; no module-scope
/// client handles.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Enumerate every post id currently stored
    async fn list_ids(&self) -> Result<Vec<Uuid>, DocumentStoreError>;

    /// Delete one post document
    async fn delete(&self, id: Uuid) -> Result<(), DocumentStoreError>;
}

/// What a purge run should cover
#[derive(Debug, Clone)]
pub struct PurgeOptions {
    /// Restrict the run to these posts; `None` means the whole collection
    pub post_ids: Option<Vec<Uuid>>,
    /// When false, only documents are deleted and objects are deliberately
    /// left behind (orphaned). Useful for fixtures or out-of-band storage
    /// cleanup; never equivalent to a full purge.
    pub delete_objects: bool,
    /// Object categories to sweep per post
    pub categories: Vec<String>,
}

impl Default for PurgeOptions {
    fn default() -> Self {
        Self {
            post_ids: None,
            delete_objects: true,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl PurgeOptions {
    /// Full purge of a restricted id set
    pub fn for_posts(post_ids: Vec<Uuid>) -> Self {
        Self {
            post_ids: Some(post_ids),
            ..Self::default()
        }
    }

    /// Document-only purge (objects survive as orphans)
    pub fn documents_only() -> Self {
        Self {
            delete_objects: false,
            ..Self::default()
        }
    }
}

/// The operation within a post's pipeline that failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum PurgeStage {
    ListObjects { category: String },
    DeleteObject { key: String },
    DeleteDocument,
}

/// One post that could not be fully purged
#[derive(Debug, Clone, Serialize)]
pub struct PurgeFailure {
    pub post_id: Uuid,
    pub stage: PurgeStage,
    pub error: String,
}

/// Aggregate outcome of a purge run
#[derive(Debug, Default, Serialize)]
pub struct PurgeReport {
    /// Posts whose objects and document are all gone
    pub purged: Vec<Uuid>,
    /// Posts where some operation failed; their documents still exist
    pub failures: Vec<PurgeFailure>,
    /// Objects removed across all posts
    pub objects_deleted: usize,
}

impl PurgeReport {
    /// True only if every post's object deletions and document deletion
    /// succeeded
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

enum PostOutcome {
    Purged {
        post_id: Uuid,
        objects_deleted: usize,
    },
    Failed {
        failure: PurgeFailure,
        objects_deleted: usize,
    },
}

/// Coordinates deletion across the document store and object storage
pub struct PurgeCoordinator {
    documents: Arc<dyn DocumentStore>,
    objects: Arc<dyn ObjectStore>,
}

impl PurgeCoordinator {
    pub fn new(documents: Arc<dyn DocumentStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { documents, objects }
    }

    /// Run a purge and report the per-post outcome.
    ///
    /// Only the initial id enumeration can fail the run as a whole; after
    /// fan-out every failure is per-post and lands in the report.
    pub async fn run(&self, options: &PurgeOptions) -> Result<PurgeReport, DocumentStoreError> {
        let started = Instant::now();

        let post_ids = match &options.post_ids {
            Some(ids) => ids.clone(),
            None => self.documents.list_ids().await?,
        };

        tracing::info!(
            posts = post_ids.len(),
            delete_objects = options.delete_objects,
            "starting purge run"
        );

        let outcomes = join_all(
            post_ids
                .iter()
                .map(|post_id| self.purge_post(*post_id, options)),
        )
        .await;

        let mut report = PurgeReport::default();
        for outcome in outcomes {
            match outcome {
                PostOutcome::Purged {
                    post_id,
                    objects_deleted,
                } => {
                    report.purged.push(post_id);
                    report.objects_deleted += objects_deleted;
                }
                PostOutcome::Failed {
                    failure,
                    objects_deleted,
                } => {
                    report.failures.push(failure);
                    report.objects_deleted += objects_deleted;
                }
            }
        }

        let status = if report.is_success() { "success" } else { "error" };
        metrics::record_purge_run(status);
        metrics::record_purge_duration(started.elapsed());
        metrics::record_posts_purged(report.purged.len() as u64);
        metrics::record_objects_deleted(report.objects_deleted as u64);

        tracing::info!(
            purged = report.purged.len(),
            failed = report.failures.len(),
            objects_deleted = report.objects_deleted,
            duration_ms = started.elapsed().as_millis(),
            "purge run finished"
        );

        Ok(report)
    }

    /// Purge one post: every object under each category prefix, then the
    /// document. The document delete is only issued after all object deletes
    /// for this post succeeded.
    async fn purge_post(&self, post_id: Uuid, options: &PurgeOptions) -> PostOutcome {
        let mut objects_deleted = 0;

        if options.delete_objects {
            for category in &options.categories {
                let prefix = object_prefix(category, post_id);

                let keys = match self.objects.list(&prefix).await {
                    Ok(keys) => keys,
                    // An absent prefix simply has no objects
                    Err(e) if e.is_not_found() => Vec::new(),
                    Err(e) => {
                        return PostOutcome::Failed {
                            failure: PurgeFailure {
                                post_id,
                                stage: PurgeStage::ListObjects {
                                    category: category.clone(),
                                },
                                error: e.to_string(),
                            },
                            objects_deleted,
                        }
                    }
                };

                let results = join_all(keys.iter().map(|key| self.objects.delete(key))).await;

                let mut first_failure: Option<PurgeFailure> = None;
                for (key, result) in keys.iter().zip(results) {
                    match result {
                        Ok(()) => objects_deleted += 1,
                        // Already gone counts as done (idempotence)
                        Err(ObjectStoreError::NotFound { .. }) => {}
                        Err(e) => {
                            tracing::warn!(post_id = %post_id, key = %key, error = %e, "object delete failed");
                            first_failure.get_or_insert(PurgeFailure {
                                post_id,
                                stage: PurgeStage::DeleteObject { key: key.clone() },
                                error: e.to_string(),
                            });
                        }
                    }
                }

                if let Some(failure) = first_failure {
                    // Do not touch the document while any of its objects
                    // survive; the prefix must stay reachable for a retry.
                    return PostOutcome::Failed {
                        failure,
                        objects_deleted,
                    };
                }
            }
        }

        match self.documents.delete(post_id).await {
            Ok(()) => {}
            // Already gone counts as done (idempotence)
            Err(DocumentStoreError::NotFound { .. }) => {}
            Err(e) => {
                tracing::warn!(post_id = %post_id, error = %e, "document delete failed");
                return PostOutcome::Failed {
                    failure: PurgeFailure {
                        post_id,
                        stage: PurgeStage::DeleteDocument,
                        error: e.to_string(),
                    },
                    objects_deleted,
                };
            }
        }

        tracing::debug!(post_id = %post_id, objects_deleted, "post purged");
        PostOutcome::Purged {
            post_id,
            objects_deleted,
        }
    }
}
