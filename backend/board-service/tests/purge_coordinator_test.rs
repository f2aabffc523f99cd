//! Integration tests: purge coordinator
//!
//! Exercises the coordinator against in-memory document and object stores
//! with failure injection.
//!
//! Coverage:
//! - Full removal of documents and objects across categories
//! - Idempotence (already-absent documents and objects are no-ops)
//! - Object-delete failure keeps the owning document intact
//! - Document-delete failure after object cleanup is reported as failed
//! - Fan-out independence between posts
//! - Document-only mode deliberately orphans objects
//! - Restricted id sets bound the blast radius

mod common;

use board_service::purge::{
    object_prefix, PurgeCoordinator, PurgeOptions, PurgeStage,
};
use common::fakes::{MemoryDocumentStore, MemoryObjectStore};
use std::sync::Arc;
use uuid::Uuid;

fn coordinator(
    docs: &MemoryDocumentStore,
    objects: &MemoryObjectStore,
) -> PurgeCoordinator {
    PurgeCoordinator::new(Arc::new(docs.clone()), Arc::new(objects.clone()))
}

fn image_key(post_id: Uuid, name: &str) -> String {
    format!("{}{}", object_prefix("post_images", post_id), name)
}

/// Store has {p1: images[a, b]}, {p2: images[c]}; a full run leaves both
/// stores empty and reports full success.
#[tokio::test]
async fn test_full_purge_removes_documents_and_objects() {
    let p1 = Uuid::new_v4();
    let p2 = Uuid::new_v4();

    let docs = MemoryDocumentStore::new([p1, p2]);
    let objects = MemoryObjectStore::new();
    objects.insert(&image_key(p1, "a.jpg"));
    objects.insert(&image_key(p1, "b.jpg"));
    objects.insert(&image_key(p2, "c.jpg"));

    let report = coordinator(&docs, &objects)
        .run(&PurgeOptions::default())
        .await
        .expect("purge run");

    assert!(report.is_success());
    assert_eq!(report.purged.len(), 2);
    assert_eq!(report.objects_deleted, 3);
    assert!(docs.is_empty());
    assert!(objects.is_empty());
    assert!(objects.keys_under(&object_prefix("post_images", p1)).is_empty());
    assert!(objects.keys_under(&object_prefix("post_images", p2)).is_empty());
}

/// Objects in every category are swept, not just images.
#[tokio::test]
async fn test_purge_sweeps_all_categories() {
    let posts: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
    let docs = MemoryDocumentStore::new(posts.iter().copied());
    let objects = MemoryObjectStore::new();

    for post_id in &posts {
        for n in 0..3 {
            objects.insert(&format!(
                "{}img-{}.jpg",
                object_prefix("post_images", *post_id),
                n
            ));
            objects.insert(&format!(
                "{}file-{}.pdf",
                object_prefix("post_attachments", *post_id),
                n
            ));
        }
    }

    let report = coordinator(&docs, &objects)
        .run(&PurgeOptions::default())
        .await
        .expect("purge run");

    assert!(report.is_success());
    assert_eq!(report.objects_deleted, 30);
    assert!(docs.is_empty());
    assert!(objects.is_empty());
}

/// A second run over the emptied store reports success with zero failures.
#[tokio::test]
async fn test_second_run_is_clean() {
    let p1 = Uuid::new_v4();
    let docs = MemoryDocumentStore::new([p1]);
    let objects = MemoryObjectStore::new();
    objects.insert(&image_key(p1, "a.jpg"));

    let purger = coordinator(&docs, &objects);
    let first = purger.run(&PurgeOptions::default()).await.expect("first run");
    assert!(first.is_success());

    let second = purger.run(&PurgeOptions::default()).await.expect("second run");
    assert!(second.is_success());
    assert!(second.purged.is_empty());
    assert!(second.failures.is_empty());
}

/// Re-purging explicit ids that are already gone treats not-found as
/// success on both stores.
#[tokio::test]
async fn test_explicit_ids_already_absent_is_success() {
    let p1 = Uuid::new_v4();
    let docs = MemoryDocumentStore::new([]);
    let objects = MemoryObjectStore::new();

    let report = coordinator(&docs, &objects)
        .run(&PurgeOptions::for_posts(vec![p1]))
        .await
        .expect("purge run");

    assert!(report.is_success());
    assert_eq!(report.purged, vec![p1]);
    assert_eq!(report.objects_deleted, 0);
}

/// When an object delete fails, the owning document must survive and the
/// post is reported failed. Unrelated posts are unaffected (fan-out
/// independence).
#[tokio::test]
async fn test_object_failure_preserves_document() {
    let p1 = Uuid::new_v4();
    let p2 = Uuid::new_v4();

    let docs = MemoryDocumentStore::new([p1, p2]);
    let objects = MemoryObjectStore::new();
    objects.insert(&image_key(p1, "a.jpg"));
    objects.insert(&image_key(p1, "b.jpg"));
    let failing = image_key(p2, "c.jpg");
    objects.insert(&failing);
    objects.fail_delete_of(&failing);

    let report = coordinator(&docs, &objects)
        .run(&PurgeOptions::default())
        .await
        .expect("purge run");

    assert!(!report.is_success());

    // p1 fully removed
    assert_eq!(report.purged, vec![p1]);
    assert!(!docs.contains(p1));
    assert!(objects.keys_under(&object_prefix("post_images", p1)).is_empty());

    // p2's document survives the object failure
    assert!(docs.contains(p2));
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.post_id, p2);
    assert_eq!(
        failure.stage,
        PurgeStage::DeleteObject {
            key: failing.clone()
        }
    );
    // No assertion on c's final state: sibling deletes are concurrent.
}

/// A listing failure is caught before any document delete is issued, so
/// the document must still exist.
#[tokio::test]
async fn test_list_failure_preserves_document() {
    let p1 = Uuid::new_v4();
    let docs = MemoryDocumentStore::new([p1]);
    let objects = MemoryObjectStore::new();
    objects.insert(&image_key(p1, "a.jpg"));
    objects.fail_list_of(&object_prefix("post_images", p1));

    let report = coordinator(&docs, &objects)
        .run(&PurgeOptions::default())
        .await
        .expect("purge run");

    assert!(!report.is_success());
    assert!(docs.contains(p1));
    assert!(objects.contains(&image_key(p1, "a.jpg")));
    assert!(matches!(
        report.failures[0].stage,
        PurgeStage::ListObjects { .. }
    ));
}

/// The one permitted inconsistent state: objects gone, document delete
/// failed. The post must be reported failed, never succeeded.
#[tokio::test]
async fn test_document_failure_after_object_cleanup_is_reported() {
    let p1 = Uuid::new_v4();
    let docs = MemoryDocumentStore::new([p1]);
    docs.fail_delete_of(p1);

    let objects = MemoryObjectStore::new();
    objects.insert(&image_key(p1, "a.jpg"));

    let report = coordinator(&docs, &objects)
        .run(&PurgeOptions::default())
        .await
        .expect("purge run");

    assert!(!report.is_success());
    assert!(report.purged.is_empty());

    // Objects are gone, the document remains
    assert!(objects.is_empty());
    assert!(docs.contains(p1));

    let failure = &report.failures[0];
    assert_eq!(failure.post_id, p1);
    assert_eq!(failure.stage, PurgeStage::DeleteDocument);
    assert_eq!(report.objects_deleted, 1);
}

/// Document-only mode removes documents and deliberately orphans objects.
#[tokio::test]
async fn test_documents_only_mode_orphans_objects() {
    let p1 = Uuid::new_v4();
    let docs = MemoryDocumentStore::new([p1]);
    let objects = MemoryObjectStore::new();
    objects.insert(&image_key(p1, "a.jpg"));

    let report = coordinator(&docs, &objects)
        .run(&PurgeOptions::documents_only())
        .await
        .expect("purge run");

    assert!(report.is_success());
    assert!(docs.is_empty());
    assert_eq!(report.objects_deleted, 0);
    assert!(objects.contains(&image_key(p1, "a.jpg")));
}

/// A restricted id set only touches the named posts.
#[tokio::test]
async fn test_restricted_id_set_bounds_blast_radius() {
    let p1 = Uuid::new_v4();
    let p2 = Uuid::new_v4();

    let docs = MemoryDocumentStore::new([p1, p2]);
    let objects = MemoryObjectStore::new();
    objects.insert(&image_key(p1, "a.jpg"));
    objects.insert(&image_key(p2, "b.jpg"));

    let report = coordinator(&docs, &objects)
        .run(&PurgeOptions::for_posts(vec![p1]))
        .await
        .expect("purge run");

    assert!(report.is_success());
    assert_eq!(report.purged, vec![p1]);
    assert!(!docs.contains(p1));
    assert!(docs.contains(p2));
    assert!(objects.contains(&image_key(p2, "b.jpg")));
}
