/// Object storage boundary for Agora services
///
/// Provides the [`ObjectStore`] trait consumed by application code plus the
/// S3-backed production implementation. Application code and the purge
/// coordinator only ever see the trait, so tests can substitute in-memory
/// fakes without any process-wide state.
use async_trait::async_trait;

pub mod config;
pub mod error;
pub mod s3;

pub use config::StorageConfig;
pub use error::ObjectStoreError;
pub use s3::S3ObjectStore;

/// Capabilities the application needs from object storage.
///
/// Keys are flat strings; hierarchy exists only by prefix convention
/// (`{category}/{record_id}/...`). Listing a prefix is the only index over
/// a record's objects.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List all object keys under a prefix. An absent prefix is an empty list.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, ObjectStoreError>;

    /// Delete one object by key.
    async fn delete(&self, key: &str) -> Result<(), ObjectStoreError>;

    /// Upload a blob and return its retrievable URL.
    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ObjectStoreError>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> Result<bool, ObjectStoreError>;
}
