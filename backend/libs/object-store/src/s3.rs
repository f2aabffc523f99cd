/// S3-backed implementation of the [`ObjectStore`] trait
use crate::config::StorageConfig;
use crate::error::ObjectStoreError;
use crate::ObjectStore;
use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct S3ObjectStore {
    client: Arc<Client>,
    config: StorageConfig,
}

impl S3ObjectStore {
    /// Create a store with configuration from environment
    pub async fn connect() -> Result<Self, ObjectStoreError> {
        let config = StorageConfig::from_env().map_err(ObjectStoreError::Unavailable)?;
        Self::with_config(config).await
    }

    /// Create a store with custom configuration. The configured region takes
    /// precedence over whatever the ambient AWS environment resolves.
    pub async fn with_config(config: StorageConfig) -> Result<Self, ObjectStoreError> {
        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;
        let client = Client::new(&aws_config);

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Health check for S3 connectivity
    pub async fn health_check(&self) -> Result<(), ObjectStoreError> {
        self.client
            .head_bucket()
            .bucket(&self.config.bucket)
            .send()
            .await
            .map_err(|e| ObjectStoreError::classify(DisplayErrorContext(&e), &self.config.bucket))?;

        Ok(())
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list(&self, prefix: &str) -> Result<Vec<String>, ObjectStoreError> {
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let response = self
                .client
                .list_objects_v2()
                .bucket(&self.config.bucket)
                .prefix(prefix)
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(|e| ObjectStoreError::classify(DisplayErrorContext(&e), prefix))?;

            keys.extend(
                response
                    .contents()
                    .iter()
                    .filter_map(|obj| obj.key().map(|k| k.to_string())),
            );

            match response.next_continuation_token() {
                Some(token) => continuation = Some(token.to_string()),
                None => break,
            }
        }

        Ok(keys)
    }

    async fn delete(&self, key: &str) -> Result<(), ObjectStoreError> {
        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ObjectStoreError::classify(DisplayErrorContext(&e), key))?;

        tracing::debug!(key = %key, "deleted object");
        Ok(())
    }

    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ObjectStoreError> {
        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| ObjectStoreError::classify(DisplayErrorContext(&e), key))?;

        Ok(self.config.cdn_url(key))
    }

    async fn exists(&self, key: &str) -> Result<bool, ObjectStoreError> {
        match self
            .client
            .head_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => match ObjectStoreError::classify(DisplayErrorContext(&e), key) {
                ObjectStoreError::NotFound { .. } => Ok(false),
                other => Err(other),
            },
        }
    }
}
