/// Error taxonomy for object storage operations
///
/// Callers care about three cases: the object is already gone (usually a
/// successful no-op for deletion flows), the caller is not allowed to touch it,
/// or the store could not be reached. Everything the AWS SDK reports is folded
/// into one of these.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjectStoreError {
    /// The object (or prefix) does not exist
    #[error("object not found: {key}")]
    NotFound { key: String },

    /// The store rejected the operation for this credential
    #[error("permission denied for {key}")]
    PermissionDenied { key: String },

    /// Transient transport or service failure
    #[error("object store unavailable: {0}")]
    Unavailable(String),
}

impl ObjectStoreError {
    /// Whether this error means the object was already absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, ObjectStoreError::NotFound { .. })
    }

    /// Classify an AWS SDK failure by its service error message.
    ///
    /// The SDK wraps service errors several layers deep; the error code
    /// always survives into the Display output, so match on that the same
    /// way for every operation type.
    pub fn classify<E: std::fmt::Display>(err: E, key: &str) -> Self {
        let msg = format!("{}", err);
        if msg.contains("NoSuchKey") || msg.contains("NotFound") || msg.contains("404") {
            ObjectStoreError::NotFound {
                key: key.to_string(),
            }
        } else if msg.contains("AccessDenied") || msg.contains("403") {
            ObjectStoreError::PermissionDenied {
                key: key.to_string(),
            }
        } else {
            ObjectStoreError::Unavailable(msg)
        }
    }
}
