/// Object storage configuration shared across services
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// S3 bucket name
    pub bucket: String,
    /// AWS region
    pub region: String,
    /// Base URL for public access (CDN domain)
    pub base_url: String,
    /// Whether to use path-style URLs (false = virtual-hosted-style)
    pub path_style: bool,
}

impl StorageConfig {
    /// Load storage configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            bucket: std::env::var("S3_BUCKET").unwrap_or_else(|_| "agora-content".to_string()),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            base_url: std::env::var("S3_BASE_URL")
                .unwrap_or_else(|_| "https://s3.amazonaws.com".to_string()),
            path_style: std::env::var("S3_PATH_STYLE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
        })
    }

    /// Build S3 object URL
    pub fn object_url(&self, key: &str) -> String {
        if self.path_style {
            format!("{}/{}/{}", self.base_url, self.bucket, key)
        } else {
            format!("https://{}.s3.amazonaws.com/{}", self.bucket, key)
        }
    }

    /// Get CDN URL for object
    pub fn cdn_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(path_style: bool) -> StorageConfig {
        StorageConfig {
            bucket: "test-bucket".to_string(),
            region: "us-east-1".to_string(),
            base_url: "https://s3.amazonaws.com".to_string(),
            path_style,
        }
    }

    #[test]
    fn test_object_url_virtual_hosted_style() {
        let config = test_config(false);
        let url = config.object_url("post_images/abc/cover.jpg");
        assert!(url.contains("test-bucket.s3.amazonaws.com"));
    }

    #[test]
    fn test_object_url_path_style() {
        let config = test_config(true);
        let url = config.object_url("post_images/abc/cover.jpg");
        assert_eq!(
            url,
            "https://s3.amazonaws.com/test-bucket/post_images/abc/cover.jpg"
        );
    }

    #[test]
    fn test_cdn_url() {
        let config = test_config(false);
        assert_eq!(
            config.cdn_url("post_images/abc/cover.jpg"),
            "https://s3.amazonaws.com/post_images/abc/cover.jpg"
        );
    }
}
