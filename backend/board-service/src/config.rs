/// Configuration management for board-service
///
/// This module handles loading and managing configuration from environment
/// variables.
use object_store::StorageConfig;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Object storage configuration
    pub storage: StorageConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// RS256 public key (PEM) of the hosted auth provider
    pub public_key_pem: String,
    /// Users allowed to run admin operations (bulk purge)
    pub admin_ids: Vec<Uuid>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("BOARD_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("BOARD_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8081),
            },
            cors: CorsConfig {
                allowed_origins: resolve_allowed_origins(
                    &app_env,
                    std::env::var("CORS_ALLOWED_ORIGINS").ok(),
                )?,
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/agora".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            storage: StorageConfig::from_env()?,
            auth: resolve_auth(
                &app_env,
                std::env::var("AUTH_PUBLIC_KEY_PEM").ok(),
                std::env::var("ADMIN_USER_IDS").ok(),
            )?,
        })
    }

    /// Whether the given user may run admin operations
    pub fn is_admin(&self, user_id: Uuid) -> bool {
        self.auth.admin_ids.contains(&user_id)
    }
}

fn is_production(app_env: &str) -> bool {
    app_env.eq_ignore_ascii_case("production")
}

/// Resolve the allowed CORS origins. Production refuses to run without an
/// explicit origin list and rejects the wildcard.
fn resolve_allowed_origins(app_env: &str, raw: Option<String>) -> Result<String, String> {
    let allowed_origins = match raw {
        Some(value) => value,
        None if is_production(app_env) => {
            return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
        }
        None => "http://localhost:3000".to_string(),
    };

    if is_production(app_env) && allowed_origins.trim() == "*" {
        return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
    }

    Ok(allowed_origins)
}

/// Resolve auth settings. Production requires the provider public key and a
/// non-empty admin list.
fn resolve_auth(
    app_env: &str,
    public_key_pem: Option<String>,
    admin_ids_raw: Option<String>,
) -> Result<AuthConfig, String> {
    let public_key_pem = match public_key_pem {
        Some(value) => value,
        None if is_production(app_env) => {
            return Err("AUTH_PUBLIC_KEY_PEM must be set in production".to_string())
        }
        None => String::new(),
    };

    let admin_ids = parse_admin_ids(admin_ids_raw)?;
    if is_production(app_env) && admin_ids.is_empty() {
        return Err("ADMIN_USER_IDS must be set in production".to_string());
    }

    Ok(AuthConfig {
        public_key_pem,
        admin_ids,
    })
}

fn parse_admin_ids(raw: Option<String>) -> Result<Vec<Uuid>, String> {
    let raw = match raw {
        Some(value) => value,
        None => return Ok(Vec::new()),
    };

    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| Uuid::parse_str(s).map_err(|e| format!("Invalid ADMIN_USER_IDS entry '{s}': {e}")))
        .collect()
}
