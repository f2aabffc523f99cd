/// Board Service Library
///
/// Community board backend for the Agora platform: posts with tags and
/// engagement counters, user profiles with an onboarding survey, image
/// uploads to object storage, and the purge coordinator that removes posts
/// together with their stored objects.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for posts and profiles
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `purge`: Bulk deletion coordinator across document and object stores
/// - `middleware`: HTTP middleware for authentication and ownership
/// - `metrics`: Observability and metrics collection
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod purge;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
