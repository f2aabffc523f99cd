/// Business logic layer for board-service
///
/// - Post service: post creation, retrieval, counters
pub mod posts;

pub use posts::PostService;
