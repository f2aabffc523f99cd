/// HTTP handlers for board-service endpoints
///
/// - Posts: create, read, delete posts; like counters; image uploads
/// - Profile: own profile and onboarding survey
/// - Admin: bulk purge of posts and their stored objects
pub mod admin;
pub mod posts;
pub mod profile;

pub use admin::purge_posts;
pub use posts::{
    create_post, delete_post, get_post, like_post, list_posts, unlike_post, upload_post_image,
};
pub use profile::{get_me, save_survey, upsert_me};
