/// Database access layer
///
/// Repository functions are free async fns over a `PgPool`, one module per
/// aggregate. Higher layers (services, purge coordinator) own transactions
/// and error mapping.
pub mod post_repo;
pub mod user_repo;
