//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod comment_repo;
pub mod dashboard_repo;
pub mod user_repo;

pub use comment_repo::CommentRepo;
pub use dashboard_repo::DashboardRepo;
pub use user_repo::UserRepo;
