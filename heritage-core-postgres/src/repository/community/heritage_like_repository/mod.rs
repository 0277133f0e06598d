pub mod count_by_object_id;
pub mod count_by_user_id;
pub mod find_recent_by_user_id;
pub mod liked_object_ids;
pub mod repo_impl;
pub mod toggle;

pub use repo_impl::HeritageLikeRepositoryImpl;
