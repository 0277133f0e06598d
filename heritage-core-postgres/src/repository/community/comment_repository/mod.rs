pub mod author_stats;
pub mod create_batch;
pub mod find_recent_by_user_id;
pub mod find_replies_by_parent_ids;
pub mod find_top_level_by_object_id;
pub mod load_batch;
pub mod repo_impl;
pub mod soft_delete;

pub use repo_impl::CommentRepositoryImpl;
