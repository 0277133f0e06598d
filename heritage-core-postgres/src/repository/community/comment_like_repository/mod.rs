pub mod count_by_comment_id;
pub mod liked_comment_ids;
pub mod repo_impl;
pub mod toggle;

pub use repo_impl::CommentLikeRepositoryImpl;
