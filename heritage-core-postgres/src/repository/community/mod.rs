pub mod comment_like_repository;
pub mod comment_repository;
pub mod heritage_like_repository;

pub use comment_like_repository::CommentLikeRepositoryImpl;
pub use comment_repository::CommentRepositoryImpl;
pub use heritage_like_repository::HeritageLikeRepositoryImpl;
