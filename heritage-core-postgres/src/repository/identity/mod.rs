pub mod app_user_repository;
pub mod user_profile_repository;

pub use app_user_repository::AppUserRepositoryImpl;
pub use user_profile_repository::UserProfileRepositoryImpl;
