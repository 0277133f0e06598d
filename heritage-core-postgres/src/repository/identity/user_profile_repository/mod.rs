pub mod create_batch;
pub mod load_batch;
pub mod repo_impl;
pub mod test_utils;
pub mod update_photo_url;

pub use repo_impl::UserProfileRepositoryImpl;
