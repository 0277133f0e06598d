pub mod create_batch;
pub mod find_by_username_hash;
pub mod load_batch;
pub mod repo_impl;
pub mod test_utils;

pub use repo_impl::AppUserRepositoryImpl;
