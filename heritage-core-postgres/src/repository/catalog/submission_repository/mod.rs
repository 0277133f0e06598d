pub mod create_batch;
pub mod find_by_user_id;
pub mod load_batch;
pub mod mark_converted;
pub mod repo_impl;
pub mod test_utils;
pub mod update_status;

pub use repo_impl::SubmissionRepositoryImpl;
