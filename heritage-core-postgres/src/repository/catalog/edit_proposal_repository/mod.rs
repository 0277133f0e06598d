pub mod create_batch;
pub mod find_by_object_id;
pub mod find_by_user_id;
pub mod load_batch;
pub mod repo_impl;
pub mod update_status;

pub use repo_impl::EditProposalRepositoryImpl;
