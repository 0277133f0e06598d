pub mod edit_proposal_repository;
pub mod heritage_object_repository;
pub mod submission_repository;

pub use edit_proposal_repository::EditProposalRepositoryImpl;
pub use heritage_object_repository::HeritageObjectRepositoryImpl;
pub use submission_repository::SubmissionRepositoryImpl;
