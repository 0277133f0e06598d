pub mod catalog;
pub mod identity;
pub mod patch;
pub mod profile;
pub mod proposal;
pub mod social;
pub mod submission;

// Re-exports
pub use catalog::*;
pub use identity::*;
pub use patch::*;
pub use profile::*;
pub use proposal::*;
pub use social::*;
pub use submission::*;
