pub mod identifiable;
pub mod index;
pub mod indexable;

pub mod catalog;
pub mod community;
pub mod identity;

// Re-exports
pub use identifiable::*;
pub use index::*;
pub use indexable::*;

pub use catalog::*;
pub use community::*;
pub use identity::*;
