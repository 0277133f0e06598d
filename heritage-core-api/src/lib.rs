pub mod domain;
pub mod service;
pub mod error;

pub use error::*;
pub use domain::*;
pub use service::*;