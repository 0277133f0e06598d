pub mod models;
pub mod repository;
pub mod utils;

pub use models::*;
pub use repository::*;
pub use utils::*;
