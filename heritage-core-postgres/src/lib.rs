pub mod executor;
pub mod postgres_repositories;
pub mod repository;
pub mod service;
pub mod utils;

pub use executor::Executor;
pub use postgres_repositories::{PostgresRepositories, RepositorySession};

#[cfg(test)]
pub mod test_helper;
