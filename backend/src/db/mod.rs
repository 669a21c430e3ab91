//! Database module for person and astronaut records.
//!
//! Storage is reached only through the repository traits, so backends can be
//! swapped without touching the service layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Service Layer (crate::services) - command/query        │
//! │  handlers and business rules                            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!        ┌────────────┴─────────────┐
//!        │                          │
//! ┌──────▼──────────┐     ┌─────────▼─────────┐
//! │ LocalRepository │     │ PostgresRepository│
//! │  (in-memory)    │     │  (Diesel + r2d2)  │
//! └─────────────────┘     └───────────────────┘
//! ```
//!
//! Use [`RepositoryFactory`] to build the backend selected by configuration.
//! The local backend is always built; Postgres needs the `postgres-repo`
//! feature.

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;

#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::PostgresConfig;
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    AstronautRepository, ErrorContext, FullRepository, PersonRepository, RepositoryError,
    RepositoryResult,
};
