//! HTTP server module for the Stargate API.
//!
//! Controllers are thin: each handler extracts its input, dispatches one
//! request through the [`Mediator`](crate::services::Mediator) and wraps the
//! outcome in the response envelope.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing and validation                         │
//! │  - Response envelope, error mapping                       │
//! │  - CORS, compression, tracing, panic catching             │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Command and query handlers                             │
//! │  - Business rules                                         │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - LocalRepository / PostgresRepository                   │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use dto::ApiResponse;
pub use error::AppError;
pub use router::create_router;
pub use state::AppState;
