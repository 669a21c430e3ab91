//! # Stargate API
//!
//! Personnel records for the Astronaut Career Tracking System.
//!
//! The crate stores people, their astronaut duty history and a per-person
//! astronaut career summary, and serves them over a small REST API built
//! with Axum.
//!
//! ## Architecture
//!
//! - [`models`]: domain records and typed ids
//! - [`db`]: repository traits with in-memory and Postgres backends
//! - [`services`]: command and query handlers dispatched by a mediator
//! - [`config`]: server settings read from the environment
//! - [`http`]: Axum router, handlers and the response envelope
//!
//! The one cross-record rule: an astronaut detail can only be created for a
//! person that already has at least one astronaut duty.

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
