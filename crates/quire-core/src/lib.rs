//! # Quire Core
//!
//! The domain layer of the Quire blog service.
//! This crate holds the post model, its field rules and the repository port,
//! with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError};
pub use service::PostService;
