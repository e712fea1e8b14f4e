//! # Inkwell Core
//!
//! The domain layer of the Inkwell blog.
//! This crate contains the entities, the ports infrastructure must implement,
//! and the application services that compose them. It has zero infrastructure
//! dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{CredentialError, DomainError, RepoError};
