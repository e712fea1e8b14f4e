//! # Inkwell Shared
//!
//! Form payloads, page view models and error bodies exchanged with the
//! blog server. Kept free of server dependencies so a client can reuse them.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
