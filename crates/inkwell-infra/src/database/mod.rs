//! Relational persistence via SeaORM (PostgreSQL or SQLite).

mod base;
mod connections;
pub mod entity;
mod repos;

pub use base::SqlRepository;
pub use connections::{DatabaseConfig, connect};
pub use repos::{SqlCommentRepository, SqlPostRepository, SqlSessionRepository, SqlUserRepository};

#[cfg(test)]
mod tests;
