//! Application services - the use cases handlers call into.
//!
//! Each service owns the ports it needs behind `Arc<dyn ...>` so the server can
//! share one instance across workers.

mod accounts;
mod blog;
mod session;

#[cfg(test)]
mod fakes;

pub use accounts::AccountService;
pub use blog::{BlogService, PostThread};
pub use session::SessionManager;
