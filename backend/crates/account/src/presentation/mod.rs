//! Presentation Layer
//!
//! HTTP handlers, DTOs, hypermedia links, bearer authentication and router.

pub mod dto;
pub mod handlers;
pub mod links;
pub mod middleware;
pub mod router;

pub use handlers::AccountAppState;
pub use middleware::CurrentAccount;
pub use router::{PgAccountAppState, account_router};
