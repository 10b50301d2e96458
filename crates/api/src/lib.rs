//! HTTP API layer for newsdesk-rs.
//!
//! - **Endpoints**: public content API under `/api`, back office under
//!   `/api/admin`
//! - **Extractors**: authentication (required, optional, admin-only)
//! - **Middleware**: bearer-token resolution into request extensions
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
