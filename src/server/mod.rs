//! HTTP server exposing the invoice actions
//!
//! `ServerBuilder` wires a store, a view cache and an optional event bus into
//! an axum `Router` with:
//! - the invoice list view and form action routes
//! - health check routes
//! - any custom routes supplied by the caller

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
