//! # HTTP Layer
//!
//! axum router, shared state, envelopes, and the request pipeline:
//! auth gate -> rate/size limits -> validator -> mutation/query pipeline.

mod auth_routes;
mod error;
mod extract;
mod limit;
mod profile_routes;
mod response;
mod server;
mod state;
mod student_routes;

pub use extract::AuthUser;
pub use limit::{RateLimiter, RateLimits};
pub use response::{ErrorBody, MessageResponse};
pub use server::HttpServer;
pub use state::AppState;
