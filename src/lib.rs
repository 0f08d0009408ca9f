//! campusd - a student records service
//!
//! Two REST surfaces over one validation/error/envelope stack:
//! - a public roster API for administrative student CRUD
//! - a bearer-token-gated portal API for self-service profile editing

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod portal;
pub mod students;
pub mod uploads;
pub mod validate;
