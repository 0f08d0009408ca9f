//! # campusd Auth Module
//!
//! Registration, login, password hashing, and stateless JWT verification
//! for the student portal. Tokens are 30-day bearer JWTs; logout is a
//! client-side discard. Passwords are hashed exactly once, at identity
//! creation, never on arbitrary saves.

pub mod crypto;
pub mod errors;
pub mod jwt;
pub mod service;

pub use crypto::{hash_password, verify_password, PasswordPolicy};
pub use errors::{AuthError, AuthResult};
pub use jwt::{JwtClaims, JwtConfig, JwtManager, TokenResponse};
pub use service::AuthService;
