//! Portal subsystem: identity + self-service profile
//!
//! In the portal, identity and profile are the same entity: a `User`
//! document owns its credential (hashed, never serialized) alongside
//! personal and academic profile fields. All portal operations act on the
//! authenticated identity's own record.

mod profile;
mod user;

pub use profile::ProfileService;
pub use user::{GradeEntry, MemoryUserStore, User, UserStore};
