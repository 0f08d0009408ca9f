//! # Shared Application State
//!
//! One `AppState` behind an `Arc`, wiring the in-memory stores into the
//! services. The roster and portal keep separate collections; the user
//! store is shared between the auth and profile services.

use std::sync::Arc;

use crate::auth::{AuthService, PasswordPolicy};
use crate::config::AppConfig;
use crate::portal::{MemoryUserStore, ProfileService};
use crate::students::{MemoryStudentStore, RosterService};
use crate::uploads::PictureStore;

use super::limit::RateLimits;

/// Shared state for all routes
pub struct AppState {
    pub roster: RosterService<MemoryStudentStore>,
    pub auth: AuthService<MemoryUserStore>,
    pub profile: ProfileService<MemoryUserStore>,
    pub pictures: PictureStore,
    pub limits: RateLimits,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let students = Arc::new(MemoryStudentStore::new());
        let users = Arc::new(MemoryUserStore::new());

        Self {
            roster: RosterService::new(students),
            auth: AuthService::new(
                users.clone(),
                config.jwt_config(),
                PasswordPolicy::default(),
            ),
            profile: ProfileService::new(users),
            pictures: PictureStore::new(config.upload_dir.clone()),
            limits: RateLimits::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_and_profile_share_one_user_store() {
        let state = AppState::new(&AppConfig::default());

        let (user, _) = state
            .auth
            .register(&serde_json::json!({
                "name": "Jane",
                "email": "jane@example.com",
                "password": "password123"
            }))
            .unwrap();

        // Registered identity is visible to the profile service
        assert_eq!(state.profile.profile(user.id).unwrap().email, user.email);
    }
}
