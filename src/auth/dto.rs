use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::{Badge, Profile, Settings, User};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Profile update payload. Unknown fields (gamification state in
/// particular) are rejected outright so derived values cannot be set
/// through this contract.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub profile: Option<Profile>,
    pub settings: Option<Settings>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub profile: Profile,
    pub xp: i64,
    pub level: i32,
    pub streak: i32,
    pub max_streak: i32,
    pub badges: Vec<Badge>,
    pub settings: Settings,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            role: u.role,
            profile: u.profile.0,
            xp: u.xp,
            level: u.level,
            streak: u.streak,
            max_streak: u.max_streak,
            badges: u.badges.0,
            settings: u.settings.0,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: PublicUser,
}
