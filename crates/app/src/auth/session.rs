use fibertrack_core::roles::{AccessLevel, UserRole};
use fibertrack_core::types::{new_id, now, EntityId, Timestamp};
use fibertrack_db::models::user::User;
use serde::Serialize;

/// Proof of a successful login, passed explicitly to every mutating command.
///
/// Only the session most recently returned by `login` is accepted; logging
/// out or logging in again invalidates older values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: EntityId,
    pub user_id: EntityId,
    pub username: String,
    pub role: UserRole,
    pub access_level: AccessLevel,
    pub started_at: Timestamp,
}

impl Session {
    pub fn for_user(user: &User) -> Self {
        Self {
            session_id: new_id(),
            user_id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            access_level: user.access_level,
            started_at: now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.access_level == AccessLevel::Admin
    }
}
