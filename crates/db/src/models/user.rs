//! User entity model and DTOs.

use fibertrack_core::roles::{AccessLevel, Department, UserRole};
use fibertrack_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A registered user as persisted in the `users` blob.
///
/// Contains the stored credential -- NEVER hand this to the UI directly.
/// Use [`UserInfo`] for external-facing output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: UserRole,
    pub access_level: AccessLevel,
    pub department: Department,
    #[serde(default)]
    pub position: String,
    /// Plaintext password or an Argon2id PHC string, depending on the
    /// credential scheme in force when the user registered.
    pub password: String,
    pub created_at: Timestamp,
}

impl_record!(User, "user");

/// Safe user representation (no credential).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: EntityId,
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub access_level: AccessLevel,
    pub department: Department,
    pub position: String,
    pub created_at: Timestamp,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
            access_level: user.access_level,
            department: user.department,
            position: user.position.clone(),
            created_at: user.created_at,
        }
    }
}

/// Registration profile submitted by a new user.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: UserRole,
    pub access_level: AccessLevel,
    pub department: Department,
    #[serde(default)]
    pub position: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_json_uses_camel_case_and_wire_enums() {
        let raw = r#"{
            "id": "1",
            "username": "admin",
            "name": "Administrator",
            "role": "director",
            "accessLevel": "admin",
            "email": "admin@example.com",
            "phone": "+7 (999) 999-99-99",
            "department": "management",
            "position": "Director",
            "password": "admin123",
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.access_level, AccessLevel::Admin);
        assert_eq!(user.role, UserRole::Director);

        let info = UserInfo::from(&user);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["accessLevel"], "admin");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn register_profile_rejects_bad_email_and_short_username() {
        let profile = RegisterUser {
            username: "ab".into(),
            name: "Test".into(),
            email: "not-an-email".into(),
            phone: String::new(),
            role: UserRole::Engineer,
            access_level: AccessLevel::User,
            department: Department::Engineering,
            position: String::new(),
            password: "password123".into(),
        };
        let errors = profile.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
    }
}
