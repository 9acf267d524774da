//! Shared setup for the integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use fibertrack_app::auth::Session;
use fibertrack_app::config::AppConfig;
use fibertrack_app::handlers::auth;
use fibertrack_app::state::AppState;
use fibertrack_core::roles::{AccessLevel, Department, UserRole};
use fibertrack_db::models::project::CreateProject;
use fibertrack_db::models::user::RegisterUser;

/// Configuration with demo seeding off, so every test starts empty.
pub fn test_config() -> AppConfig {
    AppConfig {
        seed_demo_data: false,
        ..AppConfig::default()
    }
}

pub fn empty_state() -> AppState {
    AppState::in_memory(test_config()).expect("in-memory state")
}

pub fn profile(username: &str, email: &str, password: &str) -> RegisterUser {
    RegisterUser {
        username: username.to_string(),
        name: "Test User".to_string(),
        email: email.to_string(),
        phone: String::new(),
        role: UserRole::Engineer,
        access_level: AccessLevel::User,
        department: Department::Engineering,
        position: "Engineer".to_string(),
        password: password.to_string(),
    }
}

/// Register `testuser` / `password123` and log in.
pub async fn signed_in(state: &AppState) -> Session {
    auth::register(state, profile("testuser", "test@example.com", "password123"))
        .await
        .expect("register");
    auth::login(state, "testuser", "password123")
        .await
        .expect("login")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn project_input(code: &str) -> CreateProject {
    let mut input = CreateProject::new(code, "Test Customer", format!("Test project {code}"), date(2024, 12, 31));
    input.assignee = "Test Assignee".to_string();
    input
}
