mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use fibertrack_app::auth::password::CredentialScheme;
use fibertrack_app::config::AppConfig;
use fibertrack_app::error::AppError;
use fibertrack_app::handlers::{auth, projects};
use fibertrack_app::state::AppState;
use fibertrack_core::error::CoreError;
use fibertrack_db::FileBlobStore;
use fibertrack_events::types as event_types;

use common::{empty_state, profile, project_input, signed_in, test_config};

#[tokio::test]
async fn duplicate_username_or_email_is_rejected() {
    let state = empty_state();
    auth::register(&state, profile("testuser", "test@example.com", "password123"))
        .await
        .unwrap();

    let same_name = auth::register(&state, profile("testuser", "new@example.com", "password123")).await;
    assert_matches!(same_name, Err(AppError::Core(CoreError::Conflict(_))));

    let same_email = auth::register(&state, profile("other", "test@example.com", "password123")).await;
    assert_matches!(same_email, Err(AppError::Core(CoreError::Conflict(_))));

    assert_eq!(auth::list_users(&state).await.len(), 1);
}

#[tokio::test]
async fn login_by_username_or_email_exposes_profile_without_password() {
    let state = empty_state();
    let session = signed_in(&state).await;
    assert!(auth::is_authenticated(&state).await);

    let user = auth::current_user(&state).await.unwrap();
    assert_eq!(user.username, "testuser");
    assert_eq!(user.id, session.user_id);
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password").is_none());

    auth::logout(&state).await;
    let by_email = auth::login(&state, "test@example.com", "password123").await.unwrap();
    assert_eq!(by_email.user_id, session.user_id);
}

#[tokio::test]
async fn wrong_password_and_unknown_user_fail_distinctly() {
    let state = empty_state();
    auth::register(&state, profile("testuser", "test@example.com", "password123"))
        .await
        .unwrap();

    assert_matches!(
        auth::login(&state, "testuser", "password124").await,
        Err(AppError::Core(CoreError::WrongPassword))
    );
    assert_matches!(
        auth::login(&state, "nobody", "password123").await,
        Err(AppError::Core(CoreError::UnknownUser(_)))
    );
    assert!(!auth::is_authenticated(&state).await);
}

#[tokio::test]
async fn logout_always_clears_and_invalidates_session() {
    let state = empty_state();
    auth::logout(&state).await;
    assert!(!auth::is_authenticated(&state).await);

    let session = signed_in(&state).await;
    auth::logout(&state).await;
    assert!(!auth::is_authenticated(&state).await);
    assert!(auth::current_user(&state).await.is_none());

    let result = projects::create_project(&state, &session, project_input("TEST-001")).await;
    assert_matches!(result, Err(AppError::Core(CoreError::Unauthorized(_))));
    assert!(projects::list_projects(&state).await.is_empty());
}

#[tokio::test]
async fn newer_login_replaces_older_session() {
    let state = empty_state();
    let first = signed_in(&state).await;
    let second = auth::login(&state, "testuser", "password123").await.unwrap();
    assert_ne!(first.session_id, second.session_id);

    assert_matches!(
        state.authorize(&first).await,
        Err(AppError::Core(CoreError::Unauthorized(_)))
    );
    assert!(state.authorize(&second).await.is_ok());
}

#[tokio::test]
async fn short_password_and_bad_email_are_validation_errors() {
    let state = empty_state();
    assert_matches!(
        auth::register(&state, profile("testuser", "test@example.com", "12345")).await,
        Err(AppError::Core(CoreError::Validation(_)))
    );
    assert_matches!(
        auth::register(&state, profile("testuser", "not-an-email", "password123")).await,
        Err(AppError::Core(CoreError::Validation(_)))
    );
}

#[tokio::test]
async fn argon2_directory_persists_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        credential_scheme: CredentialScheme::Argon2,
        ..test_config()
    };

    {
        let store = Arc::new(FileBlobStore::open(dir.path()).unwrap());
        let state = AppState::new(config.clone(), store).unwrap();
        auth::register(&state, profile("testuser", "test@example.com", "password123"))
            .await
            .unwrap();
        let stored = state.users.read().await.list()[0].password.clone();
        assert!(stored.starts_with("$argon2id$"));
    }

    let store = Arc::new(FileBlobStore::open(dir.path()).unwrap());
    let state = AppState::new(config, store).unwrap();
    assert!(auth::login(&state, "testuser", "password123").await.is_ok());
}

#[tokio::test]
async fn login_sees_users_written_by_another_state() {
    let dir = tempfile::tempdir().unwrap();
    let open = || -> AppState {
        let store = Arc::new(FileBlobStore::open(dir.path()).unwrap());
        AppState::new(test_config(), store).unwrap()
    };
    let reader = open();
    let writer = open();

    auth::register(&writer, profile("testuser", "test@example.com", "password123"))
        .await
        .unwrap();
    assert!(auth::login(&reader, "testuser", "password123").await.is_ok());
}

#[tokio::test]
async fn auth_events_are_published() {
    let state = empty_state();
    let mut rx = state.event_bus.subscribe();
    signed_in(&state).await;
    auth::logout(&state).await;

    let types: Vec<String> = [rx.recv().await, rx.recv().await, rx.recv().await]
        .into_iter()
        .map(|e| e.unwrap().event_type)
        .collect();
    assert_eq!(
        types,
        vec![
            event_types::AUTH_REGISTERED,
            event_types::AUTH_LOGGED_IN,
            event_types::AUTH_LOGGED_OUT
        ]
    );
}

#[tokio::test]
async fn plaintext_password_starting_like_a_hash_can_log_in() {
    let state = empty_state();
    auth::register(&state, profile("testuser", "test@example.com", "$argon2secret"))
        .await
        .unwrap();

    let session = auth::login(&state, "testuser", "$argon2secret").await.unwrap();
    assert_eq!(session.username, "testuser");
    assert!(auth::is_authenticated(&state).await);
}
