//! Registration, login and logout.
//!
//! Both `register` and `login` re-read the user directory first so that
//! users added by another process sharing the blob store are visible.

use fibertrack_core::error::CoreError;
use fibertrack_core::types::{new_id, now};
use fibertrack_db::models::user::{RegisterUser, User, UserInfo};
use fibertrack_events::{types as event_types, ChangeEvent, EntityKind};
use validator::Validate;

use crate::auth::password::{validate_password_strength, verify_credential};
use crate::auth::Session;
use crate::error::AppResult;
use crate::state::AppState;

/// Add a user to the persisted directory.
///
/// Does not sign the new user in.
pub async fn register(state: &AppState, profile: RegisterUser) -> AppResult<UserInfo> {
    profile.validate().map_err(CoreError::from)?;
    validate_password_strength(&profile.password, state.config.min_password_length)
        .map_err(CoreError::Validation)?;

    let mut users = state.users.write().await;
    users.reload()?;
    if users.exists(&profile.username, &profile.email) {
        tracing::warn!(username = %profile.username, "Registration rejected: duplicate user");
        return Err(CoreError::Conflict(
            "A user with this username or email already exists".into(),
        )
        .into());
    }

    let password = state.config.credential_scheme.store(&profile.password)?;
    let user = User {
        id: new_id(),
        username: profile.username,
        name: profile.name,
        email: profile.email,
        phone: profile.phone,
        role: profile.role,
        access_level: profile.access_level,
        department: profile.department,
        position: profile.position,
        password,
        created_at: now(),
    };
    let info = UserInfo::from(&user);
    users.insert(user)?;
    drop(users);

    tracing::info!(user_id = %info.id, username = %info.username, "User registered");
    state.event_bus.publish(
        ChangeEvent::entity(event_types::AUTH_REGISTERED, EntityKind::User, info.id.clone()),
    );
    Ok(info)
}

/// Sign in by username or email.
///
/// On success the returned session becomes the single active one. On failure
/// the current session, if any, is left as it was.
pub async fn login(state: &AppState, identifier: &str, password: &str) -> AppResult<Session> {
    let session = {
        let mut users = state.users.write().await;
        users.reload()?;
        let Some(user) = users.find_by_identifier(identifier) else {
            tracing::warn!(identifier, "Login rejected: unknown user");
            return Err(CoreError::UnknownUser(identifier.to_string()).into());
        };
        if !verify_credential(password, &user.password)? {
            tracing::warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(CoreError::WrongPassword.into());
        }
        let session = Session::for_user(user);
        let mut auth = state.auth.write().await;
        auth.session = Some(session.clone());
        auth.user = Some(UserInfo::from(user));
        session
    };

    tracing::info!(user_id = %session.user_id, username = %session.username, "User logged in");
    state.event_bus.publish(
        ChangeEvent::entity(event_types::AUTH_LOGGED_IN, EntityKind::User, session.user_id.clone())
            .by(session.user_id.clone()),
    );
    Ok(session)
}

/// Clear the active session, whether or not one exists.
pub async fn logout(state: &AppState) {
    let previous = {
        let mut auth = state.auth.write().await;
        let previous = auth.session.take();
        auth.clear();
        previous
    };

    let mut event = ChangeEvent::global(event_types::AUTH_LOGGED_OUT);
    if let Some(session) = previous {
        tracing::info!(user_id = %session.user_id, "User logged out");
        event = event.by(session.user_id);
    }
    state.event_bus.publish(event);
}

/// Profile of the signed-in user, without the password.
pub async fn current_user(state: &AppState) -> Option<UserInfo> {
    state.auth.read().await.user.clone()
}

pub async fn is_authenticated(state: &AppState) -> bool {
    state.auth.read().await.is_authenticated()
}

pub async fn active_session(state: &AppState) -> Option<Session> {
    state.auth.read().await.session.clone()
}

/// Public profiles of every registered user.
pub async fn list_users(state: &AppState) -> Vec<UserInfo> {
    state.users.read().await.list().iter().map(UserInfo::from).collect()
}
