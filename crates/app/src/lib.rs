//! Application layer for fibertrack.
//!
//! [`state::AppState`] owns every container plus the session and analytics
//! state. All mutations go through the command functions in [`handlers`].

pub mod analytics;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod seed;
pub mod state;
