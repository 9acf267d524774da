//! Shared vocabulary for the fibertrack workspace.
//!
//! This crate has no internal dependencies: identifiers, timestamps, the
//! domain error type, role/status enumerations, and the pure arithmetic
//! behind the analytics views all live here so that both the container
//! layer and the application layer can use them.

#[macro_use]
mod macros;

pub mod analytics;
pub mod error;
pub mod roles;
pub mod status;
pub mod types;
