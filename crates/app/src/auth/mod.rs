//! Authentication primitives.
//!
//! - [`password`]: credential storage schemes, Argon2id hashing and the
//!   password policy.
//! - [`session`]: the explicit session value threaded through commands.

pub mod password;
pub mod session;

pub use session::Session;
