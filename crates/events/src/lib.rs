//! Change notifications for fibertrack containers.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ChangeEvent`]: the envelope published after every successful mutation,
//!   tagged with the [`EntityKind`] it concerns.
//! - [`KindWatch`]: a subscription filtered to some entity kinds.
//! - [`EventJournal`]: background subscriber that keeps a bounded history of
//!   recent events for display.

pub mod bus;
pub mod journal;
pub mod types;

pub use bus::{ChangeEvent, EventBus, KindWatch};
pub use journal::EventJournal;
pub use types::EntityKind;
