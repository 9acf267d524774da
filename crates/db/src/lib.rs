//! Entity models, in-memory containers, and the persisted blob store.
//!
//! Every container keeps its rows behind a copy-on-write snapshot, so a
//! reader holding a snapshot never observes a half-applied mutation. Only the
//! user directory is durable; it is written through a [`blob::BlobStore`].

pub mod blob;
pub mod error;
pub mod models;
pub mod repositories;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore, USERS_KEY};
pub use error::{BlobError, DbError};
