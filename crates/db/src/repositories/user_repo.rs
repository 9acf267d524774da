//! Persisted user directory.
//!
//! The whole directory lives under a single [`USERS_KEY`] blob as a JSON
//! array. Every write serializes the full array back to the store.

use std::fmt;
use std::sync::Arc;

use fibertrack_core::error::CoreError;

use crate::blob::{load_json, store_json, BlobStore, USERS_KEY};
use crate::error::DbError;
use crate::models::user::User;
use crate::repositories::Collection;

pub struct UserRepo {
    rows: Collection<User>,
    store: Arc<dyn BlobStore>,
}

// Rows carry stored credentials, so only the size is printed.
impl fmt::Debug for UserRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRepo")
            .field("users", &self.rows.len())
            .finish_non_exhaustive()
    }
}

impl UserRepo {
    /// Load the directory from `store`. An absent key is an empty directory.
    pub fn load(store: Arc<dyn BlobStore>) -> Result<Self, DbError> {
        let mut repo = Self {
            rows: Collection::new(),
            store,
        };
        repo.reload()?;
        Ok(repo)
    }

    /// Re-read the directory, discarding the in-memory copy.
    pub fn reload(&mut self) -> Result<(), DbError> {
        let users: Vec<User> = load_json(self.store.as_ref(), USERS_KEY)?.unwrap_or_default();
        let mut rows = Collection::new();
        for user in users {
            rows.insert(user)?;
        }
        tracing::debug!(count = rows.len(), "User directory loaded");
        self.rows = rows;
        Ok(())
    }

    pub fn list(&self) -> Arc<Vec<User>> {
        self.rows.snapshot()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&User> {
        self.rows.get(id)
    }

    /// Look a user up by username or email.
    pub fn find_by_identifier(&self, identifier: &str) -> Option<&User> {
        self.rows
            .iter()
            .find(|u| u.username == identifier || u.email == identifier)
    }

    /// True if any user already has this username or this email.
    pub fn exists(&self, username: &str, email: &str) -> bool {
        self.rows
            .iter()
            .any(|u| u.username == username || u.email == email)
    }

    /// Append a user and persist the directory.
    ///
    /// The store is written before the in-memory rows change, so a failed
    /// write leaves both sides as they were.
    pub fn insert(&mut self, user: User) -> Result<(), DbError> {
        if self.exists(&user.username, &user.email) {
            return Err(CoreError::Conflict(format!(
                "user with username {} or email {} already exists",
                user.username, user.email
            ))
            .into());
        }
        let mut next = self.rows.clone();
        next.insert(user)?;
        store_json(self.store.as_ref(), USERS_KEY, next.snapshot().as_slice())?;
        self.rows = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use fibertrack_core::roles::{AccessLevel, Department, UserRole};
    use fibertrack_core::types::{new_id, now};

    use super::*;
    use crate::blob::{FileBlobStore, MemoryBlobStore};
    use crate::error::BlobError;

    fn user(username: &str, email: &str) -> User {
        User {
            id: new_id(),
            username: username.into(),
            name: "Test User".into(),
            email: email.into(),
            phone: String::new(),
            role: UserRole::Engineer,
            access_level: AccessLevel::User,
            department: Department::Engineering,
            position: String::new(),
            password: "password123".into(),
            created_at: now(),
        }
    }

    #[test]
    fn absent_key_is_empty_directory() {
        let repo = UserRepo::load(Arc::new(MemoryBlobStore::new())).unwrap();
        assert!(repo.is_empty());
    }

    #[test]
    fn duplicate_username_or_email_is_conflict() {
        let mut repo = UserRepo::load(Arc::new(MemoryBlobStore::new())).unwrap();
        repo.insert(user("testuser", "test@example.com")).unwrap();

        assert_matches!(
            repo.insert(user("testuser", "other@example.com")),
            Err(DbError::Core(CoreError::Conflict(_)))
        );
        assert_matches!(
            repo.insert(user("other", "test@example.com")),
            Err(DbError::Core(CoreError::Conflict(_)))
        );
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn lookup_by_username_or_email() {
        let mut repo = UserRepo::load(Arc::new(MemoryBlobStore::new())).unwrap();
        let u = user("testuser", "test@example.com");
        let id = u.id.clone();
        repo.insert(u).unwrap();

        assert_eq!(repo.find_by_identifier("testuser").unwrap().id, id);
        assert_eq!(repo.find_by_identifier("test@example.com").unwrap().id, id);
        assert!(repo.find_by_identifier("nobody").is_none());
    }

    #[test]
    fn directory_survives_reopen_of_file_store() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = Arc::new(FileBlobStore::open(dir.path()).unwrap());
            let mut repo = UserRepo::load(store).unwrap();
            repo.insert(user("testuser", "test@example.com")).unwrap();
        }
        let store = Arc::new(FileBlobStore::open(dir.path()).unwrap());
        let repo = UserRepo::load(store).unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.list()[0].username, "testuser");
    }

    #[test]
    fn corrupt_blob_is_a_serialization_error() {
        let store = Arc::new(MemoryBlobStore::new());
        store.set(USERS_KEY, "{not json").unwrap();
        assert_matches!(
            UserRepo::load(store),
            Err(DbError::Blob(BlobError::Serialization(_)))
        );
    }

    #[test]
    fn debug_output_omits_credentials() {
        let mut repo = UserRepo::load(Arc::new(MemoryBlobStore::new())).unwrap();
        repo.insert(user("testuser", "test@example.com")).unwrap();
        let printed = format!("{repo:?}");
        assert!(printed.contains("users: 1"));
        assert!(!printed.contains("password123"));
    }
}
