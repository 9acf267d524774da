use std::sync::Arc;

use fibertrack_core::error::CoreError;
use fibertrack_db::models::user::UserInfo;
use fibertrack_db::repositories::{
    DocumentRepo, EmployeeRepo, EquipmentRepo, InventoryRepo, MaterialRepo, ProjectRepo,
    TaskRepo, UserRepo,
};
use fibertrack_db::{BlobStore, FileBlobStore, MemoryBlobStore};
use fibertrack_events::EventBus;
use tokio::sync::RwLock;

use crate::analytics::AnalyticsState;
use crate::auth::Session;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::seed;

/// Who is signed in right now. At most one session is active.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub session: Option<Session>,
    pub user: Option<UserInfo>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn clear(&mut self) {
        self.session = None;
        self.user = None;
    }
}

/// Explicit application state handed to every command function.
///
/// Cheap to clone: every container sits behind its own `Arc<RwLock<_>>`.
/// There is no cross-container transaction, so a reader holding two locks
/// one after the other may see a project before its baseline tasks exist.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<RwLock<UserRepo>>,
    pub projects: Arc<RwLock<ProjectRepo>>,
    pub tasks: Arc<RwLock<TaskRepo>>,
    pub documents: Arc<RwLock<DocumentRepo>>,
    pub employees: Arc<RwLock<EmployeeRepo>>,
    pub materials: Arc<RwLock<MaterialRepo>>,
    pub equipment: Arc<RwLock<EquipmentRepo>>,
    pub inventory: Arc<RwLock<InventoryRepo>>,
    pub auth: Arc<RwLock<AuthState>>,
    pub analytics: Arc<RwLock<AnalyticsState>>,
    /// Change notifications for the UI collaborator.
    pub event_bus: Arc<EventBus>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Empty containers, with the user directory loaded from `store`.
    pub fn new(config: AppConfig, store: Arc<dyn BlobStore>) -> AppResult<Self> {
        let users = UserRepo::load(store)?;
        tracing::info!(users = users.len(), "User directory loaded");

        Ok(Self {
            users: Arc::new(RwLock::new(users)),
            projects: Arc::default(),
            tasks: Arc::default(),
            documents: Arc::default(),
            employees: Arc::default(),
            materials: Arc::default(),
            equipment: Arc::default(),
            inventory: Arc::default(),
            auth: Arc::default(),
            analytics: Arc::default(),
            event_bus: Arc::new(EventBus::default()),
            config: Arc::new(config),
        })
    }

    pub fn in_memory(config: AppConfig) -> AppResult<Self> {
        Self::new(config, Arc::new(MemoryBlobStore::new()))
    }

    /// Open the configured blob store and load demo data when enabled.
    pub async fn bootstrap(config: AppConfig) -> AppResult<Self> {
        let store: Arc<dyn BlobStore> = match &config.data_dir {
            Some(dir) => {
                let store = FileBlobStore::open(dir.clone())?;
                tracing::info!(root = %store.root().display(), "Using file blob store");
                Arc::new(store)
            }
            None => {
                tracing::info!("Using in-memory blob store");
                Arc::new(MemoryBlobStore::new())
            }
        };

        let state = Self::new(config, store)?;
        if state.config.seed_demo_data {
            seed::load_demo_data(&state).await?;
        }
        Ok(state)
    }

    /// Fail with `Unauthorized` unless `session` is the active session.
    pub async fn authorize(&self, session: &Session) -> AppResult<()> {
        let auth = self.auth.read().await;
        match &auth.session {
            Some(active) if active.session_id == session.session_id => Ok(()),
            _ => {
                tracing::warn!(
                    username = %session.username,
                    "Rejected command from inactive session"
                );
                Err(AppError::Core(CoreError::Unauthorized(
                    "session is not active; log in again".into(),
                )))
            }
        }
    }
}
