use std::sync::Arc;

use acfruit_db::PersistenceClient;
use acfruit_store::Stores;

use crate::auth::session::SessionStore;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The five domain stores and the media pipeline, built once at startup.
    pub stores: Arc<Stores>,
    /// Direct persistence access for the diagnostics panel.
    pub db: Arc<dyn PersistenceClient>,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(stores: Arc<Stores>, db: Arc<dyn PersistenceClient>, config: ServerConfig) -> Self {
        Self {
            stores,
            db,
            sessions: Arc::new(SessionStore::new()),
            config: Arc::new(config),
        }
    }
}
