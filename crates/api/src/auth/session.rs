use indexmap::IndexSet;
use tokio::sync::RwLock;

/// Live sessions kept before the oldest is evicted.
pub const MAX_SESSIONS: usize = 64;

/// Opaque admin session ids.
///
/// Held in memory only: every session is lost on restart, and none expire.
/// At most `capacity` are kept; starting one more ends the oldest.
#[derive(Debug)]
pub struct SessionStore {
    ids: RwLock<IndexSet<String>>,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_capacity(MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: RwLock::new(IndexSet::new()),
            capacity: capacity.max(1),
        }
    }

    /// Start a session and return its id.
    pub async fn create(&self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let mut ids = self.ids.write().await;
        while ids.len() >= self.capacity {
            if ids.shift_remove_index(0).is_some() {
                tracing::debug!("Evicted oldest admin session");
            }
        }
        ids.insert(id.clone());
        id
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.ids.read().await.contains(id)
    }

    /// End a session. Returns whether it existed.
    pub async fn end(&self, id: &str) -> bool {
        self.ids.write().await.shift_remove(id)
    }

    pub async fn len(&self) -> usize {
        self.ids.read().await.len()
    }
}
