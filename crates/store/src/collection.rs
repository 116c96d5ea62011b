//! Ordered, id-addressed collection shared by the list-shaped stores.

use tokio::sync::RwLock;

use acfruit_core::events::Event;
use acfruit_core::news::NewsArticle;
use acfruit_core::planifruit::Planifruit;

pub(crate) trait Identified {
    fn id(&self) -> &str;
}

impl Identified for NewsArticle {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Event {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Planifruit {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Items in load order. Every lock is held only for the in-memory step.
#[derive(Debug)]
pub(crate) struct Collection<T> {
    items: RwLock<Vec<T>>,
}

impl<T: Identified + Clone> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    pub async fn replace(&self, items: Vec<T>) {
        *self.items.write().await = items;
    }

    pub async fn snapshot(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    pub async fn filtered(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.items.read().await.iter().filter(|t| keep(t)).cloned().collect()
    }

    pub async fn find(&self, id: &str) -> Option<T> {
        self.items.read().await.iter().find(|t| t.id() == id).cloned()
    }

    /// Insert at the head, matching newest-first load order.
    pub async fn prepend(&self, item: T) {
        self.items.write().await.insert(0, item);
    }

    /// Mutate the item with `id` in place. `None` when absent.
    pub async fn modify(&self, id: &str, change: impl FnOnce(&mut T)) -> Option<T> {
        let mut items = self.items.write().await;
        let item = items.iter_mut().find(|t| t.id() == id)?;
        change(item);
        Some(item.clone())
    }

    /// Drop the item with `id`. Returns whether one was present.
    pub async fn remove(&self, id: &str) -> bool {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|t| t.id() != id);
        items.len() != before
    }
}
