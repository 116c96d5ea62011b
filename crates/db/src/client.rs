//! The two contracts the hosted backend fulfils: table CRUD and object
//! storage. Rows cross this boundary as JSON objects with snake_case keys.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use acfruit_core::media;

use crate::error::PersistenceError;

/// Tables the service reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Fruits,
    News,
    Events,
    Appearance,
    Planifruits,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Fruits,
        Table::News,
        Table::Events,
        Table::Appearance,
        Table::Planifruits,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fruits => "fruits",
            Self::News => "news",
            Self::Events => "events",
            Self::Appearance => "appearance",
            Self::Planifruits => "planifruits",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort clause of a select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub ascending: bool,
}

/// Shape of a select: projected columns, ordering and row limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    /// `None` selects every column.
    pub columns: Option<&'static str>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl SelectQuery {
    pub fn all() -> Self {
        Self::default()
    }

    /// Order by `created_at` descending.
    pub fn newest_first(self) -> Self {
        self.order_by("created_at", false)
    }

    pub fn order_by(mut self, column: &'static str, ascending: bool) -> Self {
        self.order = Some(Order { column, ascending });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn columns(mut self, columns: &'static str) -> Self {
        self.columns = Some(columns);
        self
    }
}

/// Table-level CRUD against the hosted database.
#[async_trait]
pub trait PersistenceClient: Send + Sync {
    /// Rows of `table` shaped by `query`.
    async fn select(&self, table: Table, query: &SelectQuery) -> Result<Vec<Value>, PersistenceError>;

    /// Insert one row and return it as stored, including the assigned id.
    async fn insert(&self, table: Table, row: Value) -> Result<Value, PersistenceError>;

    /// Write the given columns of the row with `id`. Absent keys are untouched.
    async fn update(&self, table: Table, id: &str, patch: Value) -> Result<(), PersistenceError>;

    async fn delete(&self, table: Table, id: &str) -> Result<(), PersistenceError>;

    /// Exact row count of `table`.
    async fn count(&self, table: Table) -> Result<u64, PersistenceError>;
}

/// Bucketed object storage with public URLs.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Root URL the public object URLs hang off.
    fn base_url(&self) -> &str;

    /// Store `bytes` at `path` inside `bucket`. Returns the stored path.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, PersistenceError>;

    /// Remove objects by path. Missing paths are not an error.
    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), PersistenceError>;

    fn public_url(&self, bucket: &str, path: &str) -> String {
        media::public_url(self.base_url(), bucket, path)
    }
}
