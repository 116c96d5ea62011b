//! In-process implementation of both persistence contracts.
//!
//! Behaves like the hosted service closely enough for local development and
//! tests: ids are assigned on insert, `created_at`/`updated_at` are stamped,
//! selects honour ordering and limits. Every call is counted, and any
//! operation can be made to fail on demand.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};

use crate::client::{ObjectStorage, PersistenceClient, SelectQuery, Table};
use crate::error::PersistenceError;

const BASE_URL: &str = "http://storage.local";

/// Operations counted and failable on a [`MemoryClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
    Count,
    Upload,
    Remove,
}

#[derive(Debug, Default)]
struct MemoryState {
    tables: HashMap<Table, Vec<Value>>,
    objects: BTreeMap<(String, String), Vec<u8>>,
    calls: HashMap<Operation, usize>,
    failing: HashSet<Operation>,
    failure_message: String,
}

/// In-memory tables and buckets.
#[derive(Debug, Default)]
pub struct MemoryClient {
    state: Mutex<MemoryState>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        // A panic while holding the lock cannot leave the maps half-written.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Count the call, then fail it if `op` has been marked failing.
    fn enter(&self, op: Operation) -> Result<MutexGuard<'_, MemoryState>, PersistenceError> {
        let mut state = self.state();
        *state.calls.entry(op).or_default() += 1;
        if state.failing.contains(&op) {
            return Err(PersistenceError::Api {
                status: 503,
                message: state.failure_message.clone(),
            });
        }
        Ok(state)
    }

    // ---- test & dev helpers ----

    /// Insert a row directly, bypassing counters. Returns its id.
    pub fn seed(&self, table: Table, row: Value) -> String {
        let row = stamp_new_row(row);
        let id = row_id(&row).unwrap_or_default();
        self.state().tables.entry(table).or_default().push(row);
        id
    }

    /// Snapshot of a table in insertion order.
    pub fn rows(&self, table: Table) -> Vec<Value> {
        self.state().tables.get(&table).cloned().unwrap_or_default()
    }

    pub fn object(&self, bucket: &str, path: &str) -> Option<Vec<u8>> {
        self.state()
            .objects
            .get(&(bucket.to_string(), path.to_string()))
            .cloned()
    }

    pub fn object_count(&self) -> usize {
        self.state().objects.len()
    }

    /// Make every subsequent `op` fail with `message`.
    pub fn fail_on(&self, op: Operation, message: &str) {
        let mut state = self.state();
        state.failing.insert(op);
        state.failure_message = message.to_string();
    }

    pub fn fail_all(&self, message: &str) {
        let mut state = self.state();
        state.failing.extend([
            Operation::Select,
            Operation::Insert,
            Operation::Update,
            Operation::Delete,
            Operation::Count,
            Operation::Upload,
            Operation::Remove,
        ]);
        state.failure_message = message.to_string();
    }

    pub fn clear_failures(&self) {
        self.state().failing.clear();
    }

    pub fn calls(&self, op: Operation) -> usize {
        self.state().calls.get(&op).copied().unwrap_or_default()
    }

    /// Calls of every kind, storage included.
    pub fn total_calls(&self) -> usize {
        self.state().calls.values().sum()
    }

    pub fn reset_calls(&self) {
        self.state().calls.clear();
    }
}

fn row_id(row: &Value) -> Option<String> {
    match row.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Fill in id and timestamps the way the hosted database defaults them.
fn stamp_new_row(row: Value) -> Value {
    let mut object = match row {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let now = Value::String(Utc::now().to_rfc3339());
    if !object.get("id").is_some_and(|v| !v.is_null()) {
        object.insert("id".into(), Value::String(uuid::Uuid::new_v4().to_string()));
    }
    object.entry("created_at").or_insert_with(|| now.clone());
    object.entry("updated_at").or_insert(now);
    Value::Object(object)
}

fn project(row: &Value, columns: Option<&str>) -> Value {
    let Some(columns) = columns.filter(|c| *c != "*") else {
        return row.clone();
    };
    let wanted: Vec<&str> = columns.split(',').map(str::trim).collect();
    let object = row
        .as_object()
        .map(|m| {
            m.iter()
                .filter(|(k, _)| wanted.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
        .unwrap_or_default();
    Value::Object(object)
}

/// Ordering key for a JSON column. Strings compare lexically, which is
/// chronological for RFC 3339 timestamps and ISO dates.
fn sort_key(row: &Value, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[async_trait]
impl PersistenceClient for MemoryClient {
    async fn select(&self, table: Table, query: &SelectQuery) -> Result<Vec<Value>, PersistenceError> {
        let state = self.enter(Operation::Select)?;
        let rows = state.tables.get(&table).cloned().unwrap_or_default();
        drop(state);

        let mut indexed: Vec<(usize, Value)> = rows.into_iter().enumerate().collect();
        if let Some(order) = query.order {
            // Insertion index breaks ties so equal timestamps stay deterministic.
            indexed.sort_by(|(ia, a), (ib, b)| {
                (sort_key(a, order.column), *ia).cmp(&(sort_key(b, order.column), *ib))
            });
            if !order.ascending {
                indexed.reverse();
            }
        }

        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(indexed
            .into_iter()
            .take(limit)
            .map(|(_, row)| project(&row, query.columns))
            .collect())
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Value, PersistenceError> {
        let mut state = self.enter(Operation::Insert)?;
        let row = stamp_new_row(row);
        state.tables.entry(table).or_default().push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: Table, id: &str, patch: Value) -> Result<(), PersistenceError> {
        let mut state = self.enter(Operation::Update)?;
        let Value::Object(patch) = patch else {
            return Err(PersistenceError::Api {
                status: 400,
                message: "update body must be an object".into(),
            });
        };
        let now = Value::String(Utc::now().to_rfc3339());
        for row in state.tables.entry(table).or_default().iter_mut() {
            if row_id(row).as_deref() != Some(id) {
                continue;
            }
            if let Value::Object(fields) = row {
                for (k, v) in &patch {
                    fields.insert(k.clone(), v.clone());
                }
                fields.insert("updated_at".into(), now.clone());
            }
        }
        Ok(())
    }

    async fn delete(&self, table: Table, id: &str) -> Result<(), PersistenceError> {
        let mut state = self.enter(Operation::Delete)?;
        state
            .tables
            .entry(table)
            .or_default()
            .retain(|row| row_id(row).as_deref() != Some(id));
        Ok(())
    }

    async fn count(&self, table: Table) -> Result<u64, PersistenceError> {
        let state = self.enter(Operation::Count)?;
        Ok(state.tables.get(&table).map_or(0, Vec::len) as u64)
    }
}

#[async_trait]
impl ObjectStorage for MemoryClient {
    fn base_url(&self) -> &str {
        BASE_URL
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, PersistenceError> {
        let mut state = self.enter(Operation::Upload)?;
        let key = (bucket.to_string(), path.to_string());
        if state.objects.contains_key(&key) {
            return Err(PersistenceError::Api {
                status: 409,
                message: "The resource already exists".into(),
            });
        }
        state.objects.insert(key, bytes);
        Ok(path.to_string())
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), PersistenceError> {
        let mut state = self.enter(Operation::Remove)?;
        for path in paths {
            state.objects.remove(&(bucket.to_string(), path.clone()));
        }
        Ok(())
    }
}
