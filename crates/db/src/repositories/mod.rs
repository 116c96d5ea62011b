//! Per-table repositories over a [`PersistenceClient`].
//!
//! Repositories are stateless: every function takes the client and returns
//! domain values. Selects skip rows that fail to decode or do not fit the
//! domain, logging each at `warn`.

mod appearance_repo;
mod event_repo;
mod fruit_repo;
mod news_repo;
mod planifruit_repo;

pub use appearance_repo::AppearanceRepo;
pub use event_repo::EventRepo;
pub use fruit_repo::FruitRepo;
pub use news_repo::NewsRepo;
pub use planifruit_repo::PlanifruitRepo;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use acfruit_core::types::{RecordId, Timestamp};

use crate::client::Table;
use crate::error::PersistenceError;
use crate::models::id_string;

/// What an insert hands back that the caller did not send.
#[derive(Debug, Deserialize)]
pub(crate) struct Inserted {
    #[serde(deserialize_with = "id_string")]
    pub id: RecordId,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Inserted {
    pub fn from_row(row: Value) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_value(row)?)
    }
}

/// Decode each row, dropping and logging the ones that do not parse.
pub(crate) fn decode_rows<T: DeserializeOwned>(table: Table, rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<T>(row) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(table = %table, error = %e, "Skipping undecodable row");
                None
            }
        })
        .collect()
}
