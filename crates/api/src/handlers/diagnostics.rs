//! Connection diagnostics for the admin dashboard.

use std::time::{Duration, Instant};

use acfruit_db::{PersistenceClient, Table};
use acfruit_store::StatusSnapshot;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::config::mask_key;
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Upper bound on the connectivity probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
/// Persistence settings in use. Both are always present here: without them
/// the configuration-error router answers instead.
pub struct EnvironmentReport {
    pub supabase_url: String,
    /// First 20 characters only.
    pub supabase_anon_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    pub ok: bool,
    pub elapsed_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TableReport {
    pub table: Table,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StoreReport {
    pub store: &'static str,
    #[serde(flatten)]
    pub status: StatusSnapshot,
}

#[derive(Debug, Serialize)]
pub struct Diagnostics {
    pub environment: EnvironmentReport,
    pub connection: ProbeReport,
    pub tables: Vec<TableReport>,
    pub stores: Vec<StoreReport>,
}

async fn probe(db: &dyn PersistenceClient) -> ProbeReport {
    let started = Instant::now();
    let error = match tokio::time::timeout(PROBE_TIMEOUT, db.count(Table::Fruits)).await {
        Ok(Ok(_)) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(_) => Some(format!(
            "Connection timed out after {}s",
            PROBE_TIMEOUT.as_secs()
        )),
    };
    ProbeReport {
        ok: error.is_none(),
        elapsed_ms: started.elapsed().as_millis(),
        error,
    }
}

async fn count_table(db: &dyn PersistenceClient, table: Table) -> TableReport {
    match db.count(table).await {
        Ok(count) => TableReport { table, count: Some(count), error: None },
        Err(e) => {
            tracing::warn!(%table, error = %e, "Table count failed");
            TableReport { table, count: None, error: Some(e.to_string()) }
        }
    }
}

/// GET /api/v1/admin/dashboard/diagnostics
///
/// Persistence settings, a timed connectivity probe, per-table row
/// counts and the status of every store.
pub async fn diagnostics(
    RequireAdmin(_session): RequireAdmin,
    State(state): State<AppState>,
) -> Json<DataResponse<Diagnostics>> {
    let supabase = &state.config.supabase;
    let environment = EnvironmentReport {
        supabase_url: supabase.url.clone(),
        supabase_anon_key: mask_key(&supabase.anon_key),
    };

    let db = state.db.as_ref();
    let connection = probe(db).await;
    if let Some(error) = &connection.error {
        tracing::error!(error = %error, "Persistence connectivity probe failed");
    }

    let mut tables = Vec::with_capacity(Table::ALL.len());
    for table in Table::ALL {
        tables.push(count_table(db, table).await);
    }

    let stores = state
        .stores
        .statuses()
        .into_iter()
        .map(|(store, status)| StoreReport { store, status })
        .collect();

    Json(DataResponse::new(Diagnostics {
        environment,
        connection,
        tables,
        stores,
    }))
}
