//! Loading indicator and last error of a store.

use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde::Serialize;

/// In-flight counter plus the message of the most recent failure.
///
/// The store counts as loading while any operation is in flight, so
/// overlapping requests cannot clear each other's indicator.
#[derive(Debug, Default)]
pub struct StoreStatus {
    in_flight: AtomicUsize,
    error: Mutex<Option<String>>,
}

/// Point-in-time copy of a [`StoreStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub loading: bool,
    pub error: Option<String>,
}

/// Lowers the indicator when dropped, whichever way the operation exits.
#[must_use]
pub struct InFlight<'a> {
    status: &'a StoreStatus,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.status.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl StoreStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the indicator and clear the previous error.
    pub fn begin(&self) -> InFlight<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.set_error(None);
        InFlight { status: self }
    }

    pub fn fail(&self, error: &impl Display) {
        self.set_error(Some(error.to_string()));
    }

    fn set_error(&self, value: Option<String>) {
        *self.error.lock().unwrap_or_else(|e| e.into_inner()) = value;
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn error(&self) -> Option<String> {
        self.error.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            loading: self.is_loading(),
            error: self.error(),
        }
    }

    /// Run a remote call with the indicator raised, recording its error.
    pub async fn track<T, E, F>(&self, operation: &'static str, call: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        let _in_flight = self.begin();
        let result = call.await;
        if let Err(e) = &result {
            tracing::error!(operation, error = %e, "Store operation failed");
            self.fail(e);
        }
        result
    }
}
