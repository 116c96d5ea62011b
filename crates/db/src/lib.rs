//! Persistence boundary for the AC Fruit service.
//!
//! [`PersistenceClient`] and [`ObjectStorage`] describe the hosted table and
//! object APIs. [`SupabaseClient`] talks to the real service over HTTP;
//! [`MemoryClient`] keeps everything in process. Row types and per-table
//! repositories translate between snake_case rows and domain values.

pub mod client;
pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod supabase;

pub use client::{ObjectStorage, Order, PersistenceClient, SelectQuery, Table};
pub use error::PersistenceError;
pub use memory::{MemoryClient, Operation};
pub use supabase::{SupabaseClient, SupabaseConfig};
