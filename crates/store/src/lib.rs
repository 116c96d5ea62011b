//! Domain stores: the in-memory view of each table, kept in step with the
//! persistence layer by writing remotely first and patching locally after.
//!
//! Every mutation raises its store's loading indicator for the duration of
//! the remote call and records the error message when the call fails. Local
//! state is only touched after a successful remote response.

pub mod appearance;
mod collection;
pub mod error;
pub mod events;
pub mod fruits;
pub mod media;
pub mod news;
pub mod planifruits;
pub mod status;
mod stores;

pub use appearance::AppearanceStore;
pub use error::StoreError;
pub use events::EventStore;
pub use fruits::FruitStore;
pub use media::{MediaPipeline, StoredMedia, Upload, YoutubeVideo};
pub use news::NewsStore;
pub use planifruits::PlanifruitStore;
pub use status::{StatusSnapshot, StoreStatus};
pub use stores::{LoadReport, Stores};
