//! Domain types and pure helpers for the AC Fruit catalog service.
//!
//! Nothing in this crate performs I/O. Persistence lives in `acfruit-db`,
//! the stateful stores in `acfruit-store`.

pub mod appearance;
pub mod catalog;
pub mod compress;
pub mod dates;
pub mod error;
pub mod events;
pub mod forms;
pub mod maturity;
pub mod media;
pub mod news;
pub mod planifruit;
pub mod types;
pub mod video;
