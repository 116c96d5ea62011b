//! Request handlers.
//!
//! Public handlers read local store state. Admin handlers validate the
//! request, call a store mutation and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod admin;
pub mod appearance;
pub mod diagnostics;
pub mod events;
pub mod fruits;
pub mod media;
pub mod news;
pub mod planifruits;
pub mod public;
