//! Request extractors that gate the admin surface.
//!
//! - [`auth::RequireAdmin`] -- Requires a live admin session.

pub mod auth;
