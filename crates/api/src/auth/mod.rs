//! Admin authentication.
//!
//! - [`password`] -- Argon2id hashing of the admin password.
//! - [`session`] -- In-memory session ids handed out at login.

pub mod password;
pub mod session;
