//! Entities
//!
//! `AuthRecord` and `ProfileRecord` are persisted, each by its own store.
//! `Identity` and `SessionToken` are never persisted.

pub mod auth_record;
pub mod identity;
pub mod profile_record;
pub mod session_token;
