//! Domain Layer
//!
//! Entities, value objects, and the seams the application layer is wired
//! through: the two store traits and the token service trait.

pub mod entity;
pub mod repository;
pub mod token;
pub mod value_object;

// Re-exports
pub use entity::{
    auth_record::AuthRecord, identity::Identity, profile_record::ProfileRecord,
    session_token::SessionToken,
};
pub use repository::{CredentialStore, ProfileStore};
pub use token::{TokenError, TokenService};
