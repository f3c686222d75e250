//! Infrastructure Layer
//!
//! Store implementations and the ES384 token service.

pub mod jwt;
pub mod memory;
pub mod postgres;

pub use jwt::{Es384TokenService, KeyError};
pub use memory::{InMemoryCredentialStore, InMemoryProfileStore};
pub use postgres::{PgCredentialStore, PgProfileStore};
