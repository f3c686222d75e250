//! Shared Kernel
//!
//! Vocabulary shared by every crate in the identity service:
//! - The error taxonomy ([`error::kind::ErrorKind`]) and the unified
//!   [`error::app_error::AppError`] carried across crate boundaries
//! - Typed identifiers ([`id::Id`])
//!
//! Nothing domain-specific lives here. If a type is only meaningful to
//! authentication, it belongs in the `auth` crate.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
