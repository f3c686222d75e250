//! Application Layer
//!
//! Use cases and the workflow facade over them.

pub mod config;
pub mod identity_composer;
pub mod login;
pub mod register;
pub mod resolve_session;
pub mod workflow;

// Re-exports
pub use config::AuthConfig;
pub use identity_composer::IdentityComposer;
pub use login::{LoginInput, LoginUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use resolve_session::ResolveSessionUseCase;
pub use workflow::AuthWorkflow;
