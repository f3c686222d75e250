//! Platform Crate - Technical Infrastructure
//!
//! Domain-free building blocks used by the auth crate:
//! - Password hashing (Argon2id with an explicit, fixed work factor)
//! - Cookie building and extraction

pub mod cookie;
pub mod password;
