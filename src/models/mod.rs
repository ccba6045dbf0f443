//! Database models shared across the member search repository.

#[cfg(feature = "server")]
pub mod config;
pub mod member;
pub mod team;
