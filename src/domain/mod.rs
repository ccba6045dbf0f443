//! Domain aggregates exposed by the member search service layer.

pub mod member;
pub mod search;
pub mod team;
pub mod types;
