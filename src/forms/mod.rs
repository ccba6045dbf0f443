//! Validated request inputs accepted by the HTTP handlers.

pub mod members;
