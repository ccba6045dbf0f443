//! Response payloads serialized by the HTTP handlers.

pub mod members;
