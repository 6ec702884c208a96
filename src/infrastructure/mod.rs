//! Infrastructure layer
//!
//! Concrete adapters behind the domain ports: PostgreSQL persistence, the
//! in-process event bus, outgoing email and token handling.

pub mod config;
pub mod email;
pub mod events;
pub mod persistence;
pub mod security;
