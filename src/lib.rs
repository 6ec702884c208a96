//! Memberly: user signup, email verification and login
//!
//! Layered as `domain` (entities, events, ports), `application` (use cases
//! and event handlers), `infrastructure` (PostgreSQL, SMTP, JWT, event bus)
//! and `adapters` (HTTP).

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
