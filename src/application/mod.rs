//! Application layer
//!
//! This layer contains use cases that orchestrate domain logic to implement
//! application-specific workflows. Use cases coordinate the domain factory,
//! repositories and outbound collaborators to fulfill business requirements.

pub mod users;
