//! Adapters layer
//!
//! Inbound adapters translating HTTP requests into use case calls.

pub mod http;
