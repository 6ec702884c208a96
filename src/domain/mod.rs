pub mod users;

// Re-export users module for easier access
pub use users::*;
