pub mod auth;
pub mod request_id;

// Re-export middleware components for easier access
pub use auth::{AuthMiddleware, CurrentUser};
pub use request_id::{RequestId, RequestIdExt, RequestIdMiddleware};
