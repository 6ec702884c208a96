pub mod entities;
pub mod errors;
pub mod events;
pub mod factory;
pub mod ports;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{AuthenticatedUser, User, UserInfo};
pub use errors::{NotificationError, RepositoryError, UserError};
pub use events::{DomainEvent, UserCreatedEvent};
pub use factory::UserFactory;
pub use value_objects::{UserId, status};
