pub mod create_user;
pub mod get_user_info;
pub mod login;
pub mod user_events_handler;
pub mod verify_email;

pub use create_user::{CreateUserCommand, CreateUserResponse, CreateUserUseCase};
pub use get_user_info::{GetUserInfoQuery, GetUserInfoUseCase};
pub use login::{LoginCommand, LoginResponse, LoginUseCase};
pub use user_events_handler::{RetryPolicy, UserEventsHandler};
pub use verify_email::{VerifyEmailCommand, VerifyEmailResponse, VerifyEmailUseCase};
