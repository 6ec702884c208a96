mod id_generator;
mod jwt_auth_service;
mod token_generator;

pub use id_generator::UuidV7Generator;
pub use jwt_auth_service::JwtAuthService;
pub use token_generator::SecureTokenGenerator;
