pub mod claims;
pub mod errors;
pub mod secret;
pub mod service;

pub use claims::Claims;
pub use errors::InvalidToken;
pub use errors::IssueError;
pub use errors::SecretError;
pub use errors::SettingsError;
pub use errors::TokenError;
pub use secret::SigningSecret;
pub use service::IssuedToken;
pub use service::Principal;
pub use service::TokenService;
pub use service::TokenSettings;
