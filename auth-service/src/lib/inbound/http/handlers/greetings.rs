use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Reachable by any authenticated user.
pub async fn hello(Extension(user): Extension<AuthenticatedUser>) -> ApiSuccess<GreetingData> {
    ApiSuccess::new(
        StatusCode::OK,
        GreetingData {
            message: format!("Hello {}, you reached a protected endpoint", user.username),
        },
    )
}

/// Reachable by `ADMIN` only; the role check happens in middleware.
pub async fn admin(Extension(user): Extension<AuthenticatedUser>) -> ApiSuccess<GreetingData> {
    ApiSuccess::new(
        StatusCode::OK,
        GreetingData {
            message: format!("Welcome {}, this is a restricted resource", user.username),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GreetingData {
    pub message: String,
}
