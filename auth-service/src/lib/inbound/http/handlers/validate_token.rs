use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn validate_token(
    State(state): State<AppState>,
    Json(body): Json<ValidateTokenRequestBody>,
) -> Result<ApiSuccess<ValidateTokenResponseData>, ApiError> {
    let principal = state.tokens.validate(&body.token)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ValidateTokenResponseData {
            username: principal.subject,
            role: principal.role,
        },
    ))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateTokenRequestBody {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateTokenResponseData {
    pub username: String,
    pub role: String,
}
