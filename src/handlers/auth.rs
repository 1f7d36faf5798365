// src/handlers/auth.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use validator::Validate;

use crate::{config::Config, error::AppError};

/// DTO for admin login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Checks admin credentials against the configuration.
///
/// Placeholder only: no token is issued and no route requires one.
pub async fn login(
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if !config.authenticate_admin(&payload.username, &payload.password) {
        tracing::warn!("Rejected admin login for '{}'", payload.username);
        return Err(AppError::AuthError("Invalid username or password".to_string()));
    }

    tracing::info!("Admin '{}' logged in", payload.username);
    Ok(Json(serde_json::json!({ "ok": true })))
}
