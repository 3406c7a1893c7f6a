use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::service::{self, LoginRequest, RegisterRequest, Session};
use crate::errors::AppError;
use crate::models::user::UserProfile;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub message: &'static str,
    pub user_id: Uuid,
    pub token: String,
    pub user: UserProfile,
}

impl AuthResponse {
    fn new(message: &'static str, session: Session) -> Self {
        AuthResponse {
            message,
            user_id: session.user.id,
            user: UserProfile::from(&session.user),
            token: session.token,
        }
    }
}

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let session = service::register(
        state.users.as_ref(),
        &state.tokens,
        state.config.bcrypt_cost,
        req,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new("User registered successfully", session)),
    ))
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let session = service::login(
        state.users.as_ref(),
        &state.tokens,
        state.config.bcrypt_cost,
        req,
    )
    .await?;
    Ok(Json(AuthResponse::new("Login successful", session)))
}
