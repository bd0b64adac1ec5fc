use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{error::AppError, extract::AppJson, middleware::auth::Claims, state::AppState};
use aerodesk_core::CoreError;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct RegisterResponse {
    id: i32,
    username: String,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<Credentials>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(CoreError::InvalidArgument("Username and password are required".to_string()).into());
    }

    let cost = state.auth.bcrypt_cost;
    let password = req.password;
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;

    let user = state.users.create(&req.username, &hash).await?;
    info!(user_id = user.id, "Registered user");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { id: user.id, username: user.username }),
    ))
}

async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<Credentials>,
) -> Result<Json<AuthResponse>, AppError> {
    let rejected = || AppError::AuthenticationError("Invalid username or password".to_string());

    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or_else(rejected)?;

    let hash = user.password_hash.clone();
    let password = req.password;
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    if !matches {
        return Err(rejected());
    }

    let token = Claims::issue(&state, user.id, &user.username)?;
    Ok(Json(AuthResponse { token }))
}
