use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, state::AppState};

// ============================================================================
// JWT Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub uid: i32,
    pub exp: usize,
}

impl Claims {
    pub fn issue(state: &AppState, uid: i32, username: &str) -> Result<String, AppError> {
        let claims = Claims {
            sub: username.to_owned(),
            uid,
            exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
        };

        encode(&Header::default(), &claims, &EncodingKey::from_secret(state.auth.secret.as_bytes()))
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Token encoding failed: {}", e)))
    }
}

// ============================================================================
// Authenticated caller extractor
// ============================================================================

/// Present on handlers that mutate the catalog; rejects with 401 unless a
/// valid bearer token is supplied.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::AuthenticationError("Missing bearer token".to_string()))?;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.auth.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AppError::AuthenticationError(format!("Invalid token: {}", e)))?;

        Ok(AuthenticatedUser(token_data.claims))
    }
}
