use aerodesk_core::CoreError;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Request,
    },
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetails {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub request_description: String,
}

#[derive(Debug)]
pub enum AppError {
    Core(CoreError),
    AuthenticationError(String),
    /// An extractor refused the request before any handler ran.
    Rejected { status: StatusCode, message: String },
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Core(err) => match err {
                CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
                CoreError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                CoreError::InvariantViolation(_) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
                CoreError::Conflict(_) => (StatusCode::CONFLICT, err.to_string()),
                CoreError::Store(_) => {
                    tracing::error!("Internal Server Error: {}", err);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
                }
            },
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Rejected { status, message } => (status, message),
            AppError::Internal(err) => {
                tracing::error!("Internal Server Error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let details = ErrorDetails {
            message,
            timestamp: Utc::now(),
            request_description: String::new(),
        };

        let mut response = (status, Json(details.clone())).into_response();
        response.extensions_mut().insert(details);
        response
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected { status: rejection.status(), message: rejection.body_text() }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected { status: rejection.status(), message: rejection.body_text() }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejected { status: rejection.status(), message: rejection.body_text() }
    }
}

/// Router fallback for paths no route matches.
pub async fn no_route(req: Request) -> AppError {
    AppError::Rejected {
        status: StatusCode::NOT_FOUND,
        message: format!("No route for {} {}", req.method(), req.uri().path()),
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Internal(err.into())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(err.into())
    }
}

/// Stamps error bodies with the path of the request that failed.
pub async fn describe_errors(req: Request, next: Next) -> Response {
    let description = format!("uri={}", req.uri().path());
    let mut response = next.run(req).await;

    match response.extensions_mut().remove::<ErrorDetails>() {
        Some(mut details) => {
            details.request_description = description;
            (response.status(), Json(details)).into_response()
        }
        None => response,
    }
}
