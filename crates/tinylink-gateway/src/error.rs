use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tinylink_core::ShortenerError;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Unknown codes and codes that could never have been generated alike.
    #[error("URL not found")]
    NotFound,
    #[error("{detail}: {source}")]
    Internal {
        detail: &'static str,
        #[source]
        source: ShortenerError,
    },
    #[error("stored url is not a valid redirect target: {0}")]
    InvalidRedirect(String),
}

impl AppError {
    /// Mapping used by the shorten endpoint, which reports its own failure message.
    pub fn from_shorten(err: ShortenerError) -> Self {
        match err {
            ShortenerError::InvalidUrl(_) | ShortenerError::InvalidShortCode(_) => {
                Self::BadRequest(err.to_string())
            }
            other => Self::Internal {
                detail: "Error shortening URL",
                source: other,
            },
        }
    }
}

impl From<ShortenerError> for AppError {
    fn from(err: ShortenerError) -> Self {
        match err {
            ShortenerError::InvalidUrl(message) => Self::BadRequest(message),
            ShortenerError::NotFound(_) | ShortenerError::InvalidShortCode(_) => Self::NotFound,
            other => Self::Internal {
                detail: "Internal server error",
                source: other,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "URL not found".to_string()),
            AppError::Internal { detail, source } => {
                error!(error = %source, "{detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, detail.to_string())
            }
            AppError::InvalidRedirect(url) => {
                error!(url = %url, "stored url cannot be sent as a Location header");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
