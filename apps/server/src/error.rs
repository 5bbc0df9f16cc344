use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ratekeeper_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<String, String>>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::DuplicateEntity { .. } | CoreError::EntityInUse { .. } => {
                    StatusCode::CONFLICT
                }
                CoreError::EntityNotFound { .. } => StatusCode::NOT_FOUND,
                CoreError::ResourceFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
                CoreError::Feed(_) => StatusCode::BAD_GATEWAY,
                CoreError::UnexpectedStorage(_) | CoreError::ConversionFailed(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed with {}: {}", status, self);
        }

        let body = match self {
            ApiError::Core(CoreError::Validation(errors)) => ErrorBody {
                status: status.as_u16(),
                message: None,
                errors: Some(errors.into_field_errors()),
            },
            other => ErrorBody {
                status: status.as_u16(),
                message: Some(other.to_string()),
                errors: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
