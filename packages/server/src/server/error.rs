//! Maps routing errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

use crate::common::{FieldErrors, RoutingError};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

/// Error returned by every handler.
#[derive(Debug)]
pub struct ApiError(pub RoutingError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            RoutingError::Validation(_)
            | RoutingError::OwnerNotFound { .. }
            | RoutingError::SourcePortNotFound(_)
            | RoutingError::DestinationPortNotFound(_)
            | RoutingError::PatchEmpty => StatusCode::BAD_REQUEST,
            RoutingError::NotFound { .. } => StatusCode::NOT_FOUND,
            RoutingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RoutingError> for ApiError {
    fn from(err: RoutingError) -> Self {
        Self(err)
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self(RoutingError::Validation(errors))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self.0 {
            RoutingError::Validation(errors) => ErrorBody {
                message: "Validation failed".to_string(),
                errors: Some(errors),
            },
            RoutingError::Store(err) => {
                error!(error = ?err, "Store operation failed");
                ErrorBody {
                    message: "Internal server error".to_string(),
                    errors: None,
                }
            }
            other => {
                debug!(error = %other, status = %status, "Request rejected");
                ErrorBody {
                    message: other.to_string(),
                    errors: None,
                }
            }
        };
        (status, Json(body)).into_response()
    }
}
