use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reversal_core::StoreError;
use reversal_scanner::ServiceError;

/// Rendered as `{"error": message}` with a matching status.
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// The request body could not be read as the expected JSON.
    InvalidBody(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_)
            | Self::Service(
                ServiceError::Validation(_)
                | ServiceError::UnknownSymbol(_)
                | ServiceError::Store(StoreError::AlreadyExists(_)),
            ) => StatusCode::BAD_REQUEST,
            Self::Service(ServiceError::NoData | ServiceError::Store(StoreError::NotFound(_))) => {
                StatusCode::NOT_FOUND
            }
            Self::Service(ServiceError::Store(StoreError::Backend(_)) | ServiceError::Provider(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Service(e) => e.to_string(),
            Self::InvalidBody(reason) => format!("Invalid request body: {reason}"),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self::Service(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", message);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, message);
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
