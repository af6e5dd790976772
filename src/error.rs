use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use escpos_raster::RasterError;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing 'image' field")]
    MissingImage,

    #[error("Invalid image data")]
    InvalidImageData,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PrintError> for ApiError {
    fn from(e: PrintError) -> Self {
        match e {
            PrintError::Raster(RasterError::InvalidImage(_)) => ApiError::InvalidImageData,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Failure to hand a finished job to the printer.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Printing is not supported on {0}")]
    UnsupportedPlatform(String),

    #[error("Transport '{transport}' cannot deliver a {payload} payload")]
    PayloadMismatch {
        transport: &'static str,
        payload: &'static str,
    },

    #[error("Printer unavailable: {0}")]
    Unavailable(String),

    #[error("Printer rejected job: {0}")]
    Rejected(String),

    #[error("Delivery timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of one background print job.
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("Render error: {0}")]
    Raster(#[from] RasterError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Spool error: {0}")]
    Spool(#[from] std::io::Error),

    #[error("Job task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingImage => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::InvalidImageData => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
