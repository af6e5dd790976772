use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::PrintService;

/// Request body for a print job
#[derive(Debug, Deserialize, ToSchema)]
pub struct PrintRequest {
    /// Base64 encoded PNG, JPEG, GIF, BMP or WebP. A data URL
    /// (`data:image/png;base64,...`) is accepted as well.
    #[serde(default)]
    pub image: Option<String>,
}

/// Response once a job has been accepted
#[derive(Debug, Serialize, ToSchema)]
pub struct PrintResponse {
    pub message: String,
}

/// Print an image
///
/// The image is validated and spooled, then printed in the background. The
/// response does not wait for the printer.
#[utoipa::path(
    post,
    path = "/print",
    request_body = PrintRequest,
    responses(
        (status = 200, description = "Job accepted", body = PrintResponse),
        (status = 400, description = "Missing 'image' field or invalid image data"),
    ),
    tag = "Print"
)]
pub async fn handle_print(
    State(service): State<Arc<PrintService>>,
    body: Result<Json<PrintRequest>, JsonRejection>,
) -> Result<Json<PrintResponse>, ApiError> {
    let Json(request) = body.map_err(|e| {
        tracing::warn!(error = %e, "Unreadable print request");
        ApiError::InvalidImageData
    })?;

    let encoded = request
        .image
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingImage)?;

    let bytes = decode_base64_image(encoded)?;
    tracing::debug!(bytes = bytes.len(), "Decoded print request");

    // Detached: the job reports through the log
    let _job = service.submit(bytes).await?;

    Ok(Json(PrintResponse {
        message: "Print job sent".to_string(),
    }))
}

/// Decode the `image` field, dropping any data URL prefix.
pub fn decode_base64_image(field: &str) -> Result<Vec<u8>, ApiError> {
    let data = field.split_once(',').map_or(field, |(_, data)| data);
    let data: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    STANDARD.decode(data).map_err(|e| {
        tracing::warn!(error = %e, "Invalid base64 in print request");
        ApiError::InvalidImageData
    })
}
