//! Request handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::debug;

use crate::error::{ServeError, ServeResult};
use crate::library::CachedImage;

use super::AppState;

pub const IMAGE_WIDTH_HEADER: &str = "Image-Width";
pub const IMAGE_HEIGHT_HEADER: &str = "Image-Height";

/// Liveness text.
pub async fn index() -> &'static str {
    "Hello World!"
}

/// Next image in rotation.
pub async fn next_image(State(state): State<AppState>) -> ServeResult<Response> {
    let position = state
        .rotation
        .next(state.library.len())
        .ok_or(ServeError::EmptyLibrary)?;
    let image = state.library.get(position).ok_or(ServeError::EmptyLibrary)?;
    debug!(position, name = image.name(), "serving image");
    Ok(image_response(image))
}

/// A specific image by name. Does not advance the rotation.
pub async fn named_image(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ServeResult<Response> {
    let image = state
        .library
        .by_name(&name)
        .ok_or_else(|| ServeError::UnknownImage(name.clone()))?;
    Ok(image_response(image))
}

#[derive(Debug, Serialize)]
pub struct ImageSummary {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
}

/// Metadata for every cached image, in rotation order.
pub async fn list_images(State(state): State<AppState>) -> Json<Vec<ImageSummary>> {
    let summaries = state
        .library
        .iter()
        .map(|image| ImageSummary {
            name: image.name().to_string(),
            width: image.width(),
            height: image.height(),
            bytes: image.body().len(),
        })
        .collect();
    Json(summaries)
}

/// Raw packed bytes with the dimensions carried as headers.
fn image_response(image: &CachedImage) -> Response {
    (
        [
            (CONTENT_TYPE.as_str(), "application/octet-stream".to_string()),
            (IMAGE_WIDTH_HEADER, image.width().to_string()),
            (IMAGE_HEIGHT_HEADER, image.height().to_string()),
        ],
        image.body(),
    )
        .into_response()
}
