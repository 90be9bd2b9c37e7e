//! # Server Error Types
//!
//! Every failure the server can report, grouped by where it happens:
//!
//! - **Startup**: configuration, image decoding, and preparation errors. These are
//!   fatal and propagate out of `main`.
//! - **Request**: lookups that miss. These become HTTP responses through
//!   [`IntoResponse`].
//!
//! ```rust
//! use eink_image_server::error::ServeError;
//!
//! let error = ServeError::config("display.width", "0", "must be greater than 0");
//! assert_eq!(error.category(), "config");
//! ```

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use eink_pack::PrepError;
use thiserror::Error;

/// Result alias used across the server crate.
pub type ServeResult<T> = Result<T, ServeError>;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("invalid configuration for `{field}` = `{value}`: {reason}")]
    Config {
        field: String,
        value: String,
        reason: String,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to load image `{name}` from {}: {source}", .path.display())]
    ImageLoad {
        name: String,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to prepare image `{name}`: {source}")]
    Prepare {
        name: String,
        #[source]
        source: PrepError,
    },

    #[error("image name `{0}` is configured more than once")]
    DuplicateImage(String),

    #[error("no images configured and the placeholder is disabled")]
    EmptyLibrary,

    #[error("unknown image `{0}`")]
    UnknownImage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ServeError {
    pub fn config(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        ServeError::Config {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Short label for log fields.
    pub fn category(&self) -> &'static str {
        match self {
            ServeError::Config { .. } | ServeError::ConfigFile { .. } => "config",
            ServeError::ImageLoad { .. } => "image_load",
            ServeError::Prepare { .. } => "prepare",
            ServeError::DuplicateImage(_) | ServeError::EmptyLibrary => "library",
            ServeError::UnknownImage(_) => "request",
            ServeError::Io(_) => "io",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServeError::UnknownImage(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(category = self.category(), error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(ServeError::config("bind", "x", "bad").category(), "config");
        assert_eq!(ServeError::EmptyLibrary.category(), "library");
        assert_eq!(ServeError::UnknownImage("x".into()).category(), "request");

        let prep = ServeError::Prepare {
            name: "logo".into(),
            source: PrepError::OddPixelCount { w: 3, h: 3 },
        };
        assert_eq!(prep.category(), "prepare");
        assert!(prep.to_string().contains("logo"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServeError::UnknownImage("nope".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServeError::EmptyLibrary.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
