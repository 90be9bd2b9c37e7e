//! # E-Ink Image Server Library
//!
//! Serves images to an e-ink display controller as packed 4-bit grayscale buffers.
//! Every image is prepared once at startup (see the `eink-pack` crate) and then served
//! from memory.
//!
//! ## Architecture
//!
//! - `config`: TOML/CLI configuration and validation
//! - `placeholder`: generated text image
//! - `library`: immutable table of prepared images
//! - `server`: axum routes, rotation cursor, and the serve loop
//! - `error`: server error type
//!
//! ## Example
//!
//! ```rust,no_run
//! use eink_image_server::config::ServerConfig;
//! use eink_image_server::library::ImageLibrary;
//! use eink_image_server::server::{serve, AppState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::default();
//! config.validate()?;
//!
//! let library = ImageLibrary::build(&config)?;
//! serve(config.bind, AppState::new(library)).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod library;
pub mod placeholder;
pub mod server;

/// Re-export error types for convenience
pub use error::{ServeError, ServeResult};
