//! # HTTP Server
//!
//! Serves the prepared images to the panel firmware.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | `Hello World!` |
//! | `GET /image` | next image in rotation |
//! | `GET /image/{name}` | named image, rotation untouched |
//! | `GET /images` | JSON metadata for all images |
//!
//! Image bodies are the raw packed bytes. Width and height travel in the
//! `Image-Width` and `Image-Height` headers.

pub mod rotation;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::error::ServeResult;
use crate::library::ImageLibrary;

pub use rotation::Rotation;
pub use routes::{IMAGE_HEIGHT_HEADER, IMAGE_WIDTH_HEADER};

/// Handler state: the read-only library and the rotation cursor.
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<ImageLibrary>,
    pub rotation: Arc<Rotation>,
}

impl AppState {
    pub fn new(library: ImageLibrary) -> Self {
        Self {
            library: Arc::new(library),
            rotation: Arc::new(Rotation::new()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/image", get(routes::next_image))
        .route("/image/{name}", get(routes::named_image))
        .route("/images", get(routes::list_images))
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> ServeResult<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        images = state.library.len(),
        "listening"
    );

    let rotation = Arc::clone(&state.rotation);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(served = rotation.served(), "server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
