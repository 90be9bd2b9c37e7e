//! End-to-end tests for the HTTP routes, driven through the router without a socket.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use eink_image_server::config::{ImageEntry, ServerConfig};
use eink_image_server::library::ImageLibrary;
use eink_image_server::server::{AppState, IMAGE_HEIGHT_HEADER, IMAGE_WIDTH_HEADER, router};
use image::{GrayImage, Luma};
use tower::ServiceExt;

/// Library with a 1000x500 black "logo" on disk plus the default placeholder.
fn logo_and_placeholder(dir: &tempfile::TempDir) -> ImageLibrary {
    let path = dir.path().join("logo.png");
    GrayImage::from_pixel(1000, 500, Luma([0])).save(&path).unwrap();

    let config = ServerConfig {
        images: vec![ImageEntry {
            name: "logo".to_string(),
            path,
        }],
        ..ServerConfig::default()
    };
    config.validate().unwrap();
    ImageLibrary::build(&config).unwrap()
}

async fn get(state: &AppState, uri: &str) -> Response {
    router(state.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn header(response: &Response, name: &str) -> String {
    response.headers()[name].to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_index() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(logo_and_placeholder(&dir));

    let response = get(&state, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"Hello World!");
}

#[tokio::test]
async fn test_image_alternates_logo_and_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(logo_and_placeholder(&dir));

    let first = get(&state, "/image").await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(header(&first, IMAGE_WIDTH_HEADER), "960");
    assert_eq!(header(&first, IMAGE_HEIGHT_HEADER), "480");
    assert_eq!(header(&first, "content-type"), "application/octet-stream");
    let body = to_bytes(first.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body.len(), 960 * 480 / 2);
    assert!(body.iter().all(|&b| b == 0x00));

    let second = get(&state, "/image").await;
    assert_eq!(header(&second, IMAGE_WIDTH_HEADER), "960");
    assert_eq!(header(&second, IMAGE_HEIGHT_HEADER), "540");
    let body = to_bytes(second.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body.len(), 259_200);

    let third = get(&state, "/image").await;
    assert_eq!(header(&third, IMAGE_HEIGHT_HEADER), "480");
    assert_eq!(state.rotation.served(), 3);
}

#[tokio::test]
async fn test_named_image_leaves_rotation_alone() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(logo_and_placeholder(&dir));

    let response = get(&state, "/image/placeholder").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, IMAGE_HEIGHT_HEADER), "540");
    assert_eq!(state.rotation.served(), 0);

    let missing = get(&state, "/image/nope").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_images() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(logo_and_placeholder(&dir));

    let response = get(&state, "/images").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let listing: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let entries = listing.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "logo");
    assert_eq!(entries[0]["width"], 960);
    assert_eq!(entries[0]["height"], 480);
    assert_eq!(entries[0]["bytes"], 230_400);
    assert_eq!(entries[1]["name"], "placeholder");
    assert_eq!(entries[1]["bytes"], 259_200);
}
