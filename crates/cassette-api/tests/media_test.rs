//! Media API integration tests.
//!
//! Run with: `cargo test -p cassette-api --test media_test`

mod helpers;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum_test::multipart::{MultipartForm, Part};
use cassette_storage::ContentDigest;
use helpers::fixtures;
use helpers::setup_test_app;
use helpers::setup_test_router;
use tower::ServiceExt;

fn media_form(data: Vec<u8>, file_name: &str, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(file_name)
        .mime_type(mime_type);
    MultipartForm::new().add_part("file", part)
}

#[tokio::test]
async fn test_upload_media() {
    let app = setup_test_app().await;
    let client = app.client();

    let png_data = fixtures::create_minimal_png();
    let expected_hex = ContentDigest::from_bytes(&png_data).as_hex().to_string();

    let response = client
        .post("/media/upload")
        .multipart(media_form(png_data, "image.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], serde_json::json!(true));
    assert_eq!(
        body["id"].as_str().unwrap(),
        format!("{}.png", expected_hex)
    );
    assert_eq!(body["hash"].as_str().unwrap(), expected_hex);
    assert_eq!(
        body["url"].as_str().unwrap(),
        format!("http://localhost:8080/media/{}.png", expected_hex)
    );
}

#[tokio::test]
async fn test_upload_media_without_filename_uses_detected_type() {
    let app = setup_test_app().await;
    let client = app.client();

    let png_data = fixtures::create_minimal_png();
    let part = Part::bytes(bytes::Bytes::from(png_data));
    let multipart = MultipartForm::new().add_part("file", part);

    let response = client.post("/media/upload").multipart(multipart).await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(body["id"].as_str().unwrap().ends_with(".png"));
}

#[tokio::test]
async fn test_duplicate_upload_returns_same_id() {
    let app = setup_test_app().await;
    let client = app.client();

    let png_data = fixtures::create_minimal_png();

    let first = client
        .post("/media/upload")
        .multipart(media_form(png_data.clone(), "a.png", "image/png"))
        .await;
    let second = client
        .post("/media/upload")
        .multipart(media_form(png_data, "b.png", "image/png"))
        .await;

    assert_eq!(first.status_code(), 200);
    assert_eq!(second.status_code(), 200);

    let first_body: serde_json::Value = first.json();
    let second_body: serde_json::Value = second.json();
    assert_eq!(first_body["id"], second_body["id"]);
    assert_eq!(app.stored_media_count(), 1);
}

#[tokio::test]
async fn test_upload_missing_file_field() {
    let app = setup_test_app().await;
    let client = app.client();

    let part = Part::bytes(bytes::Bytes::from(fixtures::create_minimal_png()))
        .file_name("image.png")
        .mime_type("image/png");
    let multipart = MultipartForm::new().add_part("wrong_field", part);

    let response = client.post("/media/upload").multipart(multipart).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"].as_str().unwrap(), "No file provided");
    assert_eq!(body["code"].as_str().unwrap(), "INVALID_INPUT");
}

#[tokio::test]
async fn test_upload_rejects_non_image_content() {
    let app = setup_test_app().await;
    let client = app.client();

    // Image extension and declared type do not bypass content sniffing.
    let response = client
        .post("/media/upload")
        .multipart(media_form(
            b"this is just text".to_vec(),
            "notes.png",
            "image/png",
        ))
        .await;

    assert_eq!(response.status_code(), 415);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"].as_str().unwrap(), "UNSUPPORTED_MEDIA_TYPE");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("File type not allowed"));
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let app = setup_test_app().await;
    let client = app.client();

    // 3 MiB body: over the 2 MiB object ceiling, under the 8 MiB transport limit.
    let mut big = fixtures::create_minimal_png();
    big.resize(3 * 1024 * 1024, 0);

    let response = client
        .post("/media/upload")
        .multipart(media_form(big, "big.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 413);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"].as_str().unwrap(), "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_get_media_roundtrip() {
    let app = setup_test_app().await;
    let client = app.client();

    let png_data = fixtures::create_minimal_png();
    let upload = client
        .post("/media/upload")
        .multipart(media_form(png_data.clone(), "image.png", "image/png"))
        .await;
    let upload_body: serde_json::Value = upload.json();
    let id = upload_body["id"].as_str().unwrap();

    let response = client.get(&format!("/media/{}", id)).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(
        response.header("cache-control"),
        "public, max-age=31536000, immutable"
    );
    assert_eq!(response.as_bytes().to_vec(), png_data);
}

#[tokio::test]
async fn test_get_media_not_found() {
    let app = setup_test_app().await;
    let client = app.client();

    let missing = format!("{}.png", ContentDigest::from_bytes(b"never uploaded").as_hex());
    let response = client.get(&format!("/media/{}", missing)).await;

    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"].as_str().unwrap(), "NOT_FOUND");
}

#[tokio::test]
async fn test_get_media_rejects_traversal_identifiers() {
    let app = setup_test_app().await;
    let client = app.client();

    // Encoded separators keep each of these a single segment on the wire.
    for path in ["/media/..%2F..%2Fetc%2Fpasswd", "/media/a%5Cb.png"] {
        let response = client.get(path).await;
        assert_eq!(response.status_code(), 400, "expected rejection for {}", path);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"].as_str().unwrap(), "INVALID_INPUT");
    }
}

#[tokio::test]
async fn test_get_media_rejects_raw_dot_segments() {
    let (router, _media_dir, _transcript_dir) = setup_test_router().await;

    // Straight onto the router, so no client rewrites the path first.
    for path in ["/media/..", "/media/%2E%2E"] {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = router.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), 400, "expected rejection for {}", path);
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"].as_str().unwrap(), "INVALID_INPUT");
    }
}

#[tokio::test]
async fn test_extension_case_is_preserved() {
    let app = setup_test_app().await;
    let client = app.client();

    let png_data = fixtures::create_minimal_png();
    let upload = client
        .post("/media/upload")
        .multipart(media_form(png_data, "photo.PNG", "image/png"))
        .await;

    assert_eq!(upload.status_code(), 200);
    let body: serde_json::Value = upload.json();
    let id = body["id"].as_str().unwrap();
    assert!(id.ends_with(".PNG"));

    // Lookup lowercases the extension when mapping to a content type.
    let response = client.get(&format!("/media/{}", id)).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "image/png");
}

#[tokio::test]
async fn test_unknown_extension_served_as_octet_stream() {
    let app = setup_test_app().await;
    let client = app.client();

    // Stored name keeps the claimed extension; serving maps only known ones.
    let png_data = fixtures::create_minimal_png();
    let upload = client
        .post("/media/upload")
        .multipart(media_form(png_data, "x.bin", "application/octet-stream"))
        .await;

    assert_eq!(upload.status_code(), 200);
    let body: serde_json::Value = upload.json();
    let id = body["id"].as_str().unwrap();
    assert!(id.ends_with(".bin"));

    let response = client.get(&format!("/media/{}", id)).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "application/octet-stream");
}

#[tokio::test]
async fn test_upload_accepts_each_image_format() {
    let app = setup_test_app().await;
    let client = app.client();

    let cases: Vec<(Vec<u8>, &str, &str)> = vec![
        (fixtures::create_minimal_jpeg(), "a.jpg", "image/jpeg"),
        (fixtures::create_minimal_gif(), "a.gif", "image/gif"),
        (fixtures::create_minimal_webp(), "a.webp", "image/webp"),
        (fixtures::create_test_svg(), "a.svg", "image/svg+xml"),
    ];

    for (data, name, mime) in cases {
        let response = client
            .post("/media/upload")
            .multipart(media_form(data, name, mime))
            .await;
        assert_eq!(response.status_code(), 200, "upload failed for {}", name);
    }
}
