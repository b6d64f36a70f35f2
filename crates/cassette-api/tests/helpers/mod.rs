//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p cassette-api --test media_test` or
//! `cargo test -p cassette-api`.

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;
use cassette_api::setup::routes;
use cassette_api::setup::storage::setup_stores;
use cassette_api::state::AppState;
use cassette_core::Config;
use std::sync::Arc;
use tempfile::TempDir;

/// Test application: server and owned storage directories.
pub struct TestApp {
    pub server: TestServer,
    pub media_dir: TempDir,
    pub _transcript_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Count stored media objects, ignoring the spool directory.
    pub fn stored_media_count(&self) -> usize {
        std::fs::read_dir(self.media_dir.path())
            .expect("Failed to read media directory")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .count()
    }
}

/// Setup test app with isolated storage directories.
pub async fn setup_test_app() -> TestApp {
    let (app, media_dir, transcript_dir) = setup_test_router().await;
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        media_dir,
        _transcript_dir: transcript_dir,
    }
}

/// Router plus its storage directories, for tests that put raw paths on the
/// wire without a client's URL normalization in between.
pub async fn setup_test_router() -> (Router, TempDir, TempDir) {
    let media_dir = tempfile::tempdir().expect("Failed to create media temp directory");
    let transcript_dir = tempfile::tempdir().expect("Failed to create transcript temp directory");

    let config = create_test_config(&media_dir, &transcript_dir);

    let (media_store, transcript_store) = setup_stores(&config)
        .await
        .expect("Failed to setup object stores");

    let state = Arc::new(AppState {
        config: config.clone(),
        media_store,
        transcript_store,
    });

    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    (app, media_dir, transcript_dir)
}

fn create_test_config(media_dir: &TempDir, transcript_dir: &TempDir) -> Config {
    Config {
        server_port: 8080,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        media_storage_path: media_dir.path().display().to_string(),
        transcript_storage_path: transcript_dir.path().display().to_string(),
        media_base_url: "http://localhost:8080/media".to_string(),
        max_upload_size_bytes: 2 * 1024 * 1024,
        request_body_limit_bytes: 8 * 1024 * 1024,
        allowed_media_types: vec![
            "image/jpeg".to_string(),
            "image/png".to_string(),
            "image/gif".to_string(),
            "image/webp".to_string(),
            "image/svg+xml".to_string(),
        ],
    }
}
