//! Application state shared across handlers.

use cassette_core::Config;
use cassette_storage::ObjectStore;

/// Shared application state passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub media_store: ObjectStore,
    pub transcript_store: ObjectStore,
}

// AppState crosses task boundaries inside axum, so it must stay Send + Sync.
#[allow(dead_code)]
fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
