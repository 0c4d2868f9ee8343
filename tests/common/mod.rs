//! Test helpers for the HTTP API tests.
//!
//! Provides a router over an in-memory database and temporary storage, plus
//! shortcuts for registering and logging in.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tempfile::TempDir;

use filebox::auth::AuthService;
use filebox::file::{ContentStore, FileTreeManager};
use filebox::store::MemorySessionStore;
use filebox::web::{create_router, AppState};
use filebox::Database;

/// Thumbnail widths the test router accepts.
pub const TEST_SIZES: [u32; 3] = [500, 250, 100];

/// A running test API with its backing resources.
pub struct TestApi {
    pub server: TestServer,
    pub db: Arc<Database>,
    pub storage: TempDir,
}

/// Create a test server with an in-memory database and a temporary storage root.
pub async fn create_test_api() -> TestApi {
    create_test_api_with_limit(10 * 1024 * 1024).await
}

/// Same as [`create_test_api`] with a custom upload size limit in bytes.
pub async fn create_test_api_with_limit(max_file_size: u64) -> TestApi {
    let storage = TempDir::new().expect("Failed to create storage dir");
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );
    let sessions = Arc::new(MemorySessionStore::new());

    let auth = AuthService::new(db.clone(), sessions.clone());
    let files = FileTreeManager::new(db.clone(), ContentStore::new(storage.path()))
        .with_max_file_size(max_file_size)
        .with_thumbnail_sizes(TEST_SIZES.to_vec());
    let state = Arc::new(AppState::new(auth, files, db.clone(), sessions));

    let router = create_router(state, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApi {
        server,
        db,
        storage,
    }
}

/// `Authorization` header value for Basic credentials.
pub fn basic_auth(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

/// Register a user and return the response body.
pub async fn register(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/users")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Log in and return the token.
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .get("/connect")
        .add_header("authorization", basic_auth(email, password))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["token"]
        .as_str()
        .expect("token missing")
        .to_string()
}

/// Register and log in, returning the token.
pub async fn register_and_login(server: &TestServer, email: &str, password: &str) -> String {
    register(server, email, password).await;
    login(server, email, password).await
}

/// Upload a text file and return the created record.
pub async fn upload_text(server: &TestServer, token: &str, name: &str, text: &str) -> Value {
    let response = server
        .post("/files")
        .add_header("x-token", token)
        .json(&json!({
            "name": name,
            "type": "file",
            "data": STANDARD.encode(text),
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Create a folder and return the created record.
pub async fn create_folder(server: &TestServer, token: &str, name: &str, parent: Value) -> Value {
    let response = server
        .post("/files")
        .add_header("x-token", token)
        .json(&json!({ "name": name, "type": "folder", "parentId": parent }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
