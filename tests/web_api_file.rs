//! Web API file tree tests.

mod common;

use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{
    create_folder, create_test_api, create_test_api_with_limit, register_and_login, upload_text,
};
use serde_json::{json, Value};

#[tokio::test]
async fn test_upload_publish_and_read_walkthrough() {
    let api = create_test_api().await;
    let token = register_and_login(&api.server, "bob@dylan.com", "toto1234!").await;

    let file = upload_text(&api.server, &token, "hello.txt", "Hello Webstack!\n").await;
    assert_eq!(file["name"], "hello.txt");
    assert_eq!(file["type"], "file");
    assert_eq!(file["isPublic"], false);
    assert_eq!(file["parentId"], 0);
    assert!(file.get("localPath").is_none());
    let id = file["id"].as_str().unwrap().to_string();

    // Owner reads the content
    let response = api
        .server
        .get(&format!("/files/{id}/data"))
        .add_header("x-token", &token)
        .await;
    response.assert_status_ok();
    response.assert_text("Hello Webstack!\n");
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "text/plain"
    );

    // Private content is hidden from anonymous callers
    api.server
        .get(&format!("/files/{id}/data"))
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = api
        .server
        .put(&format!("/files/{id}/publish"))
        .add_header("x-token", &token)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["isPublic"], true);

    let response = api.server.get(&format!("/files/{id}/data")).await;
    response.assert_status_ok();
    response.assert_text("Hello Webstack!\n");

    let response = api
        .server
        .put(&format!("/files/{id}/unpublish"))
        .add_header("x-token", &token)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["isPublic"], false);

    let response = api
        .server
        .get(&format!("/files/{id}/data"))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "Not found" }));
}

#[tokio::test]
async fn test_upload_requires_token() {
    let api = create_test_api().await;

    let response = api
        .server
        .post("/files")
        .json(&json!({ "name": "a.txt", "type": "file", "data": "SGVsbG8=" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_upload_validation_errors() {
    let api = create_test_api().await;
    let token = register_and_login(&api.server, "bob@dylan.com", "toto1234!").await;

    let cases = [
        (json!({ "type": "file", "data": "SGVsbG8=" }), "Missing name"),
        (json!({ "name": "a.txt", "data": "SGVsbG8=" }), "Missing type"),
        (
            json!({ "name": "a.txt", "type": "video", "data": "SGVsbG8=" }),
            "Missing type",
        ),
        (json!({ "name": "a.txt", "type": "file" }), "Missing data"),
        (json!({ "name": "a.txt", "type": "image", "data": "" }), "Missing data"),
        (
            json!({ "name": "a.txt", "type": "file", "data": "not base64!!" }),
            "Invalid data",
        ),
    ];

    for (body, expected) in cases {
        let response = api
            .server
            .post("/files")
            .add_header("x-token", &token)
            .json(&body)
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": expected }));
    }
}

#[tokio::test]
async fn test_upload_too_large() {
    let api = create_test_api_with_limit(8).await;
    let token = register_and_login(&api.server, "bob@dylan.com", "toto1234!").await;

    let response = api
        .server
        .post("/files")
        .add_header("x-token", &token)
        .json(&json!({
            "name": "big.txt",
            "type": "file",
            "data": STANDARD.encode("more than eight bytes"),
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "File too large" }));
}

#[tokio::test]
async fn test_upload_over_body_limit() {
    let api = create_test_api_with_limit(8).await;
    let token = register_and_login(&api.server, "bob@dylan.com", "toto1234!").await;

    let response = api
        .server
        .post("/files")
        .add_header("x-token", &token)
        .json(&json!({
            "name": "huge.bin",
            "type": "file",
            "data": STANDARD.encode(vec![7u8; 200 * 1024]),
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "File too large" }));
}

#[tokio::test]
async fn test_upload_malformed_body() {
    let api = create_test_api().await;
    let token = register_and_login(&api.server, "bob@dylan.com", "toto1234!").await;

    let response = api
        .server
        .post("/files")
        .add_header("x-token", &token)
        .json(&json!({ "name": "a.txt", "type": "file", "isPublic": "yes", "data": "SGVsbG8=" }))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Invalid request body" }));

    // No body at all reports the first missing field
    let response = api
        .server
        .post("/files")
        .add_header("x-token", &token)
        .expect_failure()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Missing name" }));
}

#[tokio::test]
async fn test_upload_field_checks_precede_data_decoding() {
    let api = create_test_api().await;
    let token = register_and_login(&api.server, "bob@dylan.com", "toto1234!").await;

    let cases = [
        (json!({ "type": "file", "data": "not base64!!" }), "Missing name"),
        (json!({ "name": "a.txt", "data": "not base64!!" }), "Missing type"),
        (
            json!({ "name": "a.txt", "type": "video", "data": "not base64!!" }),
            "Missing type",
        ),
    ];
    for (body, expected) in cases {
        let response = api
            .server
            .post("/files")
            .add_header("x-token", &token)
            .json(&body)
            .expect_failure()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": expected }));
    }

    // Folders ignore any data they are sent
    let response = api
        .server
        .post("/files")
        .add_header("x-token", &token)
        .json(&json!({ "name": "docs", "type": "folder", "data": "not base64!!" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["type"], "folder");
}

#[tokio::test]
async fn test_upload_into_folder() {
    let api = create_test_api().await;
    let token = register_and_login(&api.server, "bob@dylan.com", "toto1234!").await;

    let folder = create_folder(&api.server, &token, "docs", json!("0")).await;
    assert_eq!(folder["type"], "folder");
    let folder_id = folder["id"].as_str().unwrap();

    let response = api
        .server
        .post("/files")
        .add_header("x-token", &token)
        .json(&json!({
            "name": "inner.txt",
            "type": "file",
            "parentId": folder_id,
            "isPublic": true,
            "data": STANDARD.encode("inside"),
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let file: Value = response.json();
    assert_eq!(file["parentId"], folder_id);
    assert_eq!(file["isPublic"], true);

    let children: Value = api
        .server
        .get("/files")
        .add_query_param("parentId", folder_id)
        .add_header("x-token", &token)
        .await
        .json();
    let children = children.as_array().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0]["name"], "inner.txt");
}

#[tokio::test]
async fn test_upload_parent_checks() {
    let api = create_test_api().await;
    let token = register_and_login(&api.server, "bob@dylan.com", "toto1234!").await;
    let file = upload_text(&api.server, &token, "a.txt", "Hello").await;

    let cases = [
        (json!("not-an-id"), "Parent not found"),
        (json!(42), "Parent not found"),
        (
            json!("2b6f0cc9-4b5c-4e6b-9d8f-6a7a2c3e1f00"),
            "Parent not found",
        ),
        (file["id"].clone(), "Parent is not a folder"),
    ];

    for (parent, expected) in cases {
        let response = api
            .server
            .post("/files")
            .add_header("x-token", &token)
            .json(&json!({ "name": "sub", "type": "folder", "parentId": parent }))
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": expected }));
    }
}

#[tokio::test]
async fn test_get_file() {
    let api = create_test_api().await;
    let token = register_and_login(&api.server, "bob@dylan.com", "toto1234!").await;
    let file = upload_text(&api.server, &token, "a.txt", "Hello").await;
    let id = file["id"].as_str().unwrap();

    let response = api
        .server
        .get(&format!("/files/{id}"))
        .add_header("x-token", &token)
        .await;
    response.assert_status_ok();
    response.assert_json(&file);

    api.server
        .get("/files/unknown")
        .add_header("x-token", &token)
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    api.server
        .get(&format!("/files/{id}"))
        .expect_failure()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_files_are_isolated_between_users() {
    let api = create_test_api().await;
    let bob = register_and_login(&api.server, "bob@dylan.com", "toto1234!").await;
    let ann = register_and_login(&api.server, "ann@example.com", "secret").await;
    let file = upload_text(&api.server, &bob, "a.txt", "Hello").await;
    let id = file["id"].as_str().unwrap();

    api.server
        .get(&format!("/files/{id}"))
        .add_header("x-token", &ann)
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    api.server
        .put(&format!("/files/{id}/publish"))
        .add_header("x-token", &ann)
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    api.server
        .get(&format!("/files/{id}/data"))
        .add_header("x-token", &ann)
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let listed: Value = api
        .server
        .get("/files")
        .add_header("x-token", &ann)
        .await
        .json();
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_public_file_readable_by_other_user() {
    let api = create_test_api().await;
    let bob = register_and_login(&api.server, "bob@dylan.com", "toto1234!").await;
    let ann = register_and_login(&api.server, "ann@example.com", "secret").await;
    let file = upload_text(&api.server, &bob, "a.txt", "Hello").await;
    let id = file["id"].as_str().unwrap();

    api.server
        .put(&format!("/files/{id}/publish"))
        .add_header("x-token", &bob)
        .await
        .assert_status_ok();

    let response = api
        .server
        .get(&format!("/files/{id}/data"))
        .add_header("x-token", &ann)
        .await;
    response.assert_status_ok();
    response.assert_text("Hello");
}

#[tokio::test]
async fn test_list_pagination() {
    let api = create_test_api().await;
    let token = register_and_login(&api.server, "bob@dylan.com", "toto1234!").await;

    for i in 0..25 {
        upload_text(&api.server, &token, &format!("file{i}.txt"), "x").await;
    }

    let list = |page: &'static str| {
        api.server
            .get("/files")
            .add_query_param("page", page)
            .add_header("x-token", &token)
    };

    let first: Vec<Value> = list("0").await.json();
    let second: Vec<Value> = list("1").await.json();
    let third: Vec<Value> = list("2").await.json();

    assert_eq!(first.len(), 20);
    assert_eq!(second.len(), 5);
    assert!(third.is_empty());

    assert_eq!(first[0]["name"], "file0.txt");
    assert_eq!(second[0]["name"], "file20.txt");
    for item in &second {
        assert!(!first.iter().any(|f| f["id"] == item["id"]));
    }

    // Unparsable pages fall back to the first one
    let fallback: Vec<Value> = list("abc").await.json();
    assert_eq!(fallback, first);
}

#[tokio::test]
async fn test_list_malformed_parent_is_empty() {
    let api = create_test_api().await;
    let token = register_and_login(&api.server, "bob@dylan.com", "toto1234!").await;
    upload_text(&api.server, &token, "a.txt", "Hello").await;

    let response = api
        .server
        .get("/files")
        .add_query_param("parentId", "garbage")
        .add_header("x-token", &token)
        .await;

    response.assert_status_ok();
    response.assert_json(&json!([]));
}

#[tokio::test]
async fn test_folder_has_no_data() {
    let api = create_test_api().await;
    let token = register_and_login(&api.server, "bob@dylan.com", "toto1234!").await;
    let folder = create_folder(&api.server, &token, "docs", json!(0)).await;
    let id = folder["id"].as_str().unwrap();

    let response = api
        .server
        .get(&format!("/files/{id}/data"))
        .add_header("x-token", &token)
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "A folder doesn't have content" }));
}

#[tokio::test]
async fn test_data_size_parameter() {
    let api = create_test_api().await;
    let token = register_and_login(&api.server, "bob@dylan.com", "toto1234!").await;

    let response = api
        .server
        .post("/files")
        .add_header("x-token", &token)
        .json(&json!({
            "name": "pic.png",
            "type": "image",
            "data": STANDARD.encode([0x89, b'P', b'N', b'G']),
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    for size in ["abc", "123"] {
        let response = api
            .server
            .get(&format!("/files/{id}/data"))
            .add_query_param("size", size)
            .add_header("x-token", &token)
            .expect_failure()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "Invalid size" }));
    }

    // No rendition has been generated yet
    api.server
        .get(&format!("/files/{id}/data"))
        .add_query_param("size", "250")
        .add_header("x-token", &token)
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = api
        .server
        .get(&format!("/files/{id}/data"))
        .add_header("x-token", &token)
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "image/png"
    );
}

#[tokio::test]
async fn test_publish_unknown_file() {
    let api = create_test_api().await;
    let token = register_and_login(&api.server, "bob@dylan.com", "toto1234!").await;

    let response = api
        .server
        .put("/files/2b6f0cc9-4b5c-4e6b-9d8f-6a7a2c3e1f00/publish")
        .add_header("x-token", &token)
        .expect_failure()
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "Not found" }));
}
