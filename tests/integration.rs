use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::fs;
use std::io::{Cursor, Read};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use rax_file_access::config::ServerConfig;
use rax_file_access::server::{AppState, router};

struct TestEnv {
    files: TempDir,
    prompts: TempDir,
    app: Router,
}

fn setup_test_env() -> TestEnv {
    let files = tempfile::tempdir().unwrap();
    let prompts = tempfile::tempdir().unwrap();

    let toml = format!(
        "base_directory = {:?}\nstatic_base_url = \"/static\"\nprompts_directory = {:?}\n",
        files.path().display().to_string(),
        prompts.path().display().to_string(),
    );
    let config = ServerConfig::from_toml(&toml).unwrap();
    let app = router(Arc::new(AppState::from_config(&config)));

    TestEnv {
        files,
        prompts,
        app,
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let env = setup_test_env();
    let (status, body) = send_json(&env.app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_files() {
    let env = setup_test_env();
    fs::create_dir(env.files.path().join("sub")).unwrap();
    fs::write(env.files.path().join("sub").join("b.txt"), "12345").unwrap();
    fs::write(env.files.path().join("a.txt"), "hi").unwrap();

    let (status, body) = send_json(&env.app, Method::GET, "/api/files", None).await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "sub");
    assert_eq!(entries[0]["size"], 5);
    assert_eq!(entries[1]["url"], "/static/a.txt");
}

#[tokio::test]
async fn test_list_missing_and_invalid() {
    let env = setup_test_env();

    let (status, body) = send_json(&env.app, Method::GET, "/api/files?path=nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));

    let (status, _) = send_json(&env.app, Method::GET, "/api/files?path=../etc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_download_file() {
    let env = setup_test_env();
    fs::write(env.files.path().join("report.csv"), "a,b\n1,2\n").unwrap();

    let request = Request::builder()
        .uri("/api/files?path=report.csv&download=true")
        .body(Body::empty())
        .unwrap();
    let response = env.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/octet-stream"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"report.csv\""
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"a,b\n1,2\n");

    let (status, _) = send(
        &env.app,
        Method::GET,
        "/api/files?path=missing.csv&download=true",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_zip() {
    let env = setup_test_env();
    let root = env.files.path().join("bundle");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("a.txt"), "hi").unwrap();
    fs::write(root.join("sub").join("b.txt"), "bye").unwrap();

    let request = Request::builder()
        .uri("/api/files?path=bundle&zip=1")
        .body(Body::empty())
        .unwrap();
    let response = env.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/zip");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"bundle.zip\""
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut contents = String::new();
    archive
        .by_name("sub/b.txt")
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    assert_eq!(contents, "bye");

    let (status, _) = send(&env.app, Method::GET, "/api/files?path=nothing&zip=1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_content_preview() {
    let env = setup_test_env();
    fs::write(env.files.path().join("readme.md"), "# Title").unwrap();
    fs::write(env.files.path().join("tool.exe"), [0u8, 1]).unwrap();
    fs::create_dir(env.files.path().join("dir")).unwrap();

    let (status, body) =
        send_json(&env.app, Method::GET, "/api/files?path=readme.md&content=true", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "# Title");

    let (status, _) =
        send_json(&env.app, Method::GET, "/api/files?path=tool.exe&content=true", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        send_json(&env.app, Method::GET, "/api/files?path=dir&content=true", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        send_json(&env.app, Method::GET, "/api/files?path=gone.md&content=true", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_single_and_batch() {
    let env = setup_test_env();
    fs::create_dir_all(env.files.path().join("tree").join("leaf")).unwrap();
    fs::write(env.files.path().join("x.txt"), "x").unwrap();
    fs::write(env.files.path().join("y.txt"), "y").unwrap();

    let (status, body) = send_json(&env.app, Method::DELETE, "/api/files?path=tree", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "File deleted successfully");
    assert!(!env.files.path().join("tree").exists());

    let (status, _) = send_json(&env.app, Method::DELETE, "/api/files?path=tree", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = send_json(
        &env.app,
        Method::DELETE,
        "/api/files",
        Some(json!({ "paths": ["x.txt", "missing.txt", "y.txt"] })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["deleted"], json!(["x.txt", "y.txt"]));
    assert_eq!(body["failed"][0]["path"], "missing.txt");
    assert!(!env.files.path().join("y.txt").exists());
}

#[tokio::test]
async fn test_prompt_crud() {
    let env = setup_test_env();

    let (status, body) = send_json(
        &env.app,
        Method::POST,
        "/api/prompts",
        Some(json!({ "folder": "writing", "filename": "tone.yml", "content": "tone: calm" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(env.prompts.path().join("writing").join("tone.yml").is_file());

    let (status, body) = send_json(
        &env.app,
        Method::GET,
        "/api/prompts?folder=writing&filename=tone.yml",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "tone: calm");

    let (status, body) = send_json(&env.app, Method::GET, "/api/prompts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["folders"],
        json!([{ "folder": "writing", "prompts": [{ "name": "tone.yml", "path": "writing/tone.yml" }] }])
    );

    let (status, _) = send_json(
        &env.app,
        Method::DELETE,
        "/api/prompts?folder=writing&filename=tone.yml",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(
        &env.app,
        Method::DELETE,
        "/api/prompts?folder=writing&filename=tone.yml",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(
        &env.app,
        Method::GET,
        "/api/prompts?folder=writing&filename=tone.yml",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_prompt_missing_params() {
    let env = setup_test_env();

    let (status, _) = send_json(
        &env.app,
        Method::POST,
        "/api/prompts",
        Some(json!({ "folder": "writing", "content": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(&env.app, Method::DELETE, "/api/prompts?folder=writing", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_prompt_folder_view_and_order() {
    let env = setup_test_env();

    send_json(
        &env.app,
        Method::POST,
        "/api/prompts",
        Some(json!({ "folder": "ops", "action": "deploy", "filename": "plan.yml", "content": "" })),
    )
    .await;

    let (status, body) = send_json(&env.app, Method::GET, "/api/prompts?folder=ops", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["actions"], json!(["deploy"]));
    assert_eq!(body["prompts"], json!([]));

    let (_, body) = send_json(
        &env.app,
        Method::GET,
        "/api/prompts/entries?folder=ops&action=deploy",
        None,
    )
    .await;
    assert_eq!(body, json!(["plan.yml"]));

    // Opening a folder creates it
    let (status, _) = send_json(&env.app, Method::GET, "/api/prompts?folder=fresh", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send_json(&env.app, Method::GET, "/api/prompts/folders", None).await;
    assert_eq!(body, json!(["fresh", "ops"]));

    let (_, body) = send_json(&env.app, Method::GET, "/api/prompts/order?folder=ops", None).await;
    assert_eq!(body, json!([]));

    let (status, _) = send_json(
        &env.app,
        Method::PUT,
        "/api/prompts/order",
        Some(json!({ "folder": "ops", "order": ["b", "a"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send_json(&env.app, Method::GET, "/api/prompts/order?folder=ops", None).await;
    assert_eq!(body, json!(["b", "a"]));
}
