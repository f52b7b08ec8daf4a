//! Router tests driven with `tower::ServiceExt::oneshot`, using the scripted
//! SDK so no `dotnet` is needed.

use std::io::Cursor;
use std::path::Path;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use netscaff_server::{
    config::AppConfig,
    http::{AppState, PARTIAL_HEADER, router},
};

const SHOP: &str = include_str!("fixtures/shop.json");

fn app(temp_root: &Path, dev_endpoints: bool) -> Router {
    let mut config = AppConfig::default();
    config.workspace.temp_root = temp_root.to_path_buf();
    config.server.dev_endpoints = dev_endpoints;
    router(AppState::new(config, true))
}

async fn post(app: Router, uri: &str, body: impl Into<String>) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.into()))
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn scaffold_download_streams_a_zip() {
    let temp = tempfile::tempdir().unwrap();

    let response = post(app(temp.path(), false), "/api/project/scaffold-download", SHOP).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/zip");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Shop.zip\""
    );
    assert!(response.headers().get(PARTIAL_HEADER).is_none());

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let zip = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let names: Vec<&str> = zip.file_names().collect();
    assert!(names.contains(&"Shop/Shop.sln"));
    assert!(names.contains(&"Shop/src/Shop.Domain/Entities/Product.cs"));
    assert!(names.contains(&"Shop/src/Shop.Api/Controllers/CategoriesController.cs"));
    assert!(names.iter().all(|n| !n.contains("/bin/") && !n.contains("/obj/")));
}

#[tokio::test]
async fn invalid_scaffold_is_rejected_and_leaves_no_workspace() {
    let temp = tempfile::tempdir().unwrap();

    let response = post(
        app(temp.path(), false),
        "/api/project/scaffold-download",
        json!({ "project": { "name": "Shop" }, "entities": [] }).to_string(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("no entities"));
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let temp = tempfile::tempdir().unwrap();

    let response = post(app(temp.path(), false), "/api/project/validate", "{ \"project\": ").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid request"));
}

#[tokio::test]
async fn validate_lists_every_problem() {
    let temp = tempfile::tempdir().unwrap();

    let valid = json_body(post(app(temp.path(), false), "/api/project/validate", SHOP).await).await;
    assert_eq!(valid["success"], true);
    assert_eq!(valid["errors"], json!([]));

    let response = post(
        app(temp.path(), false),
        "/api/project/validate",
        include_str!("fixtures/invalid.json"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let invalid = json_body(response).await;
    assert_eq!(invalid["success"], false);
    assert_eq!(invalid["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn health_reports_version() {
    let temp = tempfile::tempdir().unwrap();

    let response = get(app(temp.path(), false), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn dotnet_status_uses_the_offline_sdk() {
    let temp = tempfile::tempdir().unwrap();

    let body = json_body(get(app(temp.path(), false), "/api/dotnet/status").await).await;

    assert_eq!(body["installed"], true);
    assert!(body["version"].as_str().unwrap().starts_with("8."));
}

#[tokio::test]
async fn dev_routes_are_hidden_by_default() {
    let temp = tempfile::tempdir().unwrap();

    let response = post(app(temp.path(), false), "/api/dev/scaffold", SHOP).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dev_routes_extend_an_existing_solution() {
    let temp = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let mut request: Value = serde_json::from_str(SHOP).unwrap();
    request["project"]["outputPath"] = json!(out.path());

    let response = post(app(temp.path(), true), "/api/dev/scaffold", request.to_string()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = json_body(response).await;
    assert_eq!(report["success"], true);
    assert!(out.path().join("Shop/Shop.sln").is_file());

    let order = json!({
        "project": { "name": "Shop", "outputPath": out.path() },
        "entity": {
            "name": "Order",
            "properties": [{ "name": "Total", "type": "decimal" }]
        }
    });
    let step = json_body(post(app(temp.path(), true), "/api/dev/entity", order.to_string()).await).await;
    assert_eq!(step["success"], true, "{step}");
    assert!(
        out.path()
            .join("Shop/src/Shop.Domain/Entities/Order.cs")
            .is_file()
    );

    let again = post(app(temp.path(), true), "/api/dev/scaffold", request.to_string()).await;
    assert_eq!(again.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn dev_generator_without_a_solution_is_not_found() {
    let temp = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let order = json!({
        "project": { "name": "Shop", "outputPath": out.path() },
        "entity": { "name": "Order", "properties": [] }
    });

    let response = post(app(temp.path(), true), "/api/dev/command", order.to_string()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
