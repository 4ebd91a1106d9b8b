use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use product_catalog::{
    app::admin::{self, handler::AppState, service::ProductService},
    CatalogStore,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;

struct TestCatalog {
    _dir: TempDir,
    admin_file: PathBuf,
    frontend_file: PathBuf,
    app: Router,
}

impl TestCatalog {
    async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let admin_file = dir.path().join("admin/products.json");
        let frontend_file = dir.path().join("frontend/products.json");

        let store = CatalogStore::new(&admin_file, &frontend_file);
        store.ensure_initialized().await.unwrap();

        let state = AppState {
            product_service: ProductService::new(store),
        };
        let app = admin::router(state);

        Self {
            _dir: dir,
            admin_file,
            frontend_file,
            app,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_raw(&self, method: Method, uri: &str, body: &str) -> StatusCode {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.app.clone().oneshot(request).await.unwrap().status()
    }

    async fn create(&self, body: Value) -> Value {
        let (status, bytes) = self.send(Method::POST, "/api/products", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn list(&self) -> Value {
        let (status, bytes) = self.send(Method::GET, "/api/products", None).await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&bytes).unwrap()
    }

    fn admin_bytes(&self) -> Vec<u8> {
        std::fs::read(&self.admin_file).unwrap()
    }

    fn frontend_bytes(&self) -> Vec<u8> {
        std::fs::read(&self.frontend_file).unwrap()
    }

    fn assert_replicas_identical(&self) {
        assert_eq!(self.admin_bytes(), self.frontend_bytes());
    }
}

#[tokio::test]
async fn test_list_empty_catalog() {
    let catalog = TestCatalog::new().await;
    assert_eq!(catalog.list().await, json!([]));
}

#[tokio::test]
async fn test_create_assigns_ids_and_defaults() {
    let catalog = TestCatalog::new().await;

    let first = catalog.create(json!({})).await;
    assert_eq!(
        first,
        json!({
            "id": 1,
            "name": "Untitled",
            "price": 0,
            "description": "",
            "categories": []
        })
    );

    let second = catalog
        .create(json!({ "name": "Lamp", "price": 12.5, "categories": ["home"], "stock": 4 }))
        .await;
    assert_eq!(second["id"], json!(2));
    assert_eq!(second["name"], json!("Lamp"));
    assert_eq!(second["stock"], json!(4));

    catalog.assert_replicas_identical();
    assert_eq!(catalog.list().await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_uses_max_existing_id() {
    let catalog = TestCatalog::new().await;
    std::fs::write(
        &catalog.admin_file,
        json!([{ "id": 1 }, { "id": 5 }, { "id": 3 }]).to_string(),
    )
    .unwrap();

    let created = catalog.create(json!({ "name": "Next", "id": 100 })).await;
    assert_eq!(created["id"], json!(6));
    catalog.assert_replicas_identical();
}

#[tokio::test]
async fn test_update_merges_and_keeps_id() {
    let catalog = TestCatalog::new().await;
    for _ in 0..7 {
        catalog.create(json!({ "name": "Filler" })).await;
    }

    let (status, bytes) = catalog
        .send(
            Method::PUT,
            "/api/products/7",
            Some(json!({ "id": 42, "price": 99, "color": "blue" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let updated: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(updated["id"], json!(7));
    assert_eq!(updated["name"], json!("Filler"));
    assert_eq!(updated["price"], json!(99));
    assert_eq!(updated["color"], json!("blue"));

    let stored = catalog.list().await;
    let ids: Vec<u64> = stored
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(stored[6]["color"], json!("blue"));
    catalog.assert_replicas_identical();
}

#[tokio::test]
async fn test_update_missing_leaves_files_unchanged() {
    let catalog = TestCatalog::new().await;
    for name in ["A", "B", "C"] {
        catalog.create(json!({ "name": name })).await;
    }
    let admin_before = catalog.admin_bytes();
    let frontend_before = catalog.frontend_bytes();

    let (status, bytes) = catalog
        .send(Method::PUT, "/api/products/999", Some(json!({ "name": "Z" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], json!("NOT_FOUND"));
    assert_eq!(body["code"], json!(404));

    assert_eq!(catalog.admin_bytes(), admin_before);
    assert_eq!(catalog.frontend_bytes(), frontend_before);
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let catalog = TestCatalog::new().await;
    for name in ["A", "B", "C"] {
        catalog.create(json!({ "name": name })).await;
    }

    let (status, bytes) = catalog.send(Method::DELETE, "/api/products/2", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(bytes.is_empty());

    let remaining = catalog.list().await;
    assert_eq!(remaining.as_array().unwrap().len(), 2);
    assert!(remaining
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["id"] != json!(2)));
    catalog.assert_replicas_identical();

    let (status, _) = catalog.send(Method::DELETE, "/api/products/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_after_file_removed_returns_empty() {
    let catalog = TestCatalog::new().await;
    catalog.create(json!({ "name": "A" })).await;

    std::fs::remove_file(&catalog.admin_file).unwrap();

    assert_eq!(catalog.list().await, json!([]));
}

#[tokio::test]
async fn test_create_stores_off_type_fields_verbatim() {
    let catalog = TestCatalog::new().await;

    let created = catalog
        .create(json!({ "name": "Pen", "price": "12.00", "categories": "office" }))
        .await;
    assert_eq!(created["price"], json!("12.00"));
    assert_eq!(created["categories"], json!("office"));

    let stored = catalog.list().await;
    assert_eq!(stored[0]["price"], json!("12.00"));
    catalog.assert_replicas_identical();
}

#[tokio::test]
async fn test_create_keeps_existing_records_with_off_type_fields() {
    let catalog = TestCatalog::new().await;
    std::fs::write(
        &catalog.admin_file,
        json!([
            { "id": 1, "name": "Lamp", "price": "9.99" },
            { "id": 2, "name": "Desk", "price": 50 }
        ])
        .to_string(),
    )
    .unwrap();

    let created = catalog.create(json!({ "name": "Chair" })).await;
    assert_eq!(created["id"], json!(3));

    let stored = catalog.list().await;
    let names: Vec<&str> = stored
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Lamp", "Desk", "Chair"]);
    assert_eq!(stored[0]["price"], json!("9.99"));
    catalog.assert_replicas_identical();
}

#[tokio::test]
async fn test_create_with_max_id_is_internal_error() {
    let catalog = TestCatalog::new().await;
    let seeded = json!([{ "id": u64::MAX, "name": "Last" }]).to_string();
    std::fs::write(&catalog.admin_file, &seeded).unwrap();

    let (status, bytes) = catalog
        .send(Method::POST, "/api/products", Some(json!({ "name": "Overflow" })))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], json!("INTERNAL_SERVER_ERROR"));

    assert_eq!(std::fs::read_to_string(&catalog.admin_file).unwrap(), seeded);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let catalog = TestCatalog::new().await;

    let status = catalog
        .send_raw(Method::POST, "/api/products", "{ not json")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = catalog.send_raw(Method::POST, "/api/products", "[1, 2]").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(catalog.list().await, json!([]));
}

#[tokio::test]
async fn test_invalid_id_is_bad_request() {
    let catalog = TestCatalog::new().await;

    let (status, _) = catalog
        .send(Method::PUT, "/api/products/abc", Some(json!({ "name": "Z" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = catalog.send(Method::DELETE, "/api/products/-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unmatched_routes_are_not_found() {
    let catalog = TestCatalog::new().await;

    let (status, bytes) = catalog.send(Method::GET, "/api/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body.get("error").is_some());

    let (status, _) = catalog.send(Method::PATCH, "/api/products", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = catalog.send(Method::GET, "/api/products/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_failure_is_internal_error() {
    let dir = TempDir::new().unwrap();
    let store = CatalogStore::new(
        dir.path().join("products.json"),
        dir.path().join("missing/products.json"),
    );
    let app = admin::router(AppState {
        product_service: ProductService::new(store),
    });

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"Lamp"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
