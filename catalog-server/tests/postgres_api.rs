//! Product API against a real Postgres
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p catalog-server -- --ignored --test-threads=1

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use catalog_server::db::{create_pool, ensure_schema};
use catalog_server::http::{build_router, AppState, FrontendAssets, ServerConfig};
use catalog_server::ProductRepo;

async fn app() -> Router {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&url).await.expect("pool creation failed");
    ensure_schema(&pool).await.expect("schema bootstrap failed");
    sqlx::query("DELETE FROM products")
        .execute(&pool)
        .await
        .expect("clear failed");
    sqlx::query("ALTER SEQUENCE products_id_seq RESTART WITH 1")
        .execute(&pool)
        .await
        .expect("sequence reset failed");

    let frontend = FrontendAssets::new("<html></html>", "does-not-exist/static");
    build_router(
        AppState::new(Arc::new(ProductRepo::new(pool)), frontend),
        &ServerConfig::default(),
    )
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let body = body.map_or_else(Body::empty, |b| Body::from(b.to_owned()));
    let response = app
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
#[ignore = "requires database"]
async fn crud_round_trip() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(r#"{"name": "test product", "price": 45.67}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 1, "name": "test product", "price": 45.67}));

    let (status, body) = send(&app, "GET", "/api/products/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], json!(45.67));

    let (status, body) = send(
        &app,
        "PUT",
        "/api/products/1",
        Some(r#"{"name": "test updated product", "price": 78.78}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(1));

    let (status, body) = send(&app, "DELETE", "/api/products/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": "success"}));

    let (status, body) = send(&app, "GET", "/api/products/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Product not found"}));

    let (status, _) = send(&app, "DELETE", "/api/products/1", None).await;
    assert_eq!(status, StatusCode::OK);
}
