//! Product endpoints
//!
//! Each handler composes extractor validation, one repository call and a
//! JSON response. No handler keeps state between requests.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, Paging, ValidProductId};
use crate::http::server::AppState;
use crate::models::{Product, ProductPayload};

/// Delete response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub result: &'static str,
}

/// GET /api/products?start=N&count=M - list products
async fn list_products(
    State(state): State<Arc<AppState>>,
    Paging(page): Paging,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.store.list(page).await?;
    tracing::debug!(
        start = page.start,
        count = page.count,
        returned = products.len(),
        "listed products"
    );
    Ok(Json(products))
}

/// POST /api/products - create a product
async fn create_product(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let id = state.store.insert(&payload).await?;
    tracing::info!(%id, "product created");

    Ok((StatusCode::CREATED, Json(payload.with_id(id))))
}

/// GET /api/products/{id} - get a single product
async fn get_product(
    State(state): State<Arc<AppState>>,
    ValidProductId(id): ValidProductId,
) -> Result<Json<Product>, ApiError> {
    let product = state.store.fetch(id).await?;
    Ok(Json(product))
}

/// PUT /api/products/{id} - overwrite name and price
///
/// The path id wins over any id in the body. The response echoes the
/// submitted values rather than re-reading the row.
async fn update_product(
    State(state): State<Arc<AppState>>,
    ValidProductId(id): ValidProductId,
    JsonBody(payload): JsonBody<ProductPayload>,
) -> Result<Json<Product>, ApiError> {
    let affected = state.store.update(id, &payload).await?;
    if affected == 0 {
        return Err(ApiError::NotFound { id });
    }

    tracing::info!(%id, "product updated");
    Ok(Json(payload.with_id(id)))
}

/// DELETE /api/products/{id} - hard delete
///
/// Idempotent: deleting a missing id still reports success.
async fn delete_product(
    State(state): State<Arc<AppState>>,
    ValidProductId(id): ValidProductId,
) -> Result<Json<DeleteResponse>, ApiError> {
    let affected = state.store.delete(id).await?;
    tracing::info!(%id, affected, "product deleted");

    Ok(Json(DeleteResponse { result: "success" }))
}

/// Product routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
